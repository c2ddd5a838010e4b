use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::aspects::{
    build_aspects, find_aspect, AspectCalculator, AspectSettings, MatchPolicy, OrbPolicy, Pairing,
    Timing,
};
use urania::ephemeris::{BodyPosition, ChartLayer, Position};

const BODIES: [&str; 10] = [
    "sun", "moon", "mercury", "venus", "mars", "jupiter", "saturn", "uranus", "neptune", "pluto",
];

fn layer(offset: f64) -> ChartLayer {
    let mut layer = ChartLayer::new();
    for (i, id) in BODIES.iter().enumerate() {
        layer.push(BodyPosition::body(
            *id,
            Position {
                longitude: (offset + i as f64 * 31.0) % 360.0,
                speed: 1.0 - i as f64 * 0.1,
            },
        ));
    }
    layer
}

fn bench_find_aspect(c: &mut Criterion) {
    let orbs = OrbPolicy::default();

    c.bench_function("find_aspect", |b| {
        b.iter(|| {
            find_aspect(
                black_box(100.0),
                black_box(219.5),
                black_box("saturn"),
                black_box(&orbs),
                MatchPolicy::FirstMatch,
            )
        })
    });
}

fn bench_within_chart(c: &mut Criterion) {
    let natal = layer(3.0);
    let settings = AspectSettings::default();

    c.bench_function("build_aspects_within_chart", |b| {
        b.iter(|| {
            build_aspects(
                black_box(&natal.bodies),
                black_box(&natal.bodies),
                Pairing::WithinChart,
                Timing::Static,
                black_box(&settings),
            )
        })
    });
}

fn bench_transit_to_natal(c: &mut Criterion) {
    let natal = layer(3.0);
    let transit = layer(121.0);
    let calculator = AspectCalculator::default();
    let as_of = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    c.bench_function("between_charts_with_peaks", |b| {
        b.iter(|| {
            calculator.between_charts(
                "transit",
                "natal",
                black_box(&transit),
                black_box(&natal),
                Timing::TransitAt(as_of),
            )
        })
    });
}

criterion_group!(benches, bench_find_aspect, bench_within_chart, bench_transit_to_natal);
criterion_main!(benches);
