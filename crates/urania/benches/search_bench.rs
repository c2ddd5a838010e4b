use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::ephemeris::{EphemerisError, EphemerisProvider, GeoLocation, Position};
use urania::events::{phase_change, search_events, solar_return, Detector, SearchSettings};
use urania::geometry::normalize_longitude;
use urania::houses::{HouseCusps, HouseSystem};

/// Sun and Moon on mean circular motion
struct MeanMotion {
    epoch: DateTime<Utc>,
}

impl EphemerisProvider for MeanMotion {
    fn position(&self, instant: DateTime<Utc>, body: &str) -> Result<Position, EphemerisError> {
        let days = (instant - self.epoch).num_milliseconds() as f64 / 86_400_000.0;
        let (start, speed) = match body {
            "sun" => (280.46, 0.985_647),
            "moon" => (218.32, 13.176_396),
            other => {
                return Err(EphemerisError::UnknownBody {
                    body: other.to_string(),
                })
            }
        };
        Ok(Position {
            longitude: normalize_longitude(start + speed * days),
            speed,
        })
    }

    fn house_cusps(
        &self,
        _instant: DateTime<Utc>,
        _location: GeoLocation,
        _system: HouseSystem,
    ) -> Result<HouseCusps, EphemerisError> {
        Ok(HouseCusps::equal(0.0, 270.0))
    }
}

fn bench_phase_change(c: &mut Criterion) {
    let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let provider = MeanMotion { epoch };
    let settings = SearchSettings::default();

    c.bench_function("phase_change_one_week", |b| {
        b.iter(|| phase_change(&provider, black_box(epoch), epoch + Duration::days(7), &settings))
    });
}

fn bench_month_of_ingresses(c: &mut Criterion) {
    let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let provider = MeanMotion { epoch };
    let settings = SearchSettings::default();
    let detector = Detector::Sign("moon".to_string());

    c.bench_function("moon_ingresses_30_days", |b| {
        b.iter(|| {
            search_events(
                &provider,
                black_box(&detector),
                epoch,
                epoch + Duration::days(30),
                &settings,
            )
        })
    });
}

fn bench_solar_return(c: &mut Criterion) {
    let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let provider = MeanMotion { epoch };
    let settings = SearchSettings::default();

    c.bench_function("solar_return", |b| {
        b.iter(|| solar_return(&provider, black_box(280.46), epoch, black_box(2030), &settings))
    });
}

criterion_group!(benches, bench_phase_change, bench_month_of_ingresses, bench_solar_return);
criterion_main!(benches);
