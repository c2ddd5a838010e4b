mod chart_io;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use urania::aspects::{AspectCalculator, Timing};
use urania::config::{load_default_config, load_engine_config, EngineConfig};
#[cfg(feature = "swiss-ephemeris")]
use urania::ephemeris::GeoLocation;
use urania::houses::place_bodies;
use urania::progression::progressed_instant;

use chart_io::{parse_instant, print_json, read_layer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Aspects, houses and timed events for astrological charts")]
struct Args {
    /// Engine config (TOML). Defaults to configs/urania.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aspects within one chart, or from a second chart onto the first.
    Aspects {
        /// Chart JSON (bodies and optional houses)
        #[arg(long)]
        chart: PathBuf,
        /// Moving chart (transits, progressions) aspecting `--chart`
        #[arg(long)]
        other: Option<PathBuf>,
        /// Estimate peaks as of this instant (requires --other)
        #[arg(long, value_parser = parse_instant, requires = "other")]
        at: Option<DateTime<Utc>>,
    },
    /// House placement of every point of a chart.
    Houses {
        #[arg(long)]
        chart: PathBuf,
    },
    /// Instant of the secondary progressed chart.
    Progressed {
        #[arg(long, value_parser = parse_instant)]
        birth: DateTime<Utc>,
        #[arg(long, value_parser = parse_instant)]
        as_of: DateTime<Utc>,
    },
    /// Exact solar return for a year.
    #[cfg(feature = "swiss-ephemeris")]
    SolarReturn {
        #[arg(long, value_parser = parse_instant)]
        birth: DateTime<Utc>,
        #[arg(long)]
        year: i32,
        /// Swiss Ephemeris data directory
        #[arg(long)]
        ephe_path: Option<PathBuf>,
    },
    /// Day-by-day transits to a natal chart.
    #[cfg(feature = "swiss-ephemeris")]
    Transits {
        #[arg(long, value_parser = parse_instant)]
        birth: DateTime<Utc>,
        #[arg(long, value_parser = parse_instant)]
        start: DateTime<Utc>,
        #[arg(long, default_value_t = 7)]
        days: u32,
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "sun,moon,mercury,venus,mars,jupiter,saturn,uranus,neptune,pluto"
        )]
        bodies: Vec<String>,
        /// Birth latitude; with --lon, gives the natal chart houses
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
        #[arg(long)]
        ephe_path: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => load_engine_config(p),
        None => load_default_config(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    info!("match policy {:?}, house system {}", config.match_policy, config.house_system.name());

    match args.command {
        Command::Aspects { chart, other, at } => {
            let calculator = AspectCalculator::new(config.aspect_settings());
            let base = read_layer(&chart)?;
            let set = match other {
                None => calculator.within_chart("natal", &base)?,
                Some(other) => {
                    let moving = read_layer(&other)?;
                    let timing = at.map_or(Timing::Static, Timing::TransitAt);
                    calculator.between_charts("transit", "natal", &moving, &base, timing)?
                }
            };
            print_json(&set)
        }
        Command::Houses { chart } => {
            let layer = read_layer(&chart)?;
            let houses = layer
                .houses
                .as_ref()
                .with_context(|| format!("{} has no house cusps", chart.display()))?;
            print_json(&place_bodies(&layer, houses)?)
        }
        Command::Progressed { birth, as_of } => {
            let instant = progressed_instant(birth, as_of);
            println!("{}", instant.to_rfc3339());
            Ok(())
        }
        #[cfg(feature = "swiss-ephemeris")]
        Command::SolarReturn {
            birth,
            year,
            ephe_path,
        } => swiss::solar_return(&config, birth, year, ephe_path),
        #[cfg(feature = "swiss-ephemeris")]
        Command::Transits {
            birth,
            start,
            days,
            bodies,
            lat,
            lon,
            ephe_path,
        } => {
            let location = lat.zip(lon).map(|(lat, lon)| GeoLocation { lat, lon });
            swiss::transits(&config, birth, location, start, days, &bodies, ephe_path)
        }
    }
}

#[cfg(feature = "swiss-ephemeris")]
mod swiss {
    use crate::chart_io::print_json;
    use anyhow::Context;
    use chrono::{DateTime, Utc};
    use std::path::PathBuf;
    use urania::config::EngineConfig;
    use urania::ephemeris::{EphemerisProvider, GeoLocation, SwissEphemerisAdapter, Zodiac};
    use urania::events::solar_return as solve_solar_return;
    use urania::transits::transits_in_period;

    fn adapter(ephe_path: Option<PathBuf>) -> anyhow::Result<SwissEphemerisAdapter> {
        SwissEphemerisAdapter::new(ephe_path, Zodiac::Tropical)
            .context("Failed to open the Swiss Ephemeris")
    }

    pub fn solar_return(
        config: &EngineConfig,
        birth: DateTime<Utc>,
        year: i32,
        ephe_path: Option<PathBuf>,
    ) -> anyhow::Result<()> {
        let provider = adapter(ephe_path)?;
        let natal_sun = provider.position(birth, "sun")?.longitude;
        let (record, solution) =
            solve_solar_return(&provider, natal_sun, birth, year, &config.search_settings())?;
        if !solution.converged {
            log::warn!("solar return did not converge, residual {:.6}°", solution.residual_deg);
        }
        print_json(&record)
    }

    pub fn transits(
        config: &EngineConfig,
        birth: DateTime<Utc>,
        location: Option<GeoLocation>,
        start: DateTime<Utc>,
        days: u32,
        bodies: &[String],
        ephe_path: Option<PathBuf>,
    ) -> anyhow::Result<()> {
        let provider = adapter(ephe_path)?;
        let natal = config.chart_layer(&provider, birth, bodies, location)?;
        let report = transits_in_period(
            &provider,
            &natal,
            bodies,
            start,
            days,
            &config.aspect_settings(),
            &config.search_settings(),
        )?;
        print_json(&report)
    }
}
