use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use natal_engine::{
    Ascendant, Aspect, BirthData, EclipseHit, EngineConfig, NatalChart, build_chart, deg_to_dms,
    find_eclipses, find_solar_return, generate_report, sign_from_longitude, solar_return_instant,
    transit_outlook,
};
use natal_ephem::AnalyticEphemeris;
use natal_time::noon_jd;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "natal", about = "Natal chart and transit calculator")]
struct Cli {
    /// Engine config (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BirthArgs {
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
    /// Local birth time (HH:MM:SS); noon when omitted
    #[arg(long)]
    time: Option<NaiveTime>,
    /// Local time minus UTC in minutes (e.g. 330 for UTC+05:30)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,
    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,
}

impl BirthArgs {
    fn to_birth(&self) -> Result<BirthData> {
        let birth = BirthData {
            date: self.date,
            time: self.time,
            utc_offset_minutes: self.utc_offset,
            latitude: self.lat,
            longitude: self.lon,
        };
        birth.validate()?;
        Ok(birth)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sign and degree for an ecliptic longitude
    Sign {
        /// Tropical ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Natal chart with natal aspects
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Active, coming and passed transits around a day
    Transits {
        #[command(flatten)]
        birth: BirthArgs,
        /// Day to center on (YYYY-MM-DD); today (UTC) when omitted
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Solar return day and instant for a year
    SolarReturn {
        #[command(flatten)]
        birth: BirthArgs,
        #[arg(long)]
        year: i32,
    },
    /// Eclipses aspecting the natal chart in a date range
    Eclipses {
        #[command(flatten)]
        birth: BirthArgs,
        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
    },
    /// Year-ahead report
    Report {
        #[command(flatten)]
        birth: BirthArgs,
        #[arg(long)]
        year: i32,
    },
}

#[derive(Serialize)]
struct ChartOutput<'a> {
    chart: &'a NatalChart,
    rising: Ascendant,
    aspects: Vec<Aspect>,
}

/// An eclipse hit with its readable kind, e.g. "annular solar".
#[derive(Serialize)]
struct EclipseLine<'a> {
    label: &'static str,
    #[serde(flatten)]
    hit: &'a EclipseHit,
}

fn eclipse_lines(hits: &[EclipseHit]) -> Vec<EclipseLine<'_>> {
    hits.iter()
        .map(|hit| EclipseLine {
            label: hit.kind.label(),
            hit,
        })
        .collect()
}

#[derive(Serialize)]
struct SolarReturnOutput {
    year: i32,
    date: NaiveDate,
    instant: chrono::DateTime<Utc>,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(p) => {
            let what = || format!("loading {}", p.display());
            EngineConfig::load(p).with_context(what)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let eph = AnalyticEphemeris::new();

    match cli.command {
        Commands::Sign { lon } => {
            let p = sign_from_longitude(lon);
            println!(
                "{} {} - {} ({:.4} deg in sign)",
                p.sign.glyph(),
                p.sign.name(),
                deg_to_dms(p.degree_in_sign),
                p.degree_in_sign
            );
        }

        Commands::Chart { birth } => {
            let chart = build_chart(&eph, &birth.to_birth()?);
            print_json(&ChartOutput {
                chart: &chart,
                rising: chart.rising(),
                aspects: chart.aspects(&config.orbs.natal),
            })?;
        }

        Commands::Transits { birth, on } => {
            let chart = build_chart(&eph, &birth.to_birth()?);
            let today = on.unwrap_or_else(|| Utc::now().date_naive());
            print_json(&transit_outlook(&eph, chart.positions(), today, &config))?;
        }

        Commands::SolarReturn { birth, year } => {
            let chart = build_chart(&eph, &birth.to_birth()?);
            let sun = chart.sun().longitude();
            print_json(&SolarReturnOutput {
                year,
                date: find_solar_return(&eph, sun, year),
                instant: solar_return_instant(&eph, sun, year),
            })?;
        }

        Commands::Eclipses { birth, from, to } => {
            anyhow::ensure!(from <= to, "--from {from} is after --to {to}");
            let chart = build_chart(&eph, &birth.to_birth()?);
            let hits = find_eclipses(
                &eph,
                chart.positions(),
                noon_jd(from),
                noon_jd(to),
                &config.orbs.eclipse,
            );
            print_json(&eclipse_lines(&hits))?;
        }

        Commands::Report { birth, year } => {
            let birth = birth.to_birth()?;
            let report = generate_report(&eph, Some(&birth), year, &config)
                .context("report needs birth data")?
                .stamped(Utc::now());
            print_json(&report)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use natal_engine::OrbTable;

    #[test]
    fn parses_birth_flags() {
        let cli = Cli::try_parse_from([
            "natal",
            "chart",
            "--date",
            "1990-01-05",
            "--time",
            "06:45:00",
            "--utc-offset",
            "-300",
            "--lat",
            "-33.9",
            "--lon",
            "151.2",
        ])
        .unwrap();
        let Commands::Chart { birth } = cli.command else {
            panic!("expected chart");
        };
        let b = birth.to_birth().unwrap();
        assert_eq!(b.utc_offset_minutes, Some(-300));
        assert_eq!(b.coordinates(), Some((-33.9, 151.2)));
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::try_parse_from([
            "natal",
            "report",
            "--date",
            "1990-01-05",
            "--year",
            "2025",
            "--config",
            "natal.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("natal.toml")));
    }

    #[test]
    fn out_of_range_latitude_rejected() {
        let cli = Cli::try_parse_from([
            "natal",
            "chart",
            "--date",
            "1990-01-05",
            "--lat",
            "95",
            "--lon",
            "0",
        ])
        .unwrap();
        let Commands::Chart { birth } = cli.command else {
            panic!("expected chart");
        };
        assert!(birth.to_birth().is_err());
    }

    #[test]
    fn eclipse_lines_carry_labels() {
        let eph = AnalyticEphemeris::new();
        let birth = BirthData::new(NaiveDate::from_ymd_opt(1990, 1, 5).unwrap());
        let chart = build_chart(&eph, &birth);
        let from = noon_jd(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        let to = noon_jd(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        let hits = find_eclipses(&eph, chart.positions(), from, to, &OrbTable::eclipse());
        let lines = eclipse_lines(&hits);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "total solar");
        let json = serde_json::to_value(&lines[0]).unwrap();
        assert_eq!(json["label"], "total solar");
        assert_eq!(json["date"], "2024-04-08");
    }

    #[test]
    fn missing_config_file_reported() {
        let path = PathBuf::from("/nonexistent/natal.toml");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("loading"));
    }
}
