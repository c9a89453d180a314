mod events;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use kairos::chart::{BirthInput, Chart, ChartBuilder, TransitSnapshot};
use kairos::ephemeris::parse_timestamp;
use kairos::rectification::{BirthTimeRectifier, RectificationRequest, MAX_WINDOW_HOURS};
use kairos::vedic::{
    annotate_layer_nakshatras, find_active_period, DashaLevel, DashaPeriod, NakshatraLayer,
    VimshottariResponse,
};
use kairos_config::KairosConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Config file (default: configs/kairos.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Compact JSON instead of pretty-printed.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a birth chart.
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
        /// Include nakshatra placements for every body.
        #[arg(long)]
        nakshatras: bool,
    },
    /// Transiting positions and aspects to a natal chart.
    Transit {
        #[command(flatten)]
        birth: BirthArgs,
        /// Transit instant (default: now).
        #[arg(long)]
        at: Option<String>,
    },
    /// Vimshottari dasha timeline.
    Dasha {
        #[command(flatten)]
        birth: BirthArgs,
        /// mahadasha, antardasha or pratyantardasha.
        #[arg(long, default_value = "antardasha")]
        depth: String,
        /// Report the period running at this instant.
        #[arg(long)]
        at: Option<String>,
    },
    /// Search for the birth time that best fits a list of life events.
    Rectify {
        /// Approximate birth time (RFC 3339 or 'YYYY-MM-DD HH:MM').
        #[arg(long)]
        time: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// JSON file: an array of life events, or an object with
        /// `life_events` and optional `personality`.
        #[arg(long)]
        events: PathBuf,
        /// Search window in hours, centred on --time.
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_WINDOW_HOURS)))]
        window_hours: Option<u32>,
        /// Score candidates on a single thread.
        #[arg(long)]
        serial: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct BirthArgs {
    /// Birth time (RFC 3339 or 'YYYY-MM-DD HH:MM', naive times are UTC).
    #[arg(long)]
    time: String,
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// placidus, equal or whole.
    #[arg(long)]
    house_system: Option<String>,
    /// Ayanamsa name, or "tropical".
    #[arg(long)]
    ayanamsa: Option<String>,
    /// basic or enhanced.
    #[arg(long)]
    precision: Option<String>,
    /// tight or standard.
    #[arg(long)]
    orbs: Option<String>,
}

#[derive(Serialize)]
struct ChartOutput<'a> {
    chart: &'a Chart,
    #[serde(skip_serializing_if = "Option::is_none")]
    formatted_ayanamsa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nakshatras: Option<NakshatraLayer>,
}

#[derive(Serialize)]
struct DashaOutput<'a> {
    timeline: &'a VimshottariResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<&'a DashaPeriod>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    log::debug!("Using {:?}", config);

    let json = match args.command {
        Command::Chart { birth, nakshatras } => {
            let chart = build_chart(&birth, &config)?;
            let output = ChartOutput {
                chart: &chart,
                formatted_ayanamsa: chart.formatted_ayanamsa(),
                nakshatras: nakshatras.then(|| annotate_layer_nakshatras("natal", &chart.positions())),
            };
            to_json(&output, args.compact)?
        }
        Command::Transit { birth, at } => {
            let natal = build_chart(&birth, &config)?;
            let when = parse_or_now(at.as_deref())?;
            let snapshot = TransitSnapshot::compute(&natal, when, natal.tier);
            to_json(&snapshot, args.compact)?
        }
        Command::Dasha { birth, depth, at } => {
            let level = DashaLevel::from_name(&depth)
                .with_context(|| format!("Unknown dasha depth '{depth}'"))?;
            let chart = build_chart(&birth, &config)?;
            let timeline = chart.vimshottari(level);
            let at = parse_or_now(at.as_deref())?.with_timezone(&Utc);
            let output = DashaOutput {
                timeline: &timeline,
                active: find_active_period(&timeline.periods, at),
            };
            to_json(&output, args.compact)?
        }
        Command::Rectify {
            time,
            lat,
            lon,
            events,
            window_hours,
            serial,
        } => {
            let approx = parse_timestamp(&time)?;
            let input = events::read_events_file(&events)?;
            let window = window_hours.unwrap_or(config.rectification.window_hours);
            let request = RectificationRequest::new(approx, lat, lon, input.life_events, window)
                .with_personality(input.personality);

            let mut settings = config.rectifier_settings();
            if serial {
                settings.parallel = false;
            }
            let result = BirthTimeRectifier::new(settings).rectify(&request);
            let json = to_json(&result, args.compact)?;
            if let Some(error) = result.error {
                println!("{json}");
                anyhow::bail!("Rectification failed: {error}");
            }
            json
        }
    };

    println!("{json}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<KairosConfig> {
    match path {
        Some(path) => kairos_config::load_from(path),
        None => kairos_config::load_or_default(),
    }
}

fn build_chart(birth: &BirthArgs, config: &KairosConfig) -> anyhow::Result<Chart> {
    let mut chart_config = config.chart.clone();
    if let Some(precision) = &birth.precision {
        chart_config.precision = precision.clone();
    }
    if let Some(orbs) = &birth.orbs {
        chart_config.orb_preset = Some(orbs.clone());
    }
    let house_system = birth.house_system.as_deref().unwrap_or(&chart_config.house_system);
    let ayanamsa = birth.ayanamsa.as_deref().unwrap_or(&chart_config.ayanamsa);

    let input = BirthInput::parse(&birth.time, birth.lat, birth.lon, house_system, ayanamsa)?;
    let settings = chart_config.chart_settings()?;
    Ok(ChartBuilder::new(settings).build(&input))
}

fn parse_or_now(value: Option<&str>) -> anyhow::Result<DateTime<FixedOffset>> {
    match value {
        Some(value) => Ok(parse_timestamp(value)?),
        None => Ok(Utc::now().fixed_offset()),
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}
