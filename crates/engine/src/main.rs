//! Almanac - command-line entry point.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use almanac_engine::{
    load_dotenv_from_repo_root, CalendarDate, CalendarEngine, EngineConfig, SystemClock,
};
use cli::Cli;

fn main() -> Result<()> {
    // Load environment from repo root.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "almanac_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env(&SystemClock);
    if let Some(path) = cli.calendar.clone() {
        config.calendar_path = Some(path);
    }
    if let Some(anchor) = cli.anchor {
        config.anchor_timestamp = anchor;
    }
    let engine = config
        .load_engine()
        .context("failed to load calendar definition")?;

    match &cli.inverse {
        Some(fields) => run_inverse(&engine, &config, &cli, fields),
        None => run_forward(&engine, &config, &cli),
    }
}

fn run_forward(engine: &CalendarEngine, config: &EngineConfig, cli: &Cli) -> Result<()> {
    for &world_time in &cli.world_times {
        let resolution = engine.world_time_to_date_checked(world_time, config.anchor_timestamp);
        if cli.json {
            println!("{}", serde_json::to_string(&resolution)?);
        } else {
            println!("{}\t{}", world_time, describe(engine, &resolution.date));
        }
    }
    Ok(())
}

fn run_inverse(
    engine: &CalendarEngine,
    config: &EngineConfig,
    cli: &Cli,
    fields: &[i64],
) -> Result<()> {
    let [year, month, day] = fields else {
        bail!("--inverse takes YEAR MONTH DAY");
    };
    let month = usize::try_from(*month).context("month must not be negative")?;
    let day = u32::try_from(*day).context("day must not be negative")?;

    let date = if cli.intercalary {
        let placement = engine
            .intercalary_days(*year)
            .into_iter()
            .find(|p| p.after_month == month && p.ordinal == day)
            .with_context(|| {
                format!(
                    "no intercalary day {} after month {} in year {}",
                    day, month, year
                )
            })?;
        let name = engine
            .get_calendar()
            .intercalary_days()
            .get(placement.entry)
            .map(|d| d.name.clone())
            .unwrap_or_default();
        CalendarDate::intercalary(*year, month, day, name)
    } else {
        CalendarDate::new(*year, month, day)
    };
    let date = date.with_time(cli.time.unwrap_or_default());

    let world_time = engine.date_to_world_time(&date, config.anchor_timestamp)?;
    if cli.json {
        let record = serde_json::json!({ "date": date, "worldTime": world_time });
        println!("{}", record);
    } else {
        println!("{}\t{}", world_time, describe(engine, &date));
    }
    Ok(())
}

/// Human-readable date, e.g. "Tuesday 14 March 2025 AD 09:30:00".
fn describe(engine: &CalendarEngine, date: &CalendarDate) -> String {
    let year = engine.display_year(date.year);
    match &date.intercalary {
        Some(name) => format!("{} {} {}", name, year, date.time),
        None => {
            let weekday = date
                .weekday
                .and_then(|w| engine.weekday_name(w))
                .map(|w| format!("{} ", w))
                .unwrap_or_default();
            let month = engine.month_name(date.month).unwrap_or("?");
            format!("{}{} {} {} {}", weekday, date.day, month, year, date.time)
        }
    }
}
