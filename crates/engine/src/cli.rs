use clap::Parser;
use std::path::PathBuf;

use almanac_engine::ClockTime;

#[derive(Parser)]
#[command(
    name = "almanac",
    version,
    about = "Convert world time to dates of a custom calendar and back"
)]
pub struct Cli {
    /// World times (seconds since the anchor) to convert
    #[arg(allow_negative_numbers = true, conflicts_with = "inverse")]
    pub world_times: Vec<f64>,

    /// Convert a date back to world time
    #[arg(
        long,
        num_args = 3,
        value_names = ["YEAR", "MONTH", "DAY"],
        allow_negative_numbers = true
    )]
    pub inverse: Option<Vec<i64>>,

    /// Time of day for --inverse, as HH:MM:SS
    #[arg(long, value_parser = parse_clock_time, requires = "inverse")]
    pub time: Option<ClockTime>,

    /// Treat the --inverse date as the DAYth intercalary day after MONTH
    #[arg(long, requires = "inverse")]
    pub intercalary: bool,

    /// Calendar definition file (overrides ALMANAC_CALENDAR_PATH)
    #[arg(long)]
    pub calendar: Option<PathBuf>,

    /// Anchor timestamp in Unix seconds (overrides ALMANAC_ANCHOR_TIMESTAMP)
    #[arg(long, allow_negative_numbers = true)]
    pub anchor: Option<f64>,

    /// Print JSON records instead of text
    #[arg(long)]
    pub json: bool,
}

fn parse_clock_time(s: &str) -> Result<ClockTime, String> {
    let fields = s
        .split(':')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid time '{}': {}", s, e))?;
    match fields.as_slice() {
        [hour, minute] => Ok(ClockTime::new(*hour, *minute, 0)),
        [hour, minute, second] => Ok(ClockTime::new(*hour, *minute, *second)),
        _ => Err(format!("invalid time '{}': expected HH:MM[:SS]", s)),
    }
}
