//! Run both analyses over a history file and print them as JSON

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use bodyintel::config::AnalysisConfig;
use bodyintel::error::{parse_date, EngineError};
use bodyintel::models::History;
use bodyintel::tools::analysis;

const USAGE: &str = "usage: analyze_history <history.json> [--today YYYY-MM-DD] [--bmr KCAL]";

struct Args {
    path: PathBuf,
    today: Option<String>,
    bmr: Option<f64>,
}

fn parse_args() -> Result<Args, String> {
    let mut path = None;
    let mut today = None;
    let mut bmr = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--today" => today = Some(args.next().ok_or(USAGE)?),
            "--bmr" => {
                let value = args.next().ok_or(USAGE)?;
                bmr = Some(value.parse::<f64>().map_err(|e| format!("Invalid --bmr '{}': {}", value, e))?);
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(format!("Unexpected argument '{}'\n{}", arg, USAGE)),
        }
    }

    Ok(Args {
        path: path.ok_or(USAGE)?,
        today,
        bmr,
    })
}

/// BMR from the newest scan that carries one
fn latest_scan_bmr(history: &History) -> Option<f64> {
    history
        .scans
        .iter()
        .filter_map(|scan| scan.usable_bmr().map(|bmr| (scan.date, bmr)))
        .max_by_key(|(date, _)| *date)
        .map(|(_, bmr)| bmr)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bodyintel=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = AnalysisConfig::from_env()?;

    let raw = std::fs::read_to_string(&args.path).map_err(EngineError::from)?;
    let history: History = serde_json::from_str(&raw).map_err(EngineError::from)?;
    eprintln!(
        "Loaded {}: {} foods, {} logs, {} weigh-ins, {} scans",
        args.path.display(),
        history.foods.len(),
        history.daily_logs.len(),
        history.weigh_ins.len(),
        history.scans.len()
    );

    let today = match args.today {
        Some(today) => parse_date(&today)?.to_string(),
        None => chrono::Local::now().date_naive().to_string(),
    };
    let bmr = match args.bmr.or_else(|| latest_scan_bmr(&history)) {
        Some(bmr) => bmr,
        None => return Err("No --bmr given and no scan in the history carries a BMR".into()),
    };

    let report = analysis::body_intelligence_report(&history, &today, bmr, None, &config)?;
    let calibration = analysis::tdee_calibration(&history, &today, None, None, &config)?;

    let output = serde_json::json!({
        "today": today,
        "bmr": bmr,
        "body_intelligence": report,
        "tdee_calibration": calibration,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
