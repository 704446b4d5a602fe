use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use pitch_scores::benchmark::{BenchmarkCurve, BenchmarkTable, GpsReading, score_profile};
use pitch_scores::fake_population::synthetic_population;
use pitch_scores::metrics::MetricRegistry;
use pitch_scores::report::ScoringReport;
use pitch_scores::scoring_config::{load_scoring_registry, reference_registry};
use pitch_scores::{PositionCode, RawRecord, ScoringEngine, ScoringFilter, TeamTotalsRow};

const DEFAULT_MIN_MINUTES: f64 = 45.0;
const DEMO_TEAMS: usize = 18;
const DEMO_SEED: u64 = 2024;

#[derive(Debug, Deserialize)]
struct GpsRow {
    name: String,
    position: PositionCode,
    #[serde(flatten)]
    reading: GpsReading,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    if let Some(path) = parse_path_arg("--gps") {
        return run_gps_report(&path);
    }

    let registry = match parse_path_arg("--config").or_else(|| env_path("SCORING_CONFIG_PATH")) {
        Some(path) => load_scoring_registry(&path)?,
        None => reference_registry()?.clone(),
    };
    let metrics = MetricRegistry::reference();

    let position = parse_str_arg("--position")
        .map(|raw| PositionCode::parse(&raw))
        .unwrap_or(PositionCode::CenterBack);
    if position == PositionCode::Unknown {
        return Err(anyhow!("unrecognized --position"));
    }
    let min_minutes = parse_f64_arg("--min-minutes")
        .or_else(|| env_f64("MIN_MINUTES"))
        .unwrap_or(DEFAULT_MIN_MINUTES)
        .max(0.0);

    let records: Vec<RawRecord> = match parse_path_arg("--records") {
        Some(path) => read_json(&path)?,
        None => {
            println!("No --records given; scoring a synthetic {DEMO_TEAMS}-team population.");
            synthetic_population(DEMO_TEAMS, &registry, &metrics, DEMO_SEED)
        }
    };
    let team_rows: Option<Vec<TeamTotalsRow>> = parse_path_arg("--team-totals")
        .map(|path| read_json(&path))
        .transpose()?;

    let engine = ScoringEngine::new(registry, metrics);
    let pass = engine.score_position(
        &records,
        team_rows.as_deref(),
        ScoringFilter::new(position, min_minutes),
    );

    println!("Position {position} | min minutes {min_minutes}");
    if pass.is_empty() {
        println!("No records pass the filter.");
        return Ok(());
    }
    if !pass.configured {
        println!("No scoring weights for {position}; records listed unscored.");
    }
    for (idx, rec) in pass.records.iter().enumerate() {
        let categories = rec
            .category_scores
            .iter()
            .map(|c| format!("{} {:.1}", c.name, c.score))
            .collect::<Vec<_>>()
            .join(" | ");
        println!(
            "{:>3}. {:<24} {:<16} {:>5.0}' {:>6.1}  {categories}",
            idx + 1,
            rec.record.identity.name,
            rec.record.identity.team,
            rec.record.minutes_played,
            rec.total_score
        );
    }

    if let Some(out) = parse_path_arg("--out") {
        ScoringReport::from_pass(&pass).write_json(&out)?;
        println!();
        println!("report written: {}", out.display());
    }

    Ok(())
}

fn run_gps_report(path: &Path) -> Result<()> {
    let rows: Vec<GpsRow> = read_json(path)?;
    let curve = match parse_str_arg("--curve").as_deref() {
        Some("season") => BenchmarkCurve::SeasonAnalysis,
        Some("match") | None => BenchmarkCurve::MatchReport,
        Some(other) => return Err(anyhow!("unknown --curve '{other}' (match|season)")),
    };
    let table = BenchmarkTable::reference();

    println!("GPS benchmark scores ({curve:?})");
    for row in rows {
        let benchmark = table.for_position(row.position);
        let s = score_profile(&row.reading, &benchmark, curve);
        println!(
            "{:<24} {:<6} dist {:>4} hsr {:>4} sprint {:>4} intensity {:>4}",
            row.name, row.position, s.distance, s.high_speed, s.sprint, s.intensity
        );
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<f64>().ok())
}

fn parse_str_arg(name: &str) -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&format!("{name}=")) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
        {
            return Some(next.trim().to_string());
        }
    }
    None
}

fn parse_path_arg(name: &str) -> Option<PathBuf> {
    parse_str_arg(name).map(PathBuf::from)
}

fn parse_f64_arg(name: &str) -> Option<f64> {
    parse_str_arg(name).and_then(|raw| raw.parse::<f64>().ok())
}
