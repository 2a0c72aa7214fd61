use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::csv_source::CsvJobRecord;
use crate::db;
use crate::normalize::{self, CanonicalJob};

/// CSV rows only make it into the export when the title mentions one of
/// these. Carried over verbatim from the historical exports - note the
/// trailing space on "vp " and the absence of ciso/cio.
const FRACTIONAL_KEYWORDS: &[&str] = &[
    "fractional",
    "cfo",
    "cmo",
    "cto",
    "coo",
    "chro",
    "cpo",
    "cro",
    "chief",
    "vp ",
    "vice president",
    "head of",
];

pub fn is_fractional_title(title: &str) -> bool {
    let lower = title.to_lowercase();
    FRACTIONAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsBreakdown {
    pub total_jobs: usize,
    pub by_role_type: BTreeMap<String, usize>,
    pub by_function: BTreeMap<String, usize>,
    pub by_location_type: BTreeMap<String, usize>,
    pub with_salary: usize,
    pub c_level: usize,
    pub vp_level: usize,
}

/// The jobs.json artifact: stamp, counts, breakdown, ordered jobs. Built
/// fresh every run and fully replaces any prior file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBundle {
    pub last_updated: String,
    pub total_jobs: usize,
    pub stats: StatsBreakdown,
    pub jobs: Vec<CanonicalJob>,
}

pub fn build_bundle(jobs: Vec<CanonicalJob>, last_updated: &str) -> ExportBundle {
    let mut stats = StatsBreakdown {
        total_jobs: jobs.len(),
        ..Default::default()
    };

    for job in &jobs {
        let role = job.role_type.map_or("other", |r| r.as_str());
        *stats.by_role_type.entry(role.to_string()).or_insert(0) += 1;

        let function = if job.function_category.is_empty() {
            "other"
        } else {
            &job.function_category
        };
        *stats.by_function.entry(function.to_string()).or_insert(0) += 1;

        let location = if job.location_type.is_empty() {
            "remote"
        } else {
            &job.location_type
        };
        *stats
            .by_location_type
            .entry(location.to_string())
            .or_insert(0) += 1;

        if job.has_salary {
            stats.with_salary += 1;
        }
        if job.is_c_level {
            stats.c_level += 1;
        }
        if job.is_vp_level {
            stats.vp_level += 1;
        }
    }

    ExportBundle {
        last_updated: last_updated.to_string(),
        total_jobs: jobs.len(),
        stats,
        jobs,
    }
}

/// Database path: active rows only, posting date descending (the query
/// orders them).
pub fn bundle_from_db(conn: &Connection) -> Result<ExportBundle> {
    let raw = db::fetch_active_jobs(conn)?;
    info!("Normalizing {} active database rows", raw.len());
    let jobs: Vec<CanonicalJob> = raw.iter().map(normalize::from_db).collect();
    Ok(build_bundle(jobs, &today()))
}

/// CSV path: rows failing the fractional keyword filter are silently
/// excluded; survivors keep input order.
pub fn bundle_from_csv(records: &[CsvJobRecord]) -> ExportBundle {
    let stamp = today();
    let jobs: Vec<CanonicalJob> = records
        .iter()
        .filter(|row| is_fractional_title(row.title.as_deref().unwrap_or("")))
        .map(|row| normalize::from_csv(row, &stamp))
        .collect();
    info!(
        "Kept {} of {} CSV rows after fractional filter",
        jobs.len(),
        records.len()
    );
    build_bundle(jobs, &stamp)
}

pub fn write_bundle(bundle: &ExportBundle, data_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let path = data_dir.join("jobs.json");
    let json = serde_json::to_string_pretty(bundle)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

// ── Market stats ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompensationStats {
    pub sample_size: usize,
    pub avg_hourly_rate: Option<f64>,
    pub median_hourly_rate: Option<f64>,
    pub disclosure_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trends {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_today: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_today: Option<i64>,
}

/// The market_stats.json artifact, computed independently of the bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStats {
    pub last_updated: String,
    pub total_active_listings: usize,
    pub compensation: CompensationStats,
    pub trends: Trends,
}

pub fn market_stats_from_db(conn: &Connection) -> Result<MarketStats> {
    let active = db::count_active(conn)?;
    let rates = db::fetch_hourly_rates(conn)?;
    let trends = match db::fetch_latest_snapshot(conn)? {
        Some(snap) => Trends {
            new_today: snap.new_today,
            removed_today: snap.removed_today,
        },
        None => Trends::default(),
    };
    Ok(market_stats(active, rates, trends))
}

/// CSV path has no snapshot table; trends stay empty and the sample comes
/// from the estimated hourly minimums.
pub fn market_stats_from_bundle(bundle: &ExportBundle) -> MarketStats {
    let rates: Vec<f64> = bundle
        .jobs
        .iter()
        .filter_map(|j| j.compensation.hourly_min)
        .collect();
    market_stats(bundle.jobs.len(), rates, Trends::default())
}

fn market_stats(active: usize, mut rates: Vec<f64>, trends: Trends) -> MarketStats {
    rates.sort_by(|a, b| a.total_cmp(b));
    let sample_size = rates.len();

    // Upper-median convention: index floor(n/2) of the sorted sample, not
    // the averaged midpoint. Historical exports depend on this tie-break.
    let median = if rates.is_empty() {
        None
    } else {
        Some(rates[sample_size / 2].round())
    };
    let avg = if rates.is_empty() {
        None
    } else {
        Some((rates.iter().sum::<f64>() / sample_size as f64).round())
    };

    let disclosure_rate = if active > 0 {
        round1(sample_size as f64 / active as f64 * 100.0)
    } else {
        0.0
    };

    MarketStats {
        last_updated: today(),
        total_active_listings: active,
        compensation: CompensationStats {
            sample_size,
            avg_hourly_rate: avg,
            median_hourly_rate: median,
            disclosure_rate,
        },
        trends,
    }
}

pub fn write_market_stats(stats: &MarketStats, data_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let path = data_dir.join("market_stats.json");
    let json = serde_json::to_string_pretty(stats)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

// ── Tests ──
