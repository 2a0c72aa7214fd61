use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// One row of a JobSpy/Indeed-style CSV export. Everything is optional and
/// stringly typed; the normalizer does the coercion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CsvJobRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub company_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_remote: Option<String>,
    #[serde(default)]
    pub job_level: Option<String>,
    #[serde(default)]
    pub job_function: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub min_amount: Option<String>,
    #[serde(default)]
    pub max_amount: Option<String>,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Read every record from a CSV file with a header row. A structurally
/// broken file (bad quoting, truncated row) is fatal; dirty field values
/// are not - they degrade later, in the normalizer.
pub fn read_records(path: &Path) -> Result<Vec<CsvJobRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: CsvJobRecord =
            result.with_context(|| format!("Malformed CSV record in {}", path.display()))?;
        records.push(record);
    }

    info!("Read {} CSV records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a money amount from a raw CSV field. Anything that is not a clean
/// number is treated as absent - dirty scraped data is expected here, and a
/// record is never dropped for an unparseable amount alone.
pub fn parse_amount(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from("tests/fixtures").join(name)
    }

    #[test]
    fn parse_amount_tolerates_garbage() {
        assert_eq!(parse_amount(Some("12000")), Some(12000.0));
        assert_eq!(parse_amount(Some(" 150.5 ")), Some(150.5));
        assert_eq!(parse_amount(Some("N/A")), None);
        assert_eq!(parse_amount(Some("")), None);
        assert_eq!(parse_amount(None), None);
    }

    #[test]
    fn reads_fixture_rows() {
        let records = read_records(&fixture("jobs_sample.csv")).unwrap();
        assert_eq!(records.len(), 5);

        let first = &records[0];
        assert_eq!(first.title.as_deref(), Some("Fractional CMO"));
        assert_eq!(first.company.as_deref(), Some("Acme"));
        assert_eq!(first.min_amount.as_deref(), Some("12000"));

        // Quoted description with embedded comma survives
        let quoted = &records[2];
        assert!(quoted
            .description
            .as_deref()
            .unwrap()
            .contains("strategy, hiring"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_records(&fixture("does_not_exist.csv")).unwrap_err();
        assert!(err.to_string().contains("does_not_exist.csv"));
    }
}
