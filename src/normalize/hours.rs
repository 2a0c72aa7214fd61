use serde::{Deserialize, Serialize};

/// Weekly-hours commitment bucket, keyed off the average of min and max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoursBucket {
    #[serde(rename = "under_10")]
    Under10,
    #[serde(rename = "10_20")]
    TenToTwenty,
    #[serde(rename = "20_30")]
    TwentyToThirty,
    #[serde(rename = "30_plus")]
    ThirtyPlus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursView {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub display: String,
    pub bucket: Option<HoursBucket>,
}

impl HoursView {
    pub fn not_specified() -> Self {
        HoursView {
            min: None,
            max: None,
            display: "Not specified".to_string(),
            bucket: None,
        }
    }
}

/// Build the hours view from the raw min/max. No bucket and the literal
/// "Not specified" display when min is absent.
pub fn format_hours(min: Option<f64>, max: Option<f64>) -> HoursView {
    let Some(lo) = min else {
        return HoursView::not_specified();
    };

    let display = match max {
        Some(hi) if hi == lo => format!("{:.0} hrs/week", lo),
        Some(hi) => format!("{:.0}-{:.0} hrs/week", lo, hi),
        None => format!("{:.0}+ hrs/week", lo),
    };

    let avg = (lo + max.unwrap_or(lo)) / 2.0;
    let bucket = if avg < 10.0 {
        HoursBucket::Under10
    } else if avg < 20.0 {
        HoursBucket::TenToTwenty
    } else if avg < 30.0 {
        HoursBucket::TwentyToThirty
    } else {
        HoursBucket::ThirtyPlus
    };

    HoursView {
        min,
        max,
        display,
        bucket: Some(bucket),
    }
}

// ── Tests ──
