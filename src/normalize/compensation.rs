use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationType {
    NotDisclosed,
    Hourly,
    Monthly,
    Annual,
}

impl CompensationType {
    fn parse(raw: Option<&str>) -> CompensationType {
        match raw {
            Some("hourly") => CompensationType::Hourly,
            Some("monthly") => CompensationType::Monthly,
            Some("annual") => CompensationType::Annual,
            _ => CompensationType::NotDisclosed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationView {
    #[serde(rename = "type")]
    pub kind: CompensationType,
    pub display: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub hourly_min: Option<f64>,
    pub hourly_max: Option<f64>,
}

const NOT_DISCLOSED: &str = "Not disclosed";

/// Database-variant compensation view. The hourly_rate columns pass through
/// untouched regardless of compensation_type; min/max only surface when the
/// compensation is actually disclosed.
pub fn from_db(
    compensation_type: Option<&str>,
    min: Option<f64>,
    max: Option<f64>,
    hourly_rate_min: Option<f64>,
    hourly_rate_max: Option<f64>,
) -> CompensationView {
    let kind = CompensationType::parse(compensation_type);
    let mut view = CompensationView {
        kind,
        display: NOT_DISCLOSED.to_string(),
        min: None,
        max: None,
        hourly_min: hourly_rate_min,
        hourly_max: hourly_rate_max,
    };

    if let Some(lo) = min {
        if kind != CompensationType::NotDisclosed {
            view.display = range_display(lo, max, kind);
            view.min = min;
            view.max = max;
        }
    }

    view
}

/// CSV-variant compensation view. Raw min/max pass through even when the
/// interval is unrecognized (display stays "Not disclosed"); an
/// hourly-equivalent rate is estimated for monthly (÷80) and annual (÷1000)
/// intervals. Those divisors are a fixed heuristic carried over from the
/// historical exports, not a calendar calculation.
pub fn from_csv(min: Option<f64>, max: Option<f64>, interval: &str) -> CompensationView {
    let kind = if min.is_some() || max.is_some() {
        match interval {
            "hourly" => CompensationType::Hourly,
            "monthly" => CompensationType::Monthly,
            "yearly" | "annual" => CompensationType::Annual,
            _ => CompensationType::NotDisclosed,
        }
    } else {
        CompensationType::NotDisclosed
    };

    let mut view = CompensationView {
        kind,
        display: NOT_DISCLOSED.to_string(),
        min,
        max,
        hourly_min: None,
        hourly_max: None,
    };

    let Some(lo) = min else {
        return view;
    };
    let hi = max.unwrap_or(lo);

    match kind {
        CompensationType::Hourly => {
            view.display = range_display(lo, max, kind);
            view.hourly_min = Some(lo);
            view.hourly_max = Some(hi);
        }
        CompensationType::Monthly => {
            view.display = range_display(lo, max, kind);
            view.hourly_min = Some(lo / 80.0);
            view.hourly_max = Some(hi / 80.0);
        }
        CompensationType::Annual => {
            view.display = range_display(lo, max, kind);
            view.hourly_min = Some(lo / 1000.0);
            view.hourly_max = Some(hi / 1000.0);
        }
        CompensationType::NotDisclosed => {}
    }

    view
}

/// "$X/hr" or "$X-$Y/hr" style display; a missing max collapses the range
/// to the single min value. Hourly amounts print bare, monthly/annual with
/// thousands separators.
fn range_display(min: f64, max: Option<f64>, kind: CompensationType) -> String {
    let (unit, separators) = match kind {
        CompensationType::Hourly => ("hr", false),
        CompensationType::Monthly => ("mo", true),
        CompensationType::Annual => ("yr", true),
        CompensationType::NotDisclosed => return NOT_DISCLOSED.to_string(),
    };
    let fmt = |v: f64| {
        if separators {
            with_thousands(v)
        } else {
            format!("{:.0}", v)
        }
    };
    let max = max.unwrap_or(min);
    if min == max {
        format!("${}/{}", fmt(min), unit)
    } else {
        format!("${}-${}/{}", fmt(min), fmt(max), unit)
    }
}

/// Round to a whole number and insert comma thousands separators.
pub fn with_thousands(v: f64) -> String {
    let n = v.round() as i64;
    let digits = n.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

// ── Tests ──
