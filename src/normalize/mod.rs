pub mod compensation;
pub mod hours;
pub mod role;
pub mod slug;

use serde::{Deserialize, Serialize};

use crate::csv_source::{parse_amount, CsvJobRecord};
use crate::db::DbJob;
use compensation::CompensationView;
use hours::HoursView;
use role::RoleType;

/// The canonical job entity every downstream stage consumes. Built once per
/// record per run; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalJob {
    pub job_id: String,
    pub slug: String,
    pub title: String,
    pub company: String,
    pub company_url: Option<String>,

    pub location: String,
    pub location_type: String,
    pub location_restriction: Option<String>,
    pub is_remote: bool,

    pub compensation: CompensationView,
    pub has_salary: bool,

    pub hours: HoursView,

    pub role_type: Option<RoleType>,
    pub function_category: String,
    pub is_c_level: bool,
    pub is_vp_level: bool,
    pub seniority: Option<String>,

    pub date_posted: Option<String>,
    pub date_scraped: Option<String>,
    pub last_seen: Option<String>,

    pub description: Option<String>,
    pub description_snippet: String,

    pub source: String,
    pub source_url: Option<String>,
}

/// Normalize one database-variant record.
///
/// Remote derivation on this path: absent location_type counts as remote.
/// The CSV path uses a different rule (explicit flag or text match); the
/// divergence is preserved per input variant, see DESIGN.md.
pub fn from_db(job: &DbJob) -> CanonicalJob {
    let company_name = job.company_name.as_deref().unwrap_or("");
    let slug = slug::generate_slug(company_name, &job.title, &job.source_id);
    let compensation = compensation::from_db(
        job.compensation_type.as_deref(),
        job.compensation_min,
        job.compensation_max,
        job.hourly_rate_min,
        job.hourly_rate_max,
    );
    let hours = hours::format_hours(job.hours_per_week_min, job.hours_per_week_max);
    let role_type = role::categorize(&job.title);

    let snippet_source = job
        .description_snippet
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(job.description_raw.as_deref())
        .unwrap_or("");

    CanonicalJob {
        job_id: format!(
            "{}-{}",
            take_chars(&job.source, 2),
            take_chars(&job.source_id, 10)
        ),
        slug,
        title: job.title.clone(),
        company: non_blank(job.company_name.as_deref(), "Confidential"),
        company_url: job.company_url.clone(),

        location: non_blank(job.location_raw.as_deref(), "Remote"),
        location_type: non_blank(job.location_type.as_deref(), "remote"),
        location_restriction: job.location_restriction.clone(),
        is_remote: matches!(job.location_type.as_deref(), Some("remote") | None),

        has_salary: compensation.min.is_some(),
        compensation,

        hours,

        role_type,
        function_category: non_blank(job.function_category.as_deref(), "other"),
        is_c_level: role_type.is_some_and(|r| r.is_c_level()),
        is_vp_level: role_type.is_some_and(|r| r.is_vp_level()),
        seniority: job.seniority_tier.clone(),

        date_posted: job.date_posted.clone(),
        date_scraped: job.date_scraped.clone(),
        last_seen: job.last_seen.clone(),

        description: job.description_raw.clone(),
        description_snippet: take_chars(snippet_source, 500),

        source: job.source.clone(),
        source_url: job.source_url.clone(),
    }
}

/// Normalize one CSV-variant record (JobSpy/Indeed style export).
///
/// Looser inputs: amounts arrive as strings and fall back to absent on
/// parse failure; there is no hours data; scrape timestamps are stamped
/// with `today`.
pub fn from_csv(row: &CsvJobRecord, today: &str) -> CanonicalJob {
    let title = row.title.clone().unwrap_or_default();
    let company = row.company.as_deref().unwrap_or("");

    let comp_min = parse_amount(row.min_amount.as_deref());
    let comp_max = parse_amount(row.max_amount.as_deref());
    let interval = row.interval.as_deref().unwrap_or("").to_lowercase();
    let compensation = compensation::from_csv(comp_min, comp_max, &interval);

    let source_id = match row.id.as_deref().filter(|s| !s.is_empty()) {
        Some(id) => id.to_string(),
        None => tail_chars(row.job_url.as_deref().unwrap_or(""), 20),
    };
    let slug = slug::generate_slug(company, &title, &source_id);

    let location = row.location.clone().unwrap_or_default();
    let is_remote = row
        .is_remote
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case("true"))
        || location.to_lowercase().contains("remote");

    let role_type = role::categorize(&title);
    let description = row.description.clone();

    CanonicalJob {
        job_id: take_chars(&source_id, 15),
        slug,
        title,
        company: non_blank(row.company.as_deref(), "Confidential"),
        company_url: row.company_url.clone(),

        location,
        location_type: if is_remote { "remote" } else { "onsite" }.to_string(),
        location_restriction: None,
        is_remote,

        has_salary: comp_min.is_some(),
        compensation,

        hours: HoursView::not_specified(),

        role_type,
        function_category: non_blank(row.job_function.as_deref(), "other"),
        is_c_level: role_type.is_some_and(|r| r.is_c_level()),
        is_vp_level: role_type.is_some_and(|r| r.is_vp_level()),
        seniority: row.job_level.clone(),

        date_posted: row.date_posted.clone(),
        date_scraped: Some(today.to_string()),
        last_seen: Some(today.to_string()),

        description_snippet: take_chars(description.as_deref().unwrap_or(""), 500),
        description,

        source: non_blank(row.site.as_deref(), "indeed"),
        source_url: row.job_url.clone(),
    }
}

fn non_blank(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn tail_chars(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::compensation::CompensationType;

    fn db_job() -> DbJob {
        DbJob {
            title: "Fractional CFO".to_string(),
            company_name: Some("Acme Capital".to_string()),
            company_url: None,
            location_raw: Some("Austin, TX".to_string()),
            location_type: Some("hybrid".to_string()),
            location_restriction: Some("US only".to_string()),
            compensation_type: Some("hourly".to_string()),
            compensation_min: Some(150.0),
            compensation_max: Some(200.0),
            hourly_rate_min: Some(150.0),
            hourly_rate_max: Some(200.0),
            hours_per_week_min: Some(10.0),
            hours_per_week_max: Some(20.0),
            function_category: Some("finance".to_string()),
            seniority_tier: Some("c_level".to_string()),
            date_posted: Some("2025-06-01".to_string()),
            date_scraped: Some("2025-06-02".to_string()),
            last_seen: Some("2025-06-03".to_string()),
            description_raw: Some("Lead the finance function.".to_string()),
            description_snippet: None,
            source: "linkedin".to_string(),
            source_id: "abcdef123456789".to_string(),
            source_url: Some("https://example.com/j/1".to_string()),
        }
    }

    #[test]
    fn db_job_id_truncation() {
        let job = from_db(&db_job());
        assert_eq!(job.job_id, "li-abcdef1234");
    }

    #[test]
    fn db_short_source_id_survives() {
        let mut raw = db_job();
        raw.source_id = "x1".to_string();
        let job = from_db(&raw);
        assert_eq!(job.job_id, "li-x1");
    }

    #[test]
    fn db_remote_rules() {
        let mut raw = db_job();
        raw.location_type = None;
        let job = from_db(&raw);
        assert!(job.is_remote);
        assert_eq!(job.location_type, "remote");

        raw.location_type = Some("hybrid".to_string());
        assert!(!from_db(&raw).is_remote);

        raw.location_type = Some("remote".to_string());
        assert!(from_db(&raw).is_remote);
    }

    #[test]
    fn db_defaults_for_blank_fields() {
        let mut raw = db_job();
        raw.company_name = None;
        raw.location_raw = Some(String::new());
        let job = from_db(&raw);
        assert_eq!(job.company, "Confidential");
        assert_eq!(job.location, "Remote");
        // Blank company still yields a valid slug via the placeholder
        assert!(job.slug.starts_with("company-fractional-cfo-"));
    }

    #[test]
    fn db_snippet_falls_back_to_description() {
        let job = from_db(&db_job());
        assert_eq!(job.description_snippet, "Lead the finance function.");

        let mut raw = db_job();
        raw.description_snippet = Some("Short pitch.".to_string());
        assert_eq!(from_db(&raw).description_snippet, "Short pitch.");
    }

    #[test]
    fn csv_end_to_end_scenario() {
        let row = CsvJobRecord {
            id: Some("ind-991".to_string()),
            site: Some("indeed".to_string()),
            job_url: Some("https://indeed.com/j/991".to_string()),
            title: Some("Fractional CMO".to_string()),
            company: Some("Acme".to_string()),
            company_url: None,
            location: None,
            is_remote: Some("true".to_string()),
            job_level: None,
            interval: Some("monthly".to_string()),
            min_amount: Some("12000".to_string()),
            max_amount: Some("18000".to_string()),
            date_posted: Some("2025-06-10".to_string()),
            description: Some("Own the brand.".to_string()),
            job_function: None,
        };
        let job = from_csv(&row, "2025-06-12");
        assert_eq!(job.compensation.kind, CompensationType::Monthly);
        assert_eq!(job.compensation.display, "$12,000-$18,000/mo");
        assert_eq!(job.compensation.hourly_min, Some(150.0));
        assert!(job.is_remote);
        assert_eq!(job.role_type, Some(role::RoleType::Cmo));
        assert!(job.is_c_level);
        assert!(job.has_salary);
        assert_eq!(job.date_scraped.as_deref(), Some("2025-06-12"));
        assert_eq!(job.hours.display, "Not specified");
    }

    #[test]
    fn csv_remote_from_location_text() {
        let row = CsvJobRecord {
            title: Some("Fractional COO".to_string()),
            location: Some("Remote - US".to_string()),
            is_remote: None,
            ..CsvJobRecord::default()
        };
        let job = from_csv(&row, "2025-06-12");
        assert!(job.is_remote);
        assert_eq!(job.location_type, "remote");

        let row = CsvJobRecord {
            title: Some("Fractional COO".to_string()),
            location: Some("Chicago, IL".to_string()),
            ..CsvJobRecord::default()
        };
        let job = from_csv(&row, "2025-06-12");
        assert!(!job.is_remote);
        assert_eq!(job.location_type, "onsite");
    }

    #[test]
    fn csv_source_id_falls_back_to_url_tail() {
        let row = CsvJobRecord {
            title: Some("Fractional CTO".to_string()),
            job_url: Some("https://jobs.example.com/view/9f3a".to_string()),
            ..CsvJobRecord::default()
        };
        let job = from_csv(&row, "2025-06-12");
        // source_id = last 20 chars of the URL, job_id = its first 15
        assert_eq!(job.job_id, "xample.com/view");
        assert!(job.slug.starts_with("company-fractional-cto-"));
    }

    #[test]
    fn csv_bad_amounts_become_absent() {
        let row = CsvJobRecord {
            title: Some("Fractional CFO".to_string()),
            min_amount: Some("N/A".to_string()),
            max_amount: Some(String::new()),
            interval: Some("hourly".to_string()),
            ..CsvJobRecord::default()
        };
        let job = from_csv(&row, "2025-06-12");
        assert!(!job.has_salary);
        assert_eq!(job.compensation.kind, CompensationType::NotDisclosed);
        assert_eq!(job.compensation.display, "Not disclosed");
    }
}
