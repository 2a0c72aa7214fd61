use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::info;

use crate::config::SiteConfig;
use crate::export::ExportBundle;
use crate::normalize::compensation::CompensationType;
use crate::normalize::CanonicalJob;

use super::{escape_html, format_date, load_bundle, markdown_to_html, templates};

const DETAIL_CSS: &str = r#"<style>
.job-detail { max-width: 1100px; margin: 0 auto; padding: 2rem 1.5rem; display: grid; grid-template-columns: 1fr 320px; gap: 2.5rem; }
.job-detail__main { min-width: 0; }
.job-detail__sidebar { position: sticky; top: 5rem; align-self: start; }
@media (max-width: 860px) { .job-detail { grid-template-columns: 1fr; } .job-detail__sidebar { position: static; } }
</style>"#;

/// Generate one detail page per job at site/jobs/{slug}/index.html.
pub fn generate(cfg: &SiteConfig) -> Result<usize> {
    let bundle = load_bundle(&cfg.data_dir)?;

    let bar = ProgressBar::new(bundle.jobs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} pages")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for job in &bundle.jobs {
        let html = render_job_page(cfg, job, &bundle);
        let dir = cfg.site_dir.join("jobs").join(&job.slug);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join("index.html");
        fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    info!("Generated {} job pages", bundle.jobs.len());
    Ok(bundle.jobs.len())
}

fn render_job_page(cfg: &SiteConfig, job: &CanonicalJob, bundle: &ExportBundle) -> String {
    let body = format!(
        r#"<div class="job-detail">
    <div class="job-detail__main">
        {breadcrumb}
        <div class="job-detail__company">{company}</div>
        <h1 class="job-detail__title">{title}</h1>
        <div class="job-detail__tags">{tags}</div>
        {apply}
        <div class="job-detail__description">
{description}
        </div>
        {similar}
    </div>
    {sidebar}
</div>
{jsonld}"#,
        breadcrumb = breadcrumb(job),
        company = escape_html(&job.company),
        title = escape_html(&job.title),
        tags = tag_row(job),
        apply = apply_button(job),
        description = description_html(job),
        similar = similar_jobs(job, bundle),
        sidebar = sidebar(job),
        jsonld = json_ld(cfg, job),
    );

    let page_title = format!("{} at {}", job.title, job.company);
    let description = format!(
        "{} at {}. {}",
        job.title,
        job.company,
        if job.description_snippet.is_empty() {
            "Apply for this fractional executive role.".to_string()
        } else {
            let snippet: String = job.description_snippet.chars().take(140).collect();
            snippet
        }
    );
    let canonical = format!("/jobs/{}/", job.slug);

    templates::render_page(cfg, &page_title, &description, &body, &canonical, DETAIL_CSS)
}

fn breadcrumb(job: &CanonicalJob) -> String {
    let short_title = if job.title.chars().count() > 30 {
        let head: String = job.title.chars().take(30).collect();
        format!("{}...", head)
    } else {
        job.title.clone()
    };
    format!(
        r#"<nav class="breadcrumb"><a href="/">Home</a> / <a href="/jobs/">Jobs</a> / <span>{}</span></nav>"#,
        escape_html(&short_title)
    )
}

fn tag_row(job: &CanonicalJob) -> String {
    let mut tags = Vec::new();

    if job.compensation.display != "Not disclosed" {
        tags.push(format!(
            r#"<span class="tag tag--salary">{}</span>"#,
            job.compensation.display
        ));
    }
    if job.is_remote {
        tags.push(r#"<span class="tag tag--remote">Remote</span>"#.to_string());
    } else {
        tags.push(format!(
            r#"<span class="tag">{}</span>"#,
            escape_html(&job.location)
        ));
    }
    if let Some(role) = job.role_type {
        tags.push(format!(r#"<span class="tag">{}</span>"#, role.display_name()));
    }
    if job.hours.display != "Not specified" {
        tags.push(format!(r#"<span class="tag">{}</span>"#, job.hours.display));
    }

    tags.join("\n        ")
}

fn apply_button(job: &CanonicalJob) -> String {
    match job.source_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => format!(
            r#"<a href="{}" class="btn btn--primary btn--apply" target="_blank" rel="noopener nofollow">Apply Now →</a>"#,
            escape_html(url)
        ),
        None => String::new(),
    }
}

fn description_html(job: &CanonicalJob) -> String {
    let text = job
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(&job.description_snippet);
    if text.is_empty() {
        "<p>No description available.</p>".to_string()
    } else {
        markdown_to_html(text)
    }
}

fn sidebar(job: &CanonicalJob) -> String {
    let mut rows = vec![
        detail_row("Company", &escape_html(&job.company), false),
        detail_row(
            "Location",
            &if job.is_remote {
                "Remote".to_string()
            } else {
                escape_html(&job.location)
            },
            false,
        ),
    ];
    if job.compensation.display != "Not disclosed" {
        rows.push(detail_row("Compensation", &job.compensation.display, true));
    }
    if job.hours.display != "Not specified" {
        rows.push(detail_row("Hours", &job.hours.display, false));
    }
    if let Some(posted) = &job.date_posted {
        rows.push(detail_row("Posted", &format_date(posted, "%B %d, %Y"), false));
    }
    rows.push(detail_row("Source", &escape_html(&job.source), false));

    format!(
        r#"<aside class="job-detail__sidebar">
        <div class="card detail-card">
            <h3 class="detail-card__title">Job Details</h3>
            {}
            {}
        </div>
    </aside>"#,
        rows.join("\n            "),
        apply_button(job),
    )
}

fn detail_row(label: &str, value: &str, highlight: bool) -> String {
    let class = if highlight {
        "detail-row__value detail-row__value--highlight"
    } else {
        "detail-row__value"
    };
    format!(
        r#"<div class="detail-row"><span class="detail-row__label">{}</span><span class="{}">{}</span></div>"#,
        label, class, value
    )
}

/// Up to four other listings sharing the role classification.
fn similar_jobs(job: &CanonicalJob, bundle: &ExportBundle) -> String {
    let Some(role) = job.role_type else {
        return String::new();
    };

    let similar: Vec<&CanonicalJob> = bundle
        .jobs
        .iter()
        .filter(|j| j.role_type == Some(role) && j.slug != job.slug)
        .take(4)
        .collect();
    if similar.is_empty() {
        return String::new();
    }

    let items: String = similar
        .iter()
        .map(|j| {
            format!(
                r#"<a href="/jobs/{}/" class="similar-job"><span class="similar-job__title">{}</span><span class="similar-job__company">{}</span></a>"#,
                j.slug,
                escape_html(&j.title),
                escape_html(&j.company)
            )
        })
        .collect();

    format!(
        r#"<div class="similar-jobs"><h2 class="similar-jobs__title">Similar {} Roles</h2>{}</div>"#,
        role.short_name(),
        items
    )
}

/// Schema.org JobPosting structured data for job-search indexing.
fn json_ld(cfg: &SiteConfig, job: &CanonicalJob) -> String {
    let mut posting = json!({
        "@context": "https://schema.org",
        "@type": "JobPosting",
        "title": job.title,
        "description": job.description_snippet,
        "hiringOrganization": {
            "@type": "Organization",
            "name": job.company,
        },
        "employmentType": "PART_TIME",
        "url": format!("{}/jobs/{}/", cfg.base_url, job.slug),
    });

    if let Some(posted) = &job.date_posted {
        posting["datePosted"] = json!(posted);
    }

    if job.is_remote {
        posting["jobLocationType"] = json!("TELECOMMUTE");
        posting["applicantLocationRequirements"] = json!({
            "@type": "Country",
            "name": job.location_restriction.as_deref().unwrap_or("US"),
        });
    } else {
        posting["jobLocation"] = json!({
            "@type": "Place",
            "address": { "@type": "PostalAddress", "addressLocality": job.location },
        });
    }

    let unit = match job.compensation.kind {
        CompensationType::Hourly => Some("HOUR"),
        CompensationType::Monthly => Some("MONTH"),
        CompensationType::Annual => Some("YEAR"),
        CompensationType::NotDisclosed => None,
    };
    if let (Some(min), Some(unit)) = (job.compensation.min, unit) {
        posting["baseSalary"] = json!({
            "@type": "MonetaryAmount",
            "currency": "USD",
            "value": {
                "@type": "QuantitativeValue",
                "minValue": min,
                "maxValue": job.compensation.max.unwrap_or(min),
                "unitText": unit,
            },
        });
    }

    format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        posting
    )
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_source::CsvJobRecord;
    use crate::export::bundle_from_csv;

    fn sample_bundle() -> ExportBundle {
        let rows = vec![
            CsvJobRecord {
                id: Some("a1".to_string()),
                title: Some("Fractional CFO for SaaS Startup Expansion".to_string()),
                company: Some("Acme".to_string()),
                is_remote: Some("true".to_string()),
                interval: Some("hourly".to_string()),
                min_amount: Some("150".to_string()),
                max_amount: Some("200".to_string()),
                date_posted: Some("2025-06-01".to_string()),
                job_url: Some("https://indeed.com/j/a1".to_string()),
                description: Some("Own the model.\n\n* Forecasting\n* Board reporting".to_string()),
                ..CsvJobRecord::default()
            },
            CsvJobRecord {
                id: Some("b2".to_string()),
                title: Some("Fractional CFO".to_string()),
                company: Some("Globex".to_string()),
                location: Some("Boston, MA".to_string()),
                ..CsvJobRecord::default()
            },
        ];
        bundle_from_csv(&rows)
    }

    #[test]
    fn breadcrumb_truncates_long_titles() {
        let bundle = sample_bundle();
        let html = breadcrumb(&bundle.jobs[0]);
        assert!(html.contains("Fractional CFO for SaaS Startu..."));

        let html = breadcrumb(&bundle.jobs[1]);
        assert!(html.contains("<span>Fractional CFO</span>"));
    }

    #[test]
    fn tag_row_skips_undisclosed_salary() {
        let bundle = sample_bundle();
        let html = tag_row(&bundle.jobs[0]);
        assert!(html.contains("$150-$200/hr"));
        assert!(html.contains(">Remote<"));
        assert!(html.contains("Fractional CFO"));

        let html = tag_row(&bundle.jobs[1]);
        assert!(!html.contains("tag--salary"));
        assert!(html.contains(">Boston, MA<"));
    }

    #[test]
    fn description_falls_back_when_empty() {
        let bundle = sample_bundle();
        let html = description_html(&bundle.jobs[0]);
        assert!(html.contains("<p>Own the model.</p>"));
        assert!(html.contains("<li>Forecasting</li>"));

        let html = description_html(&bundle.jobs[1]);
        assert_eq!(html, "<p>No description available.</p>");
    }

    #[test]
    fn similar_jobs_share_role_and_exclude_self() {
        let bundle = sample_bundle();
        let html = similar_jobs(&bundle.jobs[0], &bundle);
        assert!(html.contains("Similar CFO Roles"));
        assert!(html.contains("Globex"));
        assert!(!html.contains(&format!("/jobs/{}/", bundle.jobs[0].slug)));
    }

    #[test]
    fn json_ld_remote_and_salary() {
        let cfg = SiteConfig::default();
        let bundle = sample_bundle();
        let script = json_ld(&cfg, &bundle.jobs[0]);
        let raw = script
            .trim_start_matches("<script type=\"application/ld+json\">")
            .trim_end_matches("</script>");
        let v: serde_json::Value = serde_json::from_str(raw.trim()).unwrap();

        assert_eq!(v["@type"], "JobPosting");
        assert_eq!(v["jobLocationType"], "TELECOMMUTE");
        assert_eq!(v["baseSalary"]["value"]["minValue"], 150.0);
        assert_eq!(v["baseSalary"]["value"]["unitText"], "HOUR");
        assert!(v["url"]
            .as_str()
            .unwrap()
            .starts_with("https://fractionalpulse.com/jobs/"));
    }

    #[test]
    fn json_ld_onsite_without_salary() {
        let cfg = SiteConfig::default();
        let bundle = sample_bundle();
        let script = json_ld(&cfg, &bundle.jobs[1]);
        let raw = script
            .trim_start_matches("<script type=\"application/ld+json\">")
            .trim_end_matches("</script>");
        let v: serde_json::Value = serde_json::from_str(raw.trim()).unwrap();

        assert_eq!(v["jobLocation"]["address"]["addressLocality"], "Boston, MA");
        assert!(v.get("baseSalary").is_none());
        assert!(v.get("jobLocationType").is_none());
    }
}
