use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{SiteConfig, ROLE_CATEGORIES};
use crate::export::ExportBundle;
use crate::normalize::CanonicalJob;

use super::{escape_html, load_bundle, load_market_stats, templates};

/// Generate the homepage from the live bundle: hero, stats strip, role
/// grid, featured jobs, newsletter CTA.
pub fn generate(cfg: &SiteConfig) -> Result<PathBuf> {
    let bundle = load_bundle(&cfg.data_dir)?;
    let market = load_market_stats(&cfg.data_dir);

    let avg_hourly = market
        .as_ref()
        .and_then(|m| m.compensation.avg_hourly_rate)
        .map(|r| format!("${:.0}/hr", r))
        .unwrap_or_else(|| "—".to_string());

    let remote_pct = if bundle.total_jobs > 0 {
        let remote = bundle.jobs.iter().filter(|j| j.is_remote).count();
        format!(
            "{:.0}%",
            remote as f64 / bundle.total_jobs as f64 * 100.0
        )
    } else {
        "—".to_string()
    };

    let companies: HashSet<&str> = bundle.jobs.iter().map(|j| j.company.as_str()).collect();

    let body = format!(
        "{}{}{}{}{}",
        hero_section(),
        stats_section(&bundle, &avg_hourly, &remote_pct, companies.len()),
        roles_section(&bundle),
        featured_section(&bundle),
        cta_section()
    );

    let description = format!(
        "Find fractional CFO, CMO, CTO, COO and other C-suite executive opportunities. \
         Browse {}+ jobs with salary data and market insights.",
        bundle.total_jobs
    );
    let html = templates::render_page(
        cfg,
        "Fractional Executive Jobs & Salary Data",
        &description,
        &body,
        "/",
        "",
    );

    fs::create_dir_all(&cfg.site_dir)
        .with_context(|| format!("Failed to create {}", cfg.site_dir.display()))?;
    let path = cfg.site_dir.join("index.html");
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Generated homepage with {} jobs", bundle.total_jobs);
    Ok(path)
}

fn hero_section() -> String {
    r#"<section class="hero">
    <div class="hero__badge"><span class="hero__badge-dot"></span>Updated weekly with new opportunities</div>
    <h1 class="hero__title">Find Your Next <span class="hero__title-accent">Fractional</span> Executive Role</h1>
    <p class="hero__subtitle">The leading job board and market intelligence platform for fractional CFOs, CMOs, CTOs, COOs and other C-suite executives.</p>
    <div class="hero__buttons">
        <a href="/jobs/" class="btn btn--primary">Browse All Jobs</a>
        <a href="/salaries/" class="btn btn--secondary">Salary Data</a>
    </div>
</section>"#
        .to_string()
}

fn stats_section(
    bundle: &ExportBundle,
    avg_hourly: &str,
    remote_pct: &str,
    companies: usize,
) -> String {
    format!(
        r#"<section class="stats">
    <div class="stats__inner">
        <div class="stat"><div class="stat__value">{}</div><div class="stat__label">Open Positions</div></div>
        <div class="stat"><div class="stat__value">{}</div><div class="stat__label">Avg. Hourly Rate</div></div>
        <div class="stat"><div class="stat__value">{}</div><div class="stat__label">Remote Friendly</div></div>
        <div class="stat"><div class="stat__value">{}</div><div class="stat__label">Companies Hiring</div></div>
    </div>
</section>"#,
        bundle.total_jobs, avg_hourly, remote_pct, companies
    )
}

fn roles_section(bundle: &ExportBundle) -> String {
    let cards: String = ROLE_CATEGORIES
        .iter()
        .map(|role| {
            let count = bundle.stats.by_role_type.get(role.id).copied().unwrap_or(0);
            format!(
                r#"<a href="/jobs/?role={}" class="card role-card">
        <div class="role-card__icon">{}</div>
        <div class="role-card__title">{}</div>
        <div class="role-card__count">{} jobs</div>
    </a>"#,
                role.id,
                escape_html(role.icon),
                role.title,
                count
            )
        })
        .collect();

    format!(
        r#"<section class="section">
    <div class="section__header">
        <h2 class="section__title">Browse by Role</h2>
        <p class="section__subtitle">Find fractional opportunities by executive function</p>
    </div>
    <div class="roles-grid">{}</div>
</section>"#,
        cards
    )
}

fn featured_section(bundle: &ExportBundle) -> String {
    // Salaried listings first, then pad with whatever is newest
    let mut featured: Vec<&CanonicalJob> =
        bundle.jobs.iter().filter(|j| j.has_salary).take(4).collect();
    if featured.len() < 4 {
        for job in &bundle.jobs {
            if featured.len() >= 4 {
                break;
            }
            if !featured.iter().any(|f| f.slug == job.slug) {
                featured.push(job);
            }
        }
    }

    let cards: String = featured
        .iter()
        .map(|job| {
            let remote_class = if job.is_remote { " job-card__tag--remote" } else { "" };
            let location = if job.is_remote { "Remote" } else { job.location.as_str() };
            let hours_tag = if job.hours.display != "Not specified" {
                format!(r#"<span class="job-card__tag">{}</span>"#, job.hours.display)
            } else {
                String::new()
            };
            format!(
                r#"<a href="/jobs/{slug}/" class="card job-card">
        <div class="job-card__header">
            <div>
                <div class="job-card__company">{company}</div>
                <div class="job-card__title">{title}</div>
            </div>
            <div class="job-card__salary">{salary}</div>
        </div>
        <div class="job-card__meta">
            <span class="job-card__tag{remote_class}">{location}</span>
            {hours_tag}
        </div>
    </a>"#,
                slug = job.slug,
                company = escape_html(&job.company),
                title = escape_html(&job.title),
                salary = job.compensation.display,
                remote_class = remote_class,
                location = escape_html(location),
                hours_tag = hours_tag,
            )
        })
        .collect();

    format!(
        r#"<section class="section">
    <div class="section__header">
        <h2 class="section__title">Featured Opportunities</h2>
        <p class="section__subtitle">Hand-picked fractional executive positions</p>
    </div>
    <div class="jobs-grid">{}</div>
</section>"#,
        cards
    )
}

fn cta_section() -> String {
    r#"<div class="cta">
    <h2 class="cta__title">Get Weekly Fractional Opportunities</h2>
    <p class="cta__text">Join 2,500+ fractional executives receiving curated job listings and market insights.</p>
    <a href="/newsletter/" class="btn btn--primary">Subscribe to Newsletter</a>
</div>"#
        .to_string()
}

// ── Tests ──
