use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::SiteConfig;
use crate::export::ExportBundle;
use crate::normalize::role::RoleType;
use crate::normalize::CanonicalJob;

use super::{escape_html, format_date, load_bundle, templates};

const SEARCH_JS: &str = r#"<script>
(function() {
    const searchInput = document.getElementById('job-search');
    const filterBtns = document.querySelectorAll('.filter-btn');
    const jobItems = document.querySelectorAll('.job-item');
    const countEl = document.getElementById('job-count');
    let activeFilter = 'all';

    function filterJobs() {
        const query = searchInput.value.toLowerCase();
        let visible = 0;

        jobItems.forEach(item => {
            const role = item.dataset.role;
            const company = item.dataset.company;
            const title = item.dataset.title;

            const matchesFilter = activeFilter === 'all' || role === activeFilter;
            const matchesSearch = !query ||
                company.includes(query) ||
                title.includes(query);

            if (matchesFilter && matchesSearch) {
                item.style.display = '';
                visible++;
            } else {
                item.style.display = 'none';
            }
        });

        countEl.textContent = visible + ' jobs found';
    }

    searchInput.addEventListener('input', filterJobs);

    filterBtns.forEach(btn => {
        btn.addEventListener('click', () => {
            filterBtns.forEach(b => b.classList.remove('active'));
            btn.classList.add('active');
            activeFilter = btn.dataset.filter;
            filterJobs();
        });
    });
})();
</script>"#;

/// Generate the /jobs/ board page: sticky filter bar, one card per job,
/// client-side search over data attributes.
pub fn generate(cfg: &SiteConfig) -> Result<PathBuf> {
    let bundle = load_bundle(&cfg.data_dir)?;

    let body = format!(
        r#"<div class="page-header">
    <div class="page-header__inner">
        <h1 class="page-header__title">Fractional Executive Jobs</h1>
        <p class="page-header__subtitle">{total} opportunities from top companies seeking fractional CFOs, CMOs, CTOs, and more</p>
    </div>
</div>

<div class="filters">
    <div class="filters__inner">
        <div class="filter-search">
            <input type="text" id="job-search" class="filter-search__input" placeholder="Search by company or title...">
        </div>
        {filters}
    </div>
</div>

<div class="jobs-list">
    <div class="jobs-list__header">
        <span class="jobs-list__count" id="job-count">{total} jobs found</span>
    </div>
    <div class="jobs-list__items">
{items}
    </div>
</div>
{search_js}"#,
        total = bundle.total_jobs,
        filters = filter_buttons(&bundle),
        items = job_items(&bundle),
        search_js = SEARCH_JS,
    );

    let title = format!(
        "Fractional Executive Jobs ({} Open Positions)",
        bundle.total_jobs
    );
    let description = format!(
        "Browse {} fractional executive jobs. Find part-time CFO, CMO, CTO, COO roles \
         with flexible hours and competitive rates.",
        bundle.total_jobs
    );
    let html = templates::render_page(cfg, &title, &description, &body, "/jobs/", "");

    let jobs_dir = cfg.site_dir.join("jobs");
    fs::create_dir_all(&jobs_dir)
        .with_context(|| format!("Failed to create {}", jobs_dir.display()))?;
    let path = jobs_dir.join("index.html");
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Generated job board with {} listings", bundle.total_jobs);
    Ok(path)
}

/// "All" plus one button per role that actually has listings, in the
/// classifier's precedence order, with the unclassified bucket last.
fn filter_buttons(bundle: &ExportBundle) -> String {
    let mut buttons = vec![format!(
        r#"<button class="filter-btn active" data-filter="all">All ({})</button>"#,
        bundle.total_jobs
    )];

    for role in RoleType::ALL {
        if let Some(count) = bundle.stats.by_role_type.get(role.as_str()) {
            buttons.push(format!(
                r#"<button class="filter-btn" data-filter="{}">{} ({})</button>"#,
                role.as_str(),
                role.short_name(),
                count
            ));
        }
    }

    if let Some(count) = bundle.stats.by_role_type.get("other") {
        buttons.push(format!(
            r#"<button class="filter-btn" data-filter="other">Other ({})</button>"#,
            count
        ));
    }

    buttons.join("\n        ")
}

fn job_items(bundle: &ExportBundle) -> String {
    bundle.jobs.iter().map(job_item).collect()
}

fn job_item(job: &CanonicalJob) -> String {
    let role_key = job.role_type.map_or("other", |r| r.as_str());
    let mut tags = Vec::new();

    if job.is_remote {
        tags.push(r#"<span class="job-item__tag job-item__tag--remote">Remote</span>"#.to_string());
    } else {
        tags.push(format!(
            r#"<span class="job-item__tag">{}</span>"#,
            escape_html(&job.location)
        ));
    }
    if let Some(role) = job.role_type {
        tags.push(format!(
            r#"<span class="job-item__tag">{}</span>"#,
            role.short_name()
        ));
    }
    if job.hours.display != "Not specified" {
        tags.push(format!(
            r#"<span class="job-item__tag">{}</span>"#,
            job.hours.display
        ));
    }
    if let Some(posted) = &job.date_posted {
        tags.push(format!(
            r#"<span class="job-item__tag job-item__tag--date">{}</span>"#,
            format_date(posted, "%b %d, %Y")
        ));
    }

    format!(
        r#"        <a href="/jobs/{slug}/" class="job-item"
           data-role="{role}"
           data-remote="{remote}"
           data-company="{company_lower}"
           data-title="{title_lower}">
            <div class="job-item__header">
                <div>
                    <div class="job-item__company">{company}</div>
                    <div class="job-item__title">{title}</div>
                </div>
                <div class="job-item__salary">{salary}</div>
            </div>
            <div class="job-item__meta">{tags}</div>
        </a>
"#,
        slug = job.slug,
        role = role_key,
        remote = job.is_remote,
        company_lower = escape_html(&job.company.to_lowercase()),
        title_lower = escape_html(&job.title.to_lowercase()),
        company = escape_html(&job.company),
        title = escape_html(&job.title),
        salary = job.compensation.display,
        tags = tags.join(""),
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
                title: Some("Fractional CFO".to_string()),
                company: Some("Acme & Sons".to_string()),
                is_remote: Some("true".to_string()),
                interval: Some("hourly".to_string()),
                min_amount: Some("100".to_string()),
                max_amount: Some("200".to_string()),
                date_posted: Some("2025-06-01".to_string()),
                ..CsvJobRecord::default()
            },
            CsvJobRecord {
                title: Some("Chief of Staff".to_string()),
                company: Some("Globex".to_string()),
                location: Some("Boston, MA".to_string()),
                ..CsvJobRecord::default()
            },
        ];
        bundle_from_csv(&rows)
    }

    #[test]
    fn filter_buttons_reflect_counts() {
        let html = filter_buttons(&sample_bundle());
        assert!(html.contains(r#"data-filter="all">All (2)"#));
        assert!(html.contains(r#"data-filter="cfo">CFO (1)"#));
        assert!(html.contains(r#"data-filter="other">Other (1)"#));
        // No button for roles without listings
        assert!(!html.contains(r#"data-filter="cmo""#));
    }

    #[test]
    fn job_items_carry_filter_attributes() {
        let bundle = sample_bundle();
        let html = job_items(&bundle);
        assert!(html.contains(r#"data-role="cfo""#));
        assert!(html.contains(r#"data-role="other""#));
        assert!(html.contains(r#"data-remote="true""#));
        assert!(html.contains(r#"data-company="acme &amp; sons""#));
        assert!(html.contains("$100-$200/hr"));
        assert!(html.contains("Jun 01, 2025"));
        assert!(html.contains(">Remote</span>"));
        assert!(html.contains(">Boston, MA</span>"));
    }
}
