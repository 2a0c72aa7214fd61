use std::fs;
use std::io::Cursor;

use anyhow::{Context, Result};
use chrono::Local;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::info;

use crate::config::SiteConfig;
use crate::export::ExportBundle;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Render a <urlset> document for the given URLs.
pub fn render_urlset(urls: &[SitemapUrl]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    for url in urls {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        write_text_element(&mut writer, "loc", &url.loc)?;
        write_text_element(&mut writer, "lastmod", &url.lastmod)?;
        write_text_element(&mut writer, "changefreq", url.changefreq)?;
        write_text_element(&mut writer, "priority", url.priority)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    into_string(writer)
}

/// Render a <sitemapindex> document referencing the child sitemaps.
pub fn render_index(sitemaps: &[(String, String)]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("sitemapindex").with_attributes([("xmlns", SITEMAP_NS)]),
    ))?;

    for (loc, lastmod) in sitemaps {
        writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
        write_text_element(&mut writer, "loc", loc)?;
        write_text_element(&mut writer, "lastmod", lastmod)?;
        writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sitemapindex")))?;
    into_string(writer)
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> Result<String> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).context("Sitemap XML was not valid UTF-8")
}

/// Generate all sitemap artifacts plus robots.txt.
pub fn generate(cfg: &SiteConfig, bundle: &ExportBundle) -> Result<usize> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let sitemaps_dir = cfg.site_dir.join("sitemaps");
    fs::create_dir_all(&sitemaps_dir)
        .with_context(|| format!("Failed to create {}", sitemaps_dir.display()))?;

    let base = &cfg.base_url;
    let main_urls = vec![
        SitemapUrl {
            loc: format!("{}/", base),
            lastmod: today.clone(),
            changefreq: "daily",
            priority: "1.0",
        },
        SitemapUrl {
            loc: format!("{}/jobs/", base),
            lastmod: today.clone(),
            changefreq: "daily",
            priority: "0.9",
        },
        SitemapUrl {
            loc: format!("{}/about/", base),
            lastmod: today.clone(),
            changefreq: "monthly",
            priority: "0.6",
        },
    ];

    let job_urls: Vec<SitemapUrl> = bundle
        .jobs
        .iter()
        .filter(|job| !job.slug.is_empty())
        .map(|job| SitemapUrl {
            loc: format!("{}/jobs/{}/", base, job.slug),
            lastmod: job
                .date_posted
                .as_deref()
                .and_then(|d| d.get(..10))
                .unwrap_or(&today)
                .to_string(),
            changefreq: "weekly",
            priority: "0.7",
        })
        .collect();

    fs::write(
        sitemaps_dir.join("sitemap-main.xml"),
        render_urlset(&main_urls)?,
    )?;
    info!("Generated sitemap-main.xml ({} URLs)", main_urls.len());

    let mut index_entries = vec![(format!("{}/sitemaps/sitemap-main.xml", base), today.clone())];

    if !job_urls.is_empty() {
        fs::write(
            sitemaps_dir.join("sitemap-jobs.xml"),
            render_urlset(&job_urls)?,
        )?;
        info!("Generated sitemap-jobs.xml ({} URLs)", job_urls.len());
        index_entries.push((format!("{}/sitemaps/sitemap-jobs.xml", base), today.clone()));
    }

    fs::write(
        cfg.site_dir.join("sitemap_index.xml"),
        render_index(&index_entries)?,
    )?;

    // Combined root sitemap for crawlers that ignore the index
    let all_urls: Vec<SitemapUrl> = main_urls.iter().chain(job_urls.iter()).cloned().collect();
    fs::write(cfg.site_dir.join("sitemap.xml"), render_urlset(&all_urls)?)?;

    let robots = format!(
        "User-agent: *\nAllow: /\n\nSitemap: {base}/sitemap_index.xml\nSitemap: {base}/sitemap.xml\n"
    );
    fs::write(cfg.site_dir.join("robots.txt"), robots)?;
    info!("Updated robots.txt");

    Ok(all_urls.len())
}

// ── Tests ──
