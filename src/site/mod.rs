pub mod board;
pub mod home;
pub mod job_pages;
pub mod templates;

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use regex::Regex;

use crate::export::{ExportBundle, MarketStats};

static BOLD_STARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[*\-•]\s*").unwrap());

/// Load the exported bundle the rendering stages feed on. A missing
/// jobs.json is fatal - run `export` first.
pub fn load_bundle(data_dir: &Path) -> Result<ExportBundle> {
    let path = data_dir.join("jobs.json");
    if !path.exists() {
        bail!(
            "{} not found - run the export stage before generating pages",
            path.display()
        );
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let bundle = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(bundle)
}

/// Market stats are optional at render time; the homepage degrades to
/// placeholders when the file is absent or unreadable.
pub fn load_market_stats(data_dir: &Path) -> Option<MarketStats> {
    let raw = fs::read_to_string(data_dir.join("market_stats.json")).ok()?;
    serde_json::from_str(&raw).ok()
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Display-format an ISO date (only the first 10 chars are considered).
/// Unparseable input passes through untouched.
pub fn format_date(date: &str, fmt: &str) -> String {
    let head = date.get(..10).unwrap_or(date);
    match NaiveDate::parse_from_str(head, "%Y-%m-%d") {
        Ok(d) => d.format(fmt).to_string(),
        Err(_) => date.to_string(),
    }
}

/// Convert the lightweight markdown subset job descriptions use into HTML:
/// escape first, then bold markers, bullet-list grouping, and
/// paragraph/<br> splitting. Not a general markdown renderer.
pub fn markdown_to_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let escaped = escape_html(text);
    let bolded = BOLD_STARS_RE.replace_all(&escaped, "<strong>$1</strong>");
    let bolded = BOLD_UNDERSCORES_RE.replace_all(&bolded, "<strong>$1</strong>");

    let mut parts = Vec::new();
    for paragraph in bolded.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        let lines: Vec<&str> = paragraph
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let is_list = !lines.is_empty()
            && lines
                .iter()
                .all(|l| l.starts_with("* ") || l.starts_with("- ") || l.starts_with("• "));

        if is_list {
            let items: String = lines
                .iter()
                .map(|l| format!("<li>{}</li>", BULLET_RE.replace(l, "")))
                .collect();
            parts.push(format!("<ul>{}</ul>", items));
        } else {
            parts.push(format!("<p>{}</p>", paragraph.replace('\n', "<br>")));
        }
    }

    parts.join("\n")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_specials() {
        assert_eq!(
            escape_html(r#"<b>"A & B"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn formats_iso_dates() {
        assert_eq!(format_date("2025-06-01", "%B %d, %Y"), "June 01, 2025");
        assert_eq!(format_date("2025-06-01T12:30:00", "%b %d, %Y"), "Jun 01, 2025");
        assert_eq!(format_date("whenever", "%B %d, %Y"), "whenever");
    }

    #[test]
    fn markdown_bold_and_paragraphs() {
        let html = markdown_to_html("We need a **strong** leader.\n\nStart __now__.");
        assert_eq!(
            html,
            "<p>We need a <strong>strong</strong> leader.</p>\n<p>Start <strong>now</strong>.</p>"
        );
    }

    #[test]
    fn markdown_bullet_lists() {
        let html = markdown_to_html("* Own the roadmap\n- Hire the team\n• Report to CEO");
        assert_eq!(
            html,
            "<ul><li>Own the roadmap</li><li>Hire the team</li><li>Report to CEO</li></ul>"
        );
    }

    #[test]
    fn markdown_escapes_before_formatting() {
        let html = markdown_to_html("Experience with <script> & **C++**");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<strong>C++</strong>"));
    }

    #[test]
    fn markdown_single_newline_becomes_br() {
        let html = markdown_to_html("Line one\nLine two");
        assert_eq!(html, "<p>Line one<br>Line two</p>");
    }

    #[test]
    fn markdown_empty_input() {
        assert_eq!(markdown_to_html(""), "");
    }
}
