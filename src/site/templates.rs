use crate::config::{SiteConfig, FOOTER_COLUMNS, HEADER_CTA, NAV_ITEMS};

use super::escape_html;

const STYLE: &str = include_str!("../../assets/style.css");

const MOBILE_NAV_JS: &str = r#"<script>
(function() {
    const toggle = document.querySelector('.header__menu-toggle');
    const nav = document.querySelector('.header__nav');
    if (!toggle || !nav) return;
    toggle.addEventListener('click', () => {
        nav.classList.toggle('header__nav--open');
        toggle.classList.toggle('header__menu-toggle--open');
    });
})();
</script>"#;

/// Assemble a complete HTML document: head, sticky header, body content,
/// footer, nav script, analytics. Every generated page goes through here.
pub fn render_page(
    cfg: &SiteConfig,
    title: &str,
    description: &str,
    body: &str,
    canonical_path: &str,
    extra_head: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {site_name}</title>
    <meta name="description" content="{description}">
    <link rel="canonical" href="{base_url}{canonical_path}">
    <meta property="og:title" content="{title} | {site_name}">
    <meta property="og:description" content="{description}">
    <meta property="og:url" content="{base_url}{canonical_path}">
    <meta property="og:type" content="website">
    <style>{style}</style>{extra_head}{analytics}
</head>
<body>
{header}
<main>
{body}
</main>
{footer}
{nav_js}
</body>
</html>
"#,
        title = escape_html(title),
        site_name = escape_html(&cfg.site_name),
        description = escape_html(description),
        base_url = cfg.base_url,
        canonical_path = canonical_path,
        style = STYLE,
        extra_head = extra_head,
        analytics = analytics_scripts(cfg),
        header = header_html(cfg),
        body = body,
        footer = footer_html(cfg),
        nav_js = MOBILE_NAV_JS,
    )
}

/// Analytics tags, emitted only for configured (non-empty) IDs.
pub fn analytics_scripts(cfg: &SiteConfig) -> String {
    let mut scripts = String::new();

    if !cfg.ga4_id.is_empty() {
        scripts.push_str(&format!(
            r#"
    <script async src="https://www.googletagmanager.com/gtag/js?id={id}"></script>
    <script>
        window.dataLayer = window.dataLayer || [];
        function gtag(){{dataLayer.push(arguments);}}
        gtag('js', new Date());
        gtag('config', '{id}');
    </script>"#,
            id = cfg.ga4_id
        ));
    }

    if !cfg.clarity_id.is_empty() {
        scripts.push_str(&format!(
            r#"
    <script type="text/javascript">
        (function(c,l,a,r,i,t,y){{
            c[a]=c[a]||function(){{(c[a].q=c[a].q||[]).push(arguments)}};
            t=l.createElement(r);t.async=1;t.src="https://www.clarity.ms/tag/{id}";
            y=l.getElementsByTagName(r)[0];y.parentNode.insertBefore(t,y);
        }})(window, document, "clarity", "script", "{id}");
    </script>"#,
            id = cfg.clarity_id
        ));
    }

    scripts
}

fn header_html(cfg: &SiteConfig) -> String {
    let nav_links: String = NAV_ITEMS
        .iter()
        .map(|item| format!(r#"<a href="{}" class="header__link">{}</a>"#, item.href, item.label))
        .collect();

    format!(
        r#"<header class="header">
    <div class="header__inner">
        <a href="/" class="header__logo">
            <span class="header__logo-mark">{logo}</span>
            <span class="header__logo-text">{site_name}</span>
        </a>
        <nav class="header__nav">{nav_links}</nav>
        <a href="{cta_href}" class="btn btn--primary header__cta">{cta_label}</a>
        <button class="header__menu-toggle" aria-label="Menu"><span></span><span></span><span></span></button>
    </div>
</header>"#,
        logo = escape_html(&cfg.logo_text),
        site_name = escape_html(&cfg.site_name),
        nav_links = nav_links,
        cta_href = HEADER_CTA.href,
        cta_label = HEADER_CTA.label,
    )
}

fn footer_html(cfg: &SiteConfig) -> String {
    let columns: String = FOOTER_COLUMNS
        .iter()
        .map(|col| {
            let links: String = col
                .links
                .iter()
                .map(|l| format!(r#"<li><a href="{}">{}</a></li>"#, l.href, l.label))
                .collect();
            format!(
                r#"<div class="footer__column"><h4>{}</h4><ul>{}</ul></div>"#,
                col.title, links
            )
        })
        .collect();

    format!(
        r#"<footer class="footer">
    <div class="footer__inner">
        <div class="footer__brand">
            <div class="footer__logo">{site_name}</div>
            <p class="footer__tagline">{tagline}</p>
        </div>
        {columns}
    </div>
    <div class="footer__bottom">{copyright}</div>
</footer>"#,
        site_name = escape_html(&cfg.site_name),
        tagline = escape_html(&cfg.tagline),
        columns = columns,
        copyright = cfg.copyright(),
    )
}

// ── Tests ──
