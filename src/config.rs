use std::path::PathBuf;

/// Runtime configuration, resolved once in main from CLI flags over
/// defaults and passed by reference to every stage.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_name: String,
    pub tagline: String,
    pub base_url: String,
    pub logo_text: String,
    pub data_dir: PathBuf,
    pub site_dir: PathBuf,
    /// Google Analytics 4 measurement ID; empty disables the snippet.
    pub ga4_id: String,
    /// Microsoft Clarity project ID; empty disables the snippet.
    pub clarity_id: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "Fractional Pulse".to_string(),
            tagline: "Jobs & Market Intelligence for Fractional Executives".to_string(),
            base_url: "https://fractionalpulse.com".to_string(),
            logo_text: "FP".to_string(),
            data_dir: PathBuf::from("data"),
            site_dir: PathBuf::from("site"),
            ga4_id: String::new(),
            clarity_id: String::new(),
        }
    }
}

impl SiteConfig {
    pub fn copyright(&self) -> String {
        format!("© 2025 {}. All rights reserved.", self.site_name)
    }
}

pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Jobs", href: "/jobs/" },
    NavItem { label: "Salaries", href: "/salaries/" },
    NavItem { label: "Companies", href: "/companies/" },
    NavItem { label: "Insights", href: "/insights/" },
    NavItem { label: "About", href: "/about/" },
];

pub const HEADER_CTA: NavItem = NavItem {
    label: "Browse Jobs",
    href: "/jobs/",
};

pub struct FooterColumn {
    pub title: &'static str,
    pub links: &'static [NavItem],
}

pub const FOOTER_COLUMNS: &[FooterColumn] = &[
    FooterColumn {
        title: "Jobs",
        links: &[
            NavItem { label: "All Jobs", href: "/jobs/" },
            NavItem { label: "Fractional CFO", href: "/jobs/?role=cfo" },
            NavItem { label: "Fractional CMO", href: "/jobs/?role=cmo" },
            NavItem { label: "Fractional CTO", href: "/jobs/?role=cto" },
            NavItem { label: "Fractional COO", href: "/jobs/?role=coo" },
        ],
    },
    FooterColumn {
        title: "Resources",
        links: &[
            NavItem { label: "Salary Data", href: "/salaries/" },
            NavItem { label: "Companies", href: "/companies/" },
            NavItem { label: "Market Insights", href: "/insights/" },
        ],
    },
    FooterColumn {
        title: "Company",
        links: &[
            NavItem { label: "About", href: "/about/" },
            NavItem { label: "Newsletter", href: "/newsletter/" },
            NavItem { label: "Contact", href: "mailto:hello@fractionalpulse.com" },
        ],
    },
];

pub struct RoleCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
}

/// Browse-by-role cards on the homepage; "other" catches the unclassified
/// bucket from the export breakdown.
pub const ROLE_CATEGORIES: &[RoleCategory] = &[
    RoleCategory { id: "cfo", title: "Fractional CFO", icon: "$" },
    RoleCategory { id: "cmo", title: "Fractional CMO", icon: "M" },
    RoleCategory { id: "cto", title: "Fractional CTO", icon: "</>" },
    RoleCategory { id: "coo", title: "Fractional COO", icon: "O" },
    RoleCategory { id: "chro", title: "Fractional CHRO", icon: "H" },
    RoleCategory { id: "cro", title: "Fractional CRO", icon: "R" },
    RoleCategory { id: "cpo", title: "Fractional CPO", icon: "P" },
    RoleCategory { id: "other", title: "Other Roles", icon: "+" },
];
