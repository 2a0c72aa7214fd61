use sha2::{Digest, Sha256};

/// Turn free text into a URL-safe slug fragment: lowercase, "&" becomes
/// "and", anything that is not alphanumeric or a space is dropped, runs of
/// whitespace collapse into single hyphens, capped at 50 characters.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().trim().replace('&', "and");
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    let joined = kept.split_whitespace().collect::<Vec<_>>().join("-");
    joined.chars().take(50).collect()
}

/// Build the page slug for one job: `{company}-{title}-{fingerprint}`.
///
/// Blank company/title fall back to "company"/"role" so the slug is never
/// empty. The 6-hex fingerprint disambiguates identical company+title pairs
/// coming from different source records.
pub fn generate_slug(company: &str, title: &str, source_id: &str) -> String {
    let company_slug = or_placeholder(slugify(company), "company");
    let title_slug = or_placeholder(slugify(title), "role");
    format!(
        "{}-{}-{}",
        company_slug,
        title_slug,
        fingerprint(company, title, source_id)
    )
}

fn or_placeholder(slug: String, placeholder: &str) -> String {
    if slug.is_empty() {
        placeholder.to_string()
    } else {
        slug
    }
}

/// First 6 hex chars of SHA-256 over the literal "{company}-{title}-{id}"
/// concatenation. Deterministic for a given triple.
fn fingerprint(company: &str, title: &str, source_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}-{}-{}", company, title, source_id).as_bytes());
    let digest = hasher.finalize();
    digest[..3].iter().map(|b| format!("{:02x}", b)).collect()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Fractional CFO"), "fractional-cfo");
        assert_eq!(slugify("  VP, Engineering  "), "vp-engineering");
    }

    #[test]
    fn slugify_ampersand() {
        assert_eq!(slugify("Sales & Marketing"), "sales-and-marketing");
    }

    #[test]
    fn slugify_drops_specials() {
        assert_eq!(slugify("C.T.O. (Remote!)"), "cto-remote");
    }

    #[test]
    fn slugify_truncates_to_50() {
        let long = "a".repeat(80);
        assert_eq!(slugify(&long).len(), 50);
    }

    #[test]
    fn slugify_empty_stays_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slug_is_deterministic() {
        let a = generate_slug("Acme", "Fractional CFO", "abc123");
        let b = generate_slug("Acme", "Fractional CFO", "abc123");
        assert_eq!(a, b);
    }

    #[test]
    fn slug_differs_by_source_id() {
        let a = generate_slug("Acme", "Fractional CFO", "abc123");
        let b = generate_slug("Acme", "Fractional CFO", "xyz789");
        assert_ne!(a, b);
        // Same readable prefix, different fingerprint
        assert!(a.starts_with("acme-fractional-cfo-"));
        assert!(b.starts_with("acme-fractional-cfo-"));
    }

    #[test]
    fn slug_never_empty() {
        let slug = generate_slug("", "", "x");
        let parts: Vec<&str> = slug.split('-').collect();
        assert_eq!(parts[0], "company");
        assert_eq!(parts[1], "role");
        let hash = parts[2];
        assert_eq!(hash.len(), 6);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
