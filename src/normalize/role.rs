use serde::{Deserialize, Serialize};

/// Executive role classification derived from the job title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleType {
    Cfo,
    Cmo,
    Cto,
    Coo,
    Chro,
    Cpo,
    Cro,
    Ciso,
    Cio,
    Vp,
    Director,
    HeadOf,
}

/// Keyword table in precedence order; the first matching entry wins.
/// Ordering is load-bearing: "chief information security officer" must hit
/// CISO before the CIO row gets a chance at "chief information".
const ROLE_KEYWORDS: &[(RoleType, &[&str])] = &[
    (RoleType::Cfo, &["cfo", "chief financial"]),
    (RoleType::Cmo, &["cmo", "chief marketing"]),
    (RoleType::Cto, &["cto", "chief technology", "chief technical"]),
    (RoleType::Coo, &["coo", "chief operating"]),
    (RoleType::Chro, &["chro", "chief human", "chief people"]),
    (RoleType::Cpo, &["cpo", "chief product"]),
    (RoleType::Cro, &["cro", "chief revenue"]),
    (RoleType::Ciso, &["ciso", "chief information security"]),
    (RoleType::Cio, &["cio", "chief information"]),
    (RoleType::Vp, &["vp", "vice president"]),
    (RoleType::Director, &["director"]),
    (RoleType::HeadOf, &["head of"]),
];

/// Case-insensitive substring classification of a job title.
pub fn categorize(title: &str) -> Option<RoleType> {
    let lower = title.to_lowercase();
    ROLE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(role, _)| *role)
}

impl RoleType {
    pub fn is_c_level(self) -> bool {
        matches!(
            self,
            RoleType::Cfo
                | RoleType::Cmo
                | RoleType::Cto
                | RoleType::Coo
                | RoleType::Chro
                | RoleType::Cpo
                | RoleType::Cro
                | RoleType::Ciso
                | RoleType::Cio
        )
    }

    pub fn is_vp_level(self) -> bool {
        matches!(self, RoleType::Vp | RoleType::Director | RoleType::HeadOf)
    }

    /// Wire/breakdown key, identical to the serde rename.
    pub fn as_str(self) -> &'static str {
        match self {
            RoleType::Cfo => "cfo",
            RoleType::Cmo => "cmo",
            RoleType::Cto => "cto",
            RoleType::Coo => "coo",
            RoleType::Chro => "chro",
            RoleType::Cpo => "cpo",
            RoleType::Cro => "cro",
            RoleType::Ciso => "ciso",
            RoleType::Cio => "cio",
            RoleType::Vp => "vp",
            RoleType::Director => "director",
            RoleType::HeadOf => "head_of",
        }
    }

    /// Long form used on job detail pages.
    pub fn display_name(self) -> &'static str {
        match self {
            RoleType::Cfo => "Fractional CFO",
            RoleType::Cmo => "Fractional CMO",
            RoleType::Cto => "Fractional CTO",
            RoleType::Coo => "Fractional COO",
            RoleType::Chro => "Fractional CHRO",
            RoleType::Cpo => "Fractional CPO",
            RoleType::Cro => "Fractional CRO",
            RoleType::Ciso => "Fractional CISO",
            RoleType::Cio => "Fractional CIO",
            RoleType::Vp => "VP Level",
            RoleType::Director => "Director Level",
            RoleType::HeadOf => "Head of Department",
        }
    }

    /// Short form used on the board's filter buttons.
    pub fn short_name(self) -> &'static str {
        match self {
            RoleType::Cfo => "CFO",
            RoleType::Cmo => "CMO",
            RoleType::Cto => "CTO",
            RoleType::Coo => "COO",
            RoleType::Chro => "CHRO",
            RoleType::Cpo => "CPO",
            RoleType::Cro => "CRO",
            RoleType::Ciso => "CISO",
            RoleType::Cio => "CIO",
            RoleType::Vp => "VP",
            RoleType::Director => "Director",
            RoleType::HeadOf => "Head of",
        }
    }

    pub const ALL: &'static [RoleType] = &[
        RoleType::Cfo,
        RoleType::Cmo,
        RoleType::Cto,
        RoleType::Coo,
        RoleType::Chro,
        RoleType::Cpo,
        RoleType::Cro,
        RoleType::Ciso,
        RoleType::Cio,
        RoleType::Vp,
        RoleType::Director,
        RoleType::HeadOf,
    ];
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciso_beats_cio() {
        assert_eq!(
            categorize("Chief Information Security Officer"),
            Some(RoleType::Ciso)
        );
        assert_eq!(categorize("Chief Information Officer"), Some(RoleType::Cio));
    }

    #[test]
    fn vp_titles() {
        assert_eq!(categorize("VP of Engineering"), Some(RoleType::Vp));
        assert_eq!(categorize("Vice President, Sales"), Some(RoleType::Vp));
    }

    #[test]
    fn c_level_abbreviations() {
        assert_eq!(categorize("Fractional CFO"), Some(RoleType::Cfo));
        assert_eq!(categorize("Interim chief marketing officer"), Some(RoleType::Cmo));
        assert_eq!(categorize("Chief People Officer"), Some(RoleType::Chro));
    }

    #[test]
    fn director_and_head_of() {
        assert_eq!(categorize("Director of Finance"), Some(RoleType::Director));
        assert_eq!(categorize("Head of Growth"), Some(RoleType::HeadOf));
    }

    #[test]
    fn no_match_is_none() {
        assert_eq!(categorize("Senior Software Engineer"), None);
        assert_eq!(categorize(""), None);
    }

    #[test]
    fn c_level_and_vp_level_disjoint() {
        for role in RoleType::ALL {
            assert!(
                !(role.is_c_level() && role.is_vp_level()),
                "{:?} claims both levels",
                role
            );
            assert!(role.is_c_level() || role.is_vp_level());
        }
    }

    #[test]
    fn as_str_matches_serde_rename() {
        for role in RoleType::ALL {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }
}
