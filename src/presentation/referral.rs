//! Referral codes carried in the `ref` query parameter.

use reqwest::Url;

/// Query parameter carrying the referral code.
pub const REFERRAL_PARAM: &str = "ref";

/// Page referral links point at.
pub const VERIFY_PATH: &str = "/agent/verify.html";

/// The parts of the current page location the helpers read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Scheme and host, e.g. `https://example.com`.
    pub origin: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// Splits an absolute URL into origin and search.
    ///
    /// Returns `None` if `href` is not an absolute URL.
    #[must_use]
    pub fn parse(href: &str) -> Option<Self> {
        let url = Url::parse(href).ok()?;
        let origin = url.origin().ascii_serialization();
        let search = url.query().map(|q| format!("?{q}")).unwrap_or_default();
        Some(Self { origin, search })
    }
}

/// Reads the referral code from `location`. Missing or empty → `None`.
#[must_use]
pub fn referral_code(location: &Location) -> Option<String> {
    let query = location.search.strip_prefix('?').unwrap_or(&location.search);
    // The origin is irrelevant; a placeholder base lets `Url` decode the query.
    let mut url = Url::parse("http://localhost/").ok()?;
    url.set_query(Some(query));
    url.query_pairs()
        .find(|(k, _)| k == REFERRAL_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Builds `{origin}/agent/verify.html?ref={token}`.
///
/// The token is percent-encoded the way `encodeURIComponent` does it, so a
/// space becomes `%20`, never `+`.
#[must_use]
pub fn referral_link(origin: &str, token: &str) -> String {
    let origin = origin.trim_end_matches('/');
    format!(
        "{origin}{VERIFY_PATH}?{REFERRAL_PARAM}={}",
        urlencoding::encode(token)
    )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn location(href: &str) -> Location {
        let Some(loc) = Location::parse(href) else {
            panic!("valid href {href}");
        };
        loc
    }

    #[test]
    fn reads_ref_parameter() {
        let loc = location("https://example.com/agent/?utm=x&ref=AGT-JANE-K7MQ2X");
        assert_eq!(loc.origin, "https://example.com");
        assert_eq!(referral_code(&loc).as_deref(), Some("AGT-JANE-K7MQ2X"));
    }

    #[test]
    fn missing_or_empty_ref_is_none() {
        assert_eq!(referral_code(&location("https://example.com/")), None);
        assert_eq!(referral_code(&location("https://example.com/?ref=")), None);
        assert_eq!(referral_code(&location("https://example.com/?other=1")), None);
    }

    #[test]
    fn decodes_encoded_values() {
        let loc = Location {
            origin: "https://example.com".to_string(),
            search: "?ref=A%20B%26C".to_string(),
        };
        assert_eq!(referral_code(&loc).as_deref(), Some("A B&C"));
    }

    #[test]
    fn link_embeds_token_as_ref() {
        assert_eq!(
            referral_link("https://example.com", "WIF-USER-ABCD"),
            "https://example.com/agent/verify.html?ref=WIF-USER-ABCD"
        );
    }

    #[test]
    fn link_round_trips_through_referral_code() {
        let link = referral_link("https://example.com/", "A B&C");
        assert_eq!(link, "https://example.com/agent/verify.html?ref=A%20B%26C");
        assert_eq!(referral_code(&location(&link)).as_deref(), Some("A B&C"));
    }

    #[test]
    fn link_encodes_spaces_as_percent_twenty() {
        let link = referral_link("https://example.com", "a b+c/d");
        assert_eq!(link, "https://example.com/agent/verify.html?ref=a%20b%2Bc%2Fd");
        assert!(!link.contains('+'));
        assert_eq!(
            referral_link("https://example.com", "ok-_.~"),
            "https://example.com/agent/verify.html?ref=ok-_.~"
        );
    }
}
