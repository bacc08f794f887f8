//! Human-readable agent tokens.
//!
//! Tokens look like `AGT-JANEDOE-K7MQ2X`: a tier prefix, up to eight
//! characters derived from a caller identifier, and a random suffix. They are
//! display identifiers, not credentials; the randomness is not
//! cryptographically secure.

use rand::Rng;

use super::tier::Tier;

/// Alphabet of the random suffix. Omits the lookalikes `I`, `O`, `0` and `1`.
pub const TOKEN_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Fragment returned when an identifier has no alphanumeric characters.
pub const ANONYMOUS_FRAGMENT: &str = "ANON";

/// Identifier used when the caller supplies none.
pub const DEFAULT_IDENTIFIER: &str = "USER";

/// Maximum length of the identifier fragment.
pub const MAX_FRAGMENT_LEN: usize = 8;

/// Strips everything outside `[A-Za-z0-9]` and upper-cases the rest.
///
/// Returns [`ANONYMOUS_FRAGMENT`] when nothing survives.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if cleaned.is_empty() {
        ANONYMOUS_FRAGMENT.to_string()
    } else {
        cleaned
    }
}

/// Length of the random suffix for `tier`.
#[must_use]
pub const fn random_len(tier: Tier) -> usize {
    match tier {
        Tier::Basic => 4,
        Tier::Advanced | Tier::Enterprise => 6,
    }
}

/// Draws `len` characters uniformly from [`TOKEN_ALPHABET`].
pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_ALPHABET.len());
            TOKEN_ALPHABET.get(idx).copied().map_or('A', char::from)
        })
        .collect()
}

/// Builds a token for `tier` using the given random source.
///
/// A missing or empty identifier is replaced by [`DEFAULT_IDENTIFIER`].
pub fn generate_token_with<R: Rng + ?Sized>(
    rng: &mut R,
    tier: Tier,
    identifier: Option<&str>,
) -> String {
    assemble(rng, tier.prefix(), random_len(tier), identifier)
}

/// Builds a token for `tier` using the thread-local random source.
#[must_use]
pub fn generate_token(tier: Tier, identifier: Option<&str>) -> String {
    generate_token_with(&mut rand::thread_rng(), tier, identifier)
}

/// Builds a token from a raw tier label using the given random source.
///
/// Unknown labels get the basic `WIF` prefix, but only the exact label
/// `basic` gets the short suffix; every other label gets six characters.
pub fn generate_token_for_label_with<R: Rng + ?Sized>(
    rng: &mut R,
    label: &str,
    identifier: Option<&str>,
) -> String {
    let len = if label == Tier::Basic.as_str() {
        random_len(Tier::Basic)
    } else {
        random_len(Tier::Advanced)
    };
    assemble(rng, Tier::from_label(label).prefix(), len, identifier)
}

/// Builds a token from a raw tier label using the thread-local random
/// source. See [`generate_token_for_label_with`].
#[must_use]
pub fn generate_token_for_label(label: &str, identifier: Option<&str>) -> String {
    generate_token_for_label_with(&mut rand::thread_rng(), label, identifier)
}

fn assemble<R: Rng + ?Sized>(
    rng: &mut R,
    prefix: &str,
    suffix_len: usize,
    identifier: Option<&str>,
) -> String {
    let source = identifier
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_IDENTIFIER);
    let fragment: String = sanitize(source).chars().take(MAX_FRAGMENT_LEN).collect();
    let suffix = random_suffix(rng, suffix_len);
    format!("{prefix}-{fragment}-{suffix}")
}
