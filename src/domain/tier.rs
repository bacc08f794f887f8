//! Access tiers and their static metadata.
//!
//! A [`Tier`] is derived from a percentage score by [`calculate_tier`] and
//! is never persisted on its own; the metadata in [`TierInfo`] is static
//! configuration looked up on demand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive, percent) of the enterprise band.
pub const ENTERPRISE_THRESHOLD_PCT: f64 = 76.0;

/// Lower bound (inclusive, percent) of the advanced band.
pub const ADVANCED_THRESHOLD_PCT: f64 = 41.0;

/// One of the three access classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Entry tier.
    #[default]
    Basic,
    /// Middle tier.
    Advanced,
    /// Top tier.
    Enterprise,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Advanced, Self::Enterprise];

    /// Parses a tier label. Unrecognized labels fall back to [`Tier::Basic`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "advanced" => Self::Advanced,
            "enterprise" => Self::Enterprise,
            _ => Self::Basic,
        }
    }

    /// Returns the lowercase label used in storage and URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
            Self::Enterprise => "enterprise",
        }
    }

    /// Returns the static metadata for this tier.
    #[must_use]
    pub const fn info(&self) -> &'static TierInfo {
        match self {
            Self::Basic => &BASIC,
            Self::Advanced => &ADVANCED,
            Self::Enterprise => &ENTERPRISE,
        }
    }

    /// Returns the token prefix for this tier.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        self.info().prefix
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

/// Descriptive metadata of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    /// Human-readable tier name.
    pub label: &'static str,
    /// CSS color used for badges.
    pub color: &'static str,
    /// Token prefix.
    pub prefix: &'static str,
    /// Description of what the tier unlocks.
    pub access: &'static str,
}

const BASIC: TierInfo = TierInfo {
    label: "Framework Explorer",
    color: "#4CAF50",
    prefix: "WIF",
    access: "Full framework library access with guided recommendations",
};

const ADVANCED: TierInfo = TierInfo {
    label: "Framework Practitioner",
    color: "#2196F3",
    prefix: "AGT",
    access: "Full library + taxonomy explorer + personalized methodology path",
};

const ENTERPRISE: TierInfo = TierInfo {
    label: "Strategic Intelligence Agent",
    color: "#E67E50",
    prefix: "ENT",
    access: "Full access + 343 architecture mapping + custom framework generation guidance",
};

/// Classifies `score` out of `total_possible` into a tier.
///
/// The percentage is not clamped or validated. A zero `total_possible`
/// yields NaN (for a zero score) or an infinity; NaN and negative infinity
/// compare false against both thresholds and classify as [`Tier::Basic`].
#[must_use]
pub fn calculate_tier(score: f64, total_possible: f64) -> Tier {
    let pct = score / total_possible * 100.0;
    if pct >= ENTERPRISE_THRESHOLD_PCT {
        Tier::Enterprise
    } else if pct >= ADVANCED_THRESHOLD_PCT {
        Tier::Advanced
    } else {
        Tier::Basic
    }
}

/// Returns the metadata for a tier label, falling back to basic.
#[must_use]
pub fn tier_info(label: &str) -> &'static TierInfo {
    Tier::from_label(label).info()
}
