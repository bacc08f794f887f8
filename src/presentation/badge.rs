//! Tier badge.

use super::Element;
use crate::domain::Tier;

const BADGE_STYLE: &str = "display:inline-block;padding:4px 12px;border-radius:20px;\
font-size:0.8rem;font-weight:600;color:white;background:";

/// Builds a pill-shaped `span.tier-badge` showing the tier label on the
/// tier color.
#[must_use]
pub fn create_tier_badge(tier: Tier) -> Element {
    let info = tier.info();
    Element::new("span")
        .attr("class", "tier-badge")
        .attr("style", format!("{BADGE_STYLE}{}", info.color))
        .text(info.label)
}
