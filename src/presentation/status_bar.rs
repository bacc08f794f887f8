//! Persistent token status bar pinned to the bottom of the page.

use super::{Element, Renderer};
use crate::service::AgentCore;

/// `id` of the injected bar.
pub const TOKEN_BAR_ID: &str = "agent-token-bar";

/// Page that manages the current token.
pub const MANAGE_HREF: &str = "/agent/verify.html";

/// Bottom padding reserved on the body so the bar does not cover content.
pub const BAR_HEIGHT_PX: u32 = 44;

const BAR_STYLE: &str = "position:fixed;bottom:0;left:0;right:0;background:#1A2332;\
color:white;padding:8px 24px;display:flex;justify-content:space-between;\
align-items:center;z-index:999;font-size:0.85rem;box-shadow:0 -2px 10px rgba(0,0,0,0.2)";

/// Renders the status bar for the current token into `renderer`.
///
/// Does nothing and returns `false` unless both a token and a profile are
/// stored. The label and color come from the profile's `tier` field.
pub fn show_token_bar(core: &AgentCore, renderer: &mut dyn Renderer) -> bool {
    let Some(record) = core.get_token() else {
        return false;
    };
    let Some(profile) = core.get_profile() else {
        return false;
    };
    let info = profile.tier().info();

    let summary = Element::new("div")
        .attr("style", "display:flex;align-items:center;gap:12px")
        .child(
            Element::new("span")
                .attr("style", format!("color:{};font-weight:600", info.color))
                .text(info.label),
        )
        .child(
            Element::new("span")
                .attr("style", "opacity:0.6")
                .text(format!("Token: {}", record.token)),
        );

    let manage = Element::new("a")
        .attr("href", MANAGE_HREF)
        .attr("style", "color:#E67E50;text-decoration:none;font-weight:500")
        .text("Manage \u{2192}");

    let bar = Element::new("div")
        .attr("id", TOKEN_BAR_ID)
        .attr("style", BAR_STYLE)
        .child(summary)
        .child(manage);

    renderer.append_to_body(bar);
    renderer.set_body_padding_bottom(BAR_HEIGHT_PX);
    true
}
