//! Domain layer: tiers, tokens, and the persisted record shapes.
//!
//! Everything here is pure. Storage lives in [`crate::persistence`] and
//! composition in [`crate::service`].

pub mod records;
pub mod tier;
pub mod token;

pub use records::{ProfileRecord, TokenRecord};
pub use tier::{Tier, TierInfo, calculate_tier, tier_info};
pub use token::{
    generate_token, generate_token_for_label, generate_token_for_label_with, generate_token_with,
    sanitize,
};
