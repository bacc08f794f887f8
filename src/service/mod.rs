//! Service layer: lifecycle orchestration.
//!
//! [`AgentCore`] composes token generation, the token store and the tier
//! engine behind one handle that presentation code reads through.

pub mod agent_core;

pub use agent_core::{AgentCore, Enrollment};
