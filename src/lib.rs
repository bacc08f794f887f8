//! # agent-hub-core
//!
//! Token lifecycle, access tiers, durable profile state and a read-only
//! JSON resource client for the Agent Economy Hub.
//!
//! Tokens are human-readable display identifiers (`AGT-JANEDOE-K7MQ2X`),
//! not credentials. They are saved with a 90-day expiry that is checked
//! lazily on read; the profile saved alongside a token is evicted with it.
//!
//! ## Architecture
//!
//! ```text
//! Host code / agent-hub CLI
//!     │
//!     ├── Presentation (presentation/)   badge, status bar, analytics, referral
//!     │
//!     ├── AgentCore (service/)
//!     │     ├── token generator + tier engine (domain/)
//!     │     └── TokenStore (persistence/)
//!     │           └── KeyValueStore: MemoryStore | FileStore
//!     │
//!     └── ResourceClient (client)        manifest, registry, categories, …
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod presentation;
pub mod service;
