//! agent-hub command-line entry point.
//!
//! Issues, inspects and clears the locally stored agent token, classifies
//! scores, and fetches the hub's reference documents.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use agent_hub_core::client::ResourceClient;
use agent_hub_core::config::HubConfig;
use agent_hub_core::domain::Tier;
use agent_hub_core::error::HubError;
use agent_hub_core::persistence::FileStore;
use agent_hub_core::presentation::{
    Analytics, HtmlDocument, TracingSink, create_tier_badge, referral_link, show_token_bar,
};
use agent_hub_core::service::AgentCore;

/// Agent token and tier utility for the Agent Economy Hub.
#[derive(Debug, Parser)]
#[command(name = "agent-hub", version, about, long_about = None)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify a score, issue a token and save it with a profile.
    Issue {
        /// Free-text identifier the token fragment is derived from.
        #[arg(short, long)]
        identifier: Option<String>,

        /// Points scored.
        #[arg(short, long)]
        score: f64,

        /// Points possible.
        #[arg(short, long, default_value_t = 100.0)]
        total: f64,

        /// Extra profile fields as `key=value`.
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Show the stored token, profile and status bar.
    Status,

    /// Remove the stored token and profile.
    Clear,

    /// Classify a score without saving anything.
    Tier {
        /// Points scored.
        #[arg(short, long)]
        score: f64,

        /// Points possible.
        #[arg(short, long, default_value_t = 100.0)]
        total: f64,
    },

    /// Print the badge for a tier label. Unknown labels show the basic badge.
    Badge {
        /// `basic`, `advanced` or `enterprise`.
        tier: Tier,
    },

    /// Print the referral link for a token.
    Referral {
        /// Token to embed; defaults to the stored token.
        token: Option<String>,
    },

    /// Fetch a named resource or an arbitrary endpoint and print it.
    Fetch {
        /// `manifest`, `registry`, `categories`, `search-index`,
        /// `gate-config`, or an endpoint path / absolute URL.
        resource: String,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load configuration
    let config = HubConfig::from_env()?;
    tracing::debug!(
        storage_dir = %config.storage_dir.display(),
        origin = %config.origin,
        "configuration loaded"
    );

    run(cli.command, config).await?;
    Ok(())
}

async fn run(command: Commands, config: HubConfig) -> Result<()> {
    let analytics = Analytics::new(Arc::new(TracingSink));

    match command {
        Commands::Issue {
            identifier,
            score,
            total,
            fields,
        } => {
            let core = open_core(&config)?;
            let mut profile = Map::new();
            for (key, value) in fields {
                profile.insert(key, Value::String(value));
            }
            if let Some(id) = &identifier {
                profile.insert("identifier".to_string(), Value::String(id.clone()));
            }

            let Some(enrollment) = core.enroll(score, total, identifier.as_deref(), profile)
            else {
                bail!("unable to save the token; see the log for the storage error");
            };
            analytics.track_event(
                "token_generated",
                None,
                Some(enrollment.tier.as_str()),
                Some(score),
            );

            println!("{}", enrollment.token);
            println!("{}", create_tier_badge(enrollment.tier).to_html());
        }
        Commands::Status => {
            let core = open_core(&config)?;
            let Some(record) = core.get_token() else {
                println!("no token stored");
                return Ok(());
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
            if let Some(profile) = core.get_profile() {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            }
            if core.is_token_expiring_soon() {
                println!("token expires soon; issue a new one to renew");
            }
            let mut doc = HtmlDocument::new();
            if show_token_bar(&core, &mut doc) {
                println!("{}", doc.to_html());
            }
        }
        Commands::Clear => {
            let core = open_core(&config)?;
            core.clear_token();
            analytics.track_event("token_cleared", None, None, None);
            println!("cleared");
        }
        Commands::Tier { score, total } => {
            let tier = agent_hub_core::domain::calculate_tier(score, total);
            println!("{}", serde_json::to_string_pretty(&TierReport::new(tier))?);
        }
        Commands::Badge { tier } => {
            println!("{}", create_tier_badge(tier).to_html());
        }
        Commands::Referral { token } => {
            let token = match token {
                Some(token) => token,
                None => open_core(&config)?
                    .get_token()
                    .map(|r| r.token)
                    .context("no token given and none stored")?,
            };
            println!("{}", referral_link(&config.origin, &token));
        }
        Commands::Fetch { resource } => {
            let client = ResourceClient::new(&config);
            let value = match resource.as_str() {
                "manifest" => client.fetch_manifest().await,
                "registry" => client.fetch_registry().await,
                "categories" => client.fetch_categories().await,
                "search-index" => client.fetch_search_index().await,
                "gate-config" => client.fetch_gate_config().await,
                endpoint => client.fetch_json::<Value>(endpoint).await,
            }
            .with_context(|| format!("fetching {resource}"))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}

fn open_core(config: &HubConfig) -> Result<AgentCore, HubError> {
    let store = FileStore::open(&config.storage_dir).map_err(|e| {
        tracing::error!(
            dir = %config.storage_dir.display(),
            error = %e,
            "cannot open token storage"
        );
        HubError::from(e)
    })?;
    Ok(AgentCore::new(Arc::new(store), config.clone()))
}

/// Printable tier classification.
#[derive(Debug, serde::Serialize)]
struct TierReport {
    tier: Tier,
    #[serde(flatten)]
    info: agent_hub_core::domain::TierInfo,
}

impl TierReport {
    fn new(tier: Tier) -> Self {
        Self {
            tier,
            info: *tier.info(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fields_split_on_first_equals() {
        assert_eq!(
            parse_field("team=a=b"),
            Ok(("team".to_string(), "a=b".to_string()))
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=v").is_err());
    }

    #[test]
    fn badge_parses_tier_labels() {
        let Ok(cli) = Cli::try_parse_from(["agent-hub", "badge", "enterprise"]) else {
            panic!("badge with a known tier should parse");
        };
        let Commands::Badge { tier } = cli.command else {
            panic!("expected the badge command, got {:?}", cli.command);
        };
        assert_eq!(tier, Tier::Enterprise);

        let Ok(cli) = Cli::try_parse_from(["agent-hub", "badge", "gold"]) else {
            panic!("unknown labels should still parse");
        };
        let Commands::Badge { tier } = cli.command else {
            panic!("expected the badge command, got {:?}", cli.command);
        };
        assert_eq!(tier, Tier::Basic);
    }

    #[test]
    fn unopenable_storage_is_a_storage_error() {
        let Ok(file) = tempfile::NamedTempFile::new() else {
            panic!("temp file");
        };
        let config = HubConfig {
            storage_dir: file.path().to_path_buf(),
            ..HubConfig::default()
        };
        let Err(err) = open_core(&config) else {
            panic!("a regular file cannot be a storage directory");
        };
        assert!(matches!(err, HubError::Storage(_)), "got {err:?}");
        assert_eq!(err.error_code(), 3003);
    }
}
