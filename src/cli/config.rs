use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::career::career_model::{SessionContext, UserIdentity};
use crate::wizard::wizard_model::WizardSettings;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "career-wizard",
    version,
    about = "Headless career posting wizard: drafts, validation and submission"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: career-wizard.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding draft files
    #[arg(long, global = true)]
    pub draft_dir: Option<String>,

    /// Base URL of the careers API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Acting user's display name
    #[arg(long, global = true)]
    pub user_name: Option<String>,

    /// Acting user's email
    #[arg(long, global = true)]
    pub user_email: Option<String>,

    /// Organization the career belongs to
    #[arg(long, global = true)]
    pub org_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the stored draft and per-step state
    Inspect {
        /// Persisted career id (omit for the new-career draft)
        #[arg(long)]
        record: Option<String>,
    },

    /// Validate every step of the stored draft
    Validate {
        /// Persisted career id (omit for the new-career draft)
        #[arg(long)]
        record: Option<String>,
    },

    /// Submit the stored draft to the careers API
    Submit {
        /// Persisted career id; given means update, omitted means create
        #[arg(long)]
        record: Option<String>,

        /// Target status: active (publish) or inactive (save unpublished)
        #[arg(long, default_value = "inactive")]
        status: String,
    },

    /// Delete the stored draft
    Clear {
        /// Persisted career id (omit for the new-career draft)
        #[arg(long)]
        record: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `career-wizard.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub wizard: WizardSettings,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_draft_dir")]
    pub draft_dir: String,

    /// JSONL trace output; tracing is off when unset
    pub trace_file: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            draft_dir: default_draft_dir(),
            trace_file: None,
        }
    }
}

// Serde default helpers
fn default_base_url() -> String { "http://localhost:3000".to_string() }
fn default_draft_dir() -> String { ".career-drafts".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("career-wizard.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (CLI > config file > defaults)
// ============================================================================

pub fn resolve_draft_dir(cli: &Cli, config: &AppConfig) -> String {
    cli.draft_dir
        .clone()
        .unwrap_or_else(|| config.storage.draft_dir.clone())
}

pub fn resolve_base_url(cli: &Cli, config: &AppConfig) -> String {
    cli.base_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone())
}

pub fn resolve_session(cli: &Cli, config: &AppConfig) -> SessionContext {
    let base = &config.session;
    SessionContext {
        user: UserIdentity {
            image: base.user.image.clone(),
            name: cli.user_name.clone().unwrap_or_else(|| base.user.name.clone()),
            email: cli.user_email.clone().unwrap_or_else(|| base.user.email.clone()),
        },
        org_id: cli.org_id.clone().unwrap_or_else(|| base.org_id.clone()),
    }
}
