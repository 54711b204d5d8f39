//! Provider configuration sourced from the environment.

use std::env;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-central1";

/// Model identifier used when none is configured.
pub const DEFAULT_MODEL_ID: &str = "reel-video-001";

/// Provider connection settings.
///
/// `endpoint`, `project_id` and `credentials_file` have no sensible
/// defaults; leaving `credentials_file` unset selects sample-video mode.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub endpoint: Option<String>,
    pub project_id: Option<String>,
    pub region: String,
    pub model_id: String,
    pub credentials_file: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            project_id: None,
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            credentials_file: None,
        }
    }
}

impl ProviderSettings {
    /// Read settings from `REELGEN_*` environment variables.
    ///
    /// Unset and empty variables are treated the same.
    pub fn from_env() -> Self {
        Self {
            endpoint: env_or_none("REELGEN_ENDPOINT"),
            project_id: env_or_none("REELGEN_PROJECT_ID"),
            region: env_or_none("REELGEN_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            model_id: env_or_none("REELGEN_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            credentials_file: env_or_none("REELGEN_CREDENTIALS_FILE"),
        }
    }
}

fn env_or_none(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
