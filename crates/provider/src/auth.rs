//! Credential resolution for the provider client.
//!
//! Configuration is resolved once per generation, so credential rotation or
//! newly supplied settings take effect without a restart.

use tracing::debug;

use crate::settings::ProviderSettings;

/// Everything the API client needs to reach the provider.
#[derive(Debug, Clone)]
pub struct ProviderAccess {
    pub endpoint: String,
    pub project_id: String,
    pub region: String,
    pub model_id: String,
    pub token: String,
}

/// Outcome of resolving provider settings into usable access.
#[derive(Debug, Clone)]
pub enum CredentialState {
    /// No credentials file is configured; the caller should serve the
    /// built-in sample instead of calling the provider.
    Unconfigured,
    /// Credentials resolved; live generation can proceed.
    Ready(ProviderAccess),
    /// Credentials were configured but could not be used.
    Failed { reason: String },
}

/// Resolve settings into a credential state.
///
/// The file named by the settings' credentials path holds a short-lived
/// access token. Absence of the path means deliberately unconfigured;
/// everything else wrong with it is a failure the caller reports.
pub async fn resolve_credentials(settings: &ProviderSettings) -> CredentialState {
    let Some(path) = &settings.credentials_file else {
        debug!("No credentials file configured; provider access unavailable");
        return CredentialState::Unconfigured;
    };

    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) => {
            return CredentialState::Failed {
                reason: format!("Failed to read credentials file {path}: {e}"),
            };
        }
    };

    let token = raw.trim();
    if token.is_empty() {
        return CredentialState::Failed {
            reason: format!("Credentials file {path} is empty"),
        };
    }

    let (Some(endpoint), Some(project_id)) = (&settings.endpoint, &settings.project_id) else {
        return CredentialState::Failed {
            reason: "Provider endpoint and project must be configured alongside credentials"
                .to_string(),
        };
    };

    CredentialState::Ready(ProviderAccess {
        endpoint: endpoint.clone(),
        project_id: project_id.clone(),
        region: settings.region.clone(),
        model_id: settings.model_id.clone(),
        token: token.to_string(),
    })
}
