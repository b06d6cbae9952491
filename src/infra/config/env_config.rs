// Process configuration, read once from the environment at startup.

use thiserror::Error;

use crate::core::plane::PlaneProject;
use crate::infra::plane::plane_client::DEFAULT_BASE_URL;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable! Add it to your .env file.")]
    Missing(&'static str),
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Everything the bot needs to know about Discord and Plane.
#[derive(Clone)]
pub struct BotConfig {
    pub client_id: u64,
    pub discord_token: String,
    pub plane_api_key: String,
    pub plane_api_url: String,
    pub project: PlaneProject,
}

// Secrets stay out of Debug output so a stray `{:?}` can't leak them.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("client_id", &self.client_id)
            .field("discord_token", &"<redacted>")
            .field("plane_api_key", &"<redacted>")
            .field("plane_api_url", &self.plane_api_url)
            .field("project", &self.project)
            .finish()
    }
}

impl BotConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup. Used by `from_env` and tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let client_id = required("CLIENT_ID")?
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: "CLIENT_ID",
                reason: "expected a non-zero Discord application id".to_string(),
            })?;

        let plane_api_url = lookup("PLANE_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client_id,
            discord_token: required("DISCORD_TOKEN")?,
            plane_api_key: required("PLANE_API_KEY")?,
            plane_api_url,
            project: PlaneProject {
                workspace_slug: required("WORKSPACE_SLUG")?,
                project_id: required("PROJECT_ID")?,
            },
        })
    }
}
