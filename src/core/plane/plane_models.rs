use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors that can come back from the Plane API call.
#[derive(Debug, Clone, Error)]
pub enum PlaneError {
    /// Plane answered with a non-2xx status. `body` is the parsed JSON payload,
    /// or the raw text wrapped in a JSON string when the body was not JSON.
    #[error("Plane rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: Value },
    /// The request could not be built or sent, or the response body could not be read.
    #[error("Plane request failed: {0}")]
    Transport(String),
    /// Plane answered 2xx but the body was not JSON.
    #[error("Plane returned an unreadable body: {0}")]
    Decode(String),
}

/// Which Plane project modules get created in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneProject {
    pub workspace_slug: String,
    pub project_id: String,
}

/// Body of `POST .../modules/`. Serialises to exactly `{"name":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateModuleRequest {
    pub name: String,
}

/// The parts of Plane's module response we care about. Everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaneModule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Outcome of one module creation attempt. Consumed by the reply step, never stored.
#[derive(Debug, Clone)]
pub enum ModuleCreation {
    Created(PlaneModule),
    Failed(PlaneError),
}

impl ModuleCreation {
    pub fn is_success(&self) -> bool {
        matches!(self, ModuleCreation::Created(_))
    }

    pub fn module(&self) -> Option<&PlaneModule> {
        match self {
            ModuleCreation::Created(module) => Some(module),
            ModuleCreation::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PlaneError> {
        match self {
            ModuleCreation::Created(_) => None,
            ModuleCreation::Failed(err) => Some(err),
        }
    }
}

impl From<Result<PlaneModule, PlaneError>> for ModuleCreation {
    fn from(result: Result<PlaneModule, PlaneError>) -> Self {
        match result {
            Ok(module) => ModuleCreation::Created(module),
            Err(err) => ModuleCreation::Failed(err),
        }
    }
}
