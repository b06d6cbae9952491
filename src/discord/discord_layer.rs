// Discord layer - command registration and interaction handling.

use std::sync::Arc;

use crate::core::plane::ModuleService;
use crate::infra::plane::PlaneApiClient;

#[path = "registration/command_registrar.rs"]
pub mod registration;

#[path = "interactions/interaction_handler.rs"]
pub mod interactions;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Shared state handed to every event. Immutable, so no locking.
pub struct Data {
    pub modules: Arc<ModuleService<PlaneApiClient>>,
    pub client_id: u64,
}
