pub mod module_service;
pub mod plane_models;

pub use module_service::{ModuleService, PlaneClient};
pub use plane_models::{CreateModuleRequest, PlaneError, PlaneModule, PlaneProject};
