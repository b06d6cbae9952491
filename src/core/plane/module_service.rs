// Module creation workflow.
//
// The service decides whether an interaction is ours, calls Plane through the
// `PlaneClient` trait and turns the outcome into reply text. It knows nothing
// about serenity or reqwest, so everything here is testable with a mock client.

use async_trait::async_trait;

use super::plane_models::{CreateModuleRequest, ModuleCreation, PlaneError, PlaneModule, PlaneProject};
use crate::core::commands::{CREATE_MODULE, MODULE_NAME_OPTION};
use crate::core::interactions::InboundInteraction;

/// Reply sent when Plane did not create the module. Details stay in the logs.
pub const FAILURE_REPLY: &str = "There was an error creating the module.";

/// The one Plane operation the bot needs.
#[async_trait]
pub trait PlaneClient: Send + Sync {
    async fn create_module(
        &self,
        project: &PlaneProject,
        request: &CreateModuleRequest,
    ) -> Result<PlaneModule, PlaneError>;
}

pub struct ModuleService<C: PlaneClient> {
    client: C,
    project: PlaneProject,
}

impl<C: PlaneClient> ModuleService<C> {
    pub fn new(client: C, project: PlaneProject) -> Self {
        Self { client, project }
    }

    pub fn project(&self) -> &PlaneProject {
        &self.project
    }

    /// Create a module named `name` in the configured project.
    ///
    /// Never fails outright: errors are logged and folded into `ModuleCreation::Failed`.
    pub async fn create_module(&self, name: &str) -> ModuleCreation {
        let request = CreateModuleRequest {
            name: name.to_string(),
        };

        let creation = ModuleCreation::from(self.client.create_module(&self.project, &request).await);

        match creation.error() {
            None => tracing::info!(
                module_name = name,
                module_id = creation
                    .module()
                    .and_then(|module| module.id.as_deref())
                    .unwrap_or("unknown"),
                project_id = %self.project.project_id,
                "Created Plane module"
            ),
            Some(PlaneError::Rejected { status, body }) => tracing::error!(
                module_name = name,
                status = *status,
                body = %body,
                "Plane rejected module creation"
            ),
            Some(err) => {
                tracing::error!(module_name = name, "Error with Plane API request: {}", err)
            }
        }

        creation
    }

    /// Text sent back to the user for a finished creation attempt.
    pub fn reply_for(&self, name: &str, creation: &ModuleCreation) -> String {
        if creation.is_success() {
            format!(
                "Module '{}' created successfully in the project '{}'!",
                name, self.project.project_id
            )
        } else {
            FAILURE_REPLY.to_string()
        }
    }

    /// Handle one inbound interaction.
    ///
    /// Returns the reply to send, or `None` when the interaction is not a
    /// `/create-module` command. In that case Plane is not called either.
    pub async fn handle_interaction(&self, interaction: &InboundInteraction) -> Option<String> {
        if interaction.slash_command()? != CREATE_MODULE {
            return None;
        }

        let Some(name) = interaction.string_option(MODULE_NAME_OPTION) else {
            tracing::warn!("create-module invoked without a name option");
            return Some(FAILURE_REPLY.to_string());
        };

        let creation = self.create_module(name).await;
        Some(self.reply_for(name, &creation))
    }
}
