// Global slash command registration.
//
// Runs once from `main` right after the client is built, before the gateway
// connects. `set_global_commands` replaces the application's whole command
// list, so the call is idempotent.

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use thiserror::Error;

use crate::core::commands::{all_commands, CommandDefinition, OptionKind};

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Discord rejected command registration: {0}")]
    Discord(#[from] serenity::Error),
}

/// Where global commands get written. Serenity's `Http` in production.
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Replace every global command of `application_id`. Returns the registered names.
    async fn overwrite_global_commands(
        &self,
        application_id: u64,
        definitions: &[CommandDefinition],
    ) -> Result<Vec<String>, RegistrationError>;
}

#[async_trait]
impl CommandRegistrar for serenity::Http {
    async fn overwrite_global_commands(
        &self,
        application_id: u64,
        definitions: &[CommandDefinition],
    ) -> Result<Vec<String>, RegistrationError> {
        self.set_application_id(serenity::ApplicationId::new(application_id));
        let registered =
            serenity::Command::set_global_commands(self, build_commands(definitions)).await?;

        for command in &registered {
            tracing::info!(
                command = %command.name,
                command_id = %command.id,
                "Registered global command"
            );
        }

        Ok(registered.into_iter().map(|command| command.name).collect())
    }
}

fn option_type(kind: OptionKind) -> serenity::CommandOptionType {
    serenity::CommandOptionType::from(kind.discord_type())
}

/// Turn static descriptors into serenity builders.
pub fn build_commands(definitions: &[CommandDefinition]) -> Vec<serenity::CreateCommand> {
    definitions
        .iter()
        .map(|definition| {
            definition.options.iter().fold(
                serenity::CreateCommand::new(definition.name).description(definition.description),
                |command, option| {
                    command.add_option(
                        serenity::CreateCommandOption::new(
                            option_type(option.kind),
                            option.name,
                            option.description,
                        )
                        .required(option.required),
                    )
                },
            )
        })
        .collect()
}

/// Overwrite the global commands with everything in `all_commands()`.
///
/// Failures are logged and reported as `false`; the bot keeps running with
/// whatever Discord already had registered.
pub async fn register_at_startup<R: CommandRegistrar + ?Sized>(
    registrar: &R,
    application_id: u64,
) -> bool {
    tracing::info!("Started refreshing application (/) commands");

    match registrar
        .overwrite_global_commands(application_id, all_commands())
        .await
    {
        Ok(names) => {
            tracing::info!(
                count = names.len(),
                commands = ?names,
                "Successfully reloaded application (/) commands"
            );
            true
        }
        Err(e) => {
            tracing::error!("Error registering commands: {}", e);
            false
        }
    }
}
