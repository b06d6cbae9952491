// InteractionCreate handling.
//
// This layer is THIN: translate the serenity interaction, ask the module
// service what to say, send the reply.

use poise::serenity_prelude as serenity;

use crate::core::commands::all_commands;
use crate::core::interactions::{InboundInteraction, InteractionKind};
use crate::discord::{Data, Error};

/// Reduce a serenity interaction to the core's view of it.
pub fn to_inbound(interaction: &serenity::Interaction) -> InboundInteraction {
    match interaction {
        serenity::Interaction::Command(command) => InboundInteraction::command(
            command.data.name.clone(),
            string_options(&command.data.options),
        ),
        serenity::Interaction::Autocomplete(_) => {
            InboundInteraction::other(InteractionKind::Autocomplete)
        }
        serenity::Interaction::Component(_) => InboundInteraction::other(InteractionKind::Component),
        serenity::Interaction::Modal(_) => InboundInteraction::other(InteractionKind::Modal),
        serenity::Interaction::Ping(_) => InboundInteraction::other(InteractionKind::Ping),
        _ => InboundInteraction::other(InteractionKind::Other),
    }
}

/// Top-level string options only; the bot declares no subcommands.
fn string_options(options: &[serenity::CommandDataOption]) -> Vec<(String, String)> {
    options
        .iter()
        .filter_map(|option| match &option.value {
            serenity::CommandDataOptionValue::String(value) => {
                Some((option.name.clone(), value.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Reply text with every mention disabled, so module names like `@everyone` stay inert.
fn reply_message(content: String) -> serenity::CreateInteractionResponseMessage {
    serenity::CreateInteractionResponseMessage::new()
        .content(content)
        .allowed_mentions(serenity::CreateAllowedMentions::new())
}

/// Handle one inbound interaction. Anything that isn't `/create-module` is ignored.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    data: &Data,
    interaction: &serenity::Interaction,
) -> Result<(), Error> {
    let inbound = to_inbound(interaction);

    let Some(reply) = data.modules.handle_interaction(&inbound).await else {
        tracing::debug!(
            kind = ?inbound.kind,
            command = inbound.command_name.as_deref().unwrap_or("-"),
            "Ignoring interaction"
        );
        return Ok(());
    };

    let serenity::Interaction::Command(command) = interaction else {
        return Ok(());
    };

    command
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(reply_message(reply)),
        )
        .await?;

    Ok(())
}

/// Commands dispatched by `handle_interaction` rather than by poise.
pub fn handled_by_event_handler(command_name: &str) -> bool {
    all_commands()
        .iter()
        .any(|definition| definition.name == command_name)
}

/// Framework error hook. Poise has no command list of its own, so it reports our
/// slash commands as unknown; those are dropped, everything else goes to the default handler.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    if let poise::FrameworkError::UnknownInteraction { interaction, .. } = &error {
        if handled_by_event_handler(&interaction.data.name) {
            return;
        }
    }

    if let Err(e) = poise::builtins::on_error(error).await {
        tracing::error!("Error while handling framework error: {}", e);
    }
}
