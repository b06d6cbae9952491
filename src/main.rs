// This is the entry point of the Plane module bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (Plane API, configuration)
// - `discord/` = Discord-specific adapters (command registration, interactions)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a pile of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use tracing_subscriber::EnvFilter;

use crate::core::plane::ModuleService;
use crate::discord::interactions;
use crate::discord::registration;
use crate::discord::{Data, Error};
use crate::infra::config::BotConfig;
use crate::infra::plane::PlaneApiClient;

/// Event handler for raw Discord events. Slash commands arrive here as interactions.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::InteractionCreate { interaction } => {
            // A failed reply only affects this one interaction; the bot stays up.
            if let Err(e) = interactions::handle_interaction(ctx, data, interaction).await {
                tracing::error!("Error replying to interaction: {}", e);
            }
        }
        serenity::FullEvent::Ready { data_about_bot } => {
            tracing::info!(user = %data_about_bot.user.name, "Bot has logged in and is online!");
        }
        _ => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BotConfig::from_env().context("Failed to load configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let plane_client = PlaneApiClient::new(&config.plane_api_key)
        .context("Failed to create Plane API client")?
        .with_base_url(config.plane_api_url.clone());
    let module_service = Arc::new(ModuleService::new(plane_client, config.project.clone()));

    tracing::info!(
        workspace = %module_service.project().workspace_slug,
        project = %module_service.project().project_id,
        "Modules will be created in this Plane project"
    );

    let data = Data {
        modules: Arc::clone(&module_service),
        client_id: config.client_id,
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    // Slash commands don't need message content or member events.
    let intents = serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            // Commands are registered from static descriptors at startup and
            // dispatched by the event handler, not by poise.
            commands: vec![],
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(interactions::on_error(error)),
            ..Default::default()
        })
        .setup(|_ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!(user = %ready.user.name, "Bot is starting up...");

                if ready.application.id.get() != data.client_id {
                    tracing::warn!(
                        configured = data.client_id,
                        actual = ready.application.id.get(),
                        "CLIENT_ID does not match the logged-in application"
                    );
                }

                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    // Once per process, over REST, before the gateway connects. A failure is
    // logged and the bot keeps serving whatever is already registered.
    registration::register_at_startup(&*client.http, config.client_id).await;

    client.start().await.context("Error running bot")?;

    Ok(())
}
