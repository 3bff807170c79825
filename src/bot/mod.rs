//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `SupplyBuddy`, including all slash
//! commands, autocomplete handlers, and bot context management.

/// Discord command implementations (order, orders, catalog, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{config::settings::FormSettings, core::session::FormSessions, errors::Error};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection, the open order forms and the
/// form settings from config.toml.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Each user's open order form
    pub sessions: FormSessions,
    /// Order form settings
    pub settings: FormSettings,
}

impl BotData {
    /// Creates a new `BotData` instance with no open forms.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: FormSettings) -> Self {
        Self {
            database,
            sessions: FormSessions::new(),
            settings,
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework and runs the bot until the gateway connection ends.
///
/// # Errors
/// Returns an error if the client cannot be created or the connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<(), Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::order(),
                commands::orders(),
                commands::catalog(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
