use dotenvy::dotenv;
use std::env;
use supply_buddy::{
    bot::{self, BotData},
    config::{database, settings},
    errors::{Error, Result},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load form settings and catalog seeds
    let config = settings::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;

    // 4. Connect and make sure the schema exists
    if database::get_database_url() == database::DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data").map_err(|e| Error::Config {
            message: format!("Could not create data directory: {e}"),
        })?;
    }
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed configured suppliers and products
    let (suppliers, products) = settings::seed_catalog(&db, &config)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {e}"))?;
    info!("Seeded {suppliers} suppliers and {products} products.");

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, config.form)).await
}
