//! Database configuration module for `SupplyBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.
//! Creation is idempotent, which lets the bot call it on every start.

use crate::entities::{OrderStatusHistory, Product, PurchaseOrder, PurchaseOrderItem, Supplier};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

/// Database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/supply_buddy.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back
/// to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    info!("Connecting to {database_url}");
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    db.execute(builder.build(&table)).await?;
    Ok(())
}

/// Creates every table that does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Supplier).await?;
    create_table(db, &schema, Product).await?;
    create_table(db, &schema, PurchaseOrder).await?;
    create_table(db, &schema, PurchaseOrderItem).await?;
    create_table(db, &schema, OrderStatusHistory).await?;

    Ok(())
}
