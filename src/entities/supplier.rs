//! Supplier entity - Represents a vendor that purchase orders are placed with.
//!
//! Suppliers are reference data: the order form only reads them. Products point
//! at their owning supplier by name, so supplier names are unique.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Acme Foods")
    #[sea_orm(unique)]
    pub name: String,
    /// Category of goods supplied ("insumo"), e.g. "produce" or "packaging"
    pub supplies: String,
    /// Optional tax identifier
    pub tax_id: Option<String>,
    /// Optional contact email
    pub email: Option<String>,
    /// Optional free-text additional information
    pub notes: Option<String>,
    /// Soft delete flag - if true, supplier is hidden from pickers
    pub is_deleted: bool,
    /// When the supplier was created
    pub created_at: DateTimeUtc,
    /// When the supplier was last modified
    pub updated_at: DateTimeUtc,
}

/// Suppliers are linked to products by name only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
