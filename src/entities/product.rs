//! Product entity - Represents one orderable catalog item.
//!
//! Each product belongs to a supplier (referenced by name), carries its unit price,
//! stock level and unit of measure, and is what the order form's product picker lists.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Flour 25kg")
    pub name: String,
    /// Unit price
    pub price: Decimal,
    /// Name of the supplier that sells this product
    pub supplier: String,
    /// Units currently in stock
    pub stock: i32,
    /// Unit of measure (e.g., "kg", "box")
    pub unit: String,
    /// Stock keeping unit code
    #[sea_orm(unique)]
    pub sku: String,
    /// Product category
    pub category: String,
    /// Soft delete flag - if true, product is hidden but data is preserved
    pub is_deleted: bool,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Products are linked to suppliers by name only
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
