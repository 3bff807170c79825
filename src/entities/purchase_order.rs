//! Purchase order entity - A submitted order draft.
//!
//! Rows are only ever written by the save sink. The `status` column mirrors the
//! latest entry of the order's status history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    /// Server-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sequential order number, e.g. `ORD-012`
    #[sea_orm(unique)]
    pub order_number: String,
    /// Name of the supplier the order is placed with
    pub supplier: String,
    /// Current status: `"pending"`, `"confirmed"`, `"shipped"`, `"delivered"` or `"cancelled"`
    pub status: String,
    /// Sum of all item subtotals
    pub total: Decimal,
    /// When the draft was created
    pub created_at: DateTimeUtc,
    /// Expected delivery
    pub estimated_delivery: DateTimeUtc,
    /// Where the goods are delivered
    pub delivery_address: String,
    /// How the supplier is paid
    pub payment_method: String,
    /// Free-text notes
    pub notes: String,
    /// Discord user ID who submitted the order
    pub created_by: String,
}

/// Defines relationships between `PurchaseOrder` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order has many items
    #[sea_orm(has_many = "super::purchase_order_item::Entity")]
    Items,
    /// One order has many status history entries
    #[sea_orm(has_many = "super::order_status_history::Entity")]
    StatusHistory,
}

impl Related<super::purchase_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::order_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
