//! Order status history entity - Append-only log of an order's status changes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status history database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_status_history")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order this entry belongs to
    pub order_id: i64,
    /// Status entered at `changed_at`
    pub status: String,
    /// When the status was entered
    pub changed_at: DateTimeUtc,
}

/// Defines relationships between `OrderStatusHistory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one order
    #[sea_orm(
        belongs_to = "super::purchase_order::Entity",
        from = "Column::OrderId",
        to = "super::purchase_order::Column::Id"
    )]
    PurchaseOrder,
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
