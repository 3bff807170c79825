//! Purchase order item entity - One committed line of a submitted order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order_items")]
pub struct Model {
    /// Server-assigned identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the order this item belongs to
    pub order_id: i64,
    /// Position of the item within its order, starting at 0
    pub position: i32,
    /// ID of the ordered product
    pub product_id: i64,
    /// Product name at the time of ordering
    pub name: String,
    /// Ordered quantity
    pub quantity: i32,
    /// Unit price at the time of ordering
    pub unit_price: Decimal,
    /// `quantity * unit_price`
    pub subtotal: Decimal,
}

/// Defines relationships between `PurchaseOrderItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one order
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
