//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod order_status_history;
pub mod product;
pub mod purchase_order;
pub mod purchase_order_item;
pub mod supplier;

// Re-export specific types to avoid conflicts
pub use order_status_history::{
    Column as OrderStatusHistoryColumn, Entity as OrderStatusHistory,
    Model as OrderStatusHistoryModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use purchase_order::{
    Column as PurchaseOrderColumn, Entity as PurchaseOrder, Model as PurchaseOrderModel,
};
pub use purchase_order_item::{
    Column as PurchaseOrderItemColumn, Entity as PurchaseOrderItem,
    Model as PurchaseOrderItemModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
