//! Purchase order persistence - the save sink for submitted forms and the queries
//! that read orders back.
//!
//! An order is written together with its items and its first status-history entry in
//! one database transaction. Status history is append-only; the order row's `status`
//! column always mirrors the newest entry.

use crate::{
    core::{
        draft::OrderStatus,
        form::{NewPurchaseOrder, OrderSink},
    },
    entities::{
        OrderStatusHistory, PurchaseOrder, PurchaseOrderItem, order_status_history, purchase_order,
        purchase_order_item,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

impl OrderSink for DatabaseConnection {
    type Saved = purchase_order::Model;

    async fn save(&self, order: &NewPurchaseOrder) -> Result<purchase_order::Model> {
        save_order(self, order).await
    }
}

/// Persists a submitted order with its items and status history.
///
/// # Errors
/// Returns an error if:
/// - An order with the same number already exists
/// - A quantity does not fit the database column
/// - Any insert fails (nothing is written in that case)
#[instrument(skip(db, order), fields(order_number = %order.order_number))]
pub async fn save_order(
    db: &DatabaseConnection,
    order: &NewPurchaseOrder,
) -> Result<purchase_order::Model> {
    let txn = db.begin().await?;

    let existing = PurchaseOrder::find()
        .filter(purchase_order::Column::OrderNumber.eq(order.order_number.as_str()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateOrderNumber {
            order_number: order.order_number.clone(),
        });
    }

    let saved = purchase_order::ActiveModel {
        order_number: Set(order.order_number.clone()),
        supplier: Set(order.supplier.clone()),
        status: Set(order.status.to_string()),
        total: Set(order.total),
        created_at: Set(order.created_at),
        estimated_delivery: Set(order.estimated_delivery),
        delivery_address: Set(order.delivery_address.clone()),
        payment_method: Set(order.payment_method.clone()),
        notes: Set(order.notes.clone()),
        created_by: Set(order.created_by.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (position, item) in order.items.iter().enumerate() {
        let quantity = i32::try_from(item.quantity).map_err(|_| Error::InvalidQuantity {
            quantity: i64::from(item.quantity),
        })?;
        let position = i32::try_from(position).map_err(|_| Error::InvalidQuantity {
            quantity: i64::from(item.quantity),
        })?;

        purchase_order_item::ActiveModel {
            order_id: Set(saved.id),
            position: Set(position),
            product_id: Set(item.product_id),
            name: Set(item.name.clone()),
            quantity: Set(quantity),
            unit_price: Set(item.unit_price),
            subtotal: Set(item.subtotal),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    for entry in &order.status_history {
        order_status_history::ActiveModel {
            order_id: Set(saved.id),
            status: Set(entry.status.to_string()),
            changed_at: Set(entry.at),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        "Saved order {} for {} with {} items, total {}",
        saved.order_number,
        saved.supplier,
        order.items.len(),
        saved.total
    );
    Ok(saved)
}

/// Returns the number of the most recently saved order, if any.
pub async fn get_last_order_number(db: &DatabaseConnection) -> Result<Option<String>> {
    let last = PurchaseOrder::find()
        .order_by_desc(purchase_order::Column::Id)
        .one(db)
        .await?;
    Ok(last.map(|order| order.order_number))
}

/// Finds an order by its order number.
pub async fn get_order_by_number(
    db: &DatabaseConnection,
    order_number: &str,
) -> Result<Option<purchase_order::Model>> {
    PurchaseOrder::find()
        .filter(purchase_order::Column::OrderNumber.eq(order_number.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the newest orders first.
pub async fn list_recent_orders(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<purchase_order::Model>> {
    PurchaseOrder::find()
        .order_by_desc(purchase_order::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an order's items in the order they were added.
pub async fn get_order_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<purchase_order_item::Model>> {
    PurchaseOrderItem::find()
        .filter(purchase_order_item::Column::OrderId.eq(order_id))
        .order_by_asc(purchase_order_item::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an order's status history, oldest first.
pub async fn get_status_history(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_status_history::Model>> {
    OrderStatusHistory::find()
        .filter(order_status_history::Column::OrderId.eq(order_id))
        .order_by_asc(order_status_history::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Moves an order to `status`, appending a history entry.
///
/// # Errors
/// Returns an error if:
/// - No order has that number
/// - The order is already delivered or cancelled, or already has `status`
/// - The update fails
#[instrument(skip(db))]
pub async fn update_order_status(
    db: &DatabaseConnection,
    order_number: &str,
    status: OrderStatus,
) -> Result<purchase_order::Model> {
    let txn = db.begin().await?;

    let order = PurchaseOrder::find()
        .filter(purchase_order::Column::OrderNumber.eq(order_number.trim()))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            order_number: order_number.to_string(),
        })?;

    let current: OrderStatus = order.status.parse()?;
    if current.is_final() || current == status {
        return Err(Error::InvalidStatusTransition {
            from: current.to_string(),
            to: status.to_string(),
        });
    }

    let order_id = order.id;
    let mut active: purchase_order::ActiveModel = order.into();
    active.status = Set(status.to_string());
    let updated = active.update(&txn).await?;

    order_status_history::ActiveModel {
        order_id: Set(order_id),
        status: Set(status.to_string()),
        changed_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!("Order {} moved from {current} to {status}", updated.order_number);
    Ok(updated)
}
