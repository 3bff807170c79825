//! Order draft - the purchase order being built by an open form.
//!
//! A draft owns its line items and a running total. Items are appended or removed
//! wholesale, never edited, and every add/remove moves the total by exactly that
//! item's subtotal, so `total == sum(subtotals)` after every operation.

use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest delivery lead time a draft accepts, in days
pub const MAX_LEAD_TIME_DAYS: u32 = 3650;

/// Lifecycle status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Created, not yet acknowledged by the supplier
    Pending,
    /// Acknowledged by the supplier
    Confirmed,
    /// On its way
    Shipped,
    /// Received
    Delivered,
    /// Withdrawn
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Lowercase name used for storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further status changes are allowed.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| Error::InvalidStatus {
                status: s.to_string(),
            })
    }
}

/// One entry of a status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Status entered
    pub status: OrderStatus,
    /// When it was entered
    pub at: DateTime<Utc>,
}

/// Identifier of a line item within one draft.
///
/// Draft-local ids are handed out by the draft itself and mean nothing outside it;
/// persisted items get their own database ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DraftItemId(pub u32);

impl fmt::Display for DraftItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed line of the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Draft-local identifier
    pub draft_id: DraftItemId,
    /// Catalog id of the ordered product
    pub product_id: i64,
    /// Display name
    pub name: String,
    /// Ordered quantity, at least 1
    pub quantity: u32,
    /// Unit price, never negative
    pub unit_price: Decimal,
    /// `quantity * unit_price`
    pub subtotal: Decimal,
}

/// The order being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    order_number: String,
    /// Selected (or typed) supplier name
    pub supplier: String,
    status: OrderStatus,
    items: Vec<LineItem>,
    total: Decimal,
    created_at: DateTime<Utc>,
    /// Expected delivery
    pub estimated_delivery: DateTime<Utc>,
    /// Where the goods go
    pub delivery_address: String,
    /// How the supplier is paid
    pub payment_method: String,
    /// Free-text notes
    pub notes: String,
    status_history: Vec<StatusEntry>,
    next_item_id: u32,
}

impl OrderDraft {
    /// Starts an empty pending draft created at `now`, due `lead_time` later.
    ///
    /// A lead time that overflows the calendar falls back to delivery at `now`.
    #[must_use]
    pub fn new(order_number: String, now: DateTime<Utc>, lead_time: Duration) -> Self {
        Self {
            order_number,
            supplier: String::new(),
            status: OrderStatus::Pending,
            items: Vec::new(),
            total: Decimal::ZERO,
            created_at: now,
            estimated_delivery: now.checked_add_signed(lead_time).unwrap_or(now),
            delivery_address: String::new(),
            payment_method: String::new(),
            notes: String::new(),
            status_history: vec![StatusEntry {
                status: OrderStatus::Pending,
                at: now,
            }],
            next_item_id: 1,
        }
    }

    /// Generated order number
    #[must_use]
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Current status; always pending for a draft
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Committed line items, in order of addition
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Running total
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// When the draft was created
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Append-only status history
    #[must_use]
    pub fn status_history(&self) -> &[StatusEntry] {
        &self.status_history
    }

    /// The delivery date `days` after the draft was created.
    ///
    /// # Errors
    /// Returns [`Error::InvalidLeadTime`] if `days` exceeds [`MAX_LEAD_TIME_DAYS`].
    pub fn delivery_after_days(&self, days: u32) -> Result<DateTime<Utc>> {
        let out_of_range = || Error::InvalidLeadTime {
            days: i64::from(days),
        };
        if days > MAX_LEAD_TIME_DAYS {
            return Err(out_of_range());
        }

        self.created_at
            .checked_add_signed(Duration::days(i64::from(days)))
            .ok_or_else(out_of_range)
    }

    /// Commits a new line item and adds its subtotal to the total.
    ///
    /// # Errors
    /// Returns [`Error::InvalidQuantity`] for a zero quantity and
    /// [`Error::InvalidAmount`] for a negative price or when the subtotal or the new
    /// total would overflow. The draft is unchanged on error.
    pub fn add_item(
        &mut self,
        product_id: i64,
        name: String,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<&LineItem> {
        if quantity == 0 {
            return Err(Error::InvalidQuantity { quantity: 0 });
        }
        if unit_price < Decimal::ZERO {
            return Err(Error::InvalidAmount { amount: unit_price });
        }

        let subtotal = Decimal::from(quantity)
            .checked_mul(unit_price)
            .ok_or(Error::InvalidAmount { amount: unit_price })?;
        let total = self
            .total
            .checked_add(subtotal)
            .ok_or(Error::InvalidAmount { amount: subtotal })?;

        let draft_id = DraftItemId(self.next_item_id);
        self.next_item_id += 1;

        self.items.push(LineItem {
            draft_id,
            product_id,
            name,
            quantity,
            unit_price,
            subtotal,
        });
        self.total = total;
        debug_assert_eq!(self.total, self.recomputed_total());

        Ok(&self.items[self.items.len() - 1])
    }

    /// Removes the item at `index` and subtracts its subtotal from the total.
    ///
    /// # Errors
    /// Returns [`Error::ItemIndexOutOfRange`] if there is no item at `index`; the
    /// draft is left unchanged.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem> {
        if index >= self.items.len() {
            return Err(Error::ItemIndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        self.total -= removed.subtotal;
        debug_assert_eq!(self.total, self.recomputed_total());

        Ok(removed)
    }

    /// Sum of all item subtotals, computed from scratch.
    #[must_use]
    pub fn recomputed_total(&self) -> Decimal {
        self.items.iter().map(|item| item.subtotal).sum()
    }
}
