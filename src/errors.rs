//! Unified error type for `SupplyBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`], so the bot layer can
//! report failures uniformly and the core stays framework-agnostic.

use crate::core::{draft::MAX_LEAD_TIME_DAYS, validation::ValidationError};
use rust_decimal::Decimal;
use thiserror::Error;

/// All errors produced by the core, the persistence layer and the bot.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// A price or amount was negative or otherwise unusable
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A quantity was zero or out of range
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// A delivery lead time outside 0..=MAX_LEAD_TIME_DAYS days
    #[error("Lead time of {days} days is out of range (0 to {max})", max = MAX_LEAD_TIME_DAYS)]
    InvalidLeadTime {
        /// The rejected number of days
        days: i64,
    },

    /// No active supplier with that name or id
    #[error("Supplier not found: {name}")]
    SupplierNotFound {
        /// Name or id that was looked up
        name: String,
    },

    /// No active product with that name or id
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Name or id that was looked up
        name: String,
    },

    /// No persisted order with that order number
    #[error("Order not found: {order_number}")]
    OrderNotFound {
        /// The order number that was looked up
        order_number: String,
    },

    /// An order number did not have the `ORD-###` shape
    #[error("Invalid order number '{value}': expected ORD-###")]
    InvalidOrderNumber {
        /// The malformed input
        value: String,
    },

    /// "Add item" was requested before name, quantity and price were all set
    #[error("Line item is not ready: pick a product, a quantity and a price first")]
    ItemNotReady,

    /// A removal index pointed past the end of the item list
    #[error("No line item at position {index} (draft has {len} items)")]
    ItemIndexOutOfRange {
        /// Requested index (zero-based)
        index: usize,
        /// Number of items in the draft
        len: usize,
    },

    /// Submission was blocked by one or more missing fields
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The save sink already holds an order with this number
    #[error("An order numbered {order_number} already exists")]
    DuplicateOrderNumber {
        /// The conflicting order number
        order_number: String,
    },

    /// A status string did not name a known order status
    #[error("Unknown order status: {status}")]
    InvalidStatus {
        /// The unrecognized status
        status: String,
    },

    /// A status change is not allowed from the order's current status
    #[error("Cannot move order from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Missing or unreadable environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
