//! Core business logic - framework-agnostic catalog, order form and order persistence.

/// Supplier and product catalog: loading, lookup and administration
pub mod catalog;
/// Supplier picker and line-item composer state
pub mod composer;
/// The order draft and its line items
pub mod draft;
/// The order form state machine
pub mod form;
/// Sequential order numbers
pub mod order_number;
/// Persisted purchase orders and their status history
pub mod purchase_order;
/// Text summaries of drafts and saved orders
pub mod report;
/// Supplier and product picker filters
pub mod search;
/// Open forms per user
pub mod session;
/// Submission validation
pub mod validation;
