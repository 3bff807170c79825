//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for suppliers, products, payment methods and statuses
pub mod autocomplete;
