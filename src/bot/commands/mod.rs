//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Catalog browsing commands
pub mod catalog;

/// General utility commands
pub mod general;

/// The interactive order form
pub mod order;

/// Saved order commands
pub mod orders;

// Export commands
pub use catalog::*;
pub use general::*;
pub use order::*;
pub use orders::*;
