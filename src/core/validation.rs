//! Submission validation.
//!
//! A draft can only be submitted once it names a supplier, a delivery address and a
//! payment method, and holds at least one line item. Validation reports every failing
//! field at once so the caller can render all of them next to the form.

use crate::core::draft::OrderDraft;
use std::fmt;

/// A form field that can block submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Supplier name
    Supplier,
    /// Delivery address
    DeliveryAddress,
    /// Payment method
    PaymentMethod,
    /// The line item list
    Items,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Supplier => "supplier",
            Self::DeliveryAddress => "delivery address",
            Self::PaymentMethod => "payment method",
            Self::Items => "items",
        })
    }
}

/// One reason a draft cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Offending field
    pub field: FormField,
    /// User-facing explanation
    pub message: &'static str,
}

/// Every issue found while validating a draft; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub Vec<FieldIssue>);

impl ValidationError {
    /// The issues, in form order
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.0
    }

    /// Whether `field` is among the failing fields
    #[must_use]
    pub fn has(&self, field: FormField) -> bool {
        self.0.iter().any(|issue| issue.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Order cannot be submitted: ")?;
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Checks that `draft` is complete enough to hand to the save sink.
///
/// # Errors
/// Returns a [`ValidationError`] listing each missing field.
pub fn validate_draft(draft: &OrderDraft) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if draft.supplier.trim().is_empty() {
        issues.push(FieldIssue {
            field: FormField::Supplier,
            message: "select a supplier",
        });
    }
    if draft.delivery_address.trim().is_empty() {
        issues.push(FieldIssue {
            field: FormField::DeliveryAddress,
            message: "enter a delivery address",
        });
    }
    if draft.payment_method.trim().is_empty() {
        issues.push(FieldIssue {
            field: FormField::PaymentMethod,
            message: "choose a payment method",
        });
    }
    if draft.items().is_empty() {
        issues.push(FieldIssue {
            field: FormField::Items,
            message: "add at least one item",
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError(issues))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn complete_draft() -> OrderDraft {
        let mut draft = OrderDraft::new("ORD-001".to_string(), Utc::now(), Duration::days(7));
        draft.supplier = "Acme Foods".to_string();
        draft.delivery_address = "12 Dock Road".to_string();
        draft.payment_method = "transfer".to_string();
        draft.add_item(1, "Flour".to_string(), 2, dec!(10)).unwrap();
        draft
    }

    fn only_issue(draft: &OrderDraft) -> FormField {
        let err = validate_draft(draft).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        err.issues()[0].field
    }

    #[test]
    fn test_complete_draft_is_valid() {
        assert!(validate_draft(&complete_draft()).is_ok());
    }

    #[test]
    fn test_missing_supplier() {
        let mut draft = complete_draft();
        draft.supplier = "  ".to_string();
        assert_eq!(only_issue(&draft), FormField::Supplier);
    }

    #[test]
    fn test_missing_delivery_address() {
        let mut draft = complete_draft();
        draft.delivery_address.clear();
        assert_eq!(only_issue(&draft), FormField::DeliveryAddress);
    }

    #[test]
    fn test_missing_payment_method() {
        let mut draft = complete_draft();
        draft.payment_method.clear();
        assert_eq!(only_issue(&draft), FormField::PaymentMethod);
    }

    #[test]
    fn test_missing_items() {
        let mut draft = complete_draft();
        draft.remove_item(0).unwrap();
        assert_eq!(only_issue(&draft), FormField::Items);
    }

    #[test]
    fn test_all_issues_reported_together() {
        let draft = OrderDraft::new("ORD-001".to_string(), Utc::now(), Duration::days(7));
        let err = validate_draft(&draft).unwrap_err();

        assert_eq!(err.issues().len(), 4);
        assert!(err.has(FormField::Supplier));
        assert!(err.has(FormField::Items));
        assert_eq!(
            err.to_string(),
            "Order cannot be submitted: select a supplier; enter a delivery address; \
             choose a payment method; add at least one item"
        );
    }
}
