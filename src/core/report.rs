//! Text summaries of drafts and saved orders.
//!
//! These functions are framework-agnostic and return plain Markdown-flavoured text
//! that the bot layer sends as-is.

use crate::{
    core::form::OrderForm,
    entities::{purchase_order, purchase_order_item},
};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Formats an amount with two decimals, e.g. `$1500.00`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "—" } else { value }
}

/// Summarizes an open form: header fields, numbered items, total and the staged product.
#[must_use]
pub fn draft_summary(form: &OrderForm) -> String {
    let draft = form.draft();
    let mut out = String::new();

    let _ = writeln!(out, "**Order {}** ({})", draft.order_number(), draft.status());
    let _ = writeln!(out, "Supplier: {}", or_dash(&draft.supplier));
    let _ = writeln!(out, "Deliver to: {}", or_dash(&draft.delivery_address));
    let _ = writeln!(out, "Payment: {}", or_dash(&draft.payment_method));
    let _ = writeln!(
        out,
        "Estimated delivery: {}",
        draft.estimated_delivery.format("%Y-%m-%d")
    );
    if !draft.notes.trim().is_empty() {
        let _ = writeln!(out, "Notes: {}", draft.notes.trim());
    }

    if draft.items().is_empty() {
        out.push_str("\n_No items yet._\n");
    } else {
        out.push('\n');
        for (position, item) in draft.items().iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} x{} @ {} = {}",
                position + 1,
                item.name,
                item.quantity,
                format_money(item.unit_price),
                format_money(item.subtotal)
            );
        }
    }
    let _ = writeln!(out, "**Total: {}**", format_money(draft.total()));

    let composer = form.composer();
    if !composer.name.is_empty() {
        let _ = writeln!(
            out,
            "Staged: {} x{} @ {}",
            composer.name,
            composer.quantity,
            format_money(composer.price)
        );
    }

    out
}

/// Summarizes a saved order and its items.
#[must_use]
pub fn order_summary(
    order: &purchase_order::Model,
    items: &[purchase_order_item::Model],
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "**Order {}** ({})", order.order_number, order.status);
    let _ = writeln!(out, "Supplier: {}", order.supplier);
    let _ = writeln!(out, "Deliver to: {}", order.delivery_address);
    let _ = writeln!(out, "Payment: {}", order.payment_method);
    let _ = writeln!(
        out,
        "Created {} · due {}",
        order.created_at.format("%Y-%m-%d"),
        order.estimated_delivery.format("%Y-%m-%d")
    );
    for item in items {
        let _ = writeln!(
            out,
            "{}. {} x{} @ {} = {}",
            item.position + 1,
            item.name,
            item.quantity,
            format_money(item.unit_price),
            format_money(item.subtotal)
        );
    }
    let _ = writeln!(out, "**Total: {}**", format_money(order.total));

    out
}
