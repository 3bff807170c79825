//! The order form - an explicit state object driven by one transition per user action.
//!
//! An [`OrderForm`] bundles the catalog snapshot, the draft order, the supplier
//! picker and the line-item composer. Every user input is a [`FormAction`] applied
//! through [`OrderForm::apply`], so related updates (such as clearing the staged
//! product when the supplier changes) happen in a single step and can't drift apart.

use crate::{
    core::{
        catalog::{Catalog, CatalogSource},
        composer::{LineItemComposer, SupplierPicker},
        draft::{LineItem, OrderDraft, OrderStatus, StatusEntry},
        order_number::generate_order_number,
        search::{filter_products, filter_suppliers},
        validation::{ValidationError, validate_draft},
    },
    entities::{product, supplier},
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use std::future::Future;
use tracing::{debug, info};

/// A single user action on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Free text typed into the supplier input
    TypeSupplier(String),
    /// A supplier picked from the dropdown, by name
    SelectSupplier(String),
    /// Free text typed into the product search input
    TypeProductSearch(String),
    /// A product picked from the dropdown, by catalog id
    SelectProduct(i64),
    /// Quantity for the staged product
    SetQuantity(u32),
    /// Unit price for the staged product
    SetPrice(Decimal),
    /// Commit the staged product as a line item
    AddItem,
    /// Remove the line item at this zero-based position
    RemoveItem(usize),
    /// Delivery address
    SetDeliveryAddress(String),
    /// Payment method
    SetPaymentMethod(String),
    /// Notes
    SetNotes(String),
    /// Estimated delivery date
    SetEstimatedDelivery(DateTime<Utc>),
}

/// A validated draft, ready to be persisted. Carries no server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseOrder {
    /// Generated order number
    pub order_number: String,
    /// Supplier name
    pub supplier: String,
    /// Always pending for a new order
    pub status: OrderStatus,
    /// Committed line items
    pub items: Vec<LineItem>,
    /// Sum of item subtotals
    pub total: Decimal,
    /// When the draft was created
    pub created_at: DateTime<Utc>,
    /// Expected delivery
    pub estimated_delivery: DateTime<Utc>,
    /// Delivery address, trimmed
    pub delivery_address: String,
    /// Payment method, trimmed
    pub payment_method: String,
    /// Notes, trimmed
    pub notes: String,
    /// Status history so far
    pub status_history: Vec<StatusEntry>,
    /// User who submitted the order
    pub created_by: String,
}

/// Where submitted orders go.
pub trait OrderSink {
    /// What the sink hands back for a saved order
    type Saved;

    /// Persists `order`.
    fn save(&self, order: &NewPurchaseOrder) -> impl Future<Output = Result<Self::Saved>> + Send;
}

/// An open purchase-order form.
#[derive(Debug, Clone)]
pub struct OrderForm {
    catalog: Catalog,
    draft: OrderDraft,
    supplier_picker: SupplierPicker,
    composer: LineItemComposer,
}

impl OrderForm {
    /// Builds a form over an already loaded catalog.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        order_number: String,
        now: DateTime<Utc>,
        lead_time: Duration,
    ) -> Self {
        Self {
            catalog,
            draft: OrderDraft::new(order_number, now, lead_time),
            supplier_picker: SupplierPicker::default(),
            composer: LineItemComposer::new(),
        }
    }

    /// Opens a fresh form: loads the catalog and numbers the draft after
    /// `last_order_number`.
    pub async fn open<S: CatalogSource + Sync>(
        source: &S,
        last_order_number: Option<&str>,
        lead_time: Duration,
    ) -> Self {
        let catalog = Catalog::load(source).await;
        let order_number = generate_order_number(last_order_number);
        info!("Opened order form for {order_number}");
        Self::new(catalog, order_number, Utc::now(), lead_time)
    }

    /// Catalog snapshot taken at open
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The order being built
    #[must_use]
    pub const fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Supplier picker state
    #[must_use]
    pub const fn supplier_picker(&self) -> &SupplierPicker {
        &self.supplier_picker
    }

    /// Line-item composer state
    #[must_use]
    pub const fn composer(&self) -> &LineItemComposer {
        &self.composer
    }

    /// Suppliers matching the supplier search text.
    #[must_use]
    pub fn supplier_candidates(&self) -> Vec<&supplier::Model> {
        filter_suppliers(&self.catalog.suppliers, &self.supplier_picker.search)
    }

    /// Whether the product picker can be used, i.e. a supplier is set.
    #[must_use]
    pub fn product_picker_enabled(&self) -> bool {
        !self.draft.supplier.trim().is_empty()
    }

    /// Products of the current supplier matching the product search text.
    #[must_use]
    pub fn product_candidates(&self) -> Vec<&product::Model> {
        filter_products(
            &self.catalog.products,
            &self.draft.supplier,
            &self.composer.search,
        )
    }

    /// Products of the current supplier matching `query`, ignoring the stored search text.
    #[must_use]
    pub fn search_products(&self, query: &str) -> Vec<&product::Model> {
        filter_products(&self.catalog.products, &self.draft.supplier, query)
    }

    /// Whether "add item" is enabled
    #[must_use]
    pub fn can_add_item(&self) -> bool {
        self.composer.is_ready()
    }

    /// Applies one user action.
    ///
    /// A failed action leaves the form exactly as it was.
    ///
    /// # Errors
    /// - [`Error::SupplierNotFound`] when selecting a supplier that is not in the catalog
    /// - [`Error::ProductNotFound`] when selecting a product outside the current supplier's catalog
    /// - [`Error::InvalidAmount`] for a negative price
    /// - [`Error::ItemNotReady`] when adding before name, quantity and price are set
    /// - [`Error::ItemIndexOutOfRange`] when removing a position that does not exist
    pub fn apply(&mut self, action: FormAction) -> Result<()> {
        debug!("Applying {action:?} to {}", self.draft.order_number());

        match action {
            FormAction::TypeSupplier(text) => {
                self.supplier_picker.dropdown_open = true;
                self.change_supplier(text);
            }
            FormAction::SelectSupplier(name) => {
                let chosen = self
                    .catalog
                    .supplier_named(&name)
                    .ok_or(Error::SupplierNotFound { name })?
                    .name
                    .clone();
                self.supplier_picker.dropdown_open = false;
                self.change_supplier(chosen);
            }
            FormAction::TypeProductSearch(text) => {
                self.composer.search = text;
            }
            FormAction::SelectProduct(product_id) => {
                let supplier_lower = self.draft.supplier.trim().to_lowercase();
                let product = self
                    .catalog
                    .product(product_id)
                    .filter(|p| {
                        !supplier_lower.is_empty() && p.supplier.to_lowercase() == supplier_lower
                    })
                    .ok_or_else(|| Error::ProductNotFound {
                        name: product_id.to_string(),
                    })?;
                self.composer.stage(product);
            }
            FormAction::SetQuantity(quantity) => {
                self.composer.quantity = quantity;
            }
            FormAction::SetPrice(price) => {
                if price < Decimal::ZERO {
                    return Err(Error::InvalidAmount { amount: price });
                }
                self.composer.price = price;
            }
            FormAction::AddItem => self.commit_item()?,
            FormAction::RemoveItem(index) => {
                let removed = self.draft.remove_item(index)?;
                debug!("Removed {} {}", removed.draft_id, removed.name);
            }
            FormAction::SetDeliveryAddress(address) => self.draft.delivery_address = address,
            FormAction::SetPaymentMethod(method) => self.draft.payment_method = method,
            FormAction::SetNotes(notes) => self.draft.notes = notes,
            FormAction::SetEstimatedDelivery(at) => self.draft.estimated_delivery = at,
        }

        Ok(())
    }

    /// Sets the supplier and drops whatever product was staged for the previous one.
    fn change_supplier(&mut self, supplier: String) {
        self.supplier_picker.search.clone_from(&supplier);
        self.draft.supplier = supplier;
        self.composer.clear_staged();
    }

    fn commit_item(&mut self) -> Result<()> {
        let Some(product_id) = self.composer.product_id.filter(|_| self.composer.is_ready())
        else {
            return Err(Error::ItemNotReady);
        };

        let item = self.draft.add_item(
            product_id,
            self.composer.name.clone(),
            self.composer.quantity,
            self.composer.price,
        )?;
        debug!(
            "Added {} {} x{} = {}",
            item.draft_id, item.name, item.quantity, item.subtotal
        );

        self.composer.reset();
        Ok(())
    }

    /// Validates the draft and builds the record handed to the save sink.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming every missing field.
    pub fn submission(
        &self,
        created_by: &str,
    ) -> std::result::Result<NewPurchaseOrder, ValidationError> {
        validate_draft(&self.draft)?;

        let draft = &self.draft;
        Ok(NewPurchaseOrder {
            order_number: draft.order_number().to_string(),
            supplier: draft.supplier.trim().to_string(),
            status: draft.status(),
            items: draft.items().to_vec(),
            total: draft.total(),
            created_at: draft.created_at(),
            estimated_delivery: draft.estimated_delivery,
            delivery_address: draft.delivery_address.trim().to_string(),
            payment_method: draft.payment_method.trim().to_string(),
            notes: draft.notes.trim().to_string(),
            status_history: draft.status_history().to_vec(),
            created_by: created_by.to_string(),
        })
    }
}
