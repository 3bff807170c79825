//! Open order forms, one per user.
//!
//! A user's form is "open" exactly while it is registered here. Opening always starts
//! a fresh draft, cancelling discards it, and a successful submission closes it.
//! A failed submission leaves the form open so the user can fix it and retry.

use crate::{
    core::form::{FormAction, OrderForm, OrderSink},
    errors::Result,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// Registry of open forms keyed by user id.
#[derive(Debug, Default)]
pub struct FormSessions {
    forms: RwLock<HashMap<String, OrderForm>>,
}

impl FormSessions {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `form` for `user_id`, discarding any form the user had open.
    #[instrument(skip(self, form))]
    pub async fn open(&self, user_id: &str, form: OrderForm) {
        let replaced = self.forms.write().await.insert(user_id.to_string(), form);
        if let Some(old) = replaced {
            info!(
                "Discarded unsubmitted draft {} for a new form",
                old.draft().order_number()
            );
        }
    }

    /// Whether `user_id` has a form open.
    pub async fn is_open(&self, user_id: &str) -> bool {
        self.forms.read().await.contains_key(user_id)
    }

    /// Closes the user's form without saving, returning it if there was one.
    #[instrument(skip(self))]
    pub async fn close(&self, user_id: &str) -> Option<OrderForm> {
        self.forms.write().await.remove(user_id)
    }

    /// Runs `f` against the user's form; `None` if no form is open.
    pub async fn with_form<R>(
        &self,
        user_id: &str,
        f: impl FnOnce(&OrderForm) -> R,
    ) -> Option<R> {
        self.forms.read().await.get(user_id).map(f)
    }

    /// Applies `actions` in order to the user's form, stopping at the first failure.
    ///
    /// Actions before the failing one stay applied. Returns `None` if no form is open.
    pub async fn apply(
        &self,
        user_id: &str,
        actions: impl IntoIterator<Item = FormAction>,
    ) -> Option<Result<()>> {
        let mut forms = self.forms.write().await;
        let form = forms.get_mut(user_id)?;
        Some(actions.into_iter().try_for_each(|action| form.apply(action)))
    }

    /// Validates the user's form and hands it to `sink`, closing the form on success.
    ///
    /// Returns `None` if no form is open.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Validation`] for an incomplete draft or the
    /// sink's error if saving fails; the form stays open in both cases.
    #[instrument(skip(self, sink))]
    pub async fn submit<K: OrderSink + Sync>(
        &self,
        user_id: &str,
        sink: &K,
    ) -> Option<Result<K::Saved>> {
        let mut forms = self.forms.write().await;
        let form = forms.get(user_id)?;

        let order = match form.submission(user_id) {
            Ok(order) => order,
            Err(e) => return Some(Err(e.into())),
        };

        match sink.save(&order).await {
            Ok(saved) => {
                forms.remove(user_id);
                info!("Order {} submitted; form closed", order.order_number);
                Some(Ok(saved))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::form::NewPurchaseOrder;
    use crate::errors::Error;
    use crate::test_utils::sample_catalog;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        saved: Mutex<Vec<String>>,
        fail: bool,
    }

    impl OrderSink for RecordingSink {
        type Saved = String;

        async fn save(&self, order: &NewPurchaseOrder) -> Result<String> {
            if self.fail {
                return Err(Error::Config {
                    message: "storage offline".to_string(),
                });
            }
            self.saved.lock().unwrap().push(order.order_number.clone());
            Ok(order.order_number.clone())
        }
    }

    fn new_form(number: &str) -> OrderForm {
        OrderForm::new(
            sample_catalog(),
            number.to_string(),
            Utc::now(),
            Duration::days(7),
        )
    }

    fn complete_order_actions(form: &OrderForm) -> Vec<FormAction> {
        let flour = form
            .catalog()
            .products
            .iter()
            .find(|p| p.name == "Flour")
            .unwrap()
            .id;
        vec![
            FormAction::SelectSupplier("Acme Foods".to_string()),
            FormAction::SelectProduct(flour),
            FormAction::SetQuantity(2),
            FormAction::AddItem,
            FormAction::SetDeliveryAddress("12 Dock Road".to_string()),
            FormAction::SetPaymentMethod("cash".to_string()),
        ]
    }

    #[tokio::test]
    async fn test_open_replaces_previous_form() {
        let sessions = FormSessions::new();
        sessions.open("u1", new_form("ORD-001")).await;
        sessions.open("u1", new_form("ORD-002")).await;

        let number = sessions
            .with_form("u1", |f| f.draft().order_number().to_string())
            .await;
        assert_eq!(number.as_deref(), Some("ORD-002"));
        assert!(!sessions.is_open("u2").await);
    }

    #[tokio::test]
    async fn test_apply_without_open_form() {
        let sessions = FormSessions::new();
        let result = sessions.apply("u1", [FormAction::AddItem]).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_submit_closes_form_on_success() {
        let sessions = FormSessions::new();
        let form = new_form("ORD-010");
        let actions = complete_order_actions(&form);
        sessions.open("u1", form).await;
        sessions.apply("u1", actions).await.unwrap().unwrap();

        let sink = RecordingSink::default();
        let saved = sessions.submit("u1", &sink).await.unwrap().unwrap();

        assert_eq!(saved, "ORD-010");
        assert_eq!(*sink.saved.lock().unwrap(), vec!["ORD-010".to_string()]);
        assert!(!sessions.is_open("u1").await);
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_form_open() {
        let sessions = FormSessions::new();
        sessions.open("u1", new_form("ORD-010")).await;

        let sink = RecordingSink::default();
        let result = sessions.submit("u1", &sink).await.unwrap();

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(sink.saved.lock().unwrap().is_empty());
        assert!(sessions.is_open("u1").await);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_open() {
        let sessions = FormSessions::new();
        let form = new_form("ORD-010");
        let actions = complete_order_actions(&form);
        sessions.open("u1", form).await;
        sessions.apply("u1", actions).await.unwrap().unwrap();

        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let result = sessions.submit("u1", &sink).await.unwrap();

        assert!(matches!(result, Err(Error::Config { message: _ })));
        assert!(sessions.is_open("u1").await);
    }

    #[tokio::test]
    async fn test_close_discards_form() {
        let sessions = FormSessions::new();
        sessions.open("u1", new_form("ORD-001")).await;

        assert!(sessions.close("u1").await.is_some());
        assert!(sessions.close("u1").await.is_none());
    }
}
