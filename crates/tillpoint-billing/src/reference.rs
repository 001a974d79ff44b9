//! # Reference Validator
//!
//! Confirms that a foreign id (customer, user, item) denotes an existing
//! row before it may be used. No side effects; every check runs before the
//! first write of the workflow.

use std::sync::Arc;

use crate::error::{BillingError, BillingResult};
use crate::lookup::{CustomerLookup, ItemLookup, UserLookup};

/// Existence checks over the three entity lookups.
#[derive(Clone)]
pub struct ReferenceValidator {
    customers: Arc<dyn CustomerLookup>,
    users: Arc<dyn UserLookup>,
    items: Arc<dyn ItemLookup>,
}

impl ReferenceValidator {
    /// Creates a validator over the given lookups.
    pub fn new(
        customers: Arc<dyn CustomerLookup>,
        users: Arc<dyn UserLookup>,
        items: Arc<dyn ItemLookup>,
    ) -> Self {
        ReferenceValidator {
            customers,
            users,
            items,
        }
    }

    /// Fails with NotFound unless the customer exists.
    pub async fn ensure_customer(&self, id: i64) -> BillingResult<()> {
        if self.customers.exists(id).await? {
            Ok(())
        } else {
            Err(BillingError::not_found("Customer", id))
        }
    }

    /// Fails with NotFound unless the staff user exists.
    pub async fn ensure_user(&self, id: i64) -> BillingResult<()> {
        if self.users.exists(id).await? {
            Ok(())
        } else {
            Err(BillingError::not_found("User", id))
        }
    }

    /// Fails with NotFound unless the item exists.
    pub async fn ensure_item(&self, id: i64) -> BillingResult<()> {
        if self.items.exists(id).await? {
            Ok(())
        } else {
            Err(BillingError::not_found("Item", id))
        }
    }
}
