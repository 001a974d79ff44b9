//! # Lookup Capability Traits
//!
//! The bill workflow consumes the entity tables through narrow read-only
//! interfaces: find a row, check existence, and (for items) read the
//! current price. One trait per entity, with the tillpoint-db repository
//! as the production implementation and hand-rolled doubles in tests.
//!
//! Nothing here can write; bill creation treats customers, users and
//! items strictly as inputs.

use async_trait::async_trait;

use crate::error::BillingResult;
use tillpoint_core::{Customer, Item, User};
use tillpoint_db::{CustomerRepository, ItemRepository, UserRepository};

/// Read-only access to customers.
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<Customer>>;

    async fn exists(&self, id: i64) -> BillingResult<bool>;
}

/// Read-only access to staff users.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<User>>;

    async fn exists(&self, id: i64) -> BillingResult<bool>;
}

/// Read-only access to the item catalog.
#[async_trait]
pub trait ItemLookup: Send + Sync {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<Item>>;

    async fn exists(&self, id: i64) -> BillingResult<bool>;

    /// Current unit price in cents, or None for an unknown item.
    async fn price_of(&self, id: i64) -> BillingResult<Option<i64>>;
}

// =============================================================================
// Production Implementations (tillpoint-db repositories)
// =============================================================================

#[async_trait]
impl CustomerLookup for CustomerRepository {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<Customer>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn exists(&self, id: i64) -> BillingResult<bool> {
        Ok(CustomerRepository::exists(self, id).await?)
    }
}

#[async_trait]
impl UserLookup for UserRepository {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<User>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn exists(&self, id: i64) -> BillingResult<bool> {
        Ok(UserRepository::exists(self, id).await?)
    }
}

#[async_trait]
impl ItemLookup for ItemRepository {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<Item>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn exists(&self, id: i64) -> BillingResult<bool> {
        Ok(ItemRepository::exists(self, id).await?)
    }

    async fn price_of(&self, id: i64) -> BillingResult<Option<i64>> {
        Ok(ItemRepository::price_of(self, id).await?)
    }
}
