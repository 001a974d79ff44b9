//! Lookup doubles shared by the unit tests in this crate.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::BillingResult;
use crate::lookup::{CustomerLookup, ItemLookup, UserLookup};
use tillpoint_core::{Customer, Item, User, UserRole};

/// In-memory customer lookup.
#[derive(Default)]
pub struct FixedCustomers(pub HashMap<i64, Customer>);

impl FixedCustomers {
    pub fn with(customers: impl IntoIterator<Item = Customer>) -> Self {
        FixedCustomers(customers.into_iter().map(|c| (c.id, c)).collect())
    }
}

#[async_trait]
impl CustomerLookup for FixedCustomers {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<Customer>> {
        Ok(self.0.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> BillingResult<bool> {
        Ok(self.0.contains_key(&id))
    }
}

/// In-memory staff user lookup.
#[derive(Default)]
pub struct FixedUsers(pub HashMap<i64, User>);

impl FixedUsers {
    pub fn with(users: impl IntoIterator<Item = User>) -> Self {
        FixedUsers(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

#[async_trait]
impl UserLookup for FixedUsers {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<User>> {
        Ok(self.0.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> BillingResult<bool> {
        Ok(self.0.contains_key(&id))
    }
}

/// In-memory item lookup.
#[derive(Default)]
pub struct FixedItems(pub HashMap<i64, Item>);

impl FixedItems {
    pub fn with(items: impl IntoIterator<Item = Item>) -> Self {
        FixedItems(items.into_iter().map(|i| (i.id, i)).collect())
    }
}

#[async_trait]
impl ItemLookup for FixedItems {
    async fn find_by_id(&self, id: i64) -> BillingResult<Option<Item>> {
        Ok(self.0.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> BillingResult<bool> {
        Ok(self.0.contains_key(&id))
    }

    async fn price_of(&self, id: i64) -> BillingResult<Option<i64>> {
        Ok(self.0.get(&id).map(|i| i.unit_price_cents))
    }
}

/// A customer record for tests.
pub fn customer(id: i64) -> Customer {
    Customer {
        id,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        address: "12 Harbor Rd".to_string(),
        phone: "+14155550123".to_string(),
    }
}

/// A staff user record for tests.
pub fn cashier(id: i64) -> User {
    User {
        id,
        first_name: "Sam".to_string(),
        last_name: "Till".to_string(),
        username: "sam".to_string(),
        password_hash: "$argon2id$v=19$placeholder".to_string(),
        role: UserRole::Cashier,
    }
}

/// An item record for tests.
pub fn item(id: i64, name: &str, unit_price_cents: i64) -> Item {
    Item {
        id,
        name: name.to_string(),
        unit_price_cents,
        stock: 100,
    }
}
