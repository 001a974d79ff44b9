//! # Price Resolver
//!
//! The single point through which a unit price is ever obtained.
//!
//! Clients never send prices; the creation request carries only item ids
//! and quantities, and every subtotal is computed from what this resolver
//! returns at that moment. Routing all price reads through one component
//! is what guarantees no other code path can substitute a client-supplied
//! value.

use std::sync::Arc;

use crate::error::{BillingError, BillingResult};
use crate::lookup::ItemLookup;
use tillpoint_core::Money;

/// Resolves the current authoritative unit price for an item.
#[derive(Clone)]
pub struct PriceResolver {
    items: Arc<dyn ItemLookup>,
}

impl PriceResolver {
    /// Creates a resolver over the given item lookup.
    pub fn new(items: Arc<dyn ItemLookup>) -> Self {
        PriceResolver { items }
    }

    /// Returns the unit price for the item, or NotFound.
    ///
    /// The NotFound here overlaps with the reference validator's item
    /// check on purpose: even a caller that skipped validation cannot get
    /// a price for an item that does not exist.
    pub async fn price_of(&self, item_id: i64) -> BillingResult<Money> {
        self.items
            .price_of(item_id)
            .await?
            .map(Money::from_cents)
            .ok_or_else(|| BillingError::not_found("Item", item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{item, FixedItems};

    #[tokio::test]
    async fn test_resolves_catalog_price() {
        let resolver = PriceResolver::new(Arc::new(FixedItems::with([item(1, "Espresso", 350)])));

        let price = resolver.price_of(1).await.unwrap();
        assert_eq!(price.cents(), 350);
    }

    #[tokio::test]
    async fn test_unknown_item_is_not_found() {
        let resolver = PriceResolver::new(Arc::new(FixedItems::default()));

        let err = resolver.price_of(99).await.unwrap_err();
        assert_eq!(err.to_string(), "Item not found: 99");
    }
}
