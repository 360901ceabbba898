use crate::core::cart::CartStore;
use crate::domain::model::ProductId;
use chrono::{DateTime, Utc};

pub const EMPTY_CART_MESSAGE: &str = "No items in cart";

#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub added_at: DateTime<Utc>,
}

/// Read-only snapshot of the cart for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    rows: Vec<CartRow>,
    total: f64,
}

impl CartView {
    pub fn project(cart: &CartStore) -> Self {
        let rows = cart
            .items()
            .iter()
            .map(|item| CartRow {
                id: item.id(),
                title: item.product.title.clone(),
                price: item.product.price,
                image: item.product.image.clone(),
                added_at: item.added_at,
            })
            .collect();

        Self {
            rows,
            total: cart.total(),
        }
    }

    /// Removes every entry for `id` from the store and refreshes the snapshot.
    pub fn remove(&mut self, cart: &mut CartStore, id: ProductId) -> usize {
        let removed = cart.remove_from_cart(id);
        *self = Self::project(cart);
        removed
    }

    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_CART_MESSAGE)
    }
}
