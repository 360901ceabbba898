use crate::domain::model::{CartEvent, CartItem, Product, ProductId};
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 64;

/// Session cart. One instance per session, owned by the caller and handed
/// by reference to whatever needs to mutate it.
///
/// The item sequence keeps insertion order and allows duplicates. Every
/// successful add is announced on the event channel.
#[derive(Debug)]
pub struct CartStore {
    items: Vec<CartItem>,
    events: broadcast::Sender<CartEvent>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            items: Vec::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Appends the product and returns the new cart size.
    pub fn add_to_cart(&mut self, product: Product) -> usize {
        let product_id = product.id;
        let title = product.title.clone();
        self.items.push(CartItem::new(product));

        let cart_len = self.items.len();
        tracing::info!("🛒 Added product {} to cart ({} items)", product_id, cart_len);
        self.notify(CartEvent::Added {
            product_id,
            title,
            cart_len,
        });
        cart_len
    }

    /// Drops every entry with this id. Returns how many were removed.
    pub fn remove_from_cart(&mut self, id: ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = before - self.items.len();

        if removed > 0 {
            tracing::info!("Removed {} entries of product {} from cart", removed, id);
            self.notify(CartEvent::Removed {
                product_id: id,
                removed,
                cart_len: self.items.len(),
            });
        } else {
            tracing::debug!("Product {} not in cart, nothing removed", id);
        }
        removed
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.product.price).sum()
    }

    fn notify(&self, event: CartEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("No cart listeners attached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Product;

    fn product(id: u64, price: f64) -> Product {
        Product {
            id: ProductId(id),
            title: format!("Product {}", id),
            price,
            description: String::new(),
            image: String::new(),
            category: "electronics".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = CartStore::new();
        assert!(cart.is_empty());

        assert_eq!(cart.add_to_cart(product(1, 10.0)), 1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id(), ProductId(1));
    }

    #[test]
    fn test_add_same_product_twice_keeps_both() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0));
        cart.add_to_cart(product(1, 10.0));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), 20.0);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0));
        cart.add_to_cart(product(2, 5.0));
        let before: Vec<ProductId> = cart.items().iter().map(CartItem::id).collect();

        assert_eq!(cart.remove_from_cart(ProductId(42)), 0);

        let after: Vec<ProductId> = cart.items().iter().map(CartItem::id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_drops_all_duplicates() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0));
        cart.add_to_cart(product(2, 5.0));
        cart.add_to_cart(product(1, 10.0));

        assert_eq!(cart.remove_from_cart(ProductId(1)), 2);
        assert_eq!(cart.len(), 1);
        assert!(!cart.contains(ProductId(1)));
        assert!(cart.contains(ProductId(2)));
    }

    #[test]
    fn test_remove_single_entry_shrinks_by_one() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0));
        cart.add_to_cart(product(2, 5.0));

        cart.remove_from_cart(ProductId(2));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_every_add_is_announced() {
        let mut cart = CartStore::new();
        let mut events = cart.subscribe();

        cart.add_to_cart(product(3, 1.5));
        cart.add_to_cart(product(3, 1.5));

        for expected_len in 1..=2 {
            match events.try_recv().unwrap() {
                CartEvent::Added {
                    product_id,
                    cart_len,
                    ..
                } => {
                    assert_eq!(product_id, ProductId(3));
                    assert_eq!(cart_len, expected_len);
                }
                other => panic!("unexpected event {:?}", other),
            }
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_noop_remove_is_silent() {
        let mut cart = CartStore::new();
        let mut events = cart.subscribe();
        cart.remove_from_cart(ProductId(8));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_add_without_listeners_does_not_fail() {
        let mut cart = CartStore::new();
        assert_eq!(cart.add_to_cart(product(1, 1.0)), 1);
    }
}
