use crate::core::cart::CartStore;
use crate::core::lifecycle::{FetchOutcome, FetchSlot, FetchTicket, Lifecycle};
use crate::core::router::Navigation;
use crate::domain::model::{Product, ProductId};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{Result, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Product),
    Failed(String),
}

#[derive(Debug)]
pub struct ProductDetailViewModel {
    id: ProductId,
    state: DetailState,
    lifecycle: Lifecycle,
    slot: FetchSlot,
}

impl ProductDetailViewModel {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            state: DetailState::Loading,
            lifecycle: Lifecycle::default(),
            slot: FetchSlot::default(),
        }
    }

    pub async fn activate<C: CatalogProvider + ?Sized>(&mut self, catalog: &C) -> FetchOutcome {
        self.lifecycle.mount();
        self.load(catalog).await
    }

    /// Fetches the same id again, typically after a failure.
    pub async fn retry<C: CatalogProvider + ?Sized>(&mut self, catalog: &C) -> FetchOutcome {
        self.load(catalog).await
    }

    async fn load<C: CatalogProvider + ?Sized>(&mut self, catalog: &C) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = catalog.get_product(self.id).await;
        self.accept(ticket, result)
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state = DetailState::Loading;
        self.lifecycle.issue(&mut self.slot)
    }

    pub fn accept(&mut self, ticket: FetchTicket, result: Result<Product>) -> FetchOutcome {
        if !self.lifecycle.is_current(&self.slot, ticket) {
            tracing::debug!("Dropping stale result for product {}", self.id);
            return FetchOutcome::Stale;
        }

        match result {
            Ok(product) => {
                self.state = DetailState::Loaded(product);
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Product {} fetch failed: {}", self.id, e);
                self.state = DetailState::Failed(e.user_friendly_message());
                FetchOutcome::Failed
            }
        }
    }

    /// Adds the loaded product to `cart`. Refused until the product is loaded.
    pub fn add_to_cart(&self, cart: &mut CartStore) -> Result<usize> {
        match &self.state {
            DetailState::Loaded(product) => Ok(cart.add_to_cart(product.clone())),
            DetailState::Loading | DetailState::Failed(_) => Err(StoreError::ProductNotLoaded),
        }
    }

    pub fn go_back(&self) -> Navigation {
        Navigation::Back
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            DetailState::Loaded(product) => Some(product),
            _ => None,
        }
    }

    pub fn can_add_to_cart(&self) -> bool {
        self.product().is_some()
    }
}
