use crate::domain::model::{Category, Product, ProductId};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{Result, StoreError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Catalog backed by a fixed product list.
///
/// Category listings preserve insertion order. `set_failing(true)` makes
/// every call fail like an unreachable server would.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    failing: AtomicBool,
    requests: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            failing: AtomicBool::new(false),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of calls made so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn begin(&self, what: &str) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::StatusError {
                status: 503,
                url: format!("memory://{}", what),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.begin("products")?;
        Ok(self.products.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.begin("products/categories")?;
        let mut categories: Vec<Category> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.begin("products/category")?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.begin("products/id")?;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::StatusError {
                status: 404,
                url: format!("memory://products/{}", id),
            })
    }
}
