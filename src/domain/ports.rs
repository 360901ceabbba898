use crate::domain::model::{Category, Product, ProductId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read-only access to the remote product catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>>;
    async fn get_product(&self, id: ProductId) -> Result<Product>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}
