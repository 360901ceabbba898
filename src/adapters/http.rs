use crate::domain::model::{Category, Product, ProductId};
use crate::domain::ports::{CatalogProvider, ConfigProvider};
use crate::utils::error::{Result, StoreError};
use crate::utils::validation::validate_base_url;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

/// Catalog client speaking the fakestoreapi.com wire format.
///
/// One request per call: no retry, no caching. Non-2xx answers become
/// [`StoreError::StatusError`], undecodable bodies become
/// [`StoreError::SerializationError`].
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let base_url = validate_base_url("base_url", config.base_url())?;

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("Making catalog request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);
        if !status.is_success() {
            return Err(StoreError::StatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.get_json(self.endpoint(&["products"])).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get_json(self.endpoint(&["products", "categories"]))
            .await
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>> {
        self.get_json(self.endpoint(&["products", "category", category]))
            .await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product> {
        let id = id.to_string();
        self.get_json(self.endpoint(&["products", &id])).await
    }
}
