pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpCatalog, InMemoryCatalog};
pub use config::Settings;
pub use self::core::{cart::CartStore, storefront::Storefront};
pub use utils::error::{Result, StoreError};
