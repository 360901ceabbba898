pub mod cart;
pub mod cart_view;
pub mod lifecycle;
pub mod product_detail;
pub mod product_list;
pub mod router;
pub mod storefront;

pub use crate::domain::model::{CartEvent, CartItem, Category, Product, ProductId, SortOrder};
pub use crate::domain::ports::{CatalogProvider, ConfigProvider};
pub use crate::utils::error::Result;
