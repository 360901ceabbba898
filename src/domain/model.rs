use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Category label as returned by the catalog. Never validated locally.
pub type Category = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub product: Product,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            added_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }
}

/// Price ordering for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "low" => Ok(Self::Ascending),
            "desc" | "descending" | "high" => Ok(Self::Descending),
            other => Err(format!("unknown sort order '{}', expected asc or desc", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "Low to High"),
            Self::Descending => write!(f, "High to Low"),
        }
    }
}

/// Category filter choice: everything, or one server-provided label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Empty input and "all" both mean unfiltered.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Only(category) => category,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    Added {
        product_id: ProductId,
        title: String,
        cart_len: usize,
    },
    Removed {
        product_id: ProductId,
        removed: usize,
        cart_len: usize,
    },
}

impl fmt::Display for CartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { title, cart_len, .. } => {
                write!(f, "Item added to cart: {} ({} in cart)", title, cart_len)
            }
            Self::Removed {
                product_id,
                removed,
                cart_len,
            } => write!(
                f,
                "Removed {} item(s) with id {} ({} in cart)",
                removed, product_id, cart_len
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_catalog_shape() {
        let json = serde_json::json!({
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Your perfect pack",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": {"rate": 3.9, "count": 120},
            "extra": "ignored"
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.id, ProductId(1));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.unwrap().count, 120);
    }

    #[test]
    fn test_product_without_rating() {
        let json = serde_json::json!({"id": 7, "title": "Ring", "price": 9.99});
        let product: Product = serde_json::from_value(json).unwrap();
        assert!(product.rating.is_none());
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Ascending));
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert!("sideways".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(" electronics "),
            CategoryFilter::Only("electronics".to_string())
        );
    }
}
