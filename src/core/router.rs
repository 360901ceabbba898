use crate::domain::model::ProductId;
use crate::utils::error::{Result, StoreError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(ProductId),
    Cart,
}

/// Navigation request produced by a view-model action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    To(Route),
    Back,
}

impl Route {
    pub fn parse(path: &str) -> Result<Self> {
        path.parse()
    }
}

impl FromStr for Route {
    type Err = StoreError;

    fn from_str(path: &str) -> Result<Self> {
        let unknown = || StoreError::UnknownRoute {
            path: path.to_string(),
        };
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if !trimmed.starts_with('/') {
            return Err(unknown());
        }

        match segments.as_slice() {
            [] => Ok(Self::List),
            ["cart"] => Ok(Self::Cart),
            ["product", id] => id.parse().map(Self::Detail).map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "/"),
            Self::Detail(id) => write!(f, "/product/{}", id),
            Self::Cart => write!(f, "/cart"),
        }
    }
}

/// Back-stack of visited routes. Never empty; the bottom entry is the list.
#[derive(Debug, Clone)]
pub struct History {
    stack: Vec<Route>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            stack: vec![Route::List],
        }
    }
}

impl History {
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::List)
    }

    /// Records a visit. Re-visiting the current route adds nothing.
    pub fn push(&mut self, route: Route) {
        if self.current() != route {
            self.stack.push(route);
        }
    }

    /// Pops the current route. At the root this stays on the list.
    pub fn back(&mut self) -> Route {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.current()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::List);
        assert_eq!(Route::parse("/cart").unwrap(), Route::Cart);
        assert_eq!(Route::parse("/cart/").unwrap(), Route::Cart);
        assert_eq!(
            Route::parse("/product/12").unwrap(),
            Route::Detail(ProductId(12))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        assert!(Route::parse("/product/abc").is_err());
        assert!(Route::parse("/product").is_err());
        assert!(Route::parse("/checkout").is_err());
        assert!(Route::parse("cart").is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for route in [Route::List, Route::Cart, Route::Detail(ProductId(3))] {
            assert_eq!(Route::parse(&route.to_string()).unwrap(), route);
        }
    }

    #[test]
    fn test_history_back() {
        let mut history = History::default();
        history.push(Route::Detail(ProductId(1)));
        history.push(Route::Cart);

        assert_eq!(history.back(), Route::Detail(ProductId(1)));
        assert_eq!(history.back(), Route::List);
        assert_eq!(history.back(), Route::List);
        assert_eq!(history.depth(), 1);
    }

    #[test]
    fn test_history_skips_repeated_route() {
        let mut history = History::default();
        history.push(Route::List);
        history.push(Route::List);
        assert_eq!(history.depth(), 1);

        history.push(Route::Cart);
        history.push(Route::Cart);
        assert_eq!(history.depth(), 2);
        assert_eq!(history.back(), Route::List);
    }
}
