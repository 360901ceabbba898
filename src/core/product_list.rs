use crate::core::lifecycle::{FetchOutcome, FetchSlot, FetchTicket, Lifecycle};
use crate::core::router::{Navigation, Route};
use crate::domain::model::{Category, CategoryFilter, Product, ProductId, SortOrder};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Which product fetch the list currently reflects, so `retry` can repeat it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum LastFetch {
    #[default]
    Activation,
    Filter(CategoryFilter),
}

/// Stable sort by price. Equal prices keep their fetched order.
pub fn sort_by_price(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::Ascending => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::Descending => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
}

/// State behind the product list screen.
///
/// The displayed sequence is always exactly the last accepted fetch,
/// reordered by whatever sort was last requested. Applying a category
/// filter replaces the sequence with the server's order for that category;
/// the selected sort order is kept as state but not re-applied until the
/// user picks a sort again.
#[derive(Debug, Default)]
pub struct ProductListViewModel {
    products: Vec<Product>,
    categories: Vec<Category>,
    sort_order: SortOrder,
    selected_category: CategoryFilter,
    last_fetch: LastFetch,
    categories_failed: bool,
    status: ListStatus,
    lifecycle: Lifecycle,
    products_slot: FetchSlot,
    categories_slot: FetchSlot,
}

impl ProductListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts the screen and loads products and categories.
    pub async fn activate<C: CatalogProvider + ?Sized>(&mut self, catalog: &C) {
        self.lifecycle.mount();
        self.sort_order = SortOrder::Ascending;
        self.selected_category = CategoryFilter::All;
        self.last_fetch = LastFetch::Activation;

        let products_ticket = self.begin_products_fetch();
        let categories_ticket = self.begin_categories_fetch();
        let (products, categories) =
            tokio::join!(catalog.list_products(), catalog.list_categories());

        if self.accept_products(products_ticket, products) == FetchOutcome::Applied {
            sort_by_price(&mut self.products, self.sort_order);
        }
        self.accept_categories(categories_ticket, categories);
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle.is_mounted()
    }

    pub fn begin_products_fetch(&mut self) -> FetchTicket {
        self.status = ListStatus::Loading;
        self.lifecycle.issue(&mut self.products_slot)
    }

    pub fn begin_categories_fetch(&mut self) -> FetchTicket {
        self.lifecycle.issue(&mut self.categories_slot)
    }

    /// Writes a product fetch result back. Failures keep the previous list.
    pub fn accept_products(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>>,
    ) -> FetchOutcome {
        if !self.lifecycle.is_current(&self.products_slot, ticket) {
            tracing::debug!("Dropping stale product list result");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(products) => {
                tracing::debug!("Loaded {} products", products.len());
                self.products = products;
                self.status = ListStatus::Ready;
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Product list fetch failed: {}", e);
                self.status = ListStatus::Failed(e.user_friendly_message());
                FetchOutcome::Failed
            }
        }
    }

    pub fn accept_categories(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Category>>,
    ) -> FetchOutcome {
        if !self.lifecycle.is_current(&self.categories_slot, ticket) {
            tracing::debug!("Dropping stale category result");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(categories) => {
                self.categories = categories;
                self.categories_failed = false;
                FetchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Category fetch failed: {}", e);
                self.categories_failed = true;
                FetchOutcome::Failed
            }
        }
    }

    /// Re-sorts what is currently displayed. Never re-fetches.
    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
        sort_by_price(&mut self.products, order);
    }

    /// Records the category choice without fetching.
    pub fn select_category(&mut self, category: &str) {
        self.selected_category = CategoryFilter::parse(category);
    }

    /// Fetches the currently selected category.
    pub async fn apply_selected_filter<C: CatalogProvider + ?Sized>(
        &mut self,
        catalog: &C,
    ) -> FetchOutcome {
        let filter = self.selected_category.clone();
        self.apply_filter(catalog, filter).await
    }

    /// Replaces the held products with the server's answer for `filter`,
    /// in server order.
    pub async fn apply_filter<C: CatalogProvider + ?Sized>(
        &mut self,
        catalog: &C,
        filter: CategoryFilter,
    ) -> FetchOutcome {
        self.selected_category = filter.clone();
        self.last_fetch = LastFetch::Filter(filter.clone());
        let ticket = self.begin_products_fetch();
        let result = fetch_filtered(catalog, &filter).await;
        self.accept_products(ticket, result)
    }

    /// Repeats the fetch the list currently reflects (activation or the last
    /// applied filter, not a category that was only selected). Categories
    /// are fetched again when they never arrived.
    pub async fn retry<C: CatalogProvider + ?Sized>(&mut self, catalog: &C) -> FetchOutcome {
        let outcome = match self.last_fetch.clone() {
            LastFetch::Activation => {
                let ticket = self.begin_products_fetch();
                let result = catalog.list_products().await;
                let outcome = self.accept_products(ticket, result);
                if outcome == FetchOutcome::Applied {
                    sort_by_price(&mut self.products, self.sort_order);
                }
                outcome
            }
            LastFetch::Filter(filter) => {
                let ticket = self.begin_products_fetch();
                let result = fetch_filtered(catalog, &filter).await;
                self.accept_products(ticket, result)
            }
        };

        if self.categories_failed || self.categories.is_empty() {
            let ticket = self.begin_categories_fetch();
            let result = catalog.list_categories().await;
            self.accept_categories(ticket, result);
        }
        outcome
    }

    /// Navigation to the detail screen for a displayed product.
    pub fn select_product(&self, id: ProductId) -> Option<Navigation> {
        self.products
            .iter()
            .any(|p| p.id == id)
            .then_some(Navigation::To(Route::Detail(id)))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected_category
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }
}

async fn fetch_filtered<C: CatalogProvider + ?Sized>(
    catalog: &C,
    filter: &CategoryFilter,
) -> Result<Vec<Product>> {
    match filter {
        CategoryFilter::All => catalog.list_products().await,
        CategoryFilter::Only(category) => catalog.list_by_category(category).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCatalog;
    use crate::utils::error::StoreError;

    fn product(id: u64, price: f64, category: &str) -> Product {
        Product {
            id: ProductId(id),
            title: format!("Product {}", id),
            price,
            description: String::new(),
            image: String::new(),
            category: category.to_string(),
            rating: None,
        }
    }

    fn ids(view: &ProductListViewModel) -> Vec<u64> {
        view.products().iter().map(|p| p.id.0).collect()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            product(1, 20.0, "jewelery"),
            product(2, 5.0, "electronics"),
            product(3, 12.5, "electronics"),
            product(4, 5.0, "jewelery"),
        ])
    }

    #[test]
    fn test_sort_by_price_is_permutation_and_ordered() {
        let mut products = vec![
            product(1, 20.0, "a"),
            product(2, 5.0, "a"),
            product(3, 7.0, "a"),
            product(4, 5.0, "a"),
        ];

        sort_by_price(&mut products, SortOrder::Ascending);
        assert!(products.windows(2).all(|w| w[0].price <= w[1].price));
        let mut seen: Vec<u64> = products.iter().map(|p| p.id.0).collect();
        // equal prices keep fetched order
        assert_eq!(seen, vec![2, 4, 3, 1]);

        sort_by_price(&mut products, SortOrder::Descending);
        assert!(products.windows(2).all(|w| w[0].price >= w[1].price));

        seen = products.iter().map(|p| p.id.0).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_sort_scenario() {
        let catalog = InMemoryCatalog::new(vec![
            product(1, 20.0, "a"),
            product(2, 5.0, "a"),
        ]);
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;

        view.set_sort_order(SortOrder::Ascending);
        assert_eq!(ids(&view), vec![2, 1]);
        view.set_sort_order(SortOrder::Descending);
        assert_eq!(ids(&view), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_activate_loads_sorted_ascending() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;

        assert_eq!(view.status(), &ListStatus::Ready);
        assert_eq!(view.sort_order(), SortOrder::Ascending);
        assert_eq!(ids(&view), vec![2, 4, 3, 1]);
        assert_eq!(view.categories(), ["jewelery", "electronics"]);
        assert_eq!(view.selected_category(), &CategoryFilter::All);
    }

    #[tokio::test]
    async fn test_sort_does_not_refetch() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;
        let requests = catalog.request_count();

        view.set_sort_order(SortOrder::Descending);
        assert_eq!(catalog.request_count(), requests);
    }

    #[tokio::test]
    async fn test_filter_uses_server_order_not_prior_sort() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;
        view.set_sort_order(SortOrder::Descending);

        view.select_category("electronics");
        let outcome = view.apply_selected_filter(&catalog).await;

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(ids(&view), vec![2, 3]);
        assert_eq!(view.sort_order(), SortOrder::Descending);
        assert_eq!(
            view.selected_category(),
            &CategoryFilter::Only("electronics".to_string())
        );
    }

    #[tokio::test]
    async fn test_filter_all_refetches_everything() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;
        view.apply_filter(&catalog, CategoryFilter::Only("jewelery".into()))
            .await;
        assert_eq!(view.products().len(), 2);

        view.select_category("");
        view.apply_selected_filter(&catalog).await;
        assert_eq!(ids(&view), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_failed_activation_leaves_list_empty() {
        let catalog = catalog();
        catalog.set_failing(true);
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;

        assert!(view.products().is_empty());
        assert!(view.categories().is_empty());
        assert!(matches!(view.status(), ListStatus::Failed(_)));
    }

    #[tokio::test]
    async fn test_failed_filter_keeps_previous_products() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;
        let before = ids(&view);

        catalog.set_failing(true);
        let outcome = view
            .apply_filter(&catalog, CategoryFilter::Only("electronics".into()))
            .await;

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(ids(&view), before);
    }

    #[tokio::test]
    async fn test_result_after_unmount_is_dropped() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;
        let before = ids(&view);

        let ticket = view.begin_products_fetch();
        view.unmount();
        let outcome = view.accept_products(ticket, Ok(vec![product(9, 1.0, "x")]));

        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(ids(&view), before);
    }

    #[tokio::test]
    async fn test_older_filter_result_loses_to_newer() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;

        let first = view.begin_products_fetch();
        let second = view.begin_products_fetch();
        assert_eq!(
            view.accept_products(second, Ok(vec![product(7, 3.0, "x")])),
            FetchOutcome::Applied
        );
        assert_eq!(
            view.accept_products(first, Err(StoreError::ProductNotLoaded)),
            FetchOutcome::Stale
        );
        assert_eq!(ids(&view), vec![7]);
        assert_eq!(view.status(), &ListStatus::Ready);
    }

    #[tokio::test]
    async fn test_select_product_navigates_only_to_displayed() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;

        assert_eq!(
            view.select_product(ProductId(3)),
            Some(Navigation::To(Route::Detail(ProductId(3))))
        );
        assert_eq!(view.select_product(ProductId(99)), None);
    }

    #[tokio::test]
    async fn test_retry_after_outage_restores_products_and_categories() {
        let catalog = catalog();
        catalog.set_failing(true);
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;
        assert!(view.categories().is_empty());

        catalog.set_failing(false);
        assert_eq!(view.retry(&catalog).await, FetchOutcome::Applied);

        assert_eq!(view.status(), &ListStatus::Ready);
        assert_eq!(ids(&view), vec![2, 4, 3, 1]);
        assert_eq!(view.categories(), ["jewelery", "electronics"]);
    }

    #[tokio::test]
    async fn test_retry_repeats_applied_filter_not_selection() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;
        view.apply_filter(&catalog, CategoryFilter::Only("jewelery".into()))
            .await;

        view.select_category("electronics");
        view.retry(&catalog).await;

        assert_eq!(ids(&view), vec![1, 4]);
    }

    #[tokio::test]
    async fn test_retry_skips_categories_when_loaded() {
        let catalog = catalog();
        let mut view = ProductListViewModel::new();
        view.activate(&catalog).await;
        let requests = catalog.request_count();

        view.retry(&catalog).await;
        assert_eq!(catalog.request_count(), requests + 1);
    }
}
