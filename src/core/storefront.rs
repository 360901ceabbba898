use crate::core::cart::CartStore;
use crate::core::cart_view::CartView;
use crate::core::lifecycle::FetchOutcome;
use crate::core::product_detail::ProductDetailViewModel;
use crate::core::product_list::ProductListViewModel;
use crate::core::router::{History, Navigation, Route};
use crate::domain::model::{CartEvent, ProductId, SortOrder};
use crate::domain::ports::CatalogProvider;
use crate::utils::error::{Result, StoreError};
use tokio::sync::broadcast;

/// The view-model mounted for the current route.
#[derive(Debug)]
pub enum ActiveView {
    List(ProductListViewModel),
    Detail(ProductDetailViewModel),
    Cart(CartView),
}

impl ActiveView {
    fn unmount(&mut self) {
        match self {
            Self::List(list) => list.unmount(),
            Self::Detail(detail) => detail.unmount(),
            Self::Cart(_) => {}
        }
    }
}

/// One browsing session: the catalog, the session cart, history and the
/// mounted screen.
///
/// Every navigation mounts a fresh view-model, so list sort and filter
/// reset when the user leaves the list.
#[derive(Debug)]
pub struct Storefront<C: CatalogProvider> {
    catalog: C,
    cart: CartStore,
    history: History,
    view: ActiveView,
}

impl<C: CatalogProvider> Storefront<C> {
    /// Creates a session on the list route. Call [`Storefront::start`] to load it.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            cart: CartStore::new(),
            history: History::default(),
            view: ActiveView::List(ProductListViewModel::new()),
        }
    }

    pub async fn start(&mut self) {
        let route = self.history.current();
        self.mount(route).await;
    }

    pub async fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigating to {}", route);
        self.history.push(route);
        self.mount(route).await;
    }

    pub async fn back(&mut self) {
        let route = self.history.back();
        tracing::debug!("Going back to {}", route);
        self.mount(route).await;
    }

    pub async fn follow(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::To(route) => self.navigate(route).await,
            Navigation::Back => self.back().await,
        }
    }

    async fn mount(&mut self, route: Route) {
        self.view.unmount();
        self.view = match route {
            Route::List => {
                let mut list = ProductListViewModel::new();
                list.activate(&self.catalog).await;
                ActiveView::List(list)
            }
            Route::Detail(id) => {
                let mut detail = ProductDetailViewModel::new(id);
                detail.activate(&self.catalog).await;
                ActiveView::Detail(detail)
            }
            Route::Cart => ActiveView::Cart(CartView::project(&self.cart)),
        };
    }

    pub fn set_sort_order(&mut self, order: SortOrder) -> Result<()> {
        self.list_mut()?.set_sort_order(order);
        Ok(())
    }

    pub fn select_category(&mut self, category: &str) -> Result<()> {
        self.list_mut()?.select_category(category);
        Ok(())
    }

    pub async fn apply_filter(&mut self) -> Result<FetchOutcome> {
        let ActiveView::List(list) = &mut self.view else {
            return Err(wrong_screen("filter", "the product list"));
        };
        Ok(list.apply_selected_filter(&self.catalog).await)
    }

    /// Opens a product from the list, or jumps straight to its detail page
    /// from any other screen.
    pub async fn open_product(&mut self, id: ProductId) {
        let navigation = match &self.view {
            ActiveView::List(list) => list.select_product(id),
            _ => None,
        };
        self.follow(navigation.unwrap_or(Navigation::To(Route::Detail(id))))
            .await;
    }

    pub fn add_to_cart(&mut self) -> Result<usize> {
        let ActiveView::Detail(detail) = &self.view else {
            return Err(wrong_screen("add", "a product page"));
        };
        detail.add_to_cart(&mut self.cart)
    }

    pub async fn retry(&mut self) -> Result<FetchOutcome> {
        match &mut self.view {
            ActiveView::Detail(detail) => Ok(detail.retry(&self.catalog).await),
            ActiveView::List(list) => Ok(list.retry(&self.catalog).await),
            ActiveView::Cart(_) => Err(wrong_screen("retry", "the list or a product page")),
        }
    }

    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<usize> {
        let ActiveView::Cart(view) = &mut self.view else {
            return Err(wrong_screen("remove", "the cart"));
        };
        Ok(view.remove(&mut self.cart, id))
    }

    fn list_mut(&mut self) -> Result<&mut ProductListViewModel> {
        match &mut self.view {
            ActiveView::List(list) => Ok(list),
            _ => Err(wrong_screen("sort and category", "the product list")),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.cart.subscribe()
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn route(&self) -> Route {
        self.history.current()
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

fn wrong_screen(action: &str, screen: &str) -> StoreError {
    StoreError::InvalidCommand {
        message: format!("{} is only available on {}", action, screen),
    }
}
