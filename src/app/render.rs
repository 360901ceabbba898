use crate::core::cart_view::CartView;
use crate::core::product_detail::{DetailState, ProductDetailViewModel};
use crate::core::product_list::{ListStatus, ProductListViewModel};
use crate::core::storefront::{ActiveView, Storefront};
use crate::domain::ports::CatalogProvider;
use std::fmt::Write;

pub fn render<C: CatalogProvider>(store: &Storefront<C>) -> String {
    let mut out = match store.view() {
        ActiveView::List(list) => render_list(list),
        ActiveView::Detail(detail) => render_detail(detail),
        ActiveView::Cart(cart) => render_cart(cart),
    };
    let _ = write!(out, "[{}] cart: {} item(s)", store.route(), store.cart().len());
    out
}

pub fn render_list(list: &ProductListViewModel) -> String {
    let mut out = String::from("== Product List ==\n");
    let _ = writeln!(
        out,
        "Sort by price: {} | Filter by category: {}",
        list.sort_order(),
        list.selected_category().label()
    );

    let mut categories = vec!["All"];
    categories.extend(list.categories().iter().map(String::as_str));
    let _ = writeln!(out, "Categories: {}", categories.join(", "));

    match list.status() {
        ListStatus::Idle | ListStatus::Loading => out.push_str("Loading...\n"),
        ListStatus::Failed(message) => {
            let _ = writeln!(out, "! {} (type 'retry')", message);
        }
        ListStatus::Ready => {}
    }

    for product in list.products() {
        let _ = writeln!(
            out,
            "  [{}] {} - ${:.2}",
            product.id, product.title, product.price
        );
        let _ = writeln!(out, "      Image: {}", product.image);
    }
    out
}

pub fn render_detail(detail: &ProductDetailViewModel) -> String {
    let mut out = String::from("== Product Details ==\n");
    match detail.state() {
        DetailState::Loading => out.push_str("Loading...\n"),
        DetailState::Failed(message) => {
            let _ = writeln!(
                out,
                "! Product {} could not be loaded: {} (type 'retry' or 'back')",
                detail.id(),
                message
            );
        }
        DetailState::Loaded(product) => {
            let _ = writeln!(out, "{}", product.title);
            let _ = writeln!(out, "Image: {}", product.image);
            let _ = writeln!(out, "Category: {}", product.category);
            let _ = writeln!(out, "{}", product.description);
            let _ = writeln!(out, "${:.2}", product.price);
            if let Some(rating) = &product.rating {
                let _ = writeln!(out, "Rated {:.1} by {} customers", rating.rate, rating.count);
            }
            out.push_str("Actions: add, back\n");
        }
    }
    out
}

pub fn render_cart(cart: &CartView) -> String {
    let mut out = String::from("== Cart ==\n");
    if let Some(message) = cart.empty_message() {
        let _ = writeln!(out, "{}", message);
        return out;
    }

    for row in cart.rows() {
        let _ = writeln!(out, "  [{}] {} - ${:.2}", row.id, row.title, row.price);
        let _ = writeln!(
            out,
            "      Image: {} | added {}",
            row.image,
            row.added_at.format("%H:%M:%S UTC")
        );
    }
    let _ = writeln!(out, "Total: ${:.2} ({} item(s))", cart.total(), cart.len());
    out.push_str("Actions: remove <id>\n");
    out
}
