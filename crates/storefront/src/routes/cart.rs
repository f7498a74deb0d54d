//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation re-renders the whole cart fragment from the stored cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use cartwheel_core::{ProductCard, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::cart::{CartView, parse_quantity_input};
use crate::error::{AppError, Result};
use crate::storage::SessionCartStore;

/// How long the "Added" or "Unavailable" state stays before the button reverts.
pub const CONFIRMATION_MILLIS: u64 = 1000;

/// HTMX event fired after any cart change so other elements can refresh.
const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Update cart form data.
///
/// The quantity is kept as raw input text and read leniently.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    #[serde(default)]
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart items and summary fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Default add-to-cart button fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/add_button.html")]
pub struct AddButtonTemplate;

/// Confirmation shown in place of the add-to-cart button after a click.
#[derive(Template, WebTemplate)]
#[template(path = "partials/added_button.html")]
pub struct AddedButtonTemplate {
    pub revert_after_ms: u64,
}

/// Inline error shown in place of the add-to-cart button when the card's
/// price cannot be read. The page swaps 422 responses in.
#[derive(Template, WebTemplate)]
#[template(path = "partials/add_error.html")]
pub struct AddErrorTemplate {
    pub message: String,
    pub revert_after_ms: u64,
}

fn product_id(raw: String) -> Result<ProductId> {
    if raw.is_empty() {
        return Err(AppError::BadRequest("missing product id".to_string()));
    }
    Ok(ProductId::new(raw))
}

/// Display cart page.
#[instrument(skip(store))]
pub async fn show(store: SessionCartStore) -> impl IntoResponse {
    let cart = store.load().await;

    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add item to cart (HTMX).
///
/// The form carries the text of the product card the button sits in.
/// Returns the "Added" confirmation in place of the button. A card whose
/// price cannot be read gets a 422 with the "Unavailable" fragment instead,
/// and the cart is not touched.
///
/// # Errors
///
/// Returns 500 if the cart cannot be saved.
#[instrument(skip(store))]
pub async fn add(store: SessionCartStore, Form(card): Form<ProductCard>) -> Result<Response> {
    let product = match card.into_product() {
        Ok(product) => product,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected product card");
            let fragment = AddErrorTemplate {
                message: e.to_string(),
                revert_after_ms: CONFIRMATION_MILLIS,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, fragment).into_response());
        }
    };

    let cart = store.add(product).await?;
    tracing::debug!(lines = cart.len(), "Added product to cart");

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        AddedButtonTemplate {
            revert_after_ms: CONFIRMATION_MILLIS,
        },
    )
        .into_response())
}

/// Default add-to-cart button (HTMX), swapped back in after the confirmation.
pub async fn button() -> impl IntoResponse {
    AddButtonTemplate
}

/// Update cart item quantity (HTMX).
///
/// # Errors
///
/// Returns 400 without an id, 500 if the cart cannot be saved.
#[instrument(skip(store))]
pub async fn update(
    store: SessionCartStore,
    Form(form): Form<UpdateCartForm>,
) -> Result<impl IntoResponse> {
    let id = product_id(form.id)?;
    let quantity = parse_quantity_input(&form.quantity);
    let cart = store.set_quantity(&id, quantity).await?;

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    ))
}

/// Remove item from cart (HTMX).
///
/// # Errors
///
/// Returns 400 without an id, 500 if the cart cannot be saved.
#[instrument(skip(store))]
pub async fn remove(
    store: SessionCartStore,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<impl IntoResponse> {
    let id = product_id(form.id)?;
    let cart = store.remove(&id).await?;

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    ))
}

/// Get cart count badge (HTMX).
#[instrument(skip(store))]
pub async fn count(store: SessionCartStore) -> impl IntoResponse {
    CartCountTemplate {
        count: store.item_count().await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartwheel_core::{Cart, Price, Product};

    use super::*;

    fn blue_mug_cart(quantity: i64) -> CartView {
        let mut cart = Cart::new();
        let id = ProductId::from_name("Blue Mug");
        cart.add(Product {
            id: id.clone(),
            name: "Blue Mug".to_string(),
            price: Price::from_cents(1250),
            image: "/images/blue-mug.svg".to_string(),
        });
        cart.set_quantity(&id, quantity);
        CartView::from(&cart)
    }

    #[test]
    fn test_empty_cart_renders_empty_state() {
        let html = CartItemsTemplate {
            cart: CartView::from(&Cart::new()),
        }
        .render()
        .unwrap();

        assert!(html.contains("Your cart is empty"));
        assert!(html.contains(r#"data-summary="items-total">$0.00<"#));
        assert!(html.contains(r#"data-summary="delivery">$0.00<"#));
        assert!(html.contains(r#"data-summary="total">$0.00<"#));
        assert!(!html.contains("data-item-id"));
    }

    #[test]
    fn test_line_renders_controls_and_subtotal() {
        let html = CartItemsTemplate {
            cart: blue_mug_cart(3),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"data-item-id="blue-mug""#));
        assert!(html.contains(r#"src="/images/blue-mug.svg""#));
        assert!(html.contains("$12.50"));
        assert!(html.contains(r#"type="number" min="1" name="quantity" value="3""#));
        assert!(html.contains(r#"data-action="remove""#));
        assert!(html.contains("Subtotal: $37.50"));
        assert!(html.contains(r#"data-summary="items-total">$37.50<"#));
        assert!(html.contains(r#"data-summary="delivery">$5.00<"#));
        assert!(html.contains(r#"data-summary="total">$42.50<"#));
    }

    #[test]
    fn test_render_is_idempotent() {
        let cart = blue_mug_cart(2);
        let first = CartShowTemplate { cart: cart.clone() }.render().unwrap();
        let second = CartShowTemplate { cart }.render().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_product_names_are_escaped() {
        let mut cart = Cart::new();
        cart.add(Product {
            id: ProductId::from_name("<b>Mug</b>"),
            name: "<b>Mug</b>".to_string(),
            price: Price::from_cents(100),
            image: String::new(),
        });
        let html = CartItemsTemplate {
            cart: CartView::from(&cart),
        }
        .render()
        .unwrap();

        assert!(!html.contains("<b>Mug</b>"));
    }

    #[test]
    fn test_added_button_reverts_after_delay() {
        let html = AddedButtonTemplate {
            revert_after_ms: CONFIRMATION_MILLIS,
        }
        .render()
        .unwrap();

        assert!(html.contains("Added"));
        assert!(html.contains(r#"hx-get="/cart/button""#));
        assert!(html.contains("load delay:1000ms"));
    }

    #[test]
    fn test_add_error_renders_inline_message() {
        let html = AddErrorTemplate {
            message: r#"invalid price: price text "Sold out" contains no number"#.to_string(),
            revert_after_ms: CONFIRMATION_MILLIS,
        }
        .render()
        .unwrap();

        assert!(html.contains("Unavailable"));
        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("Sold out"));
        assert!(!html.contains(r#""Sold out""#));
        assert!(html.contains(r#"hx-get="/cart/button""#));
    }

    #[test]
    fn test_largest_price_renders() {
        let mut cart = Cart::new();
        let id = ProductId::from_name("Gold Mug");
        cart.add(Product {
            id: id.clone(),
            name: "Gold Mug".to_string(),
            price: Price::parse_display_text("$999999999.9999").unwrap(),
            image: String::new(),
        });
        cart.set_quantity(&id, i64::MAX);

        let html = CartItemsTemplate {
            cart: CartView::from(&cart),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"data-item-id="gold-mug""#));
        assert!(html.contains("$1000000000.00"));
    }

    #[test]
    fn test_product_id_rejects_empty() {
        assert!(matches!(
            product_id(String::new()),
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(product_id("blue-mug".to_string()).unwrap().as_str(), "blue-mug");
    }
}
