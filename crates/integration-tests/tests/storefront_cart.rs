//! Integration tests for the storefront cart.
//!
//! Each test drives a freshly spawned storefront over HTTP the way the
//! page's HTMX attributes would.

#![allow(clippy::unwrap_used)]

use cartwheel_integration_tests::TestContext;
use reqwest::{Client, StatusCode};

const BLUE_MUG: [(&str, &str); 3] = [
    ("title", "Blue Mug"),
    ("price", "$12.50"),
    ("image", "/images/blue-mug.svg"),
];

async fn post_form(
    ctx: &TestContext,
    client: &Client,
    path: &str,
    form: &[(&str, &str)],
) -> (StatusCode, String) {
    let resp = client.post(ctx.url(path)).form(form).send().await.unwrap();
    let status = resp.status();
    (status, resp.text().await.unwrap())
}

async fn get_text(ctx: &TestContext, client: &Client, path: &str) -> String {
    let resp = client.get(ctx.url(path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::new().await;

    assert_eq!(get_text(&ctx, &ctx.client, "/health").await, "ok");
    let ready = ctx.client.get(ctx.url("/health/ready")).send().await.unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-123");

    let resp = ctx.client.get(ctx.url("/health")).send().await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}

// ============================================================================
// Static pages
// ============================================================================

#[tokio::test]
async fn test_static_page_set_is_served() {
    let ctx = TestContext::new().await;

    let index = get_text(&ctx, &ctx.client, "/").await;
    assert!(index.contains(r#"class="product-card""#));
    assert!(index.contains(r#"hx-post="/cart/add""#));

    let resp = ctx
        .client
        .get(ctx.url("/images/blue-mug.svg"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_empty_cart_page() {
    let ctx = TestContext::new().await;

    let page = get_text(&ctx, &ctx.client, "/cart").await;
    assert!(page.contains("Your cart is empty"));
    assert!(page.contains(r#"data-summary="delivery">$0.00<"#));
    assert!(page.contains(r#"data-summary="total">$0.00<"#));
    assert_eq!(get_text(&ctx, &ctx.client, "/cart/count").await, "0");
}

#[tokio::test]
async fn test_add_from_card_shows_confirmation() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .form(&BLUE_MUG)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("hx-trigger").unwrap(), "cart-updated");
    let body = resp.text().await.unwrap();
    assert!(body.contains("Added"));
    assert!(body.contains(r#"hx-get="/cart/button""#));

    let button = get_text(&ctx, &ctx.client, "/cart/button").await;
    assert!(button.contains("Add to Cart"));
}

#[tokio::test]
async fn test_add_then_view_cart() {
    let ctx = TestContext::new().await;

    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;
    let page = get_text(&ctx, &ctx.client, "/cart").await;

    assert!(page.contains(r#"data-item-id="blue-mug""#));
    assert!(page.contains("Blue Mug"));
    assert!(page.contains(r#"value="1""#));
    assert!(page.contains(r#"data-summary="items-total">$12.50<"#));
    assert!(page.contains(r#"data-summary="delivery">$5.00<"#));
    assert!(page.contains(r#"data-summary="total">$17.50<"#));
}

#[tokio::test]
async fn test_add_twice_increments_quantity() {
    let ctx = TestContext::new().await;

    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;
    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;

    assert_eq!(get_text(&ctx, &ctx.client, "/cart/count").await, "2");
    let page = get_text(&ctx, &ctx.client, "/cart").await;
    assert_eq!(page.matches("data-item-id=").count(), 1);
    assert!(page.contains("Subtotal: $25.00"));
}

#[tokio::test]
async fn test_update_quantity_rerenders_subtotal() {
    let ctx = TestContext::new().await;
    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;

    let (status, fragment) = post_form(
        &ctx,
        &ctx.client,
        "/cart/update",
        &[("id", "blue-mug"), ("quantity", "3")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(fragment.contains("Subtotal: $37.50"));
    assert!(fragment.contains(r#"data-summary="total">$42.50<"#));
    assert!(!fragment.contains("<html"));
    assert_eq!(get_text(&ctx, &ctx.client, "/cart/count").await, "3");
}

#[tokio::test]
async fn test_update_with_unreadable_quantity_sets_one() {
    let ctx = TestContext::new().await;
    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;
    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;

    let (_, fragment) = post_form(
        &ctx,
        &ctx.client,
        "/cart/update",
        &[("id", "blue-mug"), ("quantity", "lots")],
    )
    .await;

    assert!(fragment.contains("Subtotal: $12.50"));
}

#[tokio::test]
async fn test_update_to_negative_removes_line() {
    let ctx = TestContext::new().await;
    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;

    let (_, fragment) = post_form(
        &ctx,
        &ctx.client,
        "/cart/update",
        &[("id", "blue-mug"), ("quantity", "-1")],
    )
    .await;

    assert!(fragment.contains("Your cart is empty"));
    assert!(fragment.contains(r#"data-summary="delivery">$0.00<"#));
}

#[tokio::test]
async fn test_remove_line() {
    let ctx = TestContext::new().await;
    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;
    post_form(
        &ctx,
        &ctx.client,
        "/cart/add",
        &[
            ("title", "Tea Pot"),
            ("price", "$30.00"),
            ("image", "/images/tea-pot.svg"),
        ],
    )
    .await;

    let (status, fragment) =
        post_form(&ctx, &ctx.client, "/cart/remove", &[("id", "blue-mug")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!fragment.contains(r#"data-item-id="blue-mug""#));
    assert!(fragment.contains(r#"data-item-id="tea-pot""#));
    assert!(fragment.contains(r#"data-summary="total">$35.00<"#));
}

#[tokio::test]
async fn test_remove_missing_line_is_noop() {
    let ctx = TestContext::new().await;
    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;

    let (status, fragment) =
        post_form(&ctx, &ctx.client, "/cart/remove", &[("id", "tea-pot")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(fragment.contains(r#"data-item-id="blue-mug""#));
}

#[tokio::test]
async fn test_add_with_unreadable_price_is_rejected() {
    let ctx = TestContext::new().await;

    let (status, fragment) = post_form(
        &ctx,
        &ctx.client,
        "/cart/add",
        &[("title", "Mystery Box"), ("price", "Sold out"), ("image", "")],
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(fragment.contains("Unavailable"));
    assert!(fragment.contains(r#"hx-get="/cart/button""#));
    assert_eq!(get_text(&ctx, &ctx.client, "/cart/count").await, "0");
}

#[tokio::test]
async fn test_product_page_swaps_rejected_add_fragment() {
    let ctx = TestContext::new().await;

    let index = get_text(&ctx, &ctx.client, "/").await;
    assert!(index.contains(r#"{"code":"422","swap":true,"error":false}"#));
}

#[tokio::test]
async fn test_oversized_price_is_rejected_and_cart_still_renders() {
    let ctx = TestContext::new().await;
    let price = format!("${}", "9".repeat(28));

    for _ in 0..8 {
        let (status, _) = post_form(
            &ctx,
            &ctx.client,
            "/cart/add",
            &[("title", "Gold Mug"), ("price", price.as_str()), ("image", "")],
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let page = get_text(&ctx, &ctx.client, "/cart").await;
    assert!(page.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_largest_price_renders_cart() {
    let ctx = TestContext::new().await;
    let gold_mug = [
        ("title", "Gold Mug"),
        ("price", "$999,999,999.99"),
        ("image", ""),
    ];

    for _ in 0..8 {
        let (status, _) = post_form(&ctx, &ctx.client, "/cart/add", &gold_mug).await;
        assert_eq!(status, StatusCode::OK);
    }
    post_form(
        &ctx,
        &ctx.client,
        "/cart/update",
        &[("id", "gold-mug"), ("quantity", "4294967295")],
    )
    .await;

    let page = get_text(&ctx, &ctx.client, "/cart").await;
    assert!(page.contains(r#"data-item-id="gold-mug""#));
    assert!(page.contains("$999999999.99"));
}

#[tokio::test]
async fn test_update_without_id_is_bad_request() {
    let ctx = TestContext::new().await;

    let (status, _) = post_form(
        &ctx,
        &ctx.client,
        "/cart/update",
        &[("id", ""), ("quantity", "2")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shoppers_have_separate_carts() {
    let ctx = TestContext::new().await;
    post_form(&ctx, &ctx.client, "/cart/add", &BLUE_MUG).await;

    let other = TestContext::shopper();
    assert_eq!(get_text(&ctx, &other, "/cart/count").await, "0");
    assert_eq!(get_text(&ctx, &ctx.client, "/cart/count").await, "1");
}
