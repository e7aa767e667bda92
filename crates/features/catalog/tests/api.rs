mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn product(sku: &str, brand: &str) -> Value {
    json!({
        "sku": sku,
        "name": format!("{brand} bag"),
        "brand": brand,
        "priceCents": 125_000,
        "condition": "very_good"
    })
}

async fn create(app: &common::TestApp, sku: &str, brand: &str) -> String {
    let (status, body) = app
        .call(Method::POST, "/api/admin/products", Some(&app.admin), Some(product(sku, brand)))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn created_product_uses_storefront_currency_and_is_public() {
    let app = common::app().await;

    let (status, body) = app
        .call(Method::POST, "/api/admin/products", Some(&app.admin), Some(product("ck-1", "Chanel")))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["sku"], "CK-1");
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["isAvailable"], true);
    assert_eq!(body["condition"], "very_good");

    let id = body["id"].as_str().unwrap();
    let (status, fetched) = app.call(Method::GET, &format!("/api/products/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn duplicate_sku_is_a_conflict() {
    let app = common::app().await;
    create(&app, "DUP-1", "Dior").await;

    let (status, body) = app
        .call(Method::POST, "/api/admin/products", Some(&app.admin), Some(product("dup-1", "Dior")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn replace_keeps_creation_time_and_delete_removes() {
    let app = common::app().await;
    let id = create(&app, "LV-9", "Louis Vuitton").await;
    let (_, original) = app.call(Method::GET, &format!("/api/products/{id}"), None, None).await;

    let mut changed = product("LV-9", "Louis Vuitton");
    changed["priceCents"] = json!(99_000);
    changed["isAvailable"] = json!(false);
    let (status, replaced) = app
        .call(Method::PUT, &format!("/api/admin/products/{id}"), Some(&app.admin), Some(changed))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["priceCents"], 99_000);
    assert_eq!(replaced["isAvailable"], false);
    assert_eq!(replaced["createdAt"], original["createdAt"]);

    let (status, _) =
        app.call(Method::DELETE, &format!("/api/admin/products/{id}"), Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.call(Method::GET, &format!("/api/products/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) =
        app.call(Method::DELETE, &format!("/api/admin/products/{id}"), Some(&app.admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listing_filters_by_brand_and_availability() {
    let app = common::app().await;
    create(&app, "A-1", "Chanel").await;
    create(&app, "A-2", "Hermes").await;
    let sold = create(&app, "A-3", "Chanel").await;
    let mut unavailable = product("A-3", "Chanel");
    unavailable["isAvailable"] = json!(false);
    app.call(Method::PUT, &format!("/api/admin/products/{sold}"), Some(&app.admin), Some(unavailable))
        .await;

    let (status, page) = app.call(Method::GET, "/api/products?brand=Chanel", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);

    let (_, page) =
        app.call(Method::GET, "/api/products?brand=Chanel&available=true", None, None).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["sku"], "A-1");
}

#[tokio::test]
async fn curated_list_keeps_order_and_skips_deleted_products() {
    let app = common::app().await;
    let first = create(&app, "P-1", "Celine").await;
    let second = create(&app, "P-2", "Celine").await;
    let third = create(&app, "P-3", "Celine").await;

    let (status, selection) = app
        .call(
            Method::PUT,
            "/api/admin/popup-products",
            Some(&app.admin),
            Some(json!({ "productIds": [third, first, format!("product:{second}")] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{selection}");
    assert_eq!(selection["productIds"], json!([third, first, second]));

    app.call(Method::DELETE, &format!("/api/admin/products/{first}"), Some(&app.admin), None).await;

    let (status, products) = app.call(Method::GET, "/api/popup-products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let skus: Vec<&str> =
        products.as_array().unwrap().iter().map(|p| p["sku"].as_str().unwrap()).collect();
    assert_eq!(skus, vec!["P-3", "P-2"]);

    let (_, raw) = app.call(Method::GET, "/api/admin/popup-products", Some(&app.admin), None).await;
    assert_eq!(raw["productIds"], json!([third, first, second]));
}

#[tokio::test]
async fn lists_are_independent_and_start_empty() {
    let app = common::app().await;
    let id = create(&app, "S-1", "Gucci").await;

    let (_, sale) = app.call(Method::GET, "/api/sale-items", None, None).await;
    assert_eq!(sale, json!([]));

    app.call(
        Method::PUT,
        "/api/admin/sale-items",
        Some(&app.admin),
        Some(json!({ "productIds": [id] })),
    )
    .await;

    let (_, sale) = app.call(Method::GET, "/api/sale-items", None, None).await;
    assert_eq!(sale.as_array().unwrap().len(), 1);
    let (_, popup) = app.call(Method::GET, "/api/popup-products", None, None).await;
    assert_eq!(popup, json!([]));
}

#[tokio::test]
async fn invalid_selections_are_rejected() {
    let app = common::app().await;
    let id = create(&app, "X-1", "Prada").await;

    for ids in [json!([id, id]), json!([id, "ghost"]), json!(["menu:abc"])] {
        let (status, body) = app
            .call(
                Method::PUT,
                "/api/admin/popup-products",
                Some(&app.admin),
                Some(json!({ "productIds": ids })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{ids}");
        assert_eq!(body["status"], "fail");
    }

    let too_many: Vec<String> = (0..13).map(|i| format!("p{i}")).collect();
    let (status, _) = app
        .call(
            Method::PUT,
            "/api/admin/popup-products",
            Some(&app.admin),
            Some(json!({ "productIds": too_many })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, raw) = app.call(Method::GET, "/api/admin/popup-products", Some(&app.admin), None).await;
    assert_eq!(raw["productIds"], json!([]));
}

#[tokio::test]
async fn admin_routes_require_admin() {
    let app = common::app().await;

    let (status, _) =
        app.call(Method::POST, "/api/admin/products", None, Some(product("Z-1", "Fendi"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .call(Method::POST, "/api/admin/products", Some(&app.staff), Some(product("Z-1", "Fendi")))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) =
        app.call(Method::GET, "/api/admin/sale-items", Some(&app.customer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
