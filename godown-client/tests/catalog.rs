// godown-client/tests/catalog.rs
// Reference-data cache behavior: scoped subcategories, create-on-the-fly,
// and stale-data retention on fetch failure.

mod common;

use common::{FailWith, MockApi, logged_in_session};
use chrono::Utc;
use godown_client::catalog::{CatalogCache, ProductCache};
use godown_client::error::ClientError;
use shared::models::{Category, Product, Role, Subcategory};

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: None,
        is_active: true,
    }
}

fn subcategory(id: i64, category_id: i64, name: &str) -> Subcategory {
    Subcategory {
        id,
        name: name.to_string(),
        category_id,
        description: None,
        is_active: true,
    }
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_list() {
    let mut api = MockApi::new();
    api.categories = vec![category(1, "Footwear"), category(2, "Luggage")];
    let mut cache = CatalogCache::new();

    cache.load_categories(&api).await.unwrap();
    assert_eq!(cache.categories().len(), 2);

    api.fail_categories = Some(FailWith::Server("boom".to_string()));
    let err = cache.load_categories(&api).await.unwrap_err();

    assert!(matches!(err, ClientError::Server { .. }));
    // Stale but intact.
    assert_eq!(cache.categories().len(), 2);
}

#[tokio::test]
async fn test_subcategory_scope_switching() {
    let mut api = MockApi::new();
    api.subcategories = vec![
        subcategory(1, 1, "Running"),
        subcategory(2, 1, "Formal"),
        subcategory(3, 2, "Cabin"),
    ];
    let mut cache = CatalogCache::new();

    cache.load_subcategories(&api, Some(1)).await.unwrap();
    assert_eq!(cache.subcategories().len(), 2);
    assert_eq!(cache.subcategory_scope(), Some(1));
    assert_eq!(api.count("GET /subcategories?category_id=1"), 1);

    // Re-selecting the same category is a no-op, no second fetch.
    cache.load_subcategories(&api, Some(1)).await.unwrap();
    assert_eq!(api.count("GET /subcategories?category_id=1"), 1);

    // Switching categories fetches the new scope.
    cache.load_subcategories(&api, Some(2)).await.unwrap();
    assert_eq!(cache.subcategories().len(), 1);
    assert_eq!(cache.subcategories()[0].name, "Cabin");
    assert_eq!(api.count("GET /subcategories?category_id=2"), 1);

    // Clearing the category clears the list without a fetch.
    let before = api.total_calls();
    cache.load_subcategories(&api, None).await.unwrap();
    assert!(cache.subcategories().is_empty());
    assert_eq!(cache.subcategory_scope(), None);
    assert_eq!(api.total_calls(), before);
}

#[tokio::test]
async fn test_scope_failure_keeps_previous_scope() {
    let mut api = MockApi::new();
    api.subcategories = vec![subcategory(1, 1, "Running")];
    let mut cache = CatalogCache::new();
    cache.load_subcategories(&api, Some(1)).await.unwrap();

    api.fail_subcategories = Some(FailWith::Server("boom".to_string()));
    cache.load_subcategories(&api, Some(2)).await.unwrap_err();

    assert_eq!(cache.subcategory_scope(), Some(1));
    assert_eq!(cache.subcategories().len(), 1);
}

#[tokio::test]
async fn test_create_category_appends_and_returns_id() {
    let mut api = MockApi::new();
    let (session, _dir) = logged_in_session(&mut api, Role::Manager).await;
    let mut cache = CatalogCache::new();

    let id = cache
        .create_category(&api, &session, " Sports ")
        .await
        .unwrap();

    assert_eq!(id, 1);
    assert_eq!(cache.categories().len(), 1);
    assert_eq!(cache.categories()[0].name, "Sports");
}

#[tokio::test]
async fn test_create_category_failure_does_not_mutate_cache() {
    let mut api = MockApi::new();
    api.fail_create_category = Some(FailWith::Server("duplicate".to_string()));
    let (session, _dir) = logged_in_session(&mut api, Role::Manager).await;
    let mut cache = CatalogCache::new();

    cache
        .create_category(&api, &session, "Sports")
        .await
        .unwrap_err();

    assert!(cache.categories().is_empty());
}

#[tokio::test]
async fn test_create_category_requires_name_and_role() {
    let mut api = MockApi::new();
    let (session, _dir) = logged_in_session(&mut api, Role::Manager).await;
    let mut cache = CatalogCache::new();

    let err = cache
        .create_category(&api, &session, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let (employee, _dir2) = logged_in_session(&mut api, Role::Employee).await;
    let err = cache
        .create_category(&api, &employee, "Sports")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
    // Neither attempt reached the network.
    assert_eq!(api.count("POST /categories"), 0);
}

fn product(id: i64, item_id: &str) -> Product {
    Product {
        id,
        item_id: item_id.to_string(),
        item_name: item_id.to_string(),
        model: String::new(),
        description: String::new(),
        category_id: None,
        subcategory_id: None,
        brand_id: None,
        category_name: None,
        subcategory_name: None,
        brand_name: None,
        image_url: None,
        low_stock_threshold: None,
        variants: Vec::new(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_delete_product_is_gated_and_prunes_the_list() {
    let mut api = MockApi::new();
    api.products = vec![product(1, "SKU1"), product(2, "SKU2")];
    let mut products = ProductCache::new();
    products.refresh(&api).await.unwrap();

    let (mut employee, _dir) = logged_in_session(&mut api, Role::Employee).await;
    let err = products
        .remove(&mut api, &mut employee, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden(_)));
    assert_eq!(api.count("DELETE /products/1"), 0);
    assert_eq!(products.products().len(), 2);

    let (mut manager, _dir2) = logged_in_session(&mut api, Role::Manager).await;
    products.remove(&mut api, &mut manager, 1).await.unwrap();
    assert_eq!(api.count("DELETE /products/1"), 1);
    assert_eq!(products.products().len(), 1);
    assert_eq!(products.find(2).unwrap().item_id, "SKU2");
}

#[tokio::test]
async fn test_create_subcategory_appends_only_within_current_scope() {
    let mut api = MockApi::new();
    let (session, _dir) = logged_in_session(&mut api, Role::Admin).await;
    let mut cache = CatalogCache::new();
    cache.load_subcategories(&api, Some(1)).await.unwrap();

    let id = cache
        .create_subcategory(&api, &session, "Running", 1)
        .await
        .unwrap();
    assert_eq!(id, 1);
    assert_eq!(cache.subcategories().len(), 1);

    // A subcategory created under another category does not leak into the
    // current scope's list.
    cache
        .create_subcategory(&api, &session, "Cabin", 2)
        .await
        .unwrap();
    assert_eq!(cache.subcategories().len(), 1);
}
