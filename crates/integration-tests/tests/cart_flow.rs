//! Integration tests for cart operations against the HTTP API.
//!
//! These tests run the real catalog/stock server and the real HTTP client,
//! so stock checks, 404 handling and catalog fetches go over the network.

use rocketshoes_cart::{
    ApiConfig, ApiError, CartError, CartStore, Catalog, FileStore, HttpCatalog, MemoryStore,
    NoticeKind, Operation, Rejection, UpdateProductAmount, notice,
};
use rocketshoes_core::ProductId;
use rocketshoes_integration_tests::TestContext;

fn id(n: i32) -> ProductId {
    ProductId::new(n)
}

fn update(product: i32, amount: i64) -> UpdateProductAmount {
    UpdateProductAmount {
        product_id: id(product),
        amount,
    }
}

// =============================================================================
// Add
// =============================================================================

#[tokio::test]
async fn test_add_new_product_fetches_catalog_data() {
    let ctx = TestContext::new().await;
    let store = ctx.open_store();

    let cart = store.add_product(id(1)).await.unwrap();

    assert_eq!(cart.len(), 1);
    let item = cart.find(id(1)).unwrap();
    assert_eq!(item.amount, 1);
    assert_eq!(item.title, "Tênis de Caminhada Leve Confortável");
    assert_eq!(item.image, "tenis1.jpg");
}

#[tokio::test]
async fn test_add_increments_until_stock_runs_out() {
    let ctx = TestContext::new().await;
    let store = ctx.open_store();

    // Product 3 has two units
    store.add_product(id(3)).await.unwrap();
    let cart = store.add_product(id(3)).await.unwrap();
    assert_eq!(cart.find(id(3)).unwrap().amount, 2);

    let err = store.add_product(id(3)).await.unwrap_err();
    assert!(matches!(
        err.rejection(),
        Some(Rejection::OutOfStock { available: 2, .. })
    ));
    assert_eq!(err.notice().kind, NoticeKind::Warning);
    assert_eq!(err.notice().message, notice::OUT_OF_STOCK);
    assert_eq!(store.cart().find(id(3)).unwrap().amount, 2);
}

#[tokio::test]
async fn test_add_new_product_with_single_unit_in_stock_is_rejected() {
    let ctx = TestContext::new().await;
    let store = ctx.open_store();

    let err = store.add_product(id(4)).await.unwrap_err();

    assert!(err.is_rejection());
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn test_add_unknown_product_is_reported_as_failure() {
    let ctx = TestContext::new().await;
    let store = ctx.open_store();

    let err = store.add_product(id(99)).await.unwrap_err();

    assert!(matches!(
        err,
        CartError::Api {
            operation: Operation::Add,
            source: ApiError::NotFound(_),
        }
    ));
    assert_eq!(err.notice().kind, NoticeKind::Error);
    assert_eq!(err.notice().message, notice::ADD_FAILED);
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn test_unreachable_api_leaves_cart_unchanged() {
    // Bind then drop a listener to get a port nobody is serving
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiConfig::new(format!("http://{addr}").parse().unwrap());
    let store = CartStore::open(HttpCatalog::new(&config).unwrap(), MemoryStore::new()).unwrap();

    let err = store.add_product(id(1)).await.unwrap_err();

    assert!(matches!(err, CartError::Api { source: ApiError::Http(_), .. }));
    assert!(store.cart().is_empty());
}

// =============================================================================
// Update amount
// =============================================================================

#[tokio::test]
async fn test_update_amount_checks_live_stock() {
    let ctx = TestContext::new().await;
    let store = ctx.open_store();
    store.add_product(id(1)).await.unwrap();
    store.add_product(id(2)).await.unwrap();

    // Product 1 has three units
    let cart = store.update_product_amount(update(1, 3)).await.unwrap();
    assert_eq!(cart.find(id(1)).unwrap().amount, 3);
    assert_eq!(cart.find(id(2)).unwrap().amount, 1);

    let err = store.update_product_amount(update(1, 4)).await.unwrap_err();
    assert_eq!(err.notice().message, notice::OUT_OF_STOCK);
    assert_eq!(store.cart().find(id(1)).unwrap().amount, 3);
}

#[tokio::test]
async fn test_update_rejections() {
    let ctx = TestContext::new().await;
    let store = ctx.open_store();
    store.add_product(id(2)).await.unwrap();
    let before = store.cart();

    let err = store.update_product_amount(update(2, 0)).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::NonPositiveAmount(0)));

    let err = store.update_product_amount(update(1, 2)).await.unwrap_err();
    assert_eq!(err.rejection(), Some(&Rejection::NotInCart(id(1))));
    assert_eq!(err.notice().message, notice::UPDATE_FAILED);

    assert_eq!(store.cart(), before);
}

// =============================================================================
// Remove
// =============================================================================

#[tokio::test]
async fn test_remove_keeps_order_of_remaining_items() {
    let ctx = TestContext::new().await;
    let store = ctx.open_store();
    for n in [2, 1, 3] {
        store.add_product(id(n)).await.unwrap();
    }

    let cart = store.remove_product(id(1)).await.unwrap();
    let ids: Vec<i32> = cart.iter().map(|item| item.id.as_i32()).collect();
    assert_eq!(ids, vec![2, 3]);

    let err = store.remove_product(id(1)).await.unwrap_err();
    assert_eq!(err.notice().message, notice::REMOVE_FAILED);
}

// =============================================================================
// Catalog client
// =============================================================================

#[tokio::test]
async fn test_catalog_client_endpoints() {
    let ctx = TestContext::new().await;
    let catalog = HttpCatalog::new(&ctx.api_config()).unwrap();

    let products = catalog.list_products().await.unwrap();
    assert_eq!(products.len(), 4);

    let stock = catalog.stock(id(2)).await.unwrap();
    assert_eq!(stock.amount, 5);

    let product = catalog.product(id(3)).await.unwrap();
    assert_eq!(product.title, "Tênis Adidas Duramo Lite 2.0");

    assert!(matches!(
        catalog.stock(id(42)).await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_file_store_is_shared_between_store_instances() {
    let ctx = TestContext::new().await;
    let first = ctx.open_store();
    first.add_product(id(2)).await.unwrap();

    let catalog = HttpCatalog::new(&ctx.api_config()).unwrap();
    let second = CartStore::open(catalog, FileStore::new(&ctx.storage_path)).unwrap();
    assert_eq!(second.cart(), first.cart());
}
