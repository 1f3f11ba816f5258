//! End-to-end tests of the catalog HTTP API
//!
//! These tests drive the full router (tracing and CORS layers included) over
//! an in-memory backend and check the wire envelopes.

use axum::http::StatusCode;
use axum_test::TestServer;
use catalog::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Helpers
// =============================================================================

fn test_products() -> Vec<Product> {
    vec![
        Product {
            id: "p1".to_string(),
            name: "Test Product 1".to_string(),
            description: "A great product for testing".to_string(),
            price: 149.99,
            image_url: "https://example.com/image1.jpg".to_string(),
            category: "Electronics".to_string(),
        },
        Product {
            id: "p2".to_string(),
            name: "Test Product 2".to_string(),
            description: "Another great product for testing".to_string(),
            price: 99.99,
            image_url: "https://example.com/image2.jpg".to_string(),
            category: "Clothing".to_string(),
        },
    ]
}

fn create_test_server(products: Vec<Product>) -> TestServer {
    let app = ServerBuilder::new()
        .with_backend(InMemoryBackend::with_products(products))
        .build()
        .expect("Failed to build app");

    TestServer::try_new(app).expect("Failed to create test server")
}

fn prices(body: &Value) -> Vec<f64> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect()
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = actual.as_f64().unwrap();
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server(vec![]);

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body, json!({"success": true, "message": "Server is running"}));
    }
}

// =============================================================================
// Listing Tests
// =============================================================================

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_all_products() {
        let server = create_test_server(test_products());

        let response = server.get("/api/v1/products").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["products"][0]["_id"], "p1");
        assert_eq!(body["products"][0]["image_url"], "https://example.com/image1.jpg");
        assert_eq!(body["products"][1]["name"], "Test Product 2");
    }

    #[tokio::test]
    async fn test_list_empty_catalog() {
        let server = create_test_server(vec![]);

        let body: Value = server.get("/api/v1/products").await.json();
        assert_eq!(body, json!({"success": true, "count": 0, "products": []}));
    }

    #[tokio::test]
    async fn test_search_filters_products() {
        let server = create_test_server(test_products());

        let response = server
            .get("/api/v1/products")
            .add_query_param("search", "Product 1")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], 1);
        assert_eq!(body["products"][0]["name"], "Test Product 1");
    }

    #[tokio::test]
    async fn test_search_matches_description_only() {
        let server = create_test_server(test_products());

        let body: Value = server
            .get("/api/v1/products")
            .add_query_param("search", "ANOTHER great")
            .await
            .json();

        assert_eq!(body["count"], 1);
        assert_eq!(body["products"][0]["_id"], "p2");
    }

    #[tokio::test]
    async fn test_search_without_match() {
        let server = create_test_server(test_products());

        let body: Value = server
            .get("/api/v1/products")
            .add_query_param("search", "nonexistent")
            .await
            .json();

        assert_eq!(body["count"], 0);
        assert_eq!(body["products"], json!([]));
    }

    #[tokio::test]
    async fn test_sort_ascending() {
        let server = create_test_server(test_products());

        let body: Value = server
            .get("/api/v1/products")
            .add_query_param("sort", "price:asc")
            .await
            .json();

        assert_eq!(prices(&body), vec![99.99, 149.99]);
    }

    #[tokio::test]
    async fn test_sort_descending() {
        let server = create_test_server(test_products());

        let body: Value = server
            .get("/api/v1/products")
            .add_query_param("sort", "price:desc")
            .await
            .json();

        assert_eq!(prices(&body), vec![149.99, 99.99]);
    }

    #[tokio::test]
    async fn test_unknown_sort_keeps_storage_order() {
        let server = create_test_server(test_products());

        let body: Value = server
            .get("/api/v1/products")
            .add_query_param("sort", "name:asc")
            .await
            .json();

        assert_eq!(prices(&body), vec![149.99, 99.99]);
    }

    #[tokio::test]
    async fn test_duplicate_query_parameter_is_bad_request() {
        let server = create_test_server(test_products());

        let response = server.get("/api/v1/products?search=a&search=b").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"].is_array());
    }
}

// =============================================================================
// Stats Tests
// =============================================================================

mod stats_tests {
    use super::*;

    #[tokio::test]
    async fn test_stats() {
        let server = create_test_server(test_products());

        let response = server.get("/api/v1/products/stats").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        let stats = &body["stats"];
        assert_eq!(stats["total_products"], 2);
        assert_close(&stats["average_price"], 124.99);
        assert_close(&stats["min_price"], 99.99);
        assert_close(&stats["max_price"], 149.99);
        assert_close(&stats["total_value"], 249.98);
    }

    #[tokio::test]
    async fn test_stats_empty_catalog() {
        let server = create_test_server(vec![]);

        let body: Value = server.get("/api/v1/products/stats").await.json();
        assert_eq!(
            body,
            json!({
                "success": true,
                "stats": {
                    "total_products": 0,
                    "average_price": 0.0,
                    "min_price": 0.0,
                    "max_price": 0.0,
                    "total_value": 0.0
                }
            })
        );
    }
}

// =============================================================================
// Routing Tests
// =============================================================================

mod routing_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_api_route() {
        let server = create_test_server(test_products());

        let response = server.get("/api/v1/nonexistent").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body, json!({"success": false, "message": "Route not found"}));
    }

    #[tokio::test]
    async fn test_unknown_top_level_route() {
        let server = create_test_server(vec![]);

        let response = server.get("/nowhere").await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["message"], "Route not found");
    }
}

// =============================================================================
// File Backend Tests
// =============================================================================

mod file_backend_tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_seeded_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("data").join("products.json"));

        ProductRepository::new(std::sync::Arc::new(backend.clone()))
            .replace_all(test_products())
            .await
            .unwrap();

        let app = ServerBuilder::new().with_backend(backend).build().unwrap();
        let server = TestServer::try_new(app).unwrap();

        let body: Value = server
            .get("/api/v1/products")
            .add_query_param("sort", "price:asc")
            .await
            .json();
        assert_eq!(prices(&body), vec![99.99, 149.99]);
    }

    #[tokio::test]
    async fn test_missing_file_serves_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("missing.json"));

        let app = ServerBuilder::new().with_backend(backend).build().unwrap();
        let server = TestServer::try_new(app).unwrap();

        let response = server.get("/api/v1/products/stats").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["stats"]["total_products"], 0);
    }
}
