//! Integration tests for the Boutique admin client

use std::sync::Arc;

use boutique_core::{MemorySessionStore, SessionManager, TokenSet};
use boutique_http::client::error::ClientError;
use boutique_http::client::AdminClient;
use boutique_http::types::{OrderSearchParams, OrderStatus, SortDir};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_with_tokens(server: &MockServer, access: &str) -> AdminClient {
    let session = Arc::new(SessionManager::new(Arc::new(MemorySessionStore::new())));
    session
        .store_tokens(&TokenSet {
            access_token: access.to_owned(),
            refresh_token: None,
        })
        .await;
    AdminClient::builder()
        .base_url(server.uri())
        .session(session)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_client_builder() {
    let client = AdminClient::builder()
        .base_url("http://localhost:8080/")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = AdminClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_client_builder_rejects_invalid_base_url() {
    let result = AdminClient::builder().base_url("not a url").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_bearer_token_attached_from_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/category/getall"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "id": 1, "name": "Shirts" }]
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "test-token").await;
    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Shirts");
}

#[tokio::test]
async fn test_login_persists_tokens_and_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "token": "fresh-access", "refreshToken": "fresh-refresh" }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/getUser"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "id": 9, "username": "ana", "roles": [{ "name": "ROLE_ADMIN" }] }
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(mock_server.uri()).unwrap();
    let profile = client.login("ana", "secret").await.unwrap();

    assert_eq!(profile.username, "ana");
    assert!(profile.has_role("ROLE_ADMIN"));
    assert_eq!(
        client.session().access_token().await.as_deref(),
        Some("fresh-access")
    );
    assert_eq!(
        client.session().refresh_token().await.as_deref(),
        Some("fresh-refresh")
    );
    assert_eq!(client.session().profile().await.unwrap().id, 9);
}

#[tokio::test]
async fn test_login_without_token_is_an_auth_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok, but no tokens"
        })))
        .mount(&mock_server)
        .await;

    let client = AdminClient::new(mock_server.uri()).unwrap();
    let result = client.login("ana", "secret").await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_profile_tolerates_unwrapped_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/getUser"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "username": "bo"
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;
    let profile = client.profile().await.unwrap();
    assert_eq!(profile.username, "bo");
}

#[tokio::test]
async fn test_search_orders_sends_wire_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/search-orders"))
        .and(query_param("status", "DELIVERED"))
        .and(query_param("sortDir", "desc"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "content": [{ "id": 1, "oderStatus": "DELIVERED", "totalAmount": 50000.0 }],
                "totalElements": 1,
                "totalPages": 1
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;
    let page = client
        .search_orders(&OrderSearchParams {
            status: Some(OrderStatus::Delivered),
            sort_dir: Some(SortDir::Desc),
            page_size: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].status, Some(OrderStatus::Delivered));
}

#[tokio::test]
async fn test_total_revenue_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/total-revenue"))
        .and(query_param("startDate", "2025-03-01"))
        .and(query_param("endDate", "2025-03-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": 1250000.0 })))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;
    let start = chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    let revenue = client.total_revenue(start, end).await.unwrap();
    assert!((revenue - 1_250_000.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/get-order/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such order"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/category/getall"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;

    let missing = client.get_order(7).await;
    assert!(matches!(missing, Err(ClientError::NotFound(_))));

    let broken = client.list_categories().await;
    assert!(matches!(
        broken,
        Err(ClientError::ServerError { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_envelope_without_result_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/category/getall"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 200, "message": "empty" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;
    let result = client.list_categories().await;
    assert!(matches!(result, Err(ClientError::UnexpectedResponse(_))));
}

#[tokio::test]
async fn test_list_users_sends_paging_and_sort() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/getAll"))
        .and(query_param("pageNumber", "2"))
        .and(query_param("pageSize", "10"))
        .and(query_param("sortBy", "id"))
        .and(query_param("sortDir", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "content": [{ "id": 31, "username": "cleo" }],
                "page": { "totalElements": 42, "totalPages": 5 }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;
    let page = client
        .list_users(2, 10, Some("id"), Some(SortDir::Asc))
        .await
        .unwrap();

    assert_eq!(page.content[0].username, "cleo");
    // Counters for this endpoint arrive nested under `page`.
    let meta = page.page.unwrap();
    assert_eq!(meta.total_elements, 42);
    assert_eq!(meta.total_pages, 5);
}

#[tokio::test]
async fn test_search_users_sends_keyword() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/search"))
        .and(query_param("keyword", "ana"))
        .and(query_param("pageNumber", "0"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "content": [{ "id": 9, "username": "ana" }] }
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;
    let page = client.search_users("ana", 0, 10).await.unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].username, "ana");
}

#[tokio::test]
async fn test_create_collection_sends_description_and_image_part() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collection/create-collection"))
        .and(query_param("name", "Summer"))
        .and(query_param("description", "warm days"))
        .and(body_string_contains("name=\"imageFile\"; filename=\"cover.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": { "id": 3, "name": "Summer", "description": "warm days" }
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;
    let collection = client
        .create_collection(
            "Summer",
            Some("warm days"),
            Some(("cover.png".to_owned(), b"png bytes".to_vec())),
        )
        .await
        .unwrap();
    assert_eq!(collection.id, 3);
}

#[tokio::test]
async fn test_upload_images_sends_repeated_files_parts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/image/upload"))
        .and(body_string_contains("name=\"productId\""))
        .and(body_string_contains("name=\"files\"; filename=\"front.png\""))
        .and(body_string_contains("name=\"files\"; filename=\"back.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                { "id": 1, "url": "/img/front.png" },
                { "id": 2, "url": "/img/back.png" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_with_tokens(&mock_server, "t").await;
    let images = client
        .upload_images(
            12,
            vec![
                ("front.png".to_owned(), b"front".to_vec()),
                ("back.png".to_owned(), b"back".to_vec()),
            ],
        )
        .await
        .unwrap();
    assert_eq!(images.len(), 2);
}
