//! Integration tests for `BackOfficeClient` against a mock API server.

use nubras_client::{
    BackOfficeClient, BackOfficeConfig, ClientError, InventoryUpdate, NewSupplier,
};
use nubras_core::{CoreError, Money, PaymentMethod, ReturnStatus, StockStatus};
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BackOfficeClient {
    let mut config = BackOfficeConfig::default();
    config.api.base_url = format!("{}/api/v1", server.uri());
    config.api.timeout_secs = 5;
    BackOfficeClient::new(&config).unwrap()
}

fn order_json() -> serde_json::Value {
    json!({
        "_id": "o1",
        "orderNumber": "SO-1042",
        "status": "confirmed",
        "priority": "high",
        "customerId": "c1",
        "subtotal": 1000,
        "taxAmount": 50,
        "discountAmount": 0,
        "totalAmount": 1050,
        "amountPaid": 200,
        "amountPending": 850,
        "paymentStatus": "partial"
    })
}

#[tokio::test]
async fn test_lists_bare_and_wrapped_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sales"))
        .and(header("content-type", "application/json"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([order_json()])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/quotations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "q1", "status": "sent", "total": 2100}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let orders = client.list_sales_orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "o1");
    assert_eq!(orders[0].amount_pending, Money::from_major(850));

    let quotations = client.list_quotations().await.unwrap();
    assert_eq!(quotations[0].total.to_string(), "2100.00");
}

#[tokio::test]
async fn test_status_codes_map_to_errors_with_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sales/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Sales order not found"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/staff"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Session expired"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/customers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.get_sales_order("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(err.user_message(), "Sales order not found");

    let err = client.list_staff().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized(_)));
    assert_eq!(err.user_message(), "Session expired");

    let err = client.list_customers().await.unwrap_err();
    assert!(matches!(err, ClientError::Server { status: 500, message: None }));
    assert_eq!(err.user_message(), nubras_client::error::GENERIC_FAILURE);
}

#[tokio::test]
async fn test_pay_order_posts_transaction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sales/o1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": order_json()})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/transactions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "t1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let receipt = client
        .pay_order("o1", PaymentMethod::Cash, Money::from_major(850))
        .await
        .unwrap();
    assert_eq!(receipt["id"], "t1");

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["orderId"], "o1");
    assert_eq!(body["paymentMethod"], "cash");
    assert_eq!(body["amount"].as_f64(), Some(850.0));
}

#[tokio::test]
async fn test_overpayment_is_rejected_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sales/o1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/transactions"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .pay_order("o1", PaymentMethod::Card, Money::from_major(851))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Core(CoreError::PaymentExceedsPending { .. })));
}

#[tokio::test]
async fn test_reject_return_only_when_pending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/returns/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "r1", "status": "pending",
            "items": [{"name": "Kandura", "qty": 1, "originalTotal": 350, "refundAmount": 350}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/returns/r2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "r2", "status": "completed"})))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/returns/r1/reject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Return rejected"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/returns/r2/reject"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let rejected = client.reject_return("r1", " item worn ").await.unwrap();
    assert_eq!(rejected.status, ReturnStatus::Rejected);
    assert_eq!(rejected.rejection_reason.as_deref(), Some("item worn"));
    assert_eq!(rejected.total_refund_amount(), Money::from_major(350));

    let err = client.reject_return("r2", "late").await.unwrap_err();
    assert!(matches!(err, ClientError::Core(CoreError::InvalidTransition { .. })));
}

#[tokio::test]
async fn test_inventory_patch_and_supplier_crud() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/inventory/i1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "i1", "name": "Silk", "stock": 3, "minStock": 5, "reorderPoint": 8}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/suppliers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "s1", "name": "Gulf Textiles"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/suppliers/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let update = InventoryUpdate {
        stock: Some(3),
        ..Default::default()
    };
    let item = client.update_inventory_item("i1", &update).await.unwrap();
    assert_eq!(item.stock_status(), StockStatus::LowStock);
    assert!(item.needs_reorder());

    let supplier = client
        .create_supplier(&NewSupplier {
            name: "Gulf Textiles".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(supplier.id, "s1");

    client.delete_supplier("s1").await.unwrap();
}

#[tokio::test]
async fn test_invalid_ids_never_reach_the_server() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client.delete_supplier("../sales").await.unwrap_err();
    assert!(matches!(err, ClientError::Core(CoreError::Validation(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_keeps_session_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"user": {"name": "Rashid"}})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/staff"))
        .and(header("cookie", "sid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client.login("rashid@alnubras.ae", "secret").await.unwrap();
    assert_eq!(outcome.session_cookie.as_deref(), Some("sid=abc123"));
    assert!(outcome.user.is_some());

    assert!(client.list_staff().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_configured_session_cookie_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/sales/overview"))
        .and(header("cookie", "sid=from-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalOrders": 4})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = BackOfficeConfig::default();
    config.api.base_url = format!("{}/api/v1", server.uri());
    config.api.session_cookie = Some("sid=from-config".into());
    let client = BackOfficeClient::new(&config).unwrap();

    let overview = client.sales_overview().await.unwrap();
    assert_eq!(overview.total_orders, 4);
}
