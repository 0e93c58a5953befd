//! Contract tests against a mocked backend.

use client::{ApiError, Client, SessionStore};
use engine::{Decision, LineItem, Money, SupplyDraft, SupplyStatus};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_store() -> SessionStore {
    let path = std::env::temp_dir().join(format!("postavka_test_{}.json", uuid::Uuid::new_v4()));
    SessionStore::new(path)
}

async fn mock_login(server: &MockServer, role_organizer: &str, user_type: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "type_token": "bearer",
            "role_organizer": role_organizer,
            "user_type": user_type,
        })))
        .mount(server)
        .await;
}

fn supply_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "supplier": {"id": 3, "name": "Волос и Ко"},
        "company": {"id": 1, "name": "Салон"},
        "supply_products": [{
            "product": {
                "id": 7,
                "article": 107,
                "name": "Краска",
                "category": "hair_coloring",
                "price": 1200.0
            },
            "quantity": 3
        }],
        "article": 41,
        "delivery_address": "г. Москва, ул. Ленина, д. 10",
        "total_price": 3600.0,
        "status": status,
    })
}

#[tokio::test]
async fn login_stores_and_persists_the_session() {
    let server = MockServer::start().await;
    mock_login(&server, "company", "manager").await;

    let store = temp_store();
    let client = Client::new(server.uri(), store.clone());
    let identity = client.login("alice@example.com", "secret1!").await.unwrap();

    assert_eq!(identity.email, "alice@example.com");
    assert_eq!(identity.name, "alice");
    assert_eq!(client.current_identity(), Some(identity.clone()));

    // A fresh client over the same store resumes the session from disk.
    let resumed = Client::new(server.uri(), store.clone());
    assert_eq!(resumed.restore(), Some(identity));
    store.clear();
}

#[tokio::test]
async fn login_failure_does_not_leak_which_field_was_wrong() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"details": "user not found"})),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), temp_store());
    let err = client.login("ghost@example.com", "whatever1!").await.unwrap_err();
    assert!(matches!(err, ApiError::UserNotFound));
    assert!(client.current_identity().is_none());
}

#[tokio::test]
async fn a_401_forces_logout_everywhere() {
    let server = MockServer::start().await;
    mock_login(&server, "company", "admin").await;
    Mock::given(method("GET"))
        .and(path("/linkcode"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"details": "token expired"})),
        )
        .mount(&server)
        .await;

    let store = temp_store();
    let client = Client::new(server.uri(), store.clone());
    client.login("alice@example.com", "secret1!").await.unwrap();

    let err = client.link_code().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    // Memory and disk are both gone; the next restore finds nothing.
    assert!(client.current_identity().is_none());
    assert_eq!(Client::new(server.uri(), store).restore(), None);
}

#[tokio::test]
async fn create_supply_sends_the_frozen_total_with_the_bearer_token() {
    let server = MockServer::start().await;
    mock_login(&server, "company", "manager").await;
    Mock::given(method("POST"))
        .and(path("/supplies"))
        .and(header("authorization", "Bearer tok-1"))
        .and(body_json(json!({
            "supplier_id": 3,
            "delivery_address": "г. Москва, ул. Ленина, д. 10",
            "total_price": 3600.0,
            "supply_products": [{"product_id": 7, "quantity": 3}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(supply_json(12, "in_processing")))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), temp_store());
    client.login("alice@example.com", "secret1!").await.unwrap();

    let draft = SupplyDraft::new(3, "г. Москва, ул. Ленина, д. 10")
        .item(LineItem::new(7, 3, Money::new(1200_00)).with_available(10));
    let supply = client.create_supply(draft).await.unwrap();

    assert_eq!(supply.status, SupplyStatus::InProcessing);
    assert_eq!(supply.total_price, Money::new(3600_00).to_decimal());
}

#[tokio::test]
async fn suppliers_may_not_create_supplies() {
    let server = MockServer::start().await;
    mock_login(&server, "supplier", "admin").await;
    // The refusal is local: nothing may reach the supplies endpoint.
    Mock::given(method("POST"))
        .and(path("/supplies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(supply_json(12, "in_processing")))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), temp_store());
    client.login("sup@example.com", "secret1!").await.unwrap();

    let draft = SupplyDraft::new(3, "addr").item(LineItem::new(7, 1, Money::new(100)));
    let err = client.create_supply(draft).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
}

#[tokio::test]
async fn accepting_a_cancelled_supply_is_refused_before_the_patch() {
    let server = MockServer::start().await;
    mock_login(&server, "supplier", "admin").await;
    Mock::given(method("GET"))
        .and(path("/supplies/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(supply_json(9, "cancelled")))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/supplies/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(supply_json(9, "assembled")))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), temp_store());
    client.login("sup@example.com", "secret1!").await.unwrap();

    let err = client.respond_to_request(9, Decision::Accept).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::InvalidTransition {
            from: SupplyStatus::Cancelled,
            to: SupplyStatus::Assembled,
        }
    ));
}

#[tokio::test]
async fn advancing_skips_is_refused_locally() {
    let server = MockServer::start().await;
    mock_login(&server, "supplier", "manager").await;
    Mock::given(method("GET"))
        .and(path("/supplies/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(supply_json(9, "assembled")))
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), temp_store());
    client.login("sup@example.com", "secret1!").await.unwrap();

    // assembled -> delivered skips in_delivery.
    let err = client
        .advance_supply(9, SupplyStatus::Delivered)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidTransition { .. }));
}

#[tokio::test]
async fn contracting_twice_stays_idempotent() {
    let server = MockServer::start().await;
    mock_login(&server, "company", "admin").await;
    Mock::given(method("POST"))
        .and(path("/suppliers/5"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"details": "already contracted"})),
        )
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), temp_store());
    client.login("alice@example.com", "secret1!").await.unwrap();

    // The backend reports the existing pair; the client treats it as done.
    client.add_contract(5).await.unwrap();
}

#[tokio::test]
async fn link_code_works_before_an_organization_exists() {
    let server = MockServer::start().await;
    mock_login(&server, "not_have_organizer", "admin").await;
    Mock::given(method("GET"))
        .and(path("/linkcode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"linkcode": 482913})))
        .mount(&server)
        .await;

    let client = Client::new(server.uri(), temp_store());
    client.login("new@example.com", "secret1!").await.unwrap();

    assert_eq!(client.link_code().await.unwrap(), 482913);

    // ...but the rest of the dashboard stays closed until an organization
    // is registered or joined.
    let draft = SupplyDraft::new(1, "addr").item(LineItem::new(1, 1, Money::new(100)));
    assert!(matches!(
        client.create_supply(draft).await.unwrap_err(),
        ApiError::Forbidden(_)
    ));
}

#[tokio::test]
async fn company_staff_cannot_manage_contracts() {
    let server = MockServer::start().await;
    mock_login(&server, "company", "employee").await;

    let client = Client::new(server.uri(), temp_store());
    client.login("emp@example.com", "secret1!").await.unwrap();

    let err = client.add_contract(5).await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(_)));
    // Viewing is still allowed for company staff; only management is gated.
    assert!(client.role().unwrap().can(engine::Capability::ViewSuppliers));
}
