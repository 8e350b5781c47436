//! HTTP-level tests driving the router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use factoryflow_api::{AppState, create_router};
use factoryflow_db::{LedgerStore, MemoryStore};
use factoryflow_shared::config::VerificationConfig;
use factoryflow_shared::types::{OwnerId, UserId};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: Arc<dyn LedgerStore>,
    owner: OwnerId,
}

impl TestApp {
    fn new() -> Self {
        let store: Arc<dyn LedgerStore> = Arc::new(MemoryStore::new());
        let router = create_router(AppState::new(
            store.clone(),
            VerificationConfig::default(),
        ));
        Self {
            router,
            store,
            owner: OwnerId::new(),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        role: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            builder = builder
                .header("x-user-id", UserId::new().to_string())
                .header("x-owner-id", self.owner.to_string())
                .header("x-user-role", role);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn ledger_uri(&self) -> String {
        format!("/api/v1/owners/{}/ledger", self.owner)
    }

    async fn create_invoice(&self, amount: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                &self.ledger_uri(),
                Some("accountant"),
                Some(json!({
                    "type": "income",
                    "amount": amount,
                    "category": "Sales",
                    "description": "Invoice 1042",
                    "date": "2024-05-02",
                    "associatedParty": "Gulf Packaging",
                    "isARAPEntry": true
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_accounts_filtered_by_type() {
    let app = TestApp::new();
    let (status, body) = app
        .send(Method::GET, "/api/v1/accounts?type=liability", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let accounts = body["accounts"].as_array().unwrap();
    assert!(!accounts.is_empty());
    assert!(accounts.iter().all(|a| a["accountType"] == "liability"));
    assert!(accounts.iter().any(|a| a["code"] == "2000"));
}

#[tokio::test]
async fn test_journal_validation() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/journal/validate",
            None,
            Some(json!({
                "lines": [
                    { "accountCode": "1000", "accountName": "Cash", "debit": "100" },
                    { "accountCode": "4000", "accountName": "Sales Revenue", "credit": "99.99" }
                ]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isValid"], false);
    assert_eq!(body["difference"], "0.01");
    assert!(body["structuralError"].is_string());
}

#[tokio::test]
async fn test_journal_validation_rejects_overflowing_totals() {
    let app = TestApp::new();
    let max = "79228162514264337593543950335";
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/journal/validate",
            None,
            Some(json!({
                "lines": [
                    { "accountCode": "1000", "accountName": "Cash", "debit": max },
                    { "accountCode": "1000", "accountName": "Cash", "debit": max }
                ]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = app.send(Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, &app.ledger_uri(), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_other_owner_is_forbidden() {
    let app = TestApp::new();
    let uri = format!("/api/v1/owners/{}/ledger", OwnerId::new());
    let (status, _) = app.send(Method::GET, &uri, Some("owner"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invoice_payment_lifecycle() {
    let app = TestApp::new();
    let entry = app.create_invoice("1000").await;
    assert_eq!(entry["paymentStatus"], "unpaid");
    assert_eq!(entry["remainingBalance"], "1000");

    let tx = entry["transactionId"].as_str().unwrap();
    let payments_uri = format!("{}/{tx}/payments", app.ledger_uri());
    let (status, body) = app
        .send(
            Method::POST,
            &payments_uri,
            Some("accountant"),
            Some(json!({ "amount": "250", "date": "2024-05-20" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["update"]["success"], true);
    assert_eq!(body["update"]["newStatus"], "partial");
    assert_eq!(body["update"]["newRemainingBalance"], "750");

    let payment_id = body["payment"]["paymentId"].as_str().unwrap().to_string();
    let delete_uri = format!("/api/v1/owners/{}/payments/{payment_id}", app.owner);

    let (status, _) = app
        .send(Method::DELETE, &delete_uri, Some("accountant"), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::DELETE, &delete_uri, Some("owner"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["update"]["newStatus"], "unpaid");
    assert_eq!(body["update"]["newTotalPaid"], "0");

    let (status, body) = app
        .send(
            Method::GET,
            &format!("{}/{tx}", app.ledger_uri()),
            Some("viewer"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payments"].as_array().unwrap().len(), 0);

    let (status, body) = app
        .send(
            Method::GET,
            &format!("/api/v1/owners/{}/activity", app.owner),
            Some("viewer"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activities"].as_array().unwrap().len(), 3);
}

#[rstest]
#[case(json!({ "amount": "0", "date": "2024-05-20" }), StatusCode::BAD_REQUEST)]
#[case(json!({ "amount": "5000", "date": "2024-05-20" }), StatusCode::BAD_REQUEST)]
#[tokio::test]
async fn test_invalid_payments(#[case] payload: Value, #[case] expected: StatusCode) {
    let app = TestApp::new();
    let entry = app.create_invoice("1000").await;
    let tx = entry["transactionId"].as_str().unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            &format!("{}/{tx}/payments", app.ledger_uri()),
            Some("owner"),
            Some(payload),
        )
        .await;
    assert_eq!(status, expected, "{body}");
}

#[tokio::test]
async fn test_viewer_cannot_create_entries() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::POST,
            &app.ledger_uri(),
            Some("viewer"),
            Some(json!({
                "type": "expense",
                "amount": "10",
                "category": "Rent",
                "description": "May rent",
                "date": "2024-05-01"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_integrity_audit() {
    let app = TestApp::new();
    app.create_invoice("480.5").await;

    let uri = format!("/api/v1/owners/{}/integrity/verify", app.owner);
    let (status, body) = app.send(Method::POST, &uri, Some("owner"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ledgerEntriesChecked"], 1);
    assert_eq!(body["totalDiscrepancies"], 0);
    assert_eq!(body["trialBalance"]["isBalanced"], true);

    let (status, _) = app.send(Method::POST, &uri, Some("accountant"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    assert_eq!(app.store.list_journal_entries(app.owner, 10).await.unwrap().len(), 1);
}
