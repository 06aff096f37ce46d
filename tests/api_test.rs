//! Integration tests for API endpoints.
//!
//! These tests drive the real router over mock services, without a
//! database or Redis connection.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use finance_tracker::api::{create_router, AppState};
use finance_tracker::config::Config;
use finance_tracker::domain::{
    CreateIncome, Income, Record, UpdateIncome, User, UserResponse,
};
use finance_tracker::errors::{AppError, AppResult};
use finance_tracker::services::{
    AuthService, Claims, MockServiceContainer, RecordService, TokenResponse,
};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
const VALID_TOKEN: &str = "valid-test-token";

fn owner_id() -> Uuid {
    Uuid::from_u128(0x5a1e)
}

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock auth service that accepts one token and one password
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(&self, username: String, _password: String) -> AppResult<User> {
        if username == "taken" {
            return Err(AppError::conflict("Username"));
        }
        Ok(User::new(username, "hashed".to_string()))
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        if password != "correct-password" {
            return Err(AppError::InvalidCredentials);
        }
        let mut user = User::new(username, "hashed".to_string());
        user.id = owner_id();
        Ok(TokenResponse {
            access_token: VALID_TOKEN.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
            user: UserResponse::from(user),
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == VALID_TOKEN {
            Ok(Claims {
                sub: owner_id(),
                username: "budi".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// In-memory income service; the first row is treated as a mirrored one
#[derive(Default)]
struct MockIncomeService {
    rows: Mutex<Vec<Income>>,
}

impl MockIncomeService {
    fn with_salary() -> Self {
        let service = Self::default();
        let salary = Income::create(
            owner_id(),
            CreateIncome {
                date: NaiveDate::from_ymd_opt(2024, 5, 25).unwrap(),
                month: None,
                source: "Salary".to_string(),
                category: "Salary".to_string(),
                method: "Transfer".to_string(),
                amount: Decimal::from(8_500_000),
                note: None,
            },
        )
        .unwrap();
        service.rows.lock().unwrap().push(salary);
        service
    }
}

#[async_trait]
impl RecordService<Income> for MockIncomeService {
    async fn list(&self, user_id: Uuid) -> AppResult<Vec<Income>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|r| r.user_id == user_id).cloned().collect())
    }

    async fn create(&self, user_id: Uuid, input: CreateIncome) -> AppResult<Income> {
        let income = Income::create(user_id, input)?;
        self.rows.lock().unwrap().push(income.clone());
        Ok(income)
    }

    async fn update(&self, _user_id: Uuid, _id: Uuid, _changes: UpdateIncome) -> AppResult<Income> {
        Err(AppError::managed("Income", "saving"))
    }

    async fn delete(&self, _user_id: Uuid, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app(incomes: Arc<MockIncomeService>) -> Router {
    let mut services = MockServiceContainer::new();
    services
        .expect_auth()
        .returning(|| Arc::new(MockAuthService) as Arc<dyn AuthService>);
    services
        .expect_incomes()
        .returning(move || incomes.clone() as Arc<dyn RecordService<Income>>);

    create_router(AppState::new(
        Arc::new(services),
        Config::with_secret(TEST_SECRET),
    ))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn authorized(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn public_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Health & Currencies
// =============================================================================

#[tokio::test]
async fn test_health_degraded_without_infrastructure() {
    let app = test_app(Arc::default());
    let request = Request::get("/api/health").body(Body::empty()).unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
    assert_eq!(body["services"]["redis"]["error"], "not configured");
}

#[tokio::test]
async fn test_currency_list_is_public() {
    let app = test_app(Arc::default());
    let request = Request::get("/api/currencies").body(Body::empty()).unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base"], "IDR");
    assert_eq!(body["currencies"].as_array().map(Vec::len), Some(20));
}

#[tokio::test]
async fn test_convert_rejects_unknown_currency() {
    let app = test_app(Arc::default());
    let request = Request::get("/api/currencies/convert?amount=1000&to=XYZ")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_login_returns_token() {
    let app = test_app(Arc::default());
    let request = public_json(
        "/api/auth/login",
        json!({"username": " budi ", "password": "correct-password"}),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["access_token"], VALID_TOKEN);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["username"], "budi");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = test_app(Arc::default());
    let request = public_json(
        "/api/auth/login",
        json!({"username": "budi", "password": "nope"}),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_register_validates_lengths() {
    let app = test_app(Arc::default());
    let request = public_json(
        "/api/auth/register",
        json!({"username": "ab", "password": "short"}),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"]["message"].as_str().unwrap_or_default();
    assert!(message.contains("Username must be 3-50 characters"));
    assert!(message.contains("Password must be at least 8 characters"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = test_app(Arc::default());
    let request = public_json(
        "/api/auth/register",
        json!({"username": "taken", "password": "long-enough"}),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Username already exists");
}

#[tokio::test]
async fn test_register_created() {
    let app = test_app(Arc::default());
    let request = public_json(
        "/api/auth/register",
        json!({"username": "siti", "password": "long-enough"}),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "siti");
    assert!(body.get("password_hash").is_none());
}

// =============================================================================
// Record Endpoints
// =============================================================================

#[tokio::test]
async fn test_records_require_token() {
    let app = test_app(Arc::default());
    let request = Request::get(format!("/api/incomes/{}", owner_id()))
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_list_own_incomes() {
    let app = test_app(Arc::new(MockIncomeService::with_salary()));
    let request = authorized("GET", &format!("/api/incomes/{}", owner_id()), None);

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["source"], "Salary");
    assert_eq!(rows[0]["month"], "2024-05");
}

#[tokio::test]
async fn test_list_other_users_incomes_forbidden() {
    let app = test_app(Arc::new(MockIncomeService::with_salary()));
    let request = authorized("GET", &format!("/api/incomes/{}", Uuid::new_v4()), None);

    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_income_defaults_month_and_ignores_owner() {
    let incomes = Arc::new(MockIncomeService::default());
    let app = test_app(incomes.clone());
    let request = authorized(
        "POST",
        "/api/incomes",
        Some(json!({
            "user_id": Uuid::new_v4(),
            "date": "2024-06-30",
            "source": "Bonus",
            "category": "Bonus",
            "method": "Transfer",
            "amount": 1500000,
            "note": "  mid-year  "
        })),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["month"], "2024-06");
    assert_eq!(body["note"], "mid-year");
    assert_eq!(body["user_id"], owner_id().to_string());
    assert_eq!(incomes.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_income_rejects_negative_amount() {
    let app = test_app(Arc::default());
    let request = authorized(
        "POST",
        "/api/incomes",
        Some(json!({
            "date": "2024-06-30",
            "source": "Refund",
            "category": "Other",
            "method": "Cash",
            "amount": -10
        })),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Amount must not be negative");
}

#[tokio::test]
async fn test_update_managed_income_conflicts() {
    let app = test_app(Arc::new(MockIncomeService::with_salary()));
    let request = authorized(
        "PUT",
        &format!("/api/incomes/{}", Uuid::new_v4()),
        Some(json!({"amount": 10})),
    );

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "MANAGED_RECORD");
}

#[tokio::test]
async fn test_delete_income() {
    let incomes = Arc::new(MockIncomeService::with_salary());
    let id = incomes.rows.lock().unwrap()[0].id;
    let app = test_app(incomes.clone());

    let (status, body) = send(
        app.clone(),
        authorized("DELETE", &format!("/api/incomes/{}", id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(incomes.rows.lock().unwrap().is_empty());

    let (status, _) = send(app, authorized("DELETE", &format!("/api/incomes/{}", id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
