//! Income and expense handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use uuid::Uuid;

use super::record_handler;
use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{CreateExpense, CreateIncome, Expense, Income, UpdateExpense, UpdateIncome};
use crate::errors::AppResult;
use crate::types::{Created, SuccessResponse};

pub fn income_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_income))
        .route(
            "/:id",
            get(list_incomes).put(update_income).delete(delete_income),
        )
}

pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_expense))
        .route(
            "/:id",
            get(list_expenses).put(update_expense).delete(delete_expense),
        )
}

/// List incomes of the authenticated user
#[utoipa::path(
    get,
    path = "/api/incomes/{user_id}",
    tag = "Incomes",
    params(("user_id" = Uuid, Path, description = "Must be the authenticated user")),
    responses(
        (status = 200, description = "Incomes, newest first", body = [Income]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Another user's rows")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_incomes(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Income>>> {
    record_handler::list(state.services.incomes(), &user, user_id).await
}

/// Record an income
#[utoipa::path(
    post,
    path = "/api/incomes",
    tag = "Incomes",
    request_body = CreateIncome,
    responses(
        (status = 201, description = "Income created", body = Income),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_income(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateIncome>,
) -> AppResult<Created<Income>> {
    record_handler::create(state.services.incomes(), &user, payload).await
}

/// Update an income
#[utoipa::path(
    put,
    path = "/api/incomes/{id}",
    tag = "Incomes",
    params(("id" = Uuid, Path, description = "Income ID")),
    request_body = UpdateIncome,
    responses(
        (status = 200, description = "Income updated", body = Income),
        (status = 400, description = "No valid fields to update"),
        (status = 404, description = "Income not found"),
        (status = 409, description = "Income is managed by a saving")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_income(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateIncome>,
) -> AppResult<Json<Income>> {
    record_handler::update(state.services.incomes(), &user, id, payload).await
}

/// Delete an income
#[utoipa::path(
    delete,
    path = "/api/incomes/{id}",
    tag = "Incomes",
    params(("id" = Uuid, Path, description = "Income ID")),
    responses(
        (status = 200, description = "Income deleted", body = SuccessResponse),
        (status = 404, description = "Income not found"),
        (status = 409, description = "Income is managed by a saving")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_income(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<SuccessResponse> {
    record_handler::delete(state.services.incomes(), &user, id).await
}

/// List expenses of the authenticated user
#[utoipa::path(
    get,
    path = "/api/expenses/{user_id}",
    tag = "Expenses",
    params(("user_id" = Uuid, Path, description = "Must be the authenticated user")),
    responses(
        (status = 200, description = "Expenses, newest first", body = [Expense]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Another user's rows")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Expense>>> {
    record_handler::list(state.services.expenses(), &user, user_id).await
}

/// Record an expense
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Expenses",
    request_body = CreateExpense,
    responses(
        (status = 201, description = "Expense created", body = Expense),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateExpense>,
) -> AppResult<Created<Expense>> {
    record_handler::create(state.services.expenses(), &user, payload).await
}

/// Update an expense
#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    tag = "Expenses",
    params(("id" = Uuid, Path, description = "Expense ID")),
    request_body = UpdateExpense,
    responses(
        (status = 200, description = "Expense updated", body = Expense),
        (status = 400, description = "No valid fields to update"),
        (status = 404, description = "Expense not found"),
        (status = 409, description = "Expense is managed by a saving or bill payment")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_expense(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateExpense>,
) -> AppResult<Json<Expense>> {
    record_handler::update(state.services.expenses(), &user, id, payload).await
}

/// Delete an expense
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "Expenses",
    params(("id" = Uuid, Path, description = "Expense ID")),
    responses(
        (status = 200, description = "Expense deleted", body = SuccessResponse),
        (status = 404, description = "Expense not found"),
        (status = 409, description = "Expense is managed by a saving or bill payment")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<SuccessResponse> {
    record_handler::delete(state.services.expenses(), &user, id).await
}
