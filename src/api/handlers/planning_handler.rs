//! Budget, saving and savings-target handlers.

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
use crate::domain::{
    Budget, CreateBudget, CreateSaving, CreateSavingsTarget, Saving, SavingsTarget, UpdateBudget,
    UpdateSaving, UpdateSavingsTarget,
};
use crate::errors::AppResult;
use crate::types::{Created, SuccessResponse};

pub fn budget_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_budget))
        .route(
            "/:id",
            get(list_budgets).put(update_budget).delete(delete_budget),
        )
}

pub fn saving_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_saving))
        .route(
            "/:id",
            get(list_savings).put(update_saving).delete(delete_saving),
        )
}

pub fn savings_target_routes() -> Router<AppState> {
    Router::new().route("/", post(create_savings_target)).route(
        "/:id",
        get(list_savings_targets)
            .put(update_savings_target)
            .delete(delete_savings_target),
    )
}

/// List budgets of the authenticated user
#[utoipa::path(
    get,
    path = "/api/budgets/{user_id}",
    tag = "Budgets",
    params(("user_id" = Uuid, Path, description = "Must be the authenticated user")),
    responses(
        (status = 200, description = "Budgets", body = [Budget]),
        (status = 403, description = "Another user's rows")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_budgets(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Budget>>> {
    record_handler::list(state.services.budgets(), &user, user_id).await
}

/// Plan a monthly budget for a category
#[utoipa::path(
    post,
    path = "/api/budgets",
    tag = "Budgets",
    request_body = CreateBudget,
    responses(
        (status = 201, description = "Budget created", body = Budget),
        (status = 400, description = "Validation error"),
        (status = 409, description = "A budget for this month and category exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_budget(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBudget>,
) -> AppResult<Created<Budget>> {
    record_handler::create(state.services.budgets(), &user, payload).await
}

/// Update a budget
#[utoipa::path(
    put,
    path = "/api/budgets/{id}",
    tag = "Budgets",
    params(("id" = Uuid, Path, description = "Budget ID")),
    request_body = UpdateBudget,
    responses(
        (status = 200, description = "Budget updated", body = Budget),
        (status = 400, description = "No valid fields to update"),
        (status = 404, description = "Budget not found"),
        (status = 409, description = "A budget for this month and category exists")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_budget(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBudget>,
) -> AppResult<Json<Budget>> {
    record_handler::update(state.services.budgets(), &user, id, payload).await
}

/// Delete a budget
#[utoipa::path(
    delete,
    path = "/api/budgets/{id}",
    tag = "Budgets",
    params(("id" = Uuid, Path, description = "Budget ID")),
    responses(
        (status = 200, description = "Budget deleted", body = SuccessResponse),
        (status = 404, description = "Budget not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_budget(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<SuccessResponse> {
    record_handler::delete(state.services.budgets(), &user, id).await
}

/// List savings movements of the authenticated user
#[utoipa::path(
    get,
    path = "/api/savings/{user_id}",
    tag = "Savings",
    params(("user_id" = Uuid, Path, description = "Must be the authenticated user")),
    responses(
        (status = 200, description = "Savings movements", body = [Saving]),
        (status = 403, description = "Another user's rows")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_savings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Saving>>> {
    record_handler::list(state.services.savings(), &user, user_id).await
}

/// Record a deposit and/or withdrawal.
///
/// The deposit is mirrored as an expense and the withdrawal as an income.
#[utoipa::path(
    post,
    path = "/api/savings",
    tag = "Savings",
    request_body = CreateSaving,
    responses(
        (status = 201, description = "Saving created with its mirrored rows", body = Saving),
        (status = 400, description = "Validation error or no movement")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_saving(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateSaving>,
) -> AppResult<Created<Saving>> {
    record_handler::create(state.services.savings(), &user, payload).await
}

/// Update a saving and regenerate its mirrored rows
#[utoipa::path(
    put,
    path = "/api/savings/{id}",
    tag = "Savings",
    params(("id" = Uuid, Path, description = "Saving ID")),
    request_body = UpdateSaving,
    responses(
        (status = 200, description = "Saving updated", body = Saving),
        (status = 400, description = "No valid fields to update"),
        (status = 404, description = "Saving not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_saving(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateSaving>,
) -> AppResult<Json<Saving>> {
    record_handler::update(state.services.savings(), &user, id, payload).await
}

/// Delete a saving together with its mirrored rows
#[utoipa::path(
    delete,
    path = "/api/savings/{id}",
    tag = "Savings",
    params(("id" = Uuid, Path, description = "Saving ID")),
    responses(
        (status = 200, description = "Saving deleted", body = SuccessResponse),
        (status = 404, description = "Saving not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_saving(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<SuccessResponse> {
    record_handler::delete(state.services.savings(), &user, id).await
}

/// List savings targets of the authenticated user
#[utoipa::path(
    get,
    path = "/api/savings_targets/{user_id}",
    tag = "Savings targets",
    params(("user_id" = Uuid, Path, description = "Must be the authenticated user")),
    responses(
        (status = 200, description = "Savings targets", body = [SavingsTarget]),
        (status = 403, description = "Another user's rows")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_savings_targets(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<SavingsTarget>>> {
    record_handler::list(state.services.savings_targets(), &user, user_id).await
}

/// Set a goal for a savings account
#[utoipa::path(
    post,
    path = "/api/savings_targets",
    tag = "Savings targets",
    request_body = CreateSavingsTarget,
    responses(
        (status = 201, description = "Savings target created", body = SavingsTarget),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_savings_target(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateSavingsTarget>,
) -> AppResult<Created<SavingsTarget>> {
    record_handler::create(state.services.savings_targets(), &user, payload).await
}

/// Update a savings target
#[utoipa::path(
    put,
    path = "/api/savings_targets/{id}",
    tag = "Savings targets",
    params(("id" = Uuid, Path, description = "Savings target ID")),
    request_body = UpdateSavingsTarget,
    responses(
        (status = 200, description = "Savings target updated", body = SavingsTarget),
        (status = 400, description = "No valid fields to update"),
        (status = 404, description = "Savings target not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_savings_target(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateSavingsTarget>,
) -> AppResult<Json<SavingsTarget>> {
    record_handler::update(state.services.savings_targets(), &user, id, payload).await
}

/// Delete a savings target
#[utoipa::path(
    delete,
    path = "/api/savings_targets/{id}",
    tag = "Savings targets",
    params(("id" = Uuid, Path, description = "Savings target ID")),
    responses(
        (status = 200, description = "Savings target deleted", body = SuccessResponse),
        (status = 404, description = "Savings target not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_savings_target(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<SuccessResponse> {
    record_handler::delete(state.services.savings_targets(), &user, id).await
}
