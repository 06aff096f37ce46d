//! Bill and bill payment handlers.

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
    Bill, BillPayment, CreateBill, CreateBillPayment, UpdateBill, UpdateBillPayment,
};
use crate::errors::AppResult;
use crate::types::{Created, SuccessResponse};

pub fn bill_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_bill))
        .route("/:id", get(list_bills).put(update_bill).delete(delete_bill))
}

pub fn bill_payment_routes() -> Router<AppState> {
    Router::new().route("/", post(create_bill_payment)).route(
        "/:id",
        get(list_bill_payments)
            .put(update_bill_payment)
            .delete(delete_bill_payment),
    )
}

/// List bills of the authenticated user
#[utoipa::path(
    get,
    path = "/api/bills/{user_id}",
    tag = "Bills",
    params(("user_id" = Uuid, Path, description = "Must be the authenticated user")),
    responses(
        (status = 200, description = "Bills", body = [Bill]),
        (status = 403, description = "Another user's rows")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bills(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<Bill>>> {
    record_handler::list(state.services.bills(), &user, user_id).await
}

/// Register a recurring bill
#[utoipa::path(
    post,
    path = "/api/bills",
    tag = "Bills",
    request_body = CreateBill,
    responses(
        (status = 201, description = "Bill created", body = Bill),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_bill(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBill>,
) -> AppResult<Created<Bill>> {
    record_handler::create(state.services.bills(), &user, payload).await
}

/// Update a bill.
///
/// Expenses already generated by its payments keep their text.
#[utoipa::path(
    put,
    path = "/api/bills/{id}",
    tag = "Bills",
    params(("id" = Uuid, Path, description = "Bill ID")),
    request_body = UpdateBill,
    responses(
        (status = 200, description = "Bill updated", body = Bill),
        (status = 400, description = "No valid fields to update"),
        (status = 404, description = "Bill not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_bill(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBill>,
) -> AppResult<Json<Bill>> {
    record_handler::update(state.services.bills(), &user, id, payload).await
}

/// Delete a bill with its payments and their expenses
#[utoipa::path(
    delete,
    path = "/api/bills/{id}",
    tag = "Bills",
    params(("id" = Uuid, Path, description = "Bill ID")),
    responses(
        (status = 200, description = "Bill deleted", body = SuccessResponse),
        (status = 404, description = "Bill not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_bill(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<SuccessResponse> {
    record_handler::delete(state.services.bills(), &user, id).await
}

/// List bill payments of the authenticated user
#[utoipa::path(
    get,
    path = "/api/bill_payments/{user_id}",
    tag = "Bill payments",
    params(("user_id" = Uuid, Path, description = "Must be the authenticated user")),
    responses(
        (status = 200, description = "Bill payments", body = [BillPayment]),
        (status = 403, description = "Another user's rows")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_bill_payments(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<BillPayment>>> {
    record_handler::list(state.services.bill_payments(), &user, user_id).await
}

/// Pay a bill for a month; the payment is mirrored as an expense
#[utoipa::path(
    post,
    path = "/api/bill_payments",
    tag = "Bill payments",
    request_body = CreateBillPayment,
    responses(
        (status = 201, description = "Payment recorded", body = BillPayment),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Bill not found"),
        (status = 409, description = "Bill already paid for this month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_bill_payment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBillPayment>,
) -> AppResult<Created<BillPayment>> {
    record_handler::create(state.services.bill_payments(), &user, payload).await
}

/// Update a payment and regenerate its expense
#[utoipa::path(
    put,
    path = "/api/bill_payments/{id}",
    tag = "Bill payments",
    params(("id" = Uuid, Path, description = "Bill payment ID")),
    request_body = UpdateBillPayment,
    responses(
        (status = 200, description = "Payment updated", body = BillPayment),
        (status = 400, description = "No valid fields to update"),
        (status = 404, description = "Payment not found"),
        (status = 409, description = "Bill already paid for this month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_bill_payment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBillPayment>,
) -> AppResult<Json<BillPayment>> {
    record_handler::update(state.services.bill_payments(), &user, id, payload).await
}

/// Delete a payment and its expense
#[utoipa::path(
    delete,
    path = "/api/bill_payments/{id}",
    tag = "Bill payments",
    params(("id" = Uuid, Path, description = "Bill payment ID")),
    responses(
        (status = 200, description = "Payment deleted", body = SuccessResponse),
        (status = 404, description = "Payment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_bill_payment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<SuccessResponse> {
    record_handler::delete(state.services.bill_payments(), &user, id).await
}
