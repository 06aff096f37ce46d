//! Master data (reference list) handlers.

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
use crate::domain::{CreateMasterData, MasterData, UpdateMasterData};
use crate::errors::AppResult;
use crate::types::{Created, SuccessResponse};

pub fn master_data_routes() -> Router<AppState> {
    Router::new().route("/", post(create_master_data)).route(
        "/:id",
        get(list_master_data)
            .put(update_master_data)
            .delete(delete_master_data),
    )
}

/// List categories and payment methods of the authenticated user
#[utoipa::path(
    get,
    path = "/api/master_data/{user_id}",
    tag = "Master data",
    params(("user_id" = Uuid, Path, description = "Must be the authenticated user")),
    responses(
        (status = 200, description = "Reference list entries", body = [MasterData]),
        (status = 403, description = "Another user's rows")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_master_data(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<Vec<MasterData>>> {
    record_handler::list(state.services.master_data(), &user, user_id).await
}

#[utoipa::path(
    post,
    path = "/api/master_data",
    tag = "Master data",
    request_body = CreateMasterData,
    responses(
        (status = 201, description = "Entry created", body = MasterData),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Value already exists for this kind")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_master_data(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateMasterData>,
) -> AppResult<Created<MasterData>> {
    record_handler::create(state.services.master_data(), &user, payload).await
}

#[utoipa::path(
    put,
    path = "/api/master_data/{id}",
    tag = "Master data",
    params(("id" = Uuid, Path, description = "Entry ID")),
    request_body = UpdateMasterData,
    responses(
        (status = 200, description = "Entry updated", body = MasterData),
        (status = 400, description = "No valid fields to update"),
        (status = 404, description = "Entry not found"),
        (status = 409, description = "Value already exists for this kind")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_master_data(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateMasterData>,
) -> AppResult<Json<MasterData>> {
    record_handler::update(state.services.master_data(), &user, id, payload).await
}

#[utoipa::path(
    delete,
    path = "/api/master_data/{id}",
    tag = "Master data",
    params(("id" = Uuid, Path, description = "Entry ID")),
    responses(
        (status = 200, description = "Entry deleted", body = SuccessResponse),
        (status = 404, description = "Entry not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_master_data(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<SuccessResponse> {
    record_handler::delete(state.services.master_data(), &user, id).await
}
