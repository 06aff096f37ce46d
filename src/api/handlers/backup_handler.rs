//! Backup export and import handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Backup, ImportSummary};
use crate::errors::{AppError, AppResult};

pub fn backup_routes() -> Router<AppState> {
    Router::new().route("/", get(export_backup).post(import_backup))
}

/// Export every row the authenticated user owns
#[utoipa::path(
    get,
    path = "/api/backup",
    tag = "Backup",
    responses(
        (status = 200, description = "Backup document", body = Backup),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn export_backup(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Backup>> {
    Ok(Json(state.services.backup().export(user.id).await?))
}

/// Replace all of the authenticated user's data with a backup.
///
/// Mirrored incomes and expenses are regenerated from the savings and
/// bill payments in the document.
#[utoipa::path(
    post,
    path = "/api/backup",
    tag = "Backup",
    request_body = Backup,
    responses(
        (status = 200, description = "Rows restored per table", body = ImportSummary),
        (status = 400, description = "Unsupported version or a row breaking a record rule"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn import_backup(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<Backup>, JsonRejection>,
) -> AppResult<Json<ImportSummary>> {
    let Json(backup) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    Ok(Json(state.services.backup().import(user.id, backup).await?))
}
