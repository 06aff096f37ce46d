//! Shared CRUD flow behind every record endpoint.
//!
//! Each resource module declares its own annotated handlers and routes,
//! then delegates here.

use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::domain::Record;
use crate::errors::AppResult;
use crate::services::RecordService;
use crate::types::{Created, SuccessResponse};

/// Rows owned by `owner_id`, which must be the caller
pub(crate) async fn list<R>(
    service: Arc<dyn RecordService<R>>,
    user: &CurrentUser,
    owner_id: Uuid,
) -> AppResult<Json<Vec<R>>>
where
    R: Record + Serialize,
{
    user.ensure_owner(owner_id)?;
    Ok(Json(service.list(user.id).await?))
}

pub(crate) async fn create<R>(
    service: Arc<dyn RecordService<R>>,
    user: &CurrentUser,
    input: R::Create,
) -> AppResult<Created<R>>
where
    R: Record + Serialize,
{
    Ok(Created(service.create(user.id, input).await?))
}

pub(crate) async fn update<R>(
    service: Arc<dyn RecordService<R>>,
    user: &CurrentUser,
    id: Uuid,
    changes: R::Update,
) -> AppResult<Json<R>>
where
    R: Record + Serialize,
{
    Ok(Json(service.update(user.id, id, changes).await?))
}

pub(crate) async fn delete<R>(
    service: Arc<dyn RecordService<R>>,
    user: &CurrentUser,
    id: Uuid,
) -> AppResult<SuccessResponse>
where
    R: Record,
{
    service.delete(user.id, id).await?;
    Ok(SuccessResponse::ok())
}
