//! Generic persistence for user-owned records.
//!
//! Every query is scoped by the owner column, so a row that belongs to
//! another user behaves exactly like a missing one. The functions take any
//! `ConnectionTrait` and run unchanged on a pooled connection or inside a
//! transaction.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, FromQueryResult, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::domain::Record;
use crate::errors::{AppError, AppResult};

/// Maps a domain record onto its SeaORM entity.
pub trait Resource: Record + Clone {
    type Entity: EntityTrait<Model = Self::Row, ActiveModel = Self::Active>;
    type Row: ModelTrait<Entity = Self::Entity>
        + FromQueryResult
        + IntoActiveModel<Self::Active>
        + Send
        + Sync;
    type Active: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + Send
        + Sync
        + 'static;

    /// Owning user
    fn owner(&self) -> Uuid;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;
    fn user_column() -> <Self::Entity as EntityTrait>::Column;
    /// Listing order, newest first
    fn order_column() -> <Self::Entity as EntityTrait>::Column;

    fn from_row(row: Self::Row) -> AppResult<Self>;
    fn to_active(&self) -> Self::Active;

    /// Columns that must be unique per user, if any
    fn unique_key(&self) -> Option<Condition> {
        None
    }
}

pub(crate) async fn list<R, C>(conn: &C, user_id: Uuid) -> AppResult<Vec<R>>
where
    R: Resource,
    C: ConnectionTrait,
{
    R::Entity::find()
        .filter(R::user_column().eq(user_id))
        .order_by_desc(R::order_column())
        .all(conn)
        .await?
        .into_iter()
        .map(R::from_row)
        .collect()
}

pub(crate) async fn find<R, C>(conn: &C, user_id: Uuid, id: Uuid) -> AppResult<Option<R>>
where
    R: Resource,
    C: ConnectionTrait,
{
    R::Entity::find()
        .filter(R::id_column().eq(id))
        .filter(R::user_column().eq(user_id))
        .one(conn)
        .await?
        .map(R::from_row)
        .transpose()
}

pub(crate) async fn insert<R, C>(conn: &C, record: &R) -> AppResult<R>
where
    R: Resource,
    C: ConnectionTrait,
{
    ensure_unique(conn, record).await?;
    let row = record
        .to_active()
        .insert(conn)
        .await
        .map_err(write_error::<R>)?;
    R::from_row(row)
}

pub(crate) async fn insert_many<R, C>(conn: &C, records: &[R]) -> AppResult<()>
where
    R: Resource,
    C: ConnectionTrait,
{
    if records.is_empty() {
        return Ok(());
    }
    R::Entity::insert_many(records.iter().map(R::to_active))
        .exec(conn)
        .await
        .map_err(write_error::<R>)?;
    Ok(())
}

pub(crate) async fn update<R, C>(conn: &C, record: &R) -> AppResult<R>
where
    R: Resource,
    C: ConnectionTrait,
{
    ensure_unique(conn, record).await?;
    let row = record
        .to_active()
        .update(conn)
        .await
        .map_err(write_error::<R>)?;
    R::from_row(row)
}

/// Delete one owned row; false when nothing matched
pub(crate) async fn delete<R, C>(conn: &C, user_id: Uuid, id: Uuid) -> AppResult<bool>
where
    R: Resource,
    C: ConnectionTrait,
{
    let result = R::Entity::delete_many()
        .filter(R::id_column().eq(id))
        .filter(R::user_column().eq(user_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Delete the owned rows matching `condition`
pub(crate) async fn delete_where<R, C>(
    conn: &C,
    user_id: Uuid,
    condition: Condition,
) -> AppResult<u64>
where
    R: Resource,
    C: ConnectionTrait,
{
    let result = R::Entity::delete_many()
        .filter(R::user_column().eq(user_id))
        .filter(condition)
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub(crate) async fn delete_all<R, C>(conn: &C, user_id: Uuid) -> AppResult<u64>
where
    R: Resource,
    C: ConnectionTrait,
{
    delete_where::<R, C>(conn, user_id, Condition::all()).await
}

async fn ensure_unique<R, C>(conn: &C, record: &R) -> AppResult<()>
where
    R: Resource,
    C: ConnectionTrait,
{
    let Some(key) = record.unique_key() else {
        return Ok(());
    };

    let clash = R::Entity::find()
        .filter(R::user_column().eq(record.owner()))
        .filter(R::id_column().ne(record.id()))
        .filter(key)
        .one(conn)
        .await?;

    match clash {
        Some(_) => Err(AppError::conflict(R::NAME)),
        None => Ok(()),
    }
}

/// Unique violations that slip past `ensure_unique` (concurrent writers)
/// still surface as conflicts.
fn write_error<R: Resource>(err: DbErr) -> AppError {
    if let DbErr::RecordNotUpdated = err {
        return AppError::NotFound;
    }
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(R::NAME),
        _ => AppError::from(err),
    }
}
