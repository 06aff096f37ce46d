//! Shared behaviour of user-owned ledger records.

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidationError;

use super::Month;
use crate::errors::{AppError, AppResult};

/// A user-owned row exposed through the generic CRUD endpoints.
pub trait Record: Sized + Send + Sync + 'static {
    /// Human readable name used in error messages
    const NAME: &'static str;

    type Create: Send + 'static;
    type Update: Changeset + Send + 'static;

    fn id(&self) -> Uuid;

    /// Build a new record owned by `user_id`
    fn create(user_id: Uuid, input: Self::Create) -> AppResult<Self>;

    /// Merge a partial update into the record
    fn apply(&mut self, changes: Self::Update) -> AppResult<()>;

    /// Name of the record that generated this row, if it is a mirrored row
    fn managed_by(&self) -> Option<&'static str> {
        None
    }

    /// Check the rules every stored row must hold.
    /// Rows that did not come through `create` (backup import) pass here first.
    fn ensure_valid(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Partial update payload
pub trait Changeset {
    /// True when the payload carries no recognised field
    fn is_empty(&self) -> bool;
}

/// Income or expense row generated from another record
/// (a savings movement or a bill payment).
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedEntry {
    pub date: NaiveDate,
    pub month: Month,
    /// Expense name or income source
    pub title: String,
    pub category: String,
    pub method: String,
    pub amount: Decimal,
    pub note: Option<String>,
}

/// Trim a note and drop it when blank
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Month to store for a row: explicit value or the month of its date
pub fn resolve_month(date: NaiveDate, month: Option<Month>) -> Month {
    month.unwrap_or_else(|| Month::of(date))
}

/// Reject negative monetary amounts
pub(crate) fn check_amount(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<(), ValidationError> {
    match value {
        Some(amount) if amount < Decimal::ZERO => {
            let mut err = ValidationError::new("non_negative");
            err.message = Some(Cow::Owned(format!("{} must not be negative", field)));
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Stored amounts are never negative
pub(crate) fn ensure_amount(field: &str, value: Decimal) -> AppResult<()> {
    if value < Decimal::ZERO {
        return Err(AppError::validation(format!("{} must not be negative", field)));
    }
    Ok(())
}

/// Stored labels are 1-100 characters once trimmed
pub(crate) fn ensure_label(field: &str, value: &str) -> AppResult<()> {
    let len = value.trim().chars().count();
    if len == 0 || len > 100 {
        return Err(AppError::validation(format!("{} must be 1-100 characters", field)));
    }
    Ok(())
}
