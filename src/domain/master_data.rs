//! User-scoped reference lists: categories and payment methods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::record::{ensure_label, Changeset, Record};
use crate::config::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES, DEFAULT_PAYMENT_METHODS};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MasterDataKind {
    IncomeCategory,
    ExpenseCategory,
    PaymentMethod,
}

impl MasterDataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MasterDataKind::IncomeCategory => "income_category",
            MasterDataKind::ExpenseCategory => "expense_category",
            MasterDataKind::PaymentMethod => "payment_method",
        }
    }

    fn defaults(&self) -> &'static [&'static str] {
        match self {
            MasterDataKind::IncomeCategory => DEFAULT_INCOME_CATEGORIES,
            MasterDataKind::ExpenseCategory => DEFAULT_EXPENSE_CATEGORIES,
            MasterDataKind::PaymentMethod => DEFAULT_PAYMENT_METHODS,
        }
    }
}

impl fmt::Display for MasterDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MasterDataKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income_category" => Ok(MasterDataKind::IncomeCategory),
            "expense_category" => Ok(MasterDataKind::ExpenseCategory),
            "payment_method" => Ok(MasterDataKind::PaymentMethod),
            other => Err(AppError::validation(format!(
                "Unknown master data kind '{}'",
                other
            ))),
        }
    }
}

/// One entry of a reference list. Values are unique per (user, kind).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MasterData {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: MasterDataKind,
    #[schema(example = "Groceries")]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMasterData {
    pub kind: MasterDataKind,
    #[validate(length(min = 1, max = 100, message = "Value must be 1-100 characters"))]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMasterData {
    pub kind: Option<MasterDataKind>,
    #[validate(length(min = 1, max = 100, message = "Value must be 1-100 characters"))]
    pub value: Option<String>,
}

impl Changeset for UpdateMasterData {
    fn is_empty(&self) -> bool {
        self.kind.is_none() && self.value.is_none()
    }
}

impl MasterData {
    pub fn new(user_id: Uuid, kind: MasterDataKind, value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            value: value.into(),
        }
    }

    /// Reference lists seeded for a newly registered user
    pub fn defaults(user_id: Uuid) -> Vec<Self> {
        [
            MasterDataKind::IncomeCategory,
            MasterDataKind::ExpenseCategory,
            MasterDataKind::PaymentMethod,
        ]
        .iter()
        .flat_map(|kind| {
            kind.defaults()
                .iter()
                .map(move |value| Self::new(user_id, *kind, *value))
        })
        .collect()
    }
}

impl Record for MasterData {
    const NAME: &'static str = "Master data";

    type Create = CreateMasterData;
    type Update = UpdateMasterData;

    fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_valid(&self) -> AppResult<()> {
        ensure_label("Value", &self.value)
    }

    fn create(user_id: Uuid, input: CreateMasterData) -> AppResult<Self> {
        let value = input.value.trim();
        if value.is_empty() {
            return Err(AppError::validation("Value must not be blank"));
        }
        Ok(Self::new(user_id, input.kind, value))
    }

    fn apply(&mut self, changes: UpdateMasterData) -> AppResult<()> {
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(value) = changes.value {
            let value = value.trim();
            if value.is_empty() {
                return Err(AppError::validation("Value must not be blank"));
            }
            self.value = value.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_kind() {
        let user_id = Uuid::new_v4();
        let defaults = MasterData::defaults(user_id);
        assert_eq!(defaults.len(), 6 + 8 + 6);
        assert!(defaults.iter().all(|d| d.user_id == user_id));
        assert!(defaults
            .iter()
            .any(|d| d.kind == MasterDataKind::ExpenseCategory && d.value == "Transportation"));
        assert!(defaults
            .iter()
            .any(|d| d.kind == MasterDataKind::PaymentMethod && d.value == "E-wallet"));
    }

    #[test]
    fn test_blank_value_is_rejected() {
        let input = CreateMasterData {
            kind: MasterDataKind::PaymentMethod,
            value: "   ".to_string(),
        };
        assert!(MasterData::create(Uuid::new_v4(), input).is_err());
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [
            MasterDataKind::IncomeCategory,
            MasterDataKind::ExpenseCategory,
            MasterDataKind::PaymentMethod,
        ] {
            assert_eq!(kind.as_str().parse::<MasterDataKind>().unwrap(), kind);
        }
        assert!("category".parse::<MasterDataKind>().is_err());
    }
}
