//! Savings goals tracked against a savings account balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::record::{check_amount, ensure_amount, ensure_label, Changeset, Record};
use crate::errors::{AppError, AppResult};

/// Amount to reach by `target_date` on the account named `account_name`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SavingsTarget {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "New laptop")]
    pub name: String,
    #[schema(example = 15000000)]
    pub target_amount: Decimal,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub target_date: NaiveDate,
    #[schema(example = "Emergency fund")]
    pub account_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_target"))]
pub struct CreateSavingsTarget {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub target_amount: Decimal,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub target_date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "Account name must be 1-100 characters"))]
    pub account_name: String,
}

fn validate_create_target(input: &CreateSavingsTarget) -> Result<(), ValidationError> {
    check_amount("Target amount", Some(input.target_amount))
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_target"))]
pub struct UpdateSavingsTarget {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub target_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 100, message = "Account name must be 1-100 characters"))]
    pub account_name: Option<String>,
}

fn validate_update_target(input: &UpdateSavingsTarget) -> Result<(), ValidationError> {
    check_amount("Target amount", input.target_amount)
}

impl Changeset for UpdateSavingsTarget {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target_amount.is_none()
            && self.start_date.is_none()
            && self.target_date.is_none()
            && self.account_name.is_none()
    }
}

impl SavingsTarget {
    fn ensure_dates(&self) -> AppResult<()> {
        if self.target_date < self.start_date {
            return Err(AppError::validation(
                "Target date must not be before start date",
            ));
        }
        Ok(())
    }
}

impl Record for SavingsTarget {
    const NAME: &'static str = "Savings target";

    type Create = CreateSavingsTarget;
    type Update = UpdateSavingsTarget;

    fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_valid(&self) -> AppResult<()> {
        ensure_label("Name", &self.name)?;
        ensure_label("Account name", &self.account_name)?;
        ensure_amount("Target amount", self.target_amount)?;
        self.ensure_dates()
    }

    fn create(user_id: Uuid, input: CreateSavingsTarget) -> AppResult<Self> {
        let target = Self {
            id: Uuid::new_v4(),
            user_id,
            name: input.name.trim().to_string(),
            target_amount: input.target_amount,
            start_date: input.start_date,
            target_date: input.target_date,
            account_name: input.account_name.trim().to_string(),
        };
        target.ensure_dates()?;
        Ok(target)
    }

    fn apply(&mut self, changes: UpdateSavingsTarget) -> AppResult<()> {
        if let Some(name) = changes.name {
            self.name = name.trim().to_string();
        }
        if let Some(target_amount) = changes.target_amount {
            self.target_amount = target_amount;
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = start_date;
        }
        if let Some(target_date) = changes.target_date {
            self.target_date = target_date;
        }
        if let Some(account_name) = changes.account_name {
            self.account_name = account_name.trim().to_string();
        }
        self.ensure_dates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_date_before_start_is_rejected() {
        let input = CreateSavingsTarget {
            name: "Trip".to_string(),
            target_amount: Decimal::from(5_000_000),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            target_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            account_name: "Holiday".to_string(),
        };
        assert!(SavingsTarget::create(Uuid::new_v4(), input).is_err());
    }
}
