//! Monthly spending limits per expense category.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::record::{check_amount, ensure_amount, ensure_label, Changeset, Record};
use super::Month;
use crate::errors::AppResult;

/// Spending limit for one category in one month.
/// At most one budget exists per (user, month, category).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    #[schema(example = "Food")]
    pub category: String,
    #[schema(example = 2000000)]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_budget"))]
pub struct CreateBudget {
    #[schema(value_type = String, example = "2024-05")]
    pub month: Month,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,
    pub amount: Decimal,
}

fn validate_create_budget(input: &CreateBudget) -> Result<(), ValidationError> {
    check_amount("Budget amount", Some(input.amount))
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_budget"))]
pub struct UpdateBudget {
    #[schema(value_type = Option<String>)]
    pub month: Option<Month>,
    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: Option<String>,
    pub amount: Option<Decimal>,
}

fn validate_update_budget(input: &UpdateBudget) -> Result<(), ValidationError> {
    check_amount("Budget amount", input.amount)
}

impl Changeset for UpdateBudget {
    fn is_empty(&self) -> bool {
        self.month.is_none() && self.category.is_none() && self.amount.is_none()
    }
}

impl Record for Budget {
    const NAME: &'static str = "Budget";

    type Create = CreateBudget;
    type Update = UpdateBudget;

    fn id(&self) -> Uuid {
        self.id
    }

    fn ensure_valid(&self) -> AppResult<()> {
        ensure_label("Category", &self.category)?;
        ensure_amount("Budget amount", self.amount)
    }

    fn create(user_id: Uuid, input: CreateBudget) -> AppResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            month: input.month,
            category: input.category.trim().to_string(),
            amount: input.amount,
        })
    }

    fn apply(&mut self, changes: UpdateBudget) -> AppResult<()> {
        if let Some(month) = changes.month {
            self.month = month;
        }
        if let Some(category) = changes.category {
            self.category = category.trim().to_string();
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        Ok(())
    }
}
