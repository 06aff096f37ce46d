//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Months are stored as `YYYY-MM` text and enum-like columns as their
//! snake_case name.

use std::str::FromStr;

use crate::errors::{AppError, AppResult};

pub mod bill;
pub mod bill_payment;
pub mod budget;
pub mod expense;
pub mod income;
pub mod master_data;
pub mod saving;
pub mod savings_target;
pub mod user;

/// Parse a text column into its domain type
pub(crate) fn parse_stored<T: FromStr>(raw: &str, column: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|_| AppError::internal(format!("Invalid value '{}' stored in {}", raw, column)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Month, SavingKind};

    #[test]
    fn test_parse_stored() {
        let month: Month = parse_stored("2024-05", "incomes.month").unwrap();
        assert_eq!(month.to_string(), "2024-05");
        let kind: SavingKind = parse_stored("investment", "savings.kind").unwrap();
        assert_eq!(kind, SavingKind::Investment);
        assert!(parse_stored::<Month>("May 2024", "incomes.month").is_err());
    }
}
