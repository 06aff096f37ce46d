use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Month, Period};
use crate::errors::AppResult;

/// `?month=YYYY-MM`; absent, empty or `all` selects the whole history
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PeriodQuery {
    #[param(example = "2024-05")]
    pub month: Option<String>,
}

impl PeriodQuery {
    pub fn period(&self) -> AppResult<Period> {
        Period::parse(self.month.as_deref())
    }

    /// Selected month, the current one when the query selects everything
    pub fn month_or_current(&self) -> AppResult<Month> {
        Ok(self.period()?.month_or(Month::current()))
    }
}
