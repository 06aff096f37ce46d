//! Shared request and response types.

mod query;
mod response;

pub use query::PeriodQuery;
pub use response::{Created, SuccessResponse};
