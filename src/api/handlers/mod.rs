//! HTTP request handlers.

pub mod auth_handler;
pub mod backup_handler;
pub mod bill_handler;
pub mod currency_handler;
pub mod health_handler;
pub mod master_data_handler;
pub mod planning_handler;
mod record_handler;
pub mod report_handler;
pub mod transaction_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use backup_handler::backup_routes;
pub use bill_handler::{bill_payment_routes, bill_routes};
pub use currency_handler::currency_routes;
pub use health_handler::health;
pub use master_data_handler::master_data_routes;
pub use planning_handler::{budget_routes, saving_routes, savings_target_routes};
pub use report_handler::report_routes;
pub use transaction_handler::{expense_routes, income_routes};
pub use user_handler::user_routes;
