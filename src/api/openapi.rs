//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::analytics::{
    BillSchedule, BillStats, BillStatus, BudgetLine, BudgetReport, BudgetState, CategoryShare,
    CategoryTotal, DayCell, ExpenseHeatmap, ExpenseInsights, ExpensiveDay, HealthBreakdown,
    HealthReport, HealthStatus, HeatmapInsights, Insight, InsightLevel, Intensity, Milestone,
    MonthlyTotals, RecentTransaction, Recommendation, Summary, TargetInsight, TargetInsightCode,
    TargetProgress, TargetStatus, TargetsReport, TransactionKind,
};
use crate::api::handlers::{
    auth_handler, backup_handler, bill_handler, currency_handler, health_handler,
    master_data_handler, planning_handler, report_handler, transaction_handler, user_handler,
};
use crate::domain::{
    Backup, Bill, BillPayment, Budget, CreateBill, CreateBillPayment, CreateBudget, CreateExpense,
    CreateIncome, CreateMasterData, CreateSaving, CreateSavingsTarget, Currency, Expense,
    ImportSummary, Income, MasterData, MasterDataKind, Money, Saving, SavingKind, SavingsTarget,
    UpdateBill, UpdateBillPayment, UpdateBudget, UpdateExpense, UpdateIncome, UpdateMasterData,
    UpdateSaving, UpdateSavingsTarget, UserResponse,
};
use crate::services::TokenResponse;
use crate::types::SuccessResponse;

/// OpenAPI documentation for the finance tracker
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Finance Tracker API",
        version = "0.1.0",
        description = "Personal finance tracking: transactions, budgets, savings, bills and reports"
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server")
    ),
    paths(
        // Authentication and account
        auth_handler::register,
        auth_handler::login,
        user_handler::get_current_user,
        user_handler::delete_current_user,
        // Records
        transaction_handler::list_incomes,
        transaction_handler::create_income,
        transaction_handler::update_income,
        transaction_handler::delete_income,
        transaction_handler::list_expenses,
        transaction_handler::create_expense,
        transaction_handler::update_expense,
        transaction_handler::delete_expense,
        planning_handler::list_budgets,
        planning_handler::create_budget,
        planning_handler::update_budget,
        planning_handler::delete_budget,
        planning_handler::list_savings,
        planning_handler::create_saving,
        planning_handler::update_saving,
        planning_handler::delete_saving,
        planning_handler::list_savings_targets,
        planning_handler::create_savings_target,
        planning_handler::update_savings_target,
        planning_handler::delete_savings_target,
        master_data_handler::list_master_data,
        master_data_handler::create_master_data,
        master_data_handler::update_master_data,
        master_data_handler::delete_master_data,
        bill_handler::list_bills,
        bill_handler::create_bill,
        bill_handler::update_bill,
        bill_handler::delete_bill,
        bill_handler::list_bill_payments,
        bill_handler::create_bill_payment,
        bill_handler::update_bill_payment,
        bill_handler::delete_bill_payment,
        // Reports
        report_handler::summary,
        report_handler::budgets,
        report_handler::insights,
        report_handler::heatmap,
        report_handler::health,
        report_handler::bills,
        report_handler::targets,
        // Backup, currencies, health
        backup_handler::export_backup,
        backup_handler::import_backup,
        currency_handler::list_currencies,
        currency_handler::convert,
        health_handler::health,
    ),
    components(
        schemas(
            UserResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            SuccessResponse,
            Income, CreateIncome, UpdateIncome,
            Expense, CreateExpense, UpdateExpense,
            Budget, CreateBudget, UpdateBudget,
            Saving, SavingKind, CreateSaving, UpdateSaving,
            SavingsTarget, CreateSavingsTarget, UpdateSavingsTarget,
            MasterData, MasterDataKind, CreateMasterData, UpdateMasterData,
            Bill, CreateBill, UpdateBill,
            BillPayment, CreateBillPayment, UpdateBillPayment,
            Summary, MonthlyTotals, CategoryTotal, RecentTransaction, TransactionKind,
            BudgetReport, BudgetLine, BudgetState,
            ExpenseInsights, CategoryShare, Insight,
            ExpenseHeatmap, DayCell, ExpensiveDay, HeatmapInsights, Intensity,
            HealthReport, HealthBreakdown, HealthStatus, Recommendation,
            BillSchedule, BillStatus, BillStats,
            TargetsReport, TargetProgress, Milestone, TargetStatus, TargetInsight,
            TargetInsightCode, InsightLevel,
            Backup, ImportSummary,
            Currency, Money,
            currency_handler::CurrencyInfo,
            currency_handler::CurrencyList,
            currency_handler::Conversion,
            health_handler::HealthResponse,
            health_handler::ServiceHealth,
            health_handler::ServiceStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "Current account"),
        (name = "Incomes", description = "Money received"),
        (name = "Expenses", description = "Money spent"),
        (name = "Budgets", description = "Monthly spending plans per category"),
        (name = "Savings", description = "Savings and investment movements"),
        (name = "Savings targets", description = "Goals for savings accounts"),
        (name = "Master data", description = "Categories and payment methods"),
        (name = "Bills", description = "Recurring bills"),
        (name = "Bill payments", description = "Monthly bill payments"),
        (name = "Reports", description = "Server-side aggregations"),
        (name = "Backup", description = "Export and import"),
        (name = "Currencies", description = "Display currencies and conversion"),
        (name = "Health", description = "Dependency status")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/auth/login",
            "/api/incomes/{user_id}",
            "/api/bill_payments",
            "/api/reports/health",
            "/api/backup",
            "/api/currencies/convert",
            "/api/health",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {}",
                expected
            );
        }
        assert!(doc
            .components
            .as_ref()
            .map(|c| c.security_schemes.contains_key("bearer_auth"))
            .unwrap_or(false));
    }
}
