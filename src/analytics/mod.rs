//! Report calculations.
//!
//! Every function here is pure: callers load the user's rows and pass the
//! reference date explicitly, so reports are deterministic under test.

pub mod bills;
pub mod budgets;
pub mod heatmap;
pub mod health;
pub mod insights;
pub mod summary;
pub mod targets;

#[cfg(test)]
pub(crate) mod testing;

pub use bills::{bill_schedule, BillSchedule, BillStats, BillStatus};
pub use budgets::{realize_budgets, BudgetLine, BudgetReport, BudgetState};
pub use heatmap::{
    expense_heatmap, DayCell, ExpenseHeatmap, ExpensiveDay, HeatmapInsights, Intensity,
};
pub use health::{health_score, HealthBreakdown, HealthReport, HealthStatus, Recommendation};
pub use insights::{expense_insights, CategoryShare, ExpenseInsights, Insight};
pub use summary::{
    summarize, CategoryTotal, MonthlyTotals, RecentTransaction, Summary, TransactionKind,
};
pub use targets::{
    account_balances, target_progress, InsightLevel, Milestone, TargetInsight, TargetProgress,
    TargetInsightCode, TargetStatus, TargetsReport,
};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// `part / whole * 100`, or 0 when `whole` is zero
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .unwrap_or(0.0)
}
