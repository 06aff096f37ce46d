//! Report handlers. Every report is computed for the authenticated user.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::analytics::{
    BillSchedule, BudgetReport, ExpenseHeatmap, ExpenseInsights, HealthReport, Summary,
    TargetsReport,
};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::PeriodQuery;

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/budgets", get(budgets))
        .route("/insights", get(insights))
        .route("/heatmap", get(heatmap))
        .route("/health", get(health))
        .route("/bills", get(bills))
        .route("/targets", get(targets))
}

/// Totals, running balance, monthly trend and category breakdown
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Dashboard summary", body = Summary),
        (status = 400, description = "Malformed month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn summary(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Summary>> {
    let report = state.services.reports().summary(user.id, query.period()?).await?;
    Ok(Json(report))
}

/// Planned versus actual spending per budget of a month
#[utoipa::path(
    get,
    path = "/api/reports/budgets",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (
            status = 200,
            description = "Budget realization; `all` means the current month",
            body = BudgetReport
        ),
        (status = 400, description = "Malformed month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn budgets(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<BudgetReport>> {
    let month = query.month_or_current()?;
    Ok(Json(state.services.reports().budgets(user.id, month).await?))
}

/// Expense categories ranked by total, with insight codes
#[utoipa::path(
    get,
    path = "/api/reports/insights",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Expense insights", body = ExpenseInsights),
        (status = 400, description = "Malformed month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn insights(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<ExpenseInsights>> {
    let report = state.services.reports().insights(user.id, query.period()?).await?;
    Ok(Json(report))
}

/// Daily spending calendar of a month
#[utoipa::path(
    get,
    path = "/api/reports/heatmap",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (
            status = 200,
            description = "Expense heatmap; defaults to the current month",
            body = ExpenseHeatmap
        ),
        (status = 400, description = "Malformed month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn heatmap(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<ExpenseHeatmap>> {
    let month = query.month_or_current()?;
    Ok(Json(state.services.reports().heatmap(user.id, month).await?))
}

/// Financial health score (0-100) of a month
#[utoipa::path(
    get,
    path = "/api/reports/health",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (
            status = 200,
            description = "Health score; `all` means the current month",
            body = HealthReport
        ),
        (status = 400, description = "Malformed month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn health(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<HealthReport>> {
    let month = query.month_or_current()?;
    Ok(Json(state.services.reports().health(user.id, month).await?))
}

/// Bills due in a month with paid and overdue flags
#[utoipa::path(
    get,
    path = "/api/reports/bills",
    tag = "Reports",
    params(PeriodQuery),
    responses(
        (
            status = 200,
            description = "Bill schedule; defaults to the current month",
            body = BillSchedule
        ),
        (status = 400, description = "Malformed month")
    ),
    security(("bearer_auth" = []))
)]
pub async fn bills(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<BillSchedule>> {
    let month = query.month_or_current()?;
    Ok(Json(state.services.reports().bills(user.id, month).await?))
}

/// Progress of every savings target
#[utoipa::path(
    get,
    path = "/api/reports/targets",
    tag = "Reports",
    responses(
        (status = 200, description = "Savings target progress", body = TargetsReport)
    ),
    security(("bearer_auth" = []))
)]
pub async fn targets(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<TargetsReport>> {
    Ok(Json(state.services.reports().targets(user.id).await?))
}
