//! Currency listing and conversion handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::domain::{convert_between, parse_amount_input, Currency, Money};
use crate::errors::{AppError, AppResult};

pub fn currency_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_currencies))
        .route("/convert", get(convert))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrencyInfo {
    pub code: Currency,
    #[schema(example = "US Dollar")]
    pub name: &'static str,
    #[schema(example = 2)]
    pub fraction_digits: u32,
    /// Units of this currency per base unit; absent when not configured
    pub rate: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrencyList {
    pub base: Currency,
    pub currencies: Vec<CurrencyInfo>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ConvertQuery {
    /// Amount as typed, e.g. `1.234,56` or `1,234.56`
    #[param(example = "1.500.000")]
    pub amount: String,
    /// Defaults to the base currency
    #[param(example = "IDR")]
    pub from: Option<String>,
    #[param(example = "USD")]
    pub to: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Conversion {
    pub amount: Decimal,
    pub from: Currency,
    pub result: Money,
    #[schema(example = "USD 94.50")]
    pub formatted: String,
}

/// Supported currencies with their configured rates
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "Currencies",
    responses((status = 200, description = "Supported currencies", body = CurrencyList))
)]
pub async fn list_currencies(State(state): State<AppState>) -> Json<CurrencyList> {
    let rates = &state.config.currency_rates;
    let currencies = Currency::ALL
        .iter()
        .map(|&currency| CurrencyInfo {
            code: currency,
            name: currency.name(),
            fraction_digits: currency.fraction_digits(),
            rate: if currency == state.config.base_currency {
                Some(Decimal::ONE)
            } else {
                rates.rate(currency)
            },
        })
        .collect();

    Json(CurrencyList {
        base: state.config.base_currency,
        currencies,
    })
}

/// Convert an amount between two currencies through the base currency.
///
/// Without a configured rate the amount is returned unconverted in the
/// base currency.
#[utoipa::path(
    get,
    path = "/api/currencies/convert",
    tag = "Currencies",
    params(ConvertQuery),
    responses(
        (status = 200, description = "Converted and formatted amount", body = Conversion),
        (status = 400, description = "Unparseable amount or unsupported currency")
    )
)]
pub async fn convert(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> AppResult<Json<Conversion>> {
    let amount = parse_amount_input(&query.amount)
        .ok_or_else(|| AppError::validation(format!("Invalid amount '{}'", query.amount)))?;
    let from = match query.from.as_deref() {
        Some(code) => code.parse()?,
        None => state.config.base_currency,
    };
    let to: Currency = query.to.parse()?;

    let result = convert_between(
        amount,
        from,
        to,
        state.config.base_currency,
        &state.config.currency_rates,
    );

    Ok(Json(Conversion {
        amount,
        from,
        formatted: result.format(),
        result,
    }))
}
