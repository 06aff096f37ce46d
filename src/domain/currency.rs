//! Currency codes, configured exchange rates and amount formatting.
//!
//! Every amount is stored in the base currency. Rates are expressed as
//! "1 base unit = X target units" and are supplied by configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

/// Supported display currencies
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Idr,
    Usd,
    Eur,
    Gbp,
    Sgd,
    Jpy,
    Aud,
    Cad,
    Chf,
    Cny,
    Hkd,
    Krw,
    Inr,
    Nzd,
    Sek,
    Nok,
    Dkk,
    Thb,
    Myr,
    Php,
}

impl Currency {
    pub const ALL: [Currency; 20] = [
        Currency::Idr,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Sgd,
        Currency::Jpy,
        Currency::Aud,
        Currency::Cad,
        Currency::Chf,
        Currency::Cny,
        Currency::Hkd,
        Currency::Krw,
        Currency::Inr,
        Currency::Nzd,
        Currency::Sek,
        Currency::Nok,
        Currency::Dkk,
        Currency::Thb,
        Currency::Myr,
        Currency::Php,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Idr => "IDR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Sgd => "SGD",
            Currency::Jpy => "JPY",
            Currency::Aud => "AUD",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Hkd => "HKD",
            Currency::Krw => "KRW",
            Currency::Inr => "INR",
            Currency::Nzd => "NZD",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Dkk => "DKK",
            Currency::Thb => "THB",
            Currency::Myr => "MYR",
            Currency::Php => "PHP",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Idr => "Indonesian Rupiah",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Sgd => "Singapore Dollar",
            Currency::Jpy => "Japanese Yen",
            Currency::Aud => "Australian Dollar",
            Currency::Cad => "Canadian Dollar",
            Currency::Chf => "Swiss Franc",
            Currency::Cny => "Chinese Yuan",
            Currency::Hkd => "Hong Kong Dollar",
            Currency::Krw => "South Korean Won",
            Currency::Inr => "Indian Rupee",
            Currency::Nzd => "New Zealand Dollar",
            Currency::Sek => "Swedish Krona",
            Currency::Nok => "Norwegian Krone",
            Currency::Dkk => "Danish Krone",
            Currency::Thb => "Thai Baht",
            Currency::Myr => "Malaysian Ringgit",
            Currency::Php => "Philippine Peso",
        }
    }

    /// Minor-unit digits shown for this currency
    pub fn fraction_digits(&self) -> u32 {
        match self {
            Currency::Idr | Currency::Jpy | Currency::Krw => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .ok_or_else(|| AppError::validation(format!("Unsupported currency '{}'", s.trim())))
    }
}

/// Exchange rates relative to the base currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyRates {
    rates: BTreeMap<Currency, Decimal>,
}

impl CurrencyRates {
    pub fn with_rate(mut self, currency: Currency, rate: Decimal) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    /// Parse `USD=0.000063,EUR=0.000058`
    pub fn parse_list(raw: &str) -> AppResult<Self> {
        let mut rates = Self::default();
        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (code, rate) = pair
                .split_once('=')
                .ok_or_else(|| AppError::validation(format!("Invalid rate entry '{}'", pair)))?;
            let currency: Currency = code.parse()?;
            let rate = Decimal::from_str(rate.trim())
                .map_err(|_| AppError::validation(format!("Invalid rate for {}", currency)))?;
            rates.rates.insert(currency, rate);
        }
        Ok(rates)
    }

    /// Usable rate for `currency`; missing and non-positive rates are ignored
    pub fn rate(&self, currency: Currency) -> Option<Decimal> {
        self.rates
            .get(&currency)
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// An amount tagged with its currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Round to the currency's fraction digits (half away from zero)
    pub fn rounded(&self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                self.currency.fraction_digits(),
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    /// Render as `CODE 1,234.56` using the currency's fraction digits
    pub fn format(&self) -> String {
        let rounded = self.rounded().amount;
        let digits = self.currency.fraction_digits() as usize;
        let text = format!("{:.*}", digits, rounded.abs());
        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        match frac_part {
            Some(frac) => format!("{} {}{}.{}", self.currency, sign, grouped, frac),
            None => format!("{} {}{}", self.currency, sign, grouped),
        }
    }
}

/// Convert a base amount into `target`.
///
/// Falls back to the unconverted base amount when no usable rate exists.
pub fn convert_from_base(
    amount: Decimal,
    base: Currency,
    target: Currency,
    rates: &CurrencyRates,
) -> Money {
    if target == base {
        return Money::new(amount, base);
    }
    match rates.rate(target).and_then(|rate| amount.checked_mul(rate)) {
        Some(converted) => Money::new(converted, target),
        None => Money::new(amount, base),
    }
}

/// Convert an amount typed in `from` back into the base currency.
///
/// Without a usable rate the input is assumed to already be in base units.
pub fn convert_to_base(
    amount: Decimal,
    from: Currency,
    base: Currency,
    rates: &CurrencyRates,
) -> Decimal {
    if from == base {
        return amount;
    }
    rates
        .rate(from)
        .and_then(|rate| amount.checked_div(rate))
        .unwrap_or(amount)
}

/// Convert between two display currencies through the base, rounded to
/// the result's fraction digits
pub fn convert_between(
    amount: Decimal,
    from: Currency,
    to: Currency,
    base: Currency,
    rates: &CurrencyRates,
) -> Money {
    let in_base = convert_to_base(amount, from, base, rates);
    convert_from_base(in_base, base, to, rates).rounded()
}

/// Parse human input such as `1.234.567`, `1,234,567`, `1,234.56` or `1.234,56`.
///
/// The last separator is decimal when both kinds appear; a lone separator
/// is decimal only when followed by one or two digits.
pub fn parse_amount_input(input: &str) -> Option<Decimal> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    let decimal_at = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => Some(dot.max(comma)),
        (Some(pos), None) | (None, Some(pos)) => {
            let digits_after = cleaned.len() - pos - 1;
            (1..=2).contains(&digits_after).then_some(pos)
        }
        (None, None) => None,
    };

    let strip = |s: &str| -> String { s.chars().filter(|c| !matches!(c, '.' | ',')).collect() };
    let normalized = match decimal_at {
        Some(pos) => {
            let int_part = strip(&cleaned[..pos]);
            let frac_part = strip(&cleaned[pos + 1..]);
            if frac_part.is_empty() {
                int_part
            } else {
                format!("{}.{}", int_part, frac_part)
            }
        }
        None => strip(&cleaned),
    };

    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_supported_codes() {
        assert_eq!(Currency::ALL.len(), 20);
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(Currency::Idr.fraction_digits(), 0);
        assert_eq!(Currency::Jpy.fraction_digits(), 0);
        assert_eq!(Currency::Krw.fraction_digits(), 0);
        assert_eq!(Currency::Usd.fraction_digits(), 2);
    }

    #[test]
    fn test_parse_rate_list() {
        let rates = CurrencyRates::parse_list("USD=0.000063, EUR=0.000058").unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates.rate(Currency::Usd), Some(dec("0.000063")));
        assert!(CurrencyRates::parse_list("USD:1").is_err());
        assert!(CurrencyRates::parse_list("ABC=1").is_err());
    }

    #[test]
    fn test_convert_from_base_uses_rate() {
        let rates = CurrencyRates::default().with_rate(Currency::Usd, dec("0.0001"));
        let money = convert_from_base(dec("150000"), Currency::Idr, Currency::Usd, &rates);
        assert_eq!(money, Money::new(dec("15"), Currency::Usd));
    }

    #[test]
    fn test_convert_from_base_falls_back_without_rate() {
        let rates = CurrencyRates::default().with_rate(Currency::Eur, Decimal::ZERO);
        let money = convert_from_base(dec("1000"), Currency::Idr, Currency::Eur, &rates);
        assert_eq!(money, Money::new(dec("1000"), Currency::Idr));
    }

    #[test]
    fn test_convert_to_base() {
        let rates = CurrencyRates::default().with_rate(Currency::Usd, dec("0.0001"));
        assert_eq!(
            convert_to_base(dec("15"), Currency::Usd, Currency::Idr, &rates),
            dec("150000")
        );
        assert_eq!(
            convert_to_base(dec("15"), Currency::Gbp, Currency::Idr, &rates),
            dec("15")
        );
    }

    #[test]
    fn test_convert_between_goes_through_base() {
        let rates = CurrencyRates::default()
            .with_rate(Currency::Usd, dec("0.0001"))
            .with_rate(Currency::Jpy, dec("0.0095"));
        let money = convert_between(dec("15"), Currency::Usd, Currency::Jpy, Currency::Idr, &rates);
        assert_eq!(money, Money::new(dec("1425"), Currency::Jpy));

        let idr = convert_between(
            dec("10.004"),
            Currency::Usd,
            Currency::Idr,
            Currency::Idr,
            &rates,
        );
        assert_eq!(idr, Money::new(dec("100040"), Currency::Idr));
    }

    #[test]
    fn test_parse_amount_input_styles() {
        assert_eq!(parse_amount_input("1.234.567"), Some(dec("1234567")));
        assert_eq!(parse_amount_input("1,234,567"), Some(dec("1234567")));
        assert_eq!(parse_amount_input("1,234.56"), Some(dec("1234.56")));
        assert_eq!(parse_amount_input("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount_input("Rp 25.000"), Some(dec("25000")));
        assert_eq!(parse_amount_input("12,5"), Some(dec("12.5")));
        assert_eq!(parse_amount_input(""), None);
        assert_eq!(parse_amount_input("abc"), None);
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(Money::new(dec("1234567"), Currency::Idr).format(), "IDR 1,234,567");
        assert_eq!(Money::new(dec("1234.5"), Currency::Usd).format(), "USD 1,234.50");
        assert_eq!(Money::new(dec("-99.999"), Currency::Usd).format(), "USD -100.00");
        assert_eq!(Money::new(dec("999.5"), Currency::Jpy).format(), "JPY 1,000");
    }
}
