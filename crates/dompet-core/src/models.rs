//! Domain models for Dompet
//!
//! Request payloads arrive loosely typed (amounts may be numeric-looking text,
//! dates may carry a time part). The `*Input` types mirror the wire shape and
//! are converted into the strict domain types with `TryFrom`, which is where
//! coercion failures surface.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Transaction type label that the insight rules treat as spending
pub const EXPENSE: &str = "expense";

/// A JSON scalar as received from the caller, before coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Coerce to a number, accepting numeric-looking text
    pub fn to_amount(&self) -> Result<f64> {
        match self {
            RawValue::Number(n) => Ok(*n),
            RawValue::Text(s) => parse_amount(s),
        }
    }

    /// Coerce to a calendar date
    pub fn to_date(&self) -> Result<NaiveDate> {
        match self {
            RawValue::Text(s) => parse_date(s),
            RawValue::Number(n) => Err(Error::InvalidDate(n.to_string())),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// Parse numeric-looking text ("150000.50", " 42 ") into a number
pub fn parse_amount(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| !trimmed.is_empty() && n.is_finite())
        .ok_or_else(|| Error::InvalidNumber(s.to_string()))
}

/// Parse a date, discarding any time-of-day component
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`
/// and RFC 3339 timestamps.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }

    Err(Error::InvalidDate(s.to_string()))
}

/// A transaction as sent by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: RawValue,
    #[serde(default)]
    pub date: Option<RawValue>,
}

/// A coerced, request-scoped transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub description: String,
    pub category: String,
    /// Free label, usually "income" or "expense"
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == EXPENSE
    }
}

impl TryFrom<TransactionInput> for Transaction {
    type Error = Error;

    fn try_from(input: TransactionInput) -> Result<Self> {
        Ok(Self {
            amount: input.amount.to_amount()?,
            date: input.date.as_ref().map(RawValue::to_date).transpose()?,
            description: input.description,
            category: input.category,
            kind: input.kind,
        })
    }
}

/// A budget record as sent by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetInput {
    pub category: String,
    pub spent: RawValue,
    pub budget: RawValue,
}

/// A coerced budget: how much was spent against a ceiling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Budget {
    pub category: String,
    pub spent: f64,
    pub budget: f64,
}

impl Budget {
    /// Amount spent over the ceiling, if the ceiling is set and exceeded
    pub fn overage(&self) -> Option<f64> {
        (self.budget > 0.0 && self.spent > self.budget).then(|| self.spent - self.budget)
    }
}

impl TryFrom<BudgetInput> for Budget {
    type Error = Error;

    fn try_from(input: BudgetInput) -> Result<Self> {
        Ok(Self {
            spent: input.spent.to_amount()?,
            budget: input.budget.to_amount()?,
            category: input.category,
        })
    }
}

/// A dated amount used for forecasting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingInput {
    pub date: RawValue,
    pub amount: RawValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpendingPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

impl TryFrom<SpendingInput> for SpendingPoint {
    type Error = Error;

    fn try_from(input: SpendingInput) -> Result<Self> {
        Ok(Self {
            date: input.date.to_date()?,
            amount: input.amount.to_amount()?,
        })
    }
}

/// Convert a batch of inputs, stopping at the first coercion failure
pub fn coerce_all<I, T>(inputs: Vec<I>) -> Result<Vec<T>>
where
    T: TryFrom<I, Error = Error>,
{
    inputs.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_numeric_text() {
        assert_eq!(parse_amount("150000.50").unwrap(), 150000.50);
        assert_eq!(parse_amount(" 42 ").unwrap(), 42.0);
        assert_eq!(parse_amount("-7").unwrap(), -7.0);
    }

    #[test]
    fn test_parse_amount_rejects_text() {
        let err = parse_amount("lima ribu").unwrap_err();
        assert_eq!(err.kind(), "InvalidNumber");
        assert!(parse_amount("").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(parse_date("2025-03-09").unwrap(), expected);
        assert_eq!(parse_date("2025-03-09 14:30:00").unwrap(), expected);
        assert_eq!(parse_date("2025-03-09T14:30:00").unwrap(), expected);
        assert_eq!(parse_date("2025-03-09T14:30:00+07:00").unwrap(), expected);
        assert!(parse_date("09/03/2025").is_err());
    }

    #[test]
    fn test_raw_value_deserializes_numbers_and_text() {
        let values: Vec<RawValue> = serde_json::from_str(r#"[1500, 2.5, "3000"]"#).unwrap();
        assert_eq!(values[0], RawValue::Number(1500.0));
        assert_eq!(values[1], RawValue::Number(2.5));
        assert_eq!(values[2].to_amount().unwrap(), 3000.0);
    }

    #[test]
    fn test_transaction_from_input() {
        let input: TransactionInput = serde_json::from_value(serde_json::json!({
            "description": "Kopi Kenangan",
            "category": "Food & Dining",
            "type": "expense",
            "amount": "25000",
            "date": "2025-01-02"
        }))
        .unwrap();

        let tx = Transaction::try_from(input).unwrap();
        assert_eq!(tx.amount, 25000.0);
        assert!(tx.is_expense());
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 1, 2));
    }

    #[test]
    fn test_budget_overage() {
        let over = Budget {
            category: "Shopping".into(),
            spent: 150_000.0,
            budget: 100_000.0,
        };
        assert_eq!(over.overage(), Some(50_000.0));

        let unset = Budget {
            category: "Shopping".into(),
            spent: 150_000.0,
            budget: 0.0,
        };
        assert_eq!(unset.overage(), None);

        let under = Budget {
            category: "Shopping".into(),
            spent: 100_000.0,
            budget: 100_000.0,
        };
        assert_eq!(under.overage(), None);
    }

    #[test]
    fn test_coerce_all_stops_on_bad_amount() {
        let inputs = vec![
            SpendingInput {
                date: "2025-01-01".into(),
                amount: 10.0.into(),
            },
            SpendingInput {
                date: "2025-01-02".into(),
                amount: "sepuluh".into(),
            },
        ];
        let result: Result<Vec<SpendingPoint>> = coerce_all(inputs);
        assert_eq!(result.unwrap_err().kind(), "InvalidNumber");
    }
}
