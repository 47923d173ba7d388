//! Input records consumed by the flow pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single income or expense entry as handed over by the record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashflowRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub amount: f64,
    /// Free-text category; missing or blank values land in the overflow bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CashflowRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            category: Some(category.into()),
        }
    }

    pub fn uncategorized(id: impl Into<String>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            category: None,
        }
    }

    /// Magnitude used for aggregation regardless of the caller's sign convention.
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }
}

/// Which side of the hub a record or node belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlowSide {
    Income,
    Expense,
}

impl FlowSide {
    /// Name of the synthetic bucket absorbing categories beyond the cap.
    pub fn overflow_name(self) -> &'static str {
        match self {
            FlowSide::Income => "Other Income",
            FlowSide::Expense => "Other Expenses",
        }
    }
}

impl fmt::Display for FlowSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlowSide::Income => "income",
            FlowSide::Expense => "expense",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_records_without_category() {
        let record: CashflowRecord =
            serde_json::from_str(r#"{"id":"1","name":"Paycheck","amount":1200.5}"#)
                .expect("valid record");
        assert_eq!(record.category, None);
        assert_eq!(record.amount, 1200.5);
    }

    #[test]
    fn magnitude_drops_sign() {
        let record = CashflowRecord::new("e1", "Rent", -950.0, "Housing");
        assert_eq!(record.magnitude(), 950.0);
    }
}
