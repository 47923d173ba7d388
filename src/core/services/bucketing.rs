use std::cmp::Ordering;

use crate::domain::FlowSide;

use super::aggregation::CategoryTotals;

/// Ranked categories for one side after applying the cardinality cap.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketedSide {
    pub side: FlowSide,
    /// At most `max_categories` entries, value descending.
    pub top: Vec<(String, f64)>,
    pub overflow_total: f64,
}

impl BucketedSide {
    pub fn empty(side: FlowSide) -> Self {
        Self {
            side,
            top: Vec::new(),
            overflow_total: 0.0,
        }
    }

    /// Node-ready categories: the top entries, then the overflow bucket if it
    /// holds anything.
    pub fn categories(&self) -> Vec<(String, f64)> {
        let mut categories = self.top.clone();
        if self.overflow_total > 0.0 {
            categories.push((self.side.overflow_name().to_string(), self.overflow_total));
        }
        categories
    }

    pub fn total(&self) -> f64 {
        self.top.iter().map(|(_, value)| value).sum::<f64>() + self.overflow_total
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.overflow_total <= 0.0
    }
}

pub struct OverflowBucketer;

impl OverflowBucketer {
    pub fn bucket(totals: &CategoryTotals, max_categories: usize, side: FlowSide) -> BucketedSide {
        let overflow_name = side.overflow_name();
        let mut ranked: Vec<(String, f64)> = Vec::with_capacity(totals.len());
        let mut overflow_total = 0.0;

        // Records already classified into the overflow bucket never take a slot.
        for (name, value) in totals.entries() {
            if name == overflow_name {
                overflow_total += value;
            } else {
                ranked.push((name.clone(), *value));
            }
        }

        ranked.sort_by(|(a_name, a_value), (b_name, b_value)| {
            b_value
                .partial_cmp(a_value)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a_name.cmp(b_name))
        });

        let rest = if ranked.len() > max_categories {
            ranked.split_off(max_categories)
        } else {
            Vec::new()
        };
        overflow_total += rest.iter().map(|(_, value)| value).sum::<f64>();

        tracing::debug!(
            %side,
            kept = ranked.len(),
            merged = rest.len(),
            overflow_total,
            "bucketed categories"
        );

        BucketedSide {
            side,
            top: ranked,
            overflow_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(entries: &[(&str, f64)]) -> CategoryTotals {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn keeps_top_k_and_merges_the_rest() {
        let totals = totals(&[
            ("Food", 400.0),
            ("Housing", 1200.0),
            ("Travel", 50.0),
            ("Gifts", 25.0),
            ("Savings", 300.0),
        ]);
        let bucketed = OverflowBucketer::bucket(&totals, 3, FlowSide::Expense);
        assert_eq!(
            bucketed.top,
            vec![
                ("Housing".to_string(), 1200.0),
                ("Food".to_string(), 400.0),
                ("Savings".to_string(), 300.0),
            ]
        );
        assert_eq!(bucketed.overflow_total, 75.0);
        assert_eq!(bucketed.categories().last().map(|(n, _)| n.as_str()), Some("Other Expenses"));
        assert_eq!(bucketed.total(), totals.total());
    }

    #[test]
    fn ties_break_by_name() {
        let totals = totals(&[("Zoo", 10.0), ("Art", 10.0), ("Mid", 10.0)]);
        let bucketed = OverflowBucketer::bucket(&totals, 5, FlowSide::Income);
        let names: Vec<_> = bucketed.top.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Art", "Mid", "Zoo"]);
        assert_eq!(bucketed.overflow_total, 0.0);
        assert_eq!(bucketed.categories().len(), 3);
    }

    #[test]
    fn existing_overflow_category_is_folded_into_bucket() {
        let totals = totals(&[("Other Income", 500.0), ("Income", 100.0)]);
        let bucketed = OverflowBucketer::bucket(&totals, 5, FlowSide::Income);
        assert_eq!(bucketed.top, vec![("Income".to_string(), 100.0)]);
        assert_eq!(bucketed.overflow_total, 500.0);
        assert_eq!(
            bucketed.categories(),
            vec![("Income".to_string(), 100.0), ("Other Income".to_string(), 500.0)]
        );
    }

    #[test]
    fn zero_cap_sends_everything_to_overflow() {
        let totals = totals(&[("Food", 1.0), ("Housing", 2.0)]);
        let bucketed = OverflowBucketer::bucket(&totals, 0, FlowSide::Expense);
        assert!(bucketed.top.is_empty());
        assert_eq!(bucketed.overflow_total, 3.0);
        assert!(!bucketed.is_empty());
    }
}
