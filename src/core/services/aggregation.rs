use std::collections::HashMap;

use crate::domain::{CashflowRecord, FlowSide};

use super::classifier::CategoryClassifier;

/// Summed magnitudes per category for one side, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
    total: f64,
}

impl CategoryTotals {
    pub fn add(&mut self, category: String, amount: f64) {
        self.total += amount;
        match self.index.get(&category) {
            Some(&slot) => self.entries[slot].1 += amount,
            None => {
                self.index.insert(category.clone(), self.entries.len());
                self.entries.push((category, amount));
            }
        }
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.index.get(category).map(|&slot| self.entries[slot].1)
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, f64)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut totals = CategoryTotals::default();
        for (category, amount) in iter {
            totals.add(category, amount);
        }
        totals
    }
}

pub struct FlowAggregator;

impl FlowAggregator {
    /// Classifies and sums `records` in one pass.
    ///
    /// With an `include` allow-list, records whose classified category is not
    /// listed (case-insensitively) are left out of both the buckets and the
    /// grand total.
    pub fn aggregate(
        records: &[CashflowRecord],
        classifier: &CategoryClassifier,
        side: FlowSide,
        include: Option<&[String]>,
    ) -> CategoryTotals {
        let mut totals = CategoryTotals::default();
        let mut skipped = 0usize;

        for record in records {
            if !record.amount.is_finite() {
                tracing::warn!(id = %record.id, %side, "skipping record with non-finite amount");
                skipped += 1;
                continue;
            }
            let category = classifier.classify(record.category.as_deref(), side);
            if let Some(allowed) = include {
                if !allowed.iter().any(|name| name.eq_ignore_ascii_case(&category)) {
                    skipped += 1;
                    continue;
                }
            }
            let amount = record.magnitude();
            if !(totals.total() + amount).is_finite() {
                tracing::warn!(
                    id = %record.id,
                    %side,
                    amount,
                    "skipping record that overflows the side total"
                );
                skipped += 1;
                continue;
            }
            totals.add(category, amount);
        }

        tracing::debug!(
            %side,
            records = records.len(),
            skipped,
            categories = totals.len(),
            total = totals.total(),
            "aggregated cashflow records"
        );
        totals
    }
}
