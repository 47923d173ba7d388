use crate::currency::{format_currency_in, LocaleConfig};

/// Outcome of comparing total inflow with total outflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Consistency {
    pub balanced: bool,
    pub warning: Option<String>,
}

pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Annotates only; an imbalance is never an error.
    pub fn check(inflow: f64, outflow: f64, tolerance: f64) -> Consistency {
        Self::check_in(&LocaleConfig::default(), inflow, outflow, tolerance)
    }

    pub fn check_in(
        locale: &LocaleConfig,
        inflow: f64,
        outflow: f64,
        tolerance: f64,
    ) -> Consistency {
        let balanced = (inflow - outflow).abs() < tolerance;
        let warning = (!balanced).then(|| {
            tracing::debug!(inflow, outflow, tolerance, "inflow and outflow diverge");
            format!(
                "Total inflow ({}) does not match total outflow ({})",
                format_currency_in(locale, inflow),
                format_currency_in(locale, outflow)
            )
        });
        Consistency { balanced, warning }
    }
}
