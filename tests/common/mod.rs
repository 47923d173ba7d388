#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use moneyflow_core::{config::FlowConfig, CashflowRecord, FlowInput, FlowPipeline};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that survives until the test binary exits.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn pipeline() -> FlowPipeline {
    FlowPipeline::new(FlowConfig::default()).expect("default config is valid")
}

pub fn record(id: &str, amount: f64, category: &str) -> CashflowRecord {
    CashflowRecord::new(id, id, amount, category)
}

/// One salary against five expense categories totalling 2,200.
pub fn salary_scenario() -> FlowInput {
    FlowInput::new(
        vec![record("salary", 3000.0, "Salary")],
        vec![
            record("rent", 1200.0, "Housing"),
            record("groceries", 400.0, "Food"),
            record("bus", 200.0, "Transportation"),
            record("movies", 100.0, "Entertainment"),
            record("nest-egg", 300.0, "Savings"),
        ],
    )
}
