#![doc(test(attr(deny(warnings))))]

//! Money-flow aggregation and layout engine.
//!
//! Turns lists of income and expense records into a flow graph
//! (income categories -> budget hub -> expense categories) and computes the
//! stacked ribbon geometry a Sankey-style renderer needs to draw it.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod render;
pub mod utils;

pub use crate::core::services::pipeline::{FlowInput, FlowOptions, FlowPipeline, FlowResult};
pub use domain::{
    CashflowRecord, ConnectorGeometry, FlowGraph, FlowLayout, FlowLink, FlowNode, FlowSide,
    NodeExtent,
};
pub use errors::{FlowError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Moneyflow tracing initialized.");
    });
}
