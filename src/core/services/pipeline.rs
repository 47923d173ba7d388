use serde::{Deserialize, Serialize};

use crate::config::FlowConfig;
use crate::domain::{CashflowRecord, FlowGraph, FlowLayout, FlowSide};
use crate::errors::Result;

use super::aggregation::FlowAggregator;
use super::bucketing::OverflowBucketer;
use super::classifier::CategoryClassifier;
use super::consistency::ConsistencyChecker;
use super::graph_builder::GraphBuilder;
use super::layout::LayoutEngine;
use super::positioning::{ColumnPositioner, NodePositioner};

/// Per-call overrides of the configured category caps and allow-list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowOptions {
    pub max_income_categories: Option<usize>,
    pub max_expense_categories: Option<usize>,
    pub include_categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowInput {
    pub incomes: Vec<CashflowRecord>,
    pub expenses: Vec<CashflowRecord>,
    pub options: FlowOptions,
}

impl FlowInput {
    pub fn new(incomes: Vec<CashflowRecord>, expenses: Vec<CashflowRecord>) -> Self {
        Self {
            incomes,
            expenses,
            options: FlowOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FlowOptions) -> Self {
        self.options = options;
        self
    }
}

/// Graph plus its geometry, as handed to a renderer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlowResult {
    pub graph: FlowGraph,
    pub layout: FlowLayout,
}

/// Classification -> aggregation -> bucketing -> consistency -> graph ->
/// layout, as one pure computation over its inputs and configuration.
pub struct FlowPipeline {
    config: FlowConfig,
    classifier: CategoryClassifier,
    layout: LayoutEngine,
    positioner: Box<dyn NodePositioner + Send + Sync>,
}

impl FlowPipeline {
    pub fn new(mut config: FlowConfig) -> Result<Self> {
        config.validate()?;
        config.categories.normalize_keywords();
        let classifier = CategoryClassifier::new(&config.categories)?;
        Ok(Self {
            classifier,
            layout: LayoutEngine::new(config.layout),
            positioner: Box::new(ColumnPositioner::from_options(&config.layout)),
            config,
        })
    }

    /// Replaces the default column positioner.
    pub fn with_positioner(mut self, positioner: impl NodePositioner + Send + Sync + 'static) -> Self {
        self.positioner = Box::new(positioner);
        self
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    pub fn compute(&self, input: &FlowInput) -> FlowGraph {
        self.build_graph(&input.incomes, &input.expenses, &input.options)
    }

    pub fn build_graph(
        &self,
        incomes: &[CashflowRecord],
        expenses: &[CashflowRecord],
        options: &FlowOptions,
    ) -> FlowGraph {
        let include = options.include_categories.as_deref();
        let income_totals =
            FlowAggregator::aggregate(incomes, &self.classifier, FlowSide::Income, include);
        let expense_totals =
            FlowAggregator::aggregate(expenses, &self.classifier, FlowSide::Expense, include);

        let income = OverflowBucketer::bucket(
            &income_totals,
            options
                .max_income_categories
                .unwrap_or(self.config.max_income_categories),
            FlowSide::Income,
        );
        let expense = OverflowBucketer::bucket(
            &expense_totals,
            options
                .max_expense_categories
                .unwrap_or(self.config.max_expense_categories),
            FlowSide::Expense,
        );

        let mut graph = GraphBuilder::new(&self.config.categories).build(&income, &expense);
        let consistency = ConsistencyChecker::check_in(
            &self.config.locale,
            income_totals.total(),
            expense_totals.total(),
            self.config.tolerance,
        );
        graph.total_inflow = income_totals.total();
        graph.total_outflow = expense_totals.total();
        graph.balanced = consistency.balanced;
        graph.warning = consistency.warning;
        graph
    }

    pub fn layout(&self, graph: &FlowGraph, width: f64, height: f64) -> FlowLayout {
        self.layout
            .layout_with(graph, self.positioner.as_ref(), width, height)
    }

    pub fn run(&self, input: &FlowInput, width: f64, height: f64) -> FlowResult {
        let graph = self.compute(input);
        let layout = self.layout(&graph, width, height);
        FlowResult { graph, layout }
    }
}
