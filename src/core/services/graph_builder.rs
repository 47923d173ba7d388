use std::collections::HashSet;

use crate::config::CategoryConfig;
use crate::domain::{FlowGraph, FlowLink, FlowNode, LegendEntry, NodeRole, HUB_NAME};

use super::bucketing::BucketedSide;

/// Assembles nodes, links and legend from bucketed income and expense sides.
///
/// The consistency fields of the returned graph are left at their defaults;
/// the pipeline fills them in.
pub struct GraphBuilder<'a> {
    categories: &'a CategoryConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(categories: &'a CategoryConfig) -> Self {
        Self { categories }
    }

    pub fn build(&self, income: &BucketedSide, expense: &BucketedSide) -> FlowGraph {
        let income_categories = income.categories();
        let expense_categories = expense.categories();
        if income_categories.is_empty() || expense_categories.is_empty() {
            tracing::debug!(
                income = income_categories.len(),
                expense = expense_categories.len(),
                "one side has no categories; emitting empty graph"
            );
            return FlowGraph::default();
        }

        let income_total = income.total();
        let expense_total = expense.total();
        let hub_index = income_categories.len();

        let mut nodes = Vec::with_capacity(income_categories.len() + expense_categories.len() + 1);
        let mut links = Vec::with_capacity(income_categories.len() + expense_categories.len());

        for (index, (name, value)) in income_categories.iter().enumerate() {
            let percentage = share(*value, income_total);
            nodes.push(self.category_node(name, *value, percentage, NodeRole::Income));
            links.push(FlowLink {
                source_index: index,
                target_index: hub_index,
                value: *value,
                percentage_of_side: percentage,
                dollar_amount: *value,
            });
        }

        nodes.push(FlowNode {
            name: HUB_NAME.to_string(),
            color: self.categories.hub_color.clone(),
            role: NodeRole::Hub,
            value: income_total.max(expense_total),
            percentage_of_side: None,
        });

        for (offset, (name, value)) in expense_categories.iter().enumerate() {
            let percentage = share(*value, expense_total);
            nodes.push(self.category_node(name, *value, percentage, NodeRole::Expense));
            links.push(FlowLink {
                source_index: hub_index,
                target_index: hub_index + 1 + offset,
                value: *value,
                percentage_of_side: percentage,
                dollar_amount: *value,
            });
        }

        let legend = legend_for(&nodes);
        tracing::debug!(nodes = nodes.len(), links = links.len(), "built flow graph");

        FlowGraph {
            nodes,
            links,
            legend,
            ..FlowGraph::default()
        }
    }

    fn category_node(&self, name: &str, value: f64, percentage: f64, role: NodeRole) -> FlowNode {
        FlowNode {
            name: name.to_string(),
            color: self.categories.color_for(name),
            role,
            value,
            percentage_of_side: Some(percentage),
        }
    }
}

fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

fn legend_for(nodes: &[FlowNode]) -> Vec<LegendEntry> {
    let mut seen = HashSet::new();
    nodes
        .iter()
        .filter(|node| node.role != NodeRole::Hub)
        .filter(|node| seen.insert(node.name.clone()))
        .map(|node| LegendEntry {
            name: node.name.clone(),
            color: node.color.clone(),
        })
        .collect()
}
