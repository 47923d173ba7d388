//! The flow graph handed to layout and rendering.

use serde::{Deserialize, Serialize};

/// Position of a node in the income -> hub -> expense chain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Income,
    Hub,
    Expense,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub name: String,
    pub color: String,
    pub role: NodeRole,
    /// Total flowing through the node on its own side.
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_of_side: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowLink {
    pub source_index: usize,
    pub target_index: usize,
    pub value: f64,
    pub percentage_of_side: f64,
    pub dollar_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
}

/// Nodes, links and legend for one computation, plus the consistency annotation.
///
/// `nodes.is_empty()` is the canonical "insufficient data" signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
    pub legend: Vec<LegendEntry>,
    pub total_inflow: f64,
    pub total_outflow: f64,
    pub balanced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl FlowGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn hub_index(&self) -> Option<usize> {
        self.nodes.iter().position(|node| node.role == NodeRole::Hub)
    }

    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &FlowNode> + '_ {
        self.nodes.iter().filter(move |node| node.role == role)
    }

    pub fn node(&self, index: usize) -> Option<&FlowNode> {
        self.nodes.get(index)
    }
}
