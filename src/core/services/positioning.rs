use crate::config::LayoutOptions;
use crate::domain::{FlowGraph, NodeExtent, NodeRole};

/// Assigns a rectangle to every node of a graph.
///
/// The returned vector is indexed like `graph.nodes`. Implementations may
/// return fewer entries or non-finite coordinates for nodes they cannot place;
/// the layout engine drops links touching such nodes.
pub trait NodePositioner {
    fn position(&self, graph: &FlowGraph, width: f64, height: f64) -> Vec<NodeExtent>;
}

/// Three fixed columns (income, hub, expense) with node heights proportional
/// to node value and a single scale shared by all columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnPositioner {
    pub node_width: f64,
    pub node_padding: f64,
}

impl ColumnPositioner {
    pub fn new(node_width: f64, node_padding: f64) -> Self {
        Self {
            node_width,
            node_padding,
        }
    }

    pub fn from_options(options: &LayoutOptions) -> Self {
        Self::new(options.node_width, options.node_padding)
    }
}

impl Default for ColumnPositioner {
    fn default() -> Self {
        Self::from_options(&LayoutOptions::default())
    }
}

fn column_of(role: NodeRole) -> usize {
    match role {
        NodeRole::Income => 0,
        NodeRole::Hub => 1,
        NodeRole::Expense => 2,
    }
}

impl NodePositioner for ColumnPositioner {
    fn position(&self, graph: &FlowGraph, width: f64, height: f64) -> Vec<NodeExtent> {
        if graph.is_empty() || !(width > 0.0 && height > 0.0) {
            return Vec::new();
        }

        let mut columns: [Vec<usize>; 3] = Default::default();
        for (index, node) in graph.nodes.iter().enumerate() {
            columns[column_of(node.role)].push(index);
        }

        let tallest = columns.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let padding = self.node_padding.min(height / tallest as f64);

        // One scale for every column so equal values get equal heights.
        let scale = columns
            .iter()
            .filter(|members| !members.is_empty())
            .filter_map(|members| {
                let total: f64 = members.iter().map(|&i| graph.nodes[i].value).sum();
                let room = height - padding * (members.len() - 1) as f64;
                (total > 0.0).then(|| room / total)
            })
            .fold(f64::INFINITY, f64::min);
        let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };

        let node_width = self.node_width.min(width / 3.0);
        let step = (width - node_width) / 2.0;

        let mut extents = vec![NodeExtent::new(0.0, 0.0, 0.0, 0.0); graph.nodes.len()];
        for (column, members) in columns.iter().enumerate() {
            if members.is_empty() {
                continue;
            }
            let used: f64 = members
                .iter()
                .map(|&i| graph.nodes[i].value * scale)
                .sum::<f64>()
                + padding * (members.len() - 1) as f64;
            let x0 = step * column as f64;
            let mut cursor = ((height - used) / 2.0).max(0.0);
            for &index in members {
                let node_height = graph.nodes[index].value * scale;
                extents[index] = NodeExtent::new(x0, x0 + node_width, cursor, cursor + node_height);
                cursor += node_height + padding;
            }
        }

        tracing::debug!(nodes = extents.len(), scale, padding, "positioned nodes");
        extents
    }
}
