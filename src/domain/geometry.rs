//! Numeric layout output: node rectangles and ribbon connectors.

use serde::{Deserialize, Serialize};

/// Rectangle assigned to a node by a positioner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NodeExtent {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl NodeExtent {
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self { x0, x1, y0, y1 }
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.x1.is_finite() && self.y0.is_finite() && self.y1.is_finite()
    }
}

/// Ribbon between the stacked sub-intervals of one link's source and target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorGeometry {
    /// Index into `FlowGraph::links`.
    pub link_index: usize,
    pub source_index: usize,
    pub target_index: usize,
    pub source_x: f64,
    pub target_x: f64,
    pub source_y0: f64,
    pub source_y1: f64,
    pub target_y0: f64,
    pub target_y1: f64,
    pub control_x1: f64,
    pub control_x2: f64,
    /// Position in the deterministic draw sequence.
    pub draw_order: usize,
}

impl ConnectorGeometry {
    pub fn source_height(&self) -> f64 {
        self.source_y1 - self.source_y0
    }

    pub fn target_height(&self) -> f64 {
        self.target_y1 - self.target_y0
    }
}

/// Layout of a whole graph. `extents` is indexed like `FlowGraph::nodes`;
/// `connectors` is sorted by `draw_order`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlowLayout {
    pub extents: Vec<Option<NodeExtent>>,
    pub connectors: Vec<ConnectorGeometry>,
}

impl FlowLayout {
    pub fn extent(&self, index: usize) -> Option<&NodeExtent> {
        self.extents.get(index).and_then(Option::as_ref)
    }
}
