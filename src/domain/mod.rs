pub mod category;
pub mod geometry;
pub mod graph;
pub mod record;

pub use category::{CanonicalCategory, HUB_NAME};
pub use geometry::{ConnectorGeometry, FlowLayout, NodeExtent};
pub use graph::{FlowGraph, FlowLink, FlowNode, LegendEntry, NodeRole};
pub use record::{CashflowRecord, FlowSide};
