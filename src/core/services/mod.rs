pub mod aggregation;
pub mod bucketing;
pub mod classifier;
pub mod consistency;
pub mod graph_builder;
pub mod layout;
pub mod pipeline;
pub mod positioning;

pub use aggregation::{CategoryTotals, FlowAggregator};
pub use bucketing::{BucketedSide, OverflowBucketer};
pub use classifier::CategoryClassifier;
pub use consistency::{Consistency, ConsistencyChecker};
pub use graph_builder::GraphBuilder;
pub use layout::LayoutEngine;
pub use pipeline::{FlowInput, FlowOptions, FlowPipeline, FlowResult};
pub use positioning::{ColumnPositioner, NodePositioner};
