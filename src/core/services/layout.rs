use std::cmp::Ordering;

use crate::config::LayoutOptions;
use crate::domain::{ConnectorGeometry, FlowGraph, FlowLayout, FlowLink, NodeExtent};

use super::positioning::NodePositioner;

/// Stacks links at shared nodes and computes ribbon geometry for each one.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

/// Running "next free y" per node, one cursor per side. Lives for one pass.
struct OffsetTable {
    source: Vec<f64>,
    target: Vec<f64>,
}

impl OffsetTable {
    fn new(extents: &[Option<NodeExtent>]) -> Self {
        let starts: Vec<f64> = extents
            .iter()
            .map(|extent| extent.map_or(0.0, |e| e.y0))
            .collect();
        Self {
            source: starts.clone(),
            target: starts,
        }
    }

    fn take_source(&mut self, node: usize, height: f64) -> (f64, f64) {
        take(&mut self.source[node], height)
    }

    fn take_target(&mut self, node: usize, height: f64) -> (f64, f64) {
        take(&mut self.target[node], height)
    }
}

fn take(cursor: &mut f64, height: f64) -> (f64, f64) {
    let start = *cursor;
    *cursor += height;
    (start, *cursor)
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Positions nodes with `positioner`, then stacks links.
    pub fn layout_with(
        &self,
        graph: &FlowGraph,
        positioner: &dyn NodePositioner,
        width: f64,
        height: f64,
    ) -> FlowLayout {
        let extents = positioner.position(graph, width, height);
        self.layout(graph, &extents, height)
    }

    /// `extents` is indexed like `graph.nodes`; `available_height` bounds the
    /// hub enlargement.
    pub fn layout(
        &self,
        graph: &FlowGraph,
        extents: &[NodeExtent],
        available_height: f64,
    ) -> FlowLayout {
        let mut usable: Vec<Option<NodeExtent>> = (0..graph.nodes.len())
            .map(|index| extents.get(index).copied().filter(NodeExtent::is_finite))
            .collect();

        if let Some(hub) = graph.hub_index() {
            if let Some(extent) = usable[hub].as_mut() {
                self.enlarge_mid_node(extent, available_height);
            }
        }

        let links = self.renderable_links(graph, &usable);

        let mut outgoing = vec![0.0; usable.len()];
        let mut incoming = vec![0.0; usable.len()];
        for (_, link) in &links {
            outgoing[link.source_index] += link.value;
            incoming[link.target_index] += link.value;
        }

        let mut offsets = OffsetTable::new(&usable);
        let curvature = self.options.curvature;
        let mut connectors = Vec::with_capacity(links.len());

        for (draw_order, (link_index, link)) in links.into_iter().enumerate() {
            let (Some(source), Some(target)) =
                (usable[link.source_index], usable[link.target_index])
            else {
                continue;
            };
            let source_height = fraction(link.value, outgoing[link.source_index]) * source.height();
            let target_height = fraction(link.value, incoming[link.target_index]) * target.height();
            let (source_y0, source_y1) = offsets.take_source(link.source_index, source_height);
            let (target_y0, target_y1) = offsets.take_target(link.target_index, target_height);

            let source_x = source.x1;
            let target_x = target.x0;
            connectors.push(ConnectorGeometry {
                link_index,
                source_index: link.source_index,
                target_index: link.target_index,
                source_x,
                target_x,
                source_y0,
                source_y1,
                target_y0,
                target_y1,
                control_x1: source_x * (1.0 - curvature) + target_x * curvature,
                control_x2: source_x * curvature + target_x * (1.0 - curvature),
                draw_order,
            });
        }

        tracing::debug!(
            nodes = usable.len(),
            connectors = connectors.len(),
            dropped = graph.links.len() - connectors.len(),
            "laid out flow graph"
        );

        FlowLayout {
            extents: usable,
            connectors,
        }
    }

    /// Grows a too-short hub to the configured share of the available height,
    /// keeping its midpoint where possible.
    fn enlarge_mid_node(&self, extent: &mut NodeExtent, available_height: f64) {
        let fraction = self.options.min_hub_fraction;
        if !(fraction > 0.0 && available_height.is_finite() && available_height > 0.0) {
            return;
        }
        let minimum = fraction * available_height;
        if extent.height() >= minimum {
            return;
        }
        let centre = (extent.y0 + extent.y1) / 2.0;
        let mut y0 = centre - minimum / 2.0;
        if y0 < 0.0 {
            y0 = 0.0;
        }
        if y0 + minimum > available_height {
            y0 = available_height - minimum;
        }
        extent.y0 = y0;
        extent.y1 = y0 + minimum;
    }

    /// Links in draw order, minus those that cannot be drawn.
    fn renderable_links<'g>(
        &self,
        graph: &'g FlowGraph,
        usable: &[Option<NodeExtent>],
    ) -> Vec<(usize, &'g FlowLink)> {
        let mut links: Vec<(usize, &FlowLink)> = graph
            .links
            .iter()
            .enumerate()
            .filter(|(index, link)| {
                let node_count = graph.nodes.len();
                if link.source_index >= node_count || link.target_index >= node_count {
                    tracing::error!(
                        link = index,
                        source = link.source_index,
                        target = link.target_index,
                        node_count,
                        "link references a node outside the graph"
                    );
                    return false;
                }
                if usable[link.source_index].is_none() || usable[link.target_index].is_none() {
                    tracing::debug!(link = index, "dropping link without node extents");
                    return false;
                }
                if !(link.value.is_finite() && link.value >= 0.0) {
                    tracing::debug!(link = index, value = link.value, "dropping link with bad value");
                    return false;
                }
                true
            })
            .collect();

        // Stable sort keeps input order among equal keys.
        links.sort_by(|(_, a), (_, b)| {
            a.target_index
                .cmp(&b.target_index)
                .then_with(|| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal))
        });
        links
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

fn fraction(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total
    } else {
        0.0
    }
}
