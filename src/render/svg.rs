//! SVG output for a laid-out flow graph.

use std::fmt::Write;

use crate::currency::{format_currency_in, LocaleConfig};
use crate::domain::{ConnectorGeometry, FlowGraph, FlowLayout};

const LINK_OPACITY: f64 = 0.45;
const LEGEND_ROW_HEIGHT: f64 = 18.0;
const LEGEND_SWATCH: f64 = 12.0;
const LABEL_GAP: f64 = 6.0;

/// Closed ribbon outline: top curve at the stacked start offsets, bottom curve
/// back along the stacked end offsets.
pub fn ribbon_path(connector: &ConnectorGeometry) -> String {
    let c = connector;
    format!(
        "M {sx:.2},{sy0:.2} C {c1:.2},{sy0:.2} {c2:.2},{ty0:.2} {tx:.2},{ty0:.2} \
         L {tx:.2},{ty1:.2} C {c2:.2},{ty1:.2} {c1:.2},{sy1:.2} {sx:.2},{sy1:.2} Z",
        sx = c.source_x,
        sy0 = c.source_y0,
        sy1 = c.source_y1,
        tx = c.target_x,
        ty0 = c.target_y0,
        ty1 = c.target_y1,
        c1 = c.control_x1,
        c2 = c.control_x2,
    )
}

/// Hover text, e.g. `Housing: $1,200.00`.
pub fn tooltip(name: &str, value: f64) -> String {
    tooltip_in(&LocaleConfig::default(), name, value)
}

pub fn tooltip_in(locale: &LocaleConfig, name: &str, value: f64) -> String {
    format!("{}: {}", name, format_currency_in(locale, value))
}

/// Renders nodes, ribbons (in draw order) and the legend below the chart.
pub fn render_document(
    graph: &FlowGraph,
    layout: &FlowLayout,
    width: f64,
    height: f64,
    locale: &LocaleConfig,
) -> String {
    let legend_height = graph.legend.len() as f64 * LEGEND_ROW_HEIGHT;
    let total_height = height + if legend_height > 0.0 { legend_height + LABEL_GAP } else { 0.0 };

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{total_height:.0}" viewBox="0 0 {width:.2} {total_height:.2}">"#
    );

    if graph.is_empty() {
        let _ = writeln!(
            svg,
            r#"<text class="no-data" x="{:.2}" y="{:.2}" text-anchor="middle">No data</text>"#,
            width / 2.0,
            height / 2.0
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    svg.push_str("<g class=\"links\">\n");
    for connector in &layout.connectors {
        let Some(link) = graph.links.get(connector.link_index) else {
            continue;
        };
        let (Some(source), Some(target)) = (
            graph.node(connector.source_index),
            graph.node(connector.target_index),
        ) else {
            continue;
        };
        let label = tooltip_in(
            locale,
            &format!("{} → {}", source.name, target.name),
            link.dollar_amount,
        );
        let _ = writeln!(
            svg,
            r#"<path d="{}" fill="{}" fill-opacity="{LINK_OPACITY}"><title>{}</title></path>"#,
            ribbon_path(connector),
            escape(&source.color),
            escape(&label)
        );
    }
    svg.push_str("</g>\n<g class=\"nodes\">\n");

    for (index, node) in graph.nodes.iter().enumerate() {
        let Some(extent) = layout.extent(index) else {
            continue;
        };
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"><title>{}</title></rect>"#,
            extent.x0,
            extent.y0,
            extent.width(),
            extent.height(),
            escape(&node.color),
            escape(&tooltip_in(locale, &node.name, node.value))
        );
    }
    svg.push_str("</g>\n");

    let _ = writeln!(
        svg,
        r#"<g class="legend" transform="translate(0,{:.2})">"#,
        height + LABEL_GAP
    );
    for (row, entry) in graph.legend.iter().enumerate() {
        let y = row as f64 * LEGEND_ROW_HEIGHT;
        let _ = writeln!(
            svg,
            r#"<rect x="0" y="{y:.2}" width="{LEGEND_SWATCH}" height="{LEGEND_SWATCH}" fill="{}"/><text x="{:.2}" y="{:.2}">{}</text>"#,
            escape(&entry.color),
            LEGEND_SWATCH + LABEL_GAP,
            y + LEGEND_SWATCH - 2.0,
            escape(&entry.name)
        );
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
