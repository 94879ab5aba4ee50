//! Per-draw mapping from stored node/edge attributes to what gets painted.
//! Nothing here mutates the graph.

use super::graph::{Edge, Node, NodeIdx};
use super::types::NodeCategory;

/// Fill and stroke of everything in the hovered neighbourhood.
pub const HIGHLIGHT_COLOR: &str = "#FF5733";
/// Alpha of elements outside the hovered neighbourhood.
pub const FADE_OPACITY: f64 = 0.3;

const NODE_HIGHLIGHT_SCALE: f64 = 1.2;
const EDGE_HIGHLIGHT_SCALE: f64 = 1.5;

/// How a node is painted this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDisplay {
	/// Label text, possibly multi-line.
	pub label: String,
	/// CSS color.
	pub color: String,
	/// Radius in graph units.
	pub size: f64,
	/// Drawn on top of the rest.
	pub raised: bool,
}

/// How an edge is painted this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDisplay {
	/// CSS color.
	pub color: String,
	/// Line width in graph units.
	pub size: f64,
	/// Drawn after the rest.
	pub raised: bool,
}

/// Label with the area appended on a second line for agents and organizations.
pub fn node_label(node: &Node) -> String {
	match &node.category {
		NodeCategory::Agent { area } | NodeCategory::Organization { area } => {
			format!("{}\n({})", node.label, area)
		}
		NodeCategory::Center | NodeCategory::Need => node.label.clone(),
	}
}

/// Display attributes of `node` given the hovered node, if any.
pub fn reduce_node(node: &Node, hovered: Option<NodeIdx>) -> NodeDisplay {
	let label = node_label(node);
	if node.highlighted {
		NodeDisplay {
			label,
			color: HIGHLIGHT_COLOR.into(),
			size: node.size * NODE_HIGHLIGHT_SCALE,
			raised: true,
		}
	} else {
		NodeDisplay {
			label,
			color: faded_if_hovering(&node.color, hovered),
			size: node.size,
			raised: false,
		}
	}
}

/// Display attributes of `edge` given the hovered node, if any.
pub fn reduce_edge(edge: &Edge, hovered: Option<NodeIdx>) -> EdgeDisplay {
	if edge.highlighted {
		EdgeDisplay {
			color: HIGHLIGHT_COLOR.into(),
			size: edge.size * EDGE_HIGHLIGHT_SCALE,
			raised: true,
		}
	} else {
		EdgeDisplay {
			color: faded_if_hovering(&edge.color, hovered),
			size: edge.size * edge.category.draw_scale(),
			raised: false,
		}
	}
}

fn faded_if_hovering(color: &str, hovered: Option<NodeIdx>) -> String {
	match hovered {
		Some(_) => fade_color(color, FADE_OPACITY),
		None => color.to_owned(),
	}
}

/// `#rrggbb` to `rgba(r, g, b, opacity)`. Anything else is returned unchanged.
pub fn fade_color(hex: &str, opacity: f64) -> String {
	match parse_hex(hex) {
		Some((r, g, b)) => format!("rgba({}, {}, {}, {})", r, g, b, opacity),
		None => hex.to_owned(),
	}
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
	let digits = hex.strip_prefix('#')?;
	if digits.len() != 6 || !digits.is_ascii() {
		return None;
	}
	let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
	Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::graph::NetworkGraph;
	use crate::components::network_graph::types::{EdgeCategory, NodeSpec};

	fn graph() -> NetworkGraph {
		let mut g = NetworkGraph::new();
		g.add_node(NodeSpec::new("immigrants", "Immigrants", NodeCategory::Center))
			.unwrap();
		g.add_node(NodeSpec::new(
			"otso",
			"Otso",
			NodeCategory::Agent {
				area: "Housing".into(),
			},
		))
		.unwrap();
		g.add_node(NodeSpec::new(
			"kela",
			"Kela",
			NodeCategory::Organization {
				area: "Social Security".into(),
			},
		))
		.unwrap();
		g.add_node(NodeSpec::new("housing", "Finding Housing", NodeCategory::Need))
			.unwrap();
		g.add_edge("immigrants", "otso", EdgeCategory::Coordination, "#3B82F6")
			.unwrap();
		g.add_edge("otso", "kela", EdgeCategory::Knowledge, "#6B7280")
			.unwrap();
		g.add_edge("housing", "otso", EdgeCategory::Service, "#F59E0B")
			.unwrap();
		g
	}

	#[test]
	fn labels_carry_area() {
		let g = graph();
		let label = |id: &str| node_label(g.node(g.node_by_id(id).unwrap()));
		assert_eq!(label("immigrants"), "Immigrants");
		assert_eq!(label("otso"), "Otso\n(Housing)");
		assert_eq!(label("kela"), "Kela\n(Social Security)");
		assert_eq!(label("housing"), "Finding Housing");
	}

	#[test]
	fn idle_nodes_keep_their_style() {
		let g = graph();
		let node = g.node(g.node_by_id("kela").unwrap());
		let shown = reduce_node(node, None);
		assert_eq!(shown.color, "#10B981");
		assert_eq!(shown.size, 8.0);
		assert!(!shown.raised);
	}

	#[test]
	fn highlighted_node_is_recolored_and_enlarged() {
		let mut g = graph();
		let otso = g.node_by_id("otso").unwrap();
		g.highlight_neighborhood(otso);
		let shown = reduce_node(g.node(otso), Some(otso));
		assert_eq!(shown.color, HIGHLIGHT_COLOR);
		assert!((shown.size - 12.0).abs() < 1e-9);
		assert!(shown.raised);
		// stored attributes untouched
		assert_eq!(g.node(otso).color, "#3B82F6");
		assert_eq!(g.node(otso).size, 10.0);
	}

	#[test]
	fn unrelated_elements_fade_while_hovering() {
		let mut g = graph();
		let kela = g.node_by_id("kela").unwrap();
		g.highlight_neighborhood(kela);
		let center = g.node(g.node_by_id("immigrants").unwrap());
		assert_eq!(
			reduce_node(center, Some(kela)).color,
			"rgba(139, 92, 246, 0.3)"
		);
		let (_, coordination) = g
			.edges()
			.find(|(_, e)| e.category == EdgeCategory::Coordination)
			.unwrap();
		assert_eq!(
			reduce_edge(coordination, Some(kela)).color,
			"rgba(59, 130, 246, 0.3)"
		);
	}

	#[test]
	fn edge_thickness_by_category() {
		let g = graph();
		let size_of = |cat: EdgeCategory| {
			let (_, e) = g.edges().find(|(_, e)| e.category == cat).unwrap();
			reduce_edge(e, None).size
		};
		let coordination = size_of(EdgeCategory::Coordination);
		let service = size_of(EdgeCategory::Service);
		let knowledge = size_of(EdgeCategory::Knowledge);
		assert!(coordination > service && service > knowledge);
		assert_eq!(knowledge, 2.0);
	}

	#[test]
	fn highlighted_edge_uses_highlight_color() {
		let mut g = graph();
		let housing = g.node_by_id("housing").unwrap();
		g.highlight_neighborhood(housing);
		let (_, service) = g
			.edges()
			.find(|(_, e)| e.category == EdgeCategory::Service)
			.unwrap();
		let shown = reduce_edge(service, Some(housing));
		assert_eq!(shown.color, HIGHLIGHT_COLOR);
		assert_eq!(shown.size, 3.0);
	}

	#[test]
	fn fade_rejects_malformed_colors() {
		assert_eq!(fade_color("#F59E0B", 0.5), "rgba(245, 158, 11, 0.5)");
		assert_eq!(fade_color("white", 0.3), "white");
		assert_eq!(fade_color("#abc", 0.3), "#abc");
	}
}
