//! One-shot initial placement of the assembled graph.

use std::f64::consts::PI;

use super::graph::NetworkGraph;

/// How nodes are positioned before the first draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
	/// Every node on one circle, in insertion order.
	Circular {
		/// Circle radius.
		scale: f64,
	},
	/// One ring per node category; ring `i` has radius `i * step`.
	Concentric {
		/// Distance between rings.
		step: f64,
	},
}

impl Default for Placement {
	fn default() -> Self {
		Placement::Concentric { step: 100.0 }
	}
}

impl Placement {
	/// Writes initial positions into `graph`.
	pub fn apply(self, graph: &mut NetworkGraph) {
		match self {
			Placement::Circular { scale } => circular(graph, scale),
			Placement::Concentric { step } => concentric(graph, step),
		}
	}

	/// Radius of the outermost ring the placement can produce.
	pub fn extent(self, graph: &NetworkGraph) -> f64 {
		match self {
			Placement::Circular { scale } => scale,
			Placement::Concentric { step } => {
				let outer = graph.nodes().map(|(_, n)| n.category.ring()).max();
				outer.unwrap_or(0) as f64 * step
			}
		}
	}
}

fn circular(graph: &mut NetworkGraph, scale: f64) {
	let n = graph.node_count();
	for (i, (_, node)) in graph.nodes_mut().enumerate() {
		let angle = i as f64 * 2.0 * PI / n as f64;
		node.x = scale * angle.cos();
		node.y = scale * angle.sin();
	}
}

fn concentric(graph: &mut NetworkGraph, step: f64) {
	let rings = graph
		.nodes()
		.map(|(_, n)| n.category.ring())
		.max()
		.map_or(0, |r| r + 1);
	let mut members = vec![0usize; rings];
	for (_, node) in graph.nodes() {
		members[node.category.ring()] += 1;
	}

	let mut seen = vec![0usize; rings];
	for (_, node) in graph.nodes_mut() {
		let ring = node.category.ring();
		let angle = seen[ring] as f64 * 2.0 * PI / members[ring] as f64;
		seen[ring] += 1;
		let radius = ring as f64 * step;
		node.x = radius * angle.cos();
		node.y = radius * angle.sin();
	}
}
