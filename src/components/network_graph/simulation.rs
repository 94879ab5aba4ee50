//! Force-directed layout run on demand by the animation toggle.

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::info;

use super::graph::{NetworkGraph, NodeIdx};

const CHARGE_PER_SCALING: f32 = 30.0;
const GRAVITY_PULL: f32 = 0.05;
const NODE_MASS: f32 = 10.0;
/// Physics steps per refresh tick.
const SUBSTEPS: usize = 3;
const STEP_DT: f32 = 0.016;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSettings {
	/// Pull of every node towards the origin.
	pub gravity: f32,
	/// Scales node repulsion.
	pub scaling_ratio: f32,
}

impl Default for LayoutSettings {
	fn default() -> Self {
		Self {
			gravity: 3.0,
			scaling_ratio: 5.0,
		}
	}
}

impl LayoutSettings {
	fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: CHARGE_PER_SCALING * self.scaling_ratio,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

pub struct ForceLayout {
	settings: LayoutSettings,
	sim: Option<ForceGraph<NodeIdx, ()>>,
}

impl ForceLayout {
	pub fn new(settings: LayoutSettings) -> Self {
		Self {
			settings,
			sim: None,
		}
	}

	pub fn is_running(&self) -> bool {
		self.sim.is_some()
	}

	/// Seeds a fresh simulation from the graph's current positions.
	pub fn start(&mut self, graph: &NetworkGraph) {
		let mut sim = ForceGraph::new(self.settings.parameters());
		let handles: Vec<DefaultNodeIdx> = graph
			.nodes()
			.map(|(idx, node)| {
				sim.add_node(NodeData {
					x: node.x as f32,
					y: node.y as f32,
					mass: NODE_MASS,
					is_anchor: false,
					user_data: idx,
				})
			})
			.collect();
		for (_, edge) in graph.edges() {
			sim.add_edge(
				handles[edge.source.index()],
				handles[edge.target.index()],
				EdgeData::default(),
			);
		}
		info!(
			"network: force layout started (gravity {}, scaling {})",
			self.settings.gravity, self.settings.scaling_ratio
		);
		self.sim = Some(sim);
	}

	pub fn stop(&mut self) {
		if self.sim.take().is_some() {
			info!("network: force layout stopped");
		}
	}

	/// Advances one refresh tick and writes positions back. False when stopped.
	pub fn step(&mut self, graph: &mut NetworkGraph) -> bool {
		let Some(sim) = self.sim.as_mut() else {
			return false;
		};
		let pull = self.settings.gravity * GRAVITY_PULL * STEP_DT;
		for _ in 0..SUBSTEPS {
			sim.update(STEP_DT);
			sim.visit_nodes_mut(|node| {
				if !node.data.is_anchor {
					node.data.x -= node.data.x * pull;
					node.data.y -= node.data.y * pull;
				}
			});
		}
		sim.visit_nodes(|node| {
			graph.set_position(node.data.user_data, node.x() as f64, node.y() as f64);
		});
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::dataset::build_network;
	use crate::components::network_graph::layout::Placement;

	fn placed() -> NetworkGraph {
		let mut g = NetworkGraph::from_data(&build_network()).unwrap();
		Placement::default().apply(&mut g);
		g
	}

	#[test]
	fn stopped_layout_leaves_positions_alone() {
		let mut g = placed();
		let before: Vec<(f64, f64)> = g.nodes().map(|(_, n)| (n.x, n.y)).collect();
		let mut layout = ForceLayout::new(LayoutSettings::default());
		assert!(!layout.step(&mut g));
		let after: Vec<(f64, f64)> = g.nodes().map(|(_, n)| (n.x, n.y)).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn running_layout_moves_nodes() {
		let mut g = placed();
		let before: Vec<(f64, f64)> = g.nodes().map(|(_, n)| (n.x, n.y)).collect();
		let mut layout = ForceLayout::new(LayoutSettings::default());
		layout.start(&g);
		assert!(layout.is_running());
		for _ in 0..10 {
			assert!(layout.step(&mut g));
		}
		let after: Vec<(f64, f64)> = g.nodes().map(|(_, n)| (n.x, n.y)).collect();
		assert_ne!(before, after);
		assert!(after.iter().all(|(x, y)| x.is_finite() && y.is_finite()));

		layout.stop();
		assert!(!layout.is_running());
	}

	#[test]
	fn scaling_ratio_drives_repulsion() {
		let params = LayoutSettings::default().parameters();
		assert_eq!(params.force_charge, 150.0);
	}
}
