use super::graph::{GraphError, NetworkGraph, NodeIdx};
use super::interaction::{HoverController, InfoPanel, KeyCommand};
use super::layout::Placement;
use super::simulation::{ForceLayout, LayoutSettings};
use super::types::NetworkData;

/// Extra hit area around a node, in screen pixels.
pub const HIT_SLOP: f64 = 4.0;
/// Margin kept between the outer ring and the canvas border when fitting.
const FIT_MARGIN: f64 = 60.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Info panel content plus where its node currently sits on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelView {
	pub info: InfoPanel,
	pub anchor: (f64, f64),
	pub bounds: (f64, f64),
}

pub struct NetworkState {
	pub graph: NetworkGraph,
	pub layout: ForceLayout,
	pub hover: HoverController,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	extent: f64,
}

impl NetworkState {
	pub fn new(
		data: &NetworkData,
		placement: Placement,
		settings: LayoutSettings,
		width: f64,
		height: f64,
	) -> Result<Self, GraphError> {
		let mut graph = NetworkGraph::from_data(data)?;
		placement.apply(&mut graph);
		let extent = placement.extent(&graph);

		let mut state = Self {
			graph,
			layout: ForceLayout::new(settings),
			hover: HoverController::new(),
			transform: ViewTransform::default(),
			pan: PanState::default(),
			width,
			height,
			extent,
		};
		state.fit();
		Ok(state)
	}

	/// Centers the origin and scales so the outermost ring fits the canvas.
	pub fn fit(&mut self) {
		let room = (self.width.min(self.height) / 2.0 - FIT_MARGIN).max(1.0);
		self.transform = ViewTransform {
			x: self.width / 2.0,
			y: self.height / 2.0,
			k: if self.extent > 0.0 { room / self.extent } else { 1.0 },
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Topmost node under a screen point. Highlighted nodes are drawn above the
	/// rest, and within each pass later nodes above earlier ones.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let slop = HIT_SLOP / self.transform.k;
		self.graph
			.nodes()
			.filter(|(_, node)| {
				let (dx, dy) = (node.x - gx, node.y - gy);
				(dx * dx + dy * dy).sqrt() < node.size + slop
			})
			.max_by_key(|&(idx, node)| (node.highlighted, idx))
			.map(|(idx, _)| idx)
	}

	/// Returns true when the hovered node changed.
	pub fn set_hover(&mut self, node: Option<NodeIdx>) -> bool {
		self.hover.set_hovered(&mut self.graph, node)
	}

	/// Returns true when the key changed the hovered node.
	pub fn handle_key(&mut self, command: KeyCommand) -> bool {
		self.hover.handle_key(&mut self.graph, command)
	}

	pub fn hovered_id(&self) -> Option<&str> {
		self.hover
			.hovered()
			.map(|idx| self.graph.node(idx).id.as_str())
	}

	pub fn panel_view(&self) -> Option<PanelView> {
		let info = self.hover.info_panel(&self.graph)?;
		let node = self.graph.node(self.hover.hovered()?);
		Some(PanelView {
			info,
			anchor: self.graph_to_screen(node.x, node.y),
			bounds: (self.width, self.height),
		})
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	/// Returns true while a pan is in progress.
	pub fn pan_to(&mut self, sx: f64, sy: f64) -> bool {
		if !self.pan.active {
			return false;
		}
		self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		true
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn start_layout(&mut self) {
		self.layout.start(&self.graph);
	}

	pub fn stop_layout(&mut self) {
		self.layout.stop();
	}

	/// One refresh tick of the force layout. False when the layout is stopped.
	pub fn tick(&mut self) -> bool {
		self.layout.step(&mut self.graph)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.fit();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_graph::dataset::build_network;

	fn state() -> NetworkState {
		NetworkState::new(
			&build_network(),
			Placement::default(),
			LayoutSettings::default(),
			800.0,
			600.0,
		)
		.unwrap()
	}

	#[test]
	fn fit_keeps_outer_ring_on_canvas() {
		let s = state();
		for (_, node) in s.graph.nodes() {
			let (x, y) = s.graph_to_screen(node.x, node.y);
			assert!((0.0..=800.0).contains(&x), "{} x={}", node.id, x);
			assert!((0.0..=600.0).contains(&y), "{} y={}", node.id, y);
		}
	}

	#[test]
	fn screen_and_graph_coordinates_round_trip() {
		let mut s = state();
		s.zoom_at(123.0, 45.0, true);
		let (gx, gy) = s.screen_to_graph(321.0, 210.0);
		let (sx, sy) = s.graph_to_screen(gx, gy);
		assert!((sx - 321.0).abs() < 1e-9 && (sy - 210.0).abs() < 1e-9);
	}

	#[test]
	fn hit_test_finds_center_node() {
		let s = state();
		let hit = s.node_at_position(400.0, 300.0).unwrap();
		assert_eq!(s.graph.node(hit).id, "immigrants");
		assert_eq!(s.node_at_position(2.0, 2.0), None);
	}

	#[test]
	fn hit_test_prefers_highlighted_node_drawn_on_top() {
		let mut s = state();
		let otso = s.graph.node_by_id("otso").unwrap();
		let migri = s.graph.node_by_id("migri").unwrap();
		s.graph.set_position(otso, 1000.0, 1000.0);
		s.graph.set_position(migri, 1000.0, 1000.0);
		let (x, y) = s.graph_to_screen(1000.0, 1000.0);

		assert_eq!(s.node_at_position(x, y), Some(migri));
		s.set_hover(Some(otso));
		assert!(!s.graph.node(migri).highlighted);
		assert_eq!(s.node_at_position(x, y), Some(otso));
	}

	#[test]
	fn panel_follows_hovered_node() {
		let mut s = state();
		assert!(s.panel_view().is_none());
		assert!(s.handle_key(KeyCommand::FocusHome));
		assert_eq!(s.hovered_id(), Some("immigrants"));
		let view = s.panel_view().unwrap();
		assert_eq!(view.info.title, "Immigrants");
		assert_eq!(view.anchor, (400.0, 300.0));
		assert_eq!(view.bounds, (800.0, 600.0));

		s.begin_pan(0.0, 0.0);
		assert!(s.pan_to(10.0, -5.0));
		s.end_pan();
		assert_eq!(s.panel_view().unwrap().anchor, (410.0, 295.0));
		assert!(!s.pan_to(50.0, 50.0));
	}

	#[test]
	fn tick_only_moves_nodes_while_layout_runs() {
		let mut s = state();
		assert!(!s.tick());
		s.start_layout();
		assert!(s.tick());
		s.stop_layout();
		assert!(!s.tick());
	}

	#[test]
	fn resize_refits_view() {
		let mut s = state();
		s.resize(400.0, 1000.0);
		assert_eq!((s.transform.x, s.transform.y), (200.0, 500.0));
		assert!((s.transform.k - (200.0 - 60.0) / 300.0).abs() < 1e-9);
	}
}
