//! Hover state machine, info panel content and panel placement.

use log::debug;

use super::dataset::HOME_NODE;
use super::graph::{NetworkGraph, Node, NodeIdx};
use super::types::NodeCategory;

/// Rendered width of the info panel.
pub const PANEL_WIDTH: f64 = 250.0;
/// Minimum gap between the panel and the container edges.
pub const PANEL_PADDING: f64 = 20.0;
/// Horizontal gap between the hovered node and the panel.
pub const PANEL_OFFSET: f64 = 10.0;
/// Used until the panel has been laid out once.
pub const PANEL_FALLBACK_HEIGHT: f64 = 120.0;

/// Whether some node is currently hovered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
	/// Nothing hovered, nothing highlighted.
	#[default]
	Idle,
	/// The node and its neighbourhood are highlighted.
	Hovering(NodeIdx),
}

/// Keys handled by the focused diagram container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
	/// Tab: hover the home node.
	FocusHome,
	/// Escape: back to `Idle`.
	Clear,
}

impl KeyCommand {
	/// Maps a `KeyboardEvent.key` value. Shift+Tab keeps its usual meaning.
	pub fn from_key(key: &str, shift: bool) -> Option<Self> {
		match key {
			"Tab" if !shift => Some(KeyCommand::FocusHome),
			"Escape" => Some(KeyCommand::Clear),
			_ => None,
		}
	}
}

/// Owns the currently hovered node and keeps the graph's highlight flags in
/// sync with it.
#[derive(Clone, Debug, Default)]
pub struct HoverController {
	state: HoverState,
}

impl HoverController {
	/// Starts `Idle`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Current state.
	pub fn state(&self) -> HoverState {
		self.state
	}

	/// Hovered node, if any.
	pub fn hovered(&self) -> Option<NodeIdx> {
		match self.state {
			HoverState::Idle => None,
			HoverState::Hovering(idx) => Some(idx),
		}
	}

	/// Moves to `Hovering(node)` or `Idle`. Returns false when nothing changed.
	pub fn set_hovered(&mut self, graph: &mut NetworkGraph, node: Option<NodeIdx>) -> bool {
		if self.hovered() == node {
			return false;
		}
		graph.clear_highlights();
		self.state = match node {
			Some(idx) => {
				graph.highlight_neighborhood(idx);
				debug!("network: hovering {}", graph.node(idx).id);
				HoverState::Hovering(idx)
			}
			None => {
				debug!("network: hover cleared");
				HoverState::Idle
			}
		};
		true
	}

	/// Keyboard entry point: hovers the home node.
	pub fn focus_home(&mut self, graph: &mut NetworkGraph) -> bool {
		let home = graph.node_by_id(HOME_NODE);
		if home.is_none() {
			debug!("network: home node `{}` missing", HOME_NODE);
			return false;
		}
		self.set_hovered(graph, home)
	}

	/// Applies a key command. Returns true when the hover changed, in which
	/// case the key press should not also move browser focus.
	pub fn handle_key(&mut self, graph: &mut NetworkGraph, command: KeyCommand) -> bool {
		match command {
			KeyCommand::FocusHome => self.focus_home(graph),
			KeyCommand::Clear => self.set_hovered(graph, None),
		}
	}

	/// Panel content for the hovered node.
	pub fn info_panel(&self, graph: &NetworkGraph) -> Option<InfoPanel> {
		self.hovered()
			.map(|idx| InfoPanel::describe(graph.node(idx), graph.neighbor_count(idx)))
	}
}

/// Text shown in the details panel for the hovered node.
#[derive(Clone, Debug, PartialEq)]
pub struct InfoPanel {
	/// Node label.
	pub title: String,
	/// Category line under the title.
	pub subtitle: String,
	/// One-sentence description.
	pub description: String,
	/// CSS class for the subtitle accent.
	pub accent: &'static str,
	/// Number of distinct neighbours.
	pub connections: usize,
}

impl InfoPanel {
	/// Fills the category template for `node`.
	pub fn describe(node: &Node, connections: usize) -> Self {
		let (subtitle, description, accent) = match &node.category {
			NodeCategory::Center => (
				"Immigrant community".to_owned(),
				"Orchestrates the agents that help with every need",
				"text-purple-600",
			),
			NodeCategory::Agent { area } => (
				format!("Specialist in {}", area),
				"Connects needs with Finnish organizations",
				"text-blue-600",
			),
			NodeCategory::Organization { area } => (
				area.clone(),
				"Official Finnish organization",
				"text-green-600",
			),
			NodeCategory::Need => (
				"Immigrant Need".to_owned(),
				"Hover to see which agents can help with this need",
				"text-yellow-600",
			),
		};
		Self {
			title: node.label.clone(),
			subtitle,
			description: description.to_owned(),
			accent,
			connections,
		}
	}

	/// `None` for an isolated node.
	pub fn connections_text(&self) -> Option<String> {
		match self.connections {
			0 => None,
			1 => Some("Connected to 1 node".to_owned()),
			n => Some(format!("Connected to {} nodes", n)),
		}
	}
}

/// Top-left corner for the panel next to `anchor`, kept inside `bounds`.
/// Prefers the right of the anchor and flips left when that would overflow.
pub fn place_panel(anchor: (f64, f64), panel: (f64, f64), bounds: (f64, f64)) -> (f64, f64) {
	let (ax, ay) = anchor;
	let (pw, ph) = panel;
	let (bw, bh) = bounds;

	let mut left = ax + PANEL_OFFSET;
	if left + pw > bw - PANEL_PADDING {
		left = ax - pw - PANEL_OFFSET;
	}
	left = clamp_lenient(left, PANEL_PADDING, bw - pw - PANEL_PADDING);

	let top = clamp_lenient(ay - ph / 2.0, PANEL_PADDING, bh - ph - PANEL_PADDING);
	(left, top)
}

// Like f64::clamp, but the lower bound wins when the range is empty.
fn clamp_lenient(value: f64, min: f64, max: f64) -> f64 {
	value.min(max).max(min)
}
