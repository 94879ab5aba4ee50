//! Typed node and edge descriptions fed into the graph assembler.

/// Semantic category of a node. Drives layout rings, styling and the info panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeCategory {
	/// The immigrants hub. Orchestrates the agents and owns every need.
	Center,
	/// An AI agent covering one service area.
	Agent {
		/// Service area shown under the label.
		area: String,
	},
	/// A Finnish public organization.
	Organization {
		/// What the organization is responsible for.
		area: String,
	},
	/// Something an immigrant needs help with.
	Need,
}

impl NodeCategory {
	/// Baseline fill color.
	pub fn base_color(&self) -> &'static str {
		match self {
			NodeCategory::Center => "#8B5CF6",
			NodeCategory::Agent { .. } => "#3B82F6",
			NodeCategory::Organization { .. } => "#10B981",
			NodeCategory::Need => "#F59E0B",
		}
	}

	/// Baseline radius in graph units.
	pub fn base_size(&self) -> f64 {
		match self {
			NodeCategory::Center => 18.0,
			NodeCategory::Agent { .. } => 10.0,
			NodeCategory::Organization { .. } => 8.0,
			NodeCategory::Need => 7.0,
		}
	}

	/// Ring index used by the concentric placement.
	pub fn ring(&self) -> usize {
		match self {
			NodeCategory::Center => 0,
			NodeCategory::Need => 1,
			NodeCategory::Agent { .. } => 2,
			NodeCategory::Organization { .. } => 3,
		}
	}

	/// True for every agent node.
	pub fn is_agent(&self) -> bool {
		matches!(self, NodeCategory::Agent { .. })
	}
}

/// Semantic category of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeCategory {
	/// Center hub to an agent it orchestrates.
	Coordination,
	/// Agent to the organization whose services it knows.
	Knowledge,
	/// Need to the agent that serves it.
	Service,
	/// Center hub to a need.
	ImmigrantNeeds,
}

impl EdgeCategory {
	/// Baseline stroke color.
	pub fn base_color(self) -> &'static str {
		match self {
			EdgeCategory::Coordination => "#3B82F6",
			EdgeCategory::Knowledge => "#6B7280",
			EdgeCategory::Service => "#F59E0B",
			EdgeCategory::ImmigrantNeeds => "#8B5CF6",
		}
	}

	/// Thickness multiplier applied by the presentation reducer.
	pub fn draw_scale(self) -> f64 {
		match self {
			EdgeCategory::Coordination => 1.5,
			EdgeCategory::Knowledge => 1.0,
			EdgeCategory::Service | EdgeCategory::ImmigrantNeeds => 1.2,
		}
	}
}

/// Baseline edge thickness before category scaling.
pub const EDGE_BASE_SIZE: f64 = 2.0;

/// A node as authored in the dataset, before it enters the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSpec {
	/// Unique identifier. Edges reference nodes by this id.
	pub id: String,
	/// Display name.
	pub label: String,
	/// Semantic category.
	pub category: NodeCategory,
	/// Baseline radius.
	pub size: f64,
	/// Baseline fill color.
	pub color: String,
}

impl NodeSpec {
	/// Builds a node whose size and color follow its category.
	pub fn new(id: &str, label: &str, category: NodeCategory) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			size: category.base_size(),
			color: category.base_color().into(),
			category,
		}
	}
}

/// An edge between two node ids.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSpec {
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Semantic category.
	pub category: EdgeCategory,
	/// Baseline stroke color.
	pub color: String,
}

impl EdgeSpec {
	/// Builds an edge colored after its category.
	pub fn new(source: &str, target: &str, category: EdgeCategory) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			category,
			color: category.base_color().into(),
		}
	}
}

/// Complete dataset: nodes in insertion order, then edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkData {
	/// Nodes in insertion order.
	pub nodes: Vec<NodeSpec>,
	/// Edges in insertion order.
	pub edges: Vec<EdgeSpec>,
}
