//! Append-only graph container with per-node incidence lists.

use std::collections::HashMap;

use thiserror::Error;

use super::types::{EDGE_BASE_SIZE, EdgeCategory, NetworkData, NodeCategory, NodeSpec};

/// Position of a node in insertion order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(usize);

impl NodeIdx {
	/// Raw insertion index.
	pub fn index(self) -> usize {
		self.0
	}
}

/// Position of an edge in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeIdx(usize);

/// Rejected graph mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// A node with this id was already added.
	#[error("node `{0}` already exists")]
	DuplicateNode(String),
	/// An edge endpoint does not name an existing node.
	#[error("edge {from} -> {to} references unknown node `{missing}`")]
	UnknownNode {
		/// Source id of the rejected edge.
		from: String,
		/// Target id of the rejected edge.
		to: String,
		/// The id that was not found.
		missing: String,
	},
}

/// A node as stored in the graph.
#[derive(Clone, Debug)]
pub struct Node {
	/// Unique identifier.
	pub id: String,
	/// Display name.
	pub label: String,
	/// Semantic category.
	pub category: NodeCategory,
	/// Baseline radius.
	pub size: f64,
	/// Baseline fill color.
	pub color: String,
	/// Horizontal position in graph units.
	pub x: f64,
	/// Vertical position in graph units.
	pub y: f64,
	/// Part of the hovered neighbourhood.
	pub highlighted: bool,
}

/// An edge as stored in the graph.
#[derive(Clone, Debug)]
pub struct Edge {
	/// Source endpoint.
	pub source: NodeIdx,
	/// Target endpoint.
	pub target: NodeIdx,
	/// Semantic category.
	pub category: EdgeCategory,
	/// Baseline stroke color.
	pub color: String,
	/// Baseline width.
	pub size: f64,
	/// Incident to the hovered node.
	pub highlighted: bool,
}

impl Edge {
	/// True when `idx` is either endpoint.
	pub fn touches(&self, idx: NodeIdx) -> bool {
		self.source == idx || self.target == idx
	}
}

/// Graph container. Nodes and edges are only ever appended; after assembly
/// the highlight flags and positions are the only mutable state.
#[derive(Clone, Debug, Default)]
pub struct NetworkGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	ids: HashMap<String, NodeIdx>,
	incident: Vec<Vec<EdgeIdx>>,
}

impl NetworkGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Assembles a graph from a dataset, stopping at the first bad entry.
	pub fn from_data(data: &NetworkData) -> Result<Self, GraphError> {
		let mut graph = Self::new();
		for node in &data.nodes {
			graph.add_node(node.clone())?;
		}
		for edge in &data.edges {
			graph.add_edge(&edge.source, &edge.target, edge.category, &edge.color)?;
		}
		Ok(graph)
	}

	pub fn add_node(&mut self, spec: NodeSpec) -> Result<NodeIdx, GraphError> {
		if self.ids.contains_key(&spec.id) {
			return Err(GraphError::DuplicateNode(spec.id));
		}
		let idx = NodeIdx(self.nodes.len());
		self.ids.insert(spec.id.clone(), idx);
		self.nodes.push(Node {
			id: spec.id,
			label: spec.label,
			category: spec.category,
			size: spec.size,
			color: spec.color,
			x: 0.0,
			y: 0.0,
			highlighted: false,
		});
		self.incident.push(Vec::new());
		Ok(idx)
	}

	pub fn add_edge(
		&mut self,
		source: &str,
		target: &str,
		category: EdgeCategory,
		color: &str,
	) -> Result<EdgeIdx, GraphError> {
		let lookup = |id: &str| {
			self.node_by_id(id).ok_or_else(|| GraphError::UnknownNode {
				from: source.into(),
				to: target.into(),
				missing: id.into(),
			})
		};
		let (src, tgt) = (lookup(source)?, lookup(target)?);

		let idx = EdgeIdx(self.edges.len());
		self.edges.push(Edge {
			source: src,
			target: tgt,
			category,
			color: color.into(),
			size: EDGE_BASE_SIZE,
			highlighted: false,
		});
		self.incident[src.0].push(idx);
		if src != tgt {
			self.incident[tgt.0].push(idx);
		}
		Ok(idx)
	}

	pub fn node_by_id(&self, id: &str) -> Option<NodeIdx> {
		self.ids.get(id).copied()
	}

	pub fn node(&self, idx: NodeIdx) -> &Node {
		&self.nodes[idx.0]
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node)> {
		self.nodes.iter().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	pub fn nodes_mut(&mut self) -> impl Iterator<Item = (NodeIdx, &mut Node)> {
		self.nodes.iter_mut().enumerate().map(|(i, n)| (NodeIdx(i), n))
	}

	pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &Edge)> {
		self.edges.iter().enumerate().map(|(i, e)| (EdgeIdx(i), e))
	}

	/// Distinct nodes sharing an edge with `idx`, in either direction.
	pub fn neighbors(&self, idx: NodeIdx) -> Vec<NodeIdx> {
		let mut out: Vec<NodeIdx> = self.incident[idx.0]
			.iter()
			.map(|&e| {
				let edge = &self.edges[e.0];
				if edge.source == idx { edge.target } else { edge.source }
			})
			.filter(|&n| n != idx)
			.collect();
		out.sort_unstable();
		out.dedup();
		out
	}

	pub fn neighbor_count(&self, idx: NodeIdx) -> usize {
		self.neighbors(idx).len()
	}

	pub fn clear_highlights(&mut self) {
		self.nodes.iter_mut().for_each(|n| n.highlighted = false);
		self.edges.iter_mut().for_each(|e| e.highlighted = false);
	}

	/// Flags `idx`, its neighbours and every edge incident to it.
	pub fn highlight_neighborhood(&mut self, idx: NodeIdx) {
		self.nodes[idx.0].highlighted = true;
		for &e in &self.incident[idx.0] {
			let edge = &mut self.edges[e.0];
			edge.highlighted = true;
			let other = if edge.source == idx { edge.target } else { edge.source };
			self.nodes[other.0].highlighted = true;
		}
	}

	pub fn set_position(&mut self, idx: NodeIdx, x: f64, y: f64) {
		let node = &mut self.nodes[idx.0];
		node.x = x;
		node.y = y;
	}
}
