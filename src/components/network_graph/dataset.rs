//! The fixed Tapio network: the immigrants hub orchestrating the agents,
//! Finnish organizations and the immigrant needs they serve.

use super::types::{EdgeCategory, EdgeSpec, NetworkData, NodeCategory, NodeSpec};

/// The center node. Also focused by the keyboard shortcut.
pub const HOME_NODE: &str = "immigrants";

const AGENTS: &[(&str, &str, &str)] = &[
	("ilmarinen", "Ilmarinen", "Immigration Documents"),
	("sampo", "Sampo", "Employment"),
	("pellervo", "Pellervo", "Entrepreneurship"),
	("rauni", "Rauni", "Social Benefits"),
	("otso", "Otso", "Housing"),
	("agricola", "Agricola", "Education & Language"),
	("louhi", "Louhi", "Cultural Integration"),
	("mielikki", "Mielikki", "Healthcare"),
	("lempi", "Lempi", "Mental Wellbeing"),
];

const ORGANIZATIONS: &[(&str, &str, &str)] = &[
	("migri", "Migri", "Immigration Service"),
	("te", "TE Services", "Employment"),
	("kela", "Kela", "Social Security"),
	("dvv", "DVV", "Digital Services"),
	("vero", "Vero", "Taxation"),
	("municipalities", "Municipalities", "Local Services"),
	("thl", "THL", "Health & Welfare"),
	("opetus", "OPH", "Education"),
];

/// (need id, label, serving agent)
const NEEDS: &[(&str, &str, &str)] = &[
	("docs", "Residence Permits", "ilmarinen"),
	("work", "Finding Work", "sampo"),
	("business", "Starting Business", "pellervo"),
	("benefits", "Social Benefits", "rauni"),
	("housing", "Finding Housing", "otso"),
	("language", "Language Learning", "agricola"),
	("culture", "Cultural Understanding", "louhi"),
	("health", "Healthcare Access", "mielikki"),
	("mental", "Mental Health", "lempi"),
];

/// (agent, organization)
const KNOWLEDGE: &[(&str, &str)] = &[
	("ilmarinen", "migri"),
	("ilmarinen", "dvv"),
	("sampo", "te"),
	("sampo", "vero"),
	("pellervo", "te"),
	("pellervo", "vero"),
	("rauni", "kela"),
	("rauni", "municipalities"),
	("otso", "municipalities"),
	("otso", "kela"),
	("agricola", "opetus"),
	("agricola", "te"),
	("louhi", "municipalities"),
	("mielikki", "thl"),
	("mielikki", "kela"),
	("lempi", "thl"),
];

/// Builds the network dataset. Deterministic: every call returns equal data.
pub fn build_network() -> NetworkData {
	let mut nodes = vec![NodeSpec::new(HOME_NODE, "Immigrants", NodeCategory::Center)];
	nodes.extend(AGENTS.iter().map(|&(id, label, area)| {
		NodeSpec::new(id, label, NodeCategory::Agent { area: area.into() })
	}));
	nodes.extend(ORGANIZATIONS.iter().map(|&(id, label, area)| {
		NodeSpec::new(id, label, NodeCategory::Organization { area: area.into() })
	}));
	nodes.extend(
		NEEDS
			.iter()
			.map(|&(id, label, _)| NodeSpec::new(id, label, NodeCategory::Need)),
	);

	let mut edges = Vec::new();
	edges.extend(
		NEEDS
			.iter()
			.map(|&(need, _, _)| EdgeSpec::new(HOME_NODE, need, EdgeCategory::ImmigrantNeeds)),
	);
	edges.extend(
		AGENTS
			.iter()
			.map(|&(id, _, _)| EdgeSpec::new(HOME_NODE, id, EdgeCategory::Coordination)),
	);
	edges.extend(
		KNOWLEDGE
			.iter()
			.map(|&(agent, org)| EdgeSpec::new(agent, org, EdgeCategory::Knowledge)),
	);
	edges.extend(
		NEEDS
			.iter()
			.map(|&(need, _, agent)| EdgeSpec::new(need, agent, EdgeCategory::Service)),
	);

	NetworkData { nodes, edges }
}

#[cfg(test)]
mod tests {
	use std::collections::{HashMap, HashSet};

	use super::*;

	fn count_nodes(data: &NetworkData, pred: impl Fn(&NodeCategory) -> bool) -> usize {
		data.nodes.iter().filter(|n| pred(&n.category)).count()
	}

	#[test]
	fn category_distribution_is_fixed() {
		let data = build_network();
		assert_eq!(data.nodes.len(), 27);
		assert_eq!(count_nodes(&data, |c| *c == NodeCategory::Center), 1);
		assert_eq!(count_nodes(&data, NodeCategory::is_agent), 9);
		assert_eq!(
			count_nodes(&data, |c| matches!(c, NodeCategory::Organization { .. })),
			8
		);
		assert_eq!(count_nodes(&data, |c| *c == NodeCategory::Need), 9);

		let per_category: HashMap<EdgeCategory, usize> =
			data.edges.iter().fold(HashMap::new(), |mut acc, e| {
				*acc.entry(e.category).or_default() += 1;
				acc
			});
		assert_eq!(per_category[&EdgeCategory::ImmigrantNeeds], 9);
		assert_eq!(per_category[&EdgeCategory::Coordination], 9);
		assert_eq!(per_category[&EdgeCategory::Knowledge], 16);
		assert_eq!(per_category[&EdgeCategory::Service], 9);
	}

	#[test]
	fn building_twice_yields_identical_data() {
		assert_eq!(build_network(), build_network());
	}

	#[test]
	fn node_ids_are_unique_and_edges_reference_them() {
		let data = build_network();
		let ids: HashSet<&str> = data.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids.len(), data.nodes.len());
		for edge in &data.edges {
			assert!(ids.contains(edge.source.as_str()), "{}", edge.source);
			assert!(ids.contains(edge.target.as_str()), "{}", edge.target);
		}
	}

	#[test]
	fn each_need_is_served_by_exactly_one_agent() {
		let data = build_network();
		let agents: HashSet<&str> = data
			.nodes
			.iter()
			.filter(|n| n.category.is_agent())
			.map(|n| n.id.as_str())
			.collect();
		for need in data.nodes.iter().filter(|n| n.category == NodeCategory::Need) {
			let served_by = data
				.edges
				.iter()
				.filter(|e| e.category == EdgeCategory::Service && e.source == need.id)
				.filter(|e| agents.contains(e.target.as_str()))
				.count();
			assert_eq!(served_by, 1, "need {}", need.id);
		}
	}

	#[test]
	fn every_agent_knows_an_organization() {
		let data = build_network();
		let organizations: HashSet<&str> = data
			.nodes
			.iter()
			.filter(|n| matches!(n.category, NodeCategory::Organization { .. }))
			.map(|n| n.id.as_str())
			.collect();
		let orgless: Vec<&str> = data
			.nodes
			.iter()
			.filter(|n| n.category.is_agent())
			.filter(|agent| {
				!data.edges.iter().any(|e| {
					e.category == EdgeCategory::Knowledge
						&& e.source == agent.id
						&& organizations.contains(e.target.as_str())
				})
			})
			.map(|n| n.id.as_str())
			.collect();
		assert!(orgless.is_empty(), "agents without an organization: {:?}", orgless);
	}

	#[test]
	fn center_orchestrates_every_agent() {
		let data = build_network();
		let coordinated: HashSet<&str> = data
			.edges
			.iter()
			.filter(|e| e.category == EdgeCategory::Coordination)
			.inspect(|e| assert_eq!(e.source, HOME_NODE))
			.map(|e| e.target.as_str())
			.collect();
		let agents: HashSet<&str> = data
			.nodes
			.iter()
			.filter(|n| n.category.is_agent())
			.map(|n| n.id.as_str())
			.collect();
		assert_eq!(coordinated, agents);
	}

	#[test]
	fn baseline_style_follows_category() {
		let data = build_network();
		for node in &data.nodes {
			assert_eq!(node.color, node.category.base_color());
			assert_eq!(node.size, node.category.base_size());
		}
		for edge in &data.edges {
			assert_eq!(edge.color, edge.category.base_color());
		}
	}
}
