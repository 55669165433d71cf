//! Neighbor classification for a clicked node.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::index::{EdgeRef, GraphIndex, Neighborhood};
use super::model::Graph;
use super::types::NodeId;

/// A node's neighbors split by edge direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborClasses {
	/// Linked both ways.
	pub mutual: HashSet<NodeId>,
	/// Only pointing at the node.
	pub in_only: HashSet<NodeId>,
	/// Only pointed at by the node.
	pub out_only: HashSet<NodeId>,
}

impl NeighborClasses {
	/// Total number of neighbors.
	pub fn len(&self) -> usize {
		self.mutual.len() + self.in_only.len() + self.out_only.len()
	}

	/// Whether the node has no neighbors.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Every neighbor regardless of class.
	pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
		self.mutual
			.iter()
			.chain(&self.in_only)
			.chain(&self.out_only)
	}
}

/// Weighted neighbors of a node, as shown for the post-sharing graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sharings {
	/// Weight of the node's own self-loop, zero without one.
	pub self_sharing: f64,
	/// Neighbors with an inbound edge, mutual ones included.
	pub in_sharing: HashMap<NodeId, f64>,
	/// Neighbors reached only outbound.
	pub out_sharing: HashMap<NodeId, f64>,
}

/// Sharings of one group.
#[derive(Clone, Debug, PartialEq)]
pub struct SharingGroup {
	/// Group tag.
	pub group: String,
	/// Sum of the members' weights.
	pub total: f64,
	/// Members, heaviest first.
	pub members: Vec<(NodeId, f64)>,
}

/// Sharings grouped for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SharingSummary {
	/// Sum over all groups.
	pub total: f64,
	/// Groups, heaviest first.
	pub groups: Vec<SharingGroup>,
}

/// Split `id`'s neighbors into mutual, in-only and out-only.
///
/// Unknown ids have no neighbors. A self-loop makes the node its own mutual
/// neighbor.
pub fn classify<I: GraphIndex + ?Sized>(index: &I, id: &str) -> NeighborClasses {
	let empty = Neighborhood::new();
	let all = index.all_neighbors(id).unwrap_or(&empty);
	let inbound = index.in_neighbors(id).unwrap_or(&empty);
	let outbound = index.out_neighbors(id).unwrap_or(&empty);

	let mut classes = NeighborClasses::default();
	for k in all.keys() {
		match (inbound.contains_key(k), outbound.contains_key(k)) {
			(true, true) => classes.mutual.insert(k.clone()),
			(true, false) => classes.in_only.insert(k.clone()),
			(false, true) => classes.out_only.insert(k.clone()),
			(false, false) => false,
		};
	}
	classes
}

/// Every neighbor of `id`, in either direction.
pub fn neighbors<I: GraphIndex + ?Sized>(index: &I, id: &str) -> HashSet<NodeId> {
	index
		.all_neighbors(id)
		.map(|all| all.keys().cloned().collect())
		.unwrap_or_default()
}

fn first_weight(edges: Option<&Vec<EdgeRef>>) -> f64 {
	edges
		.and_then(|edges| edges.first())
		.map(|edge| edge.weight)
		.unwrap_or(0.0)
}

/// Weighted variant of [`classify`].
///
/// The self-loop is reported apart from the other neighbors. A neighbor linked
/// both ways counts as inbound. Each weight is the one of the first linking
/// edge in file order.
pub fn classify_sharings<I: GraphIndex + ?Sized>(index: &I, id: &str) -> Sharings {
	let empty = Neighborhood::new();
	let all = index.all_neighbors(id).unwrap_or(&empty);
	let inbound = index.in_neighbors(id).unwrap_or(&empty);
	let outbound = index.out_neighbors(id).unwrap_or(&empty);

	let mut sharings = Sharings::default();
	for k in all.keys() {
		if k.as_str() == id {
			sharings.self_sharing = first_weight(inbound.get(k));
		} else if let Some(edges) = inbound.get(k) {
			sharings.in_sharing.insert(k.clone(), first_weight(Some(edges)));
		} else if let Some(edges) = outbound.get(k) {
			sharings.out_sharing.insert(k.clone(), first_weight(Some(edges)));
		}
	}
	sharings
}

fn heavier_first(a: f64, b: f64) -> Ordering {
	b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Group weighted neighbors by group tag. Neighbors missing from `graph` are skipped.
pub fn summarize_sharings(sharings: &HashMap<NodeId, f64>, graph: &Graph) -> SharingSummary {
	let mut by_group: HashMap<&str, Vec<(NodeId, f64)>> = HashMap::new();
	for (id, &weight) in sharings {
		if let Some(node) = graph.node(id.as_str()) {
			by_group
				.entry(node.group.as_str())
				.or_default()
				.push((id.clone(), weight));
		}
	}

	let mut groups: Vec<SharingGroup> = by_group
		.into_iter()
		.map(|(group, mut members)| {
			members.sort_by(|a, b| heavier_first(a.1, b.1).then_with(|| a.0.cmp(&b.0)));
			SharingGroup {
				group: group.to_owned(),
				total: members.iter().map(|(_, w)| w).sum(),
				members,
			}
		})
		.collect();
	groups.sort_by(|a, b| heavier_first(a.total, b.total).then_with(|| a.group.cmp(&b.group)));

	SharingSummary {
		total: groups.iter().map(|g| g.total).sum(),
		groups,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ViewerSettings;
	use crate::graph::index::AdjacencyIndex;
	use serde_json::json;

	fn fixture(edges: serde_json::Value) -> (Graph, AdjacencyIndex) {
		let data = serde_json::from_value(json!({
			"nodes": [
				{"id": "A", "group": "red"},
				{"id": "B", "group": "blue"},
				{"id": "C", "group": "red"},
				{"id": "D", "group": "blue-sub"}
			],
			"edges": edges
		}))
		.unwrap();
		let graph = Graph::from_data(data, &ViewerSettings::default());
		let index = AdjacencyIndex::build(&graph);
		(graph, index)
	}

	fn ids(set: &HashSet<NodeId>) -> Vec<&str> {
		let mut v: Vec<&str> = set.iter().map(NodeId::as_str).collect();
		v.sort_unstable();
		v
	}

	#[test]
	fn mutual_in_and_out() {
		let (_, index) = fixture(json!([
			{"source": "A", "target": "B"},
			{"source": "B", "target": "A"},
			{"source": "A", "target": "C"},
			{"source": "D", "target": "A"}
		]));
		let classes = classify(&index, "A");
		assert_eq!(ids(&classes.mutual), ["B"]);
		assert_eq!(ids(&classes.out_only), ["C"]);
		assert_eq!(ids(&classes.in_only), ["D"]);
		assert_eq!(classes.len(), 3);
	}

	#[test]
	fn unknown_node_has_no_neighbors() {
		let (_, index) = fixture(json!([{"source": "A", "target": "B"}]));
		assert!(classify(&index, "nope").is_empty());
		assert!(neighbors(&index, "nope").is_empty());
		assert!(classify_sharings(&index, "nope").in_sharing.is_empty());
	}

	#[test]
	fn self_loop_is_mutual_in_plain_classification() {
		let (_, index) = fixture(json!([{"source": "A", "target": "A"}]));
		assert_eq!(ids(&classify(&index, "A").mutual), ["A"]);
	}

	#[test]
	fn sharings_split_self_loop_and_weights() {
		let (_, index) = fixture(json!([
			{"source": "A", "target": "A", "weight": 4},
			{"source": "A", "target": "A", "weight": 1},
			{"source": "B", "target": "A", "weight": 2},
			{"source": "A", "target": "B", "weight": 5},
			{"source": "A", "target": "C", "weight": 3}
		]));
		let sharings = classify_sharings(&index, "A");
		assert_eq!(sharings.self_sharing, 4.0);
		assert_eq!(sharings.in_sharing.len(), 1);
		assert_eq!(sharings.in_sharing["B"], 2.0);
		assert_eq!(sharings.out_sharing.len(), 1);
		assert_eq!(sharings.out_sharing["C"], 3.0);
	}

	#[test]
	fn summary_orders_groups_and_members() {
		let (graph, _) = fixture(json!([]));
		let sharings: HashMap<NodeId, f64> = [("A", 1.0), ("C", 5.0), ("B", 4.0), ("D", 9.0)]
			.into_iter()
			.map(|(id, w)| (NodeId::from(id), w))
			.collect();
		let summary = summarize_sharings(&sharings, &graph);
		assert_eq!(summary.total, 19.0);
		let groups: Vec<&str> = summary.groups.iter().map(|g| g.group.as_str()).collect();
		assert_eq!(groups, ["blue-sub", "red", "blue"]);
		let red = &summary.groups[1];
		assert_eq!(red.total, 6.0);
		assert_eq!(red.members[0], (NodeId::from("C"), 5.0));
		assert_eq!(red.members[1], (NodeId::from("A"), 1.0));
	}
}
