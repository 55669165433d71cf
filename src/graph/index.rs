//! Adjacency indexes: for every node, its neighbors by direction.

use std::collections::HashMap;

use super::model::Graph;
use super::types::NodeId;

/// An edge seen from one endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeRef {
	/// Position in [`Graph::edges`].
	pub index: usize,
	/// Edge weight.
	pub weight: f64,
}

/// Neighbor id to the edges linking it, in edge order.
pub type Neighborhood = HashMap<NodeId, Vec<EdgeRef>>;

/// Read-only neighbor lookups.
///
/// Every node known to the index answers `Some`, possibly empty; unknown ids
/// answer `None`.
pub trait GraphIndex {
	/// Neighbors reachable through an edge in either direction.
	fn all_neighbors(&self, id: &str) -> Option<&Neighborhood>;
	/// Neighbors with an edge pointing at `id`.
	fn in_neighbors(&self, id: &str) -> Option<&Neighborhood>;
	/// Neighbors `id` points at.
	fn out_neighbors(&self, id: &str) -> Option<&Neighborhood>;
}

/// Hash-map backed [`GraphIndex`], built once after load.
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
	all: HashMap<NodeId, Neighborhood>,
	inbound: HashMap<NodeId, Neighborhood>,
	outbound: HashMap<NodeId, Neighborhood>,
}

impl AdjacencyIndex {
	/// Index every node and edge of `graph`.
	pub fn build(graph: &Graph) -> Self {
		let mut index = Self::default();
		for node in graph.nodes() {
			index.all.insert(node.id.clone(), Neighborhood::new());
			index.inbound.insert(node.id.clone(), Neighborhood::new());
			index.outbound.insert(node.id.clone(), Neighborhood::new());
		}
		for (i, edge) in graph.edges().iter().enumerate() {
			let edge_ref = EdgeRef {
				index: i,
				weight: edge.weight,
			};
			link(&mut index.outbound, &edge.source, &edge.target, edge_ref);
			link(&mut index.inbound, &edge.target, &edge.source, edge_ref);
			link(&mut index.all, &edge.source, &edge.target, edge_ref);
			if !edge.is_self_loop() {
				link(&mut index.all, &edge.target, &edge.source, edge_ref);
			}
		}
		index
	}

	/// Number of indexed nodes.
	pub fn len(&self) -> usize {
		self.all.len()
	}

	/// Whether nothing is indexed.
	pub fn is_empty(&self) -> bool {
		self.all.is_empty()
	}
}

fn link(map: &mut HashMap<NodeId, Neighborhood>, from: &NodeId, to: &NodeId, edge: EdgeRef) {
	map.entry(from.clone())
		.or_default()
		.entry(to.clone())
		.or_default()
		.push(edge);
}

impl GraphIndex for AdjacencyIndex {
	fn all_neighbors(&self, id: &str) -> Option<&Neighborhood> {
		self.all.get(id)
	}

	fn in_neighbors(&self, id: &str) -> Option<&Neighborhood> {
		self.inbound.get(id)
	}

	fn out_neighbors(&self, id: &str) -> Option<&Neighborhood> {
		self.outbound.get(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ViewerSettings;
	use serde_json::json;

	fn index(edges: serde_json::Value) -> AdjacencyIndex {
		let data = serde_json::from_value(json!({
			"nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}, {"id": "lonely"}],
			"edges": edges
		}))
		.unwrap();
		AdjacencyIndex::build(&Graph::from_data(data, &ViewerSettings::default()))
	}

	#[test]
	fn indexes_both_directions() {
		let idx = index(json!([
			{"source": "a", "target": "b", "weight": 1},
			{"source": "c", "target": "a", "weight": 2}
		]));
		let all = idx.all_neighbors("a").unwrap();
		assert_eq!(all.len(), 2);
		assert!(idx.out_neighbors("a").unwrap().contains_key("b"));
		assert!(idx.in_neighbors("a").unwrap().contains_key("c"));
		assert!(idx.in_neighbors("b").unwrap().contains_key("a"));
		assert_eq!(idx.in_neighbors("a").unwrap()["c"][0].weight, 2.0);
	}

	#[test]
	fn isolated_and_unknown_nodes() {
		let idx = index(json!([]));
		assert_eq!(idx.len(), 4);
		assert!(idx.all_neighbors("lonely").unwrap().is_empty());
		assert!(idx.all_neighbors("nobody").is_none());
	}

	#[test]
	fn parallel_edges_keep_file_order() {
		let idx = index(json!([
			{"source": "a", "target": "b", "weight": 7},
			{"source": "a", "target": "b", "weight": 3},
			{"source": "a", "target": "a", "weight": 9}
		]));
		let to_b = &idx.out_neighbors("a").unwrap()["b"];
		assert_eq!(to_b.iter().map(|e| e.weight).collect::<Vec<_>>(), [7.0, 3.0]);
		assert_eq!(idx.all_neighbors("a").unwrap()["a"].len(), 1);
		assert!(idx.in_neighbors("a").unwrap().contains_key("a"));
	}
}
