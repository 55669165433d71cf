//! Fade/restore of node and edge colors.

use std::collections::HashSet;

use log::debug;

use super::classify::neighbors;
use super::index::GraphIndex;
use super::model::Graph;
use super::types::NodeId;
use crate::config::GroupFilterExpansion;

/// Whether the graph currently shows its original colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightState {
	/// Every node and edge has its original color.
	#[default]
	Cleared,
	/// Some recoloring is in effect.
	Highlighted,
}

/// How nodes are colored outside of a highlight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
	/// Group colors captured at load.
	#[default]
	Group,
	/// Activity temperature, with every edge faded.
	ActivityIndex,
}

impl ColorMode {
	/// Parse the value of the color select.
	pub fn from_key(key: &str) -> Self {
		match key {
			"activity_index" => Self::ActivityIndex,
			_ => Self::Group,
		}
	}

	/// Value used by the color select.
	pub fn key(self) -> &'static str {
		match self {
			Self::Group => "group",
			Self::ActivityIndex => "activity_index",
		}
	}
}

/// Applies and reverts highlight colors on a [`Graph`].
#[derive(Clone, Debug)]
pub struct Highlighter {
	state: HighlightState,
	fade_color: String,
}

impl Highlighter {
	/// A highlighter in the cleared state.
	pub fn new(fade_color: impl Into<String>) -> Self {
		Self {
			state: HighlightState::Cleared,
			fade_color: fade_color.into(),
		}
	}

	/// Current state.
	pub fn state(&self) -> HighlightState {
		self.state
	}

	/// Color given to faded elements.
	pub fn fade_color(&self) -> &str {
		&self.fade_color
	}

	/// Keep `keep` in original colors and fade everything else.
	///
	/// An edge keeps its color only when both endpoints are kept.
	pub fn apply_highlight(&mut self, graph: &mut Graph, keep: &HashSet<NodeId>) {
		for node in &mut graph.nodes {
			node.color = if keep.contains(&node.id) {
				node.original_color().to_owned()
			} else {
				self.fade_color.clone()
			};
		}
		for edge in &mut graph.edges {
			edge.color = if keep.contains(&edge.source) && keep.contains(&edge.target) {
				edge.original_color().to_owned()
			} else {
				self.fade_color.clone()
			};
		}
		self.state = HighlightState::Highlighted;
		debug!("highlight applied, {} nodes kept", keep.len());
	}

	/// Restore original colors unless they are already shown.
	///
	/// Returns whether anything was rewritten.
	pub fn clear_highlight(&mut self, graph: &mut Graph) -> bool {
		if self.state == HighlightState::Cleared {
			return false;
		}
		self.restore(graph);
		true
	}

	/// Restore original colors unconditionally.
	pub fn restore(&mut self, graph: &mut Graph) {
		for node in &mut graph.nodes {
			node.color = node.original_color().to_owned();
		}
		for edge in &mut graph.edges {
			edge.color = edge.original_color().to_owned();
		}
		self.state = HighlightState::Cleared;
		debug!("highlight cleared");
	}

	/// Switch node coloring.
	pub fn apply_color_mode(&mut self, graph: &mut Graph, mode: ColorMode) {
		match mode {
			ColorMode::Group => self.restore(graph),
			ColorMode::ActivityIndex => {
				for node in &mut graph.nodes {
					node.color = node.activity_color().to_owned();
				}
				for edge in &mut graph.edges {
					edge.color = self.fade_color.clone();
				}
				self.state = HighlightState::Highlighted;
			}
		}
	}
}

/// Whether `group` is `selection` or one of its `-` subgroups.
pub fn group_matches(group: &str, selection: &str) -> bool {
	group == selection
		|| group
			.strip_prefix(selection)
			.is_some_and(|rest| rest.starts_with('-'))
}

/// Nodes kept by a group filter.
pub fn group_keep_set<I: GraphIndex + ?Sized>(
	graph: &Graph,
	index: &I,
	selection: &str,
	expansion: GroupFilterExpansion,
) -> HashSet<NodeId> {
	let mut keep = HashSet::new();
	for node in graph.nodes() {
		if !group_matches(&node.group, selection) {
			continue;
		}
		keep.insert(node.id.clone());
		if expansion == GroupFilterExpansion::WithNeighbors {
			keep.extend(neighbors(index, node.id.as_str()));
		}
	}
	keep
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ViewerSettings;
	use crate::graph::index::AdjacencyIndex;
	use serde_json::json;

	const FADE: &str = "fade";

	fn graph() -> Graph {
		let data = serde_json::from_value(json!({
			"nodes": [
				{"id": "A", "color": "1,0,0", "group": "news"},
				{"id": "B", "color": "0,1,0", "group": "news-local"},
				{"id": "C", "color": "0,0,1", "group": "newsroom", "temp": "hot"}
			],
			"edges": [
				{"source": "A", "target": "B", "color": "1,1,1"},
				{"source": "A", "target": "C", "color": "2,2,2"},
				{"source": "C", "target": "B", "color": "3,3,3"}
			]
		}))
		.unwrap();
		Graph::from_data(data, &ViewerSettings::default())
	}

	fn keep(ids: &[&str]) -> HashSet<NodeId> {
		ids.iter().map(|&id| NodeId::from(id)).collect()
	}

	#[test]
	fn edges_need_both_endpoints() {
		let mut g = graph();
		let mut h = Highlighter::new(FADE);
		h.apply_highlight(&mut g, &keep(&["A", "B"]));
		assert_eq!(h.state(), HighlightState::Highlighted);
		assert_eq!(g.node("A").unwrap().color, "rgb(1,0,0)");
		assert_eq!(g.node("C").unwrap().color, FADE);
		assert_eq!(g.edges()[0].color, "rgba(1,1,1,0.25)");
		assert_eq!(g.edges()[1].color, FADE);
		assert_eq!(g.edges()[2].color, FADE);
	}

	#[test]
	fn clear_is_guarded() {
		let mut g = graph();
		let mut h = Highlighter::new(FADE);
		assert!(!h.clear_highlight(&mut g));
		h.apply_highlight(&mut g, &keep(&[]));
		assert!(h.clear_highlight(&mut g));
		assert!(!h.clear_highlight(&mut g));
		assert!(g.nodes().iter().all(|n| n.color == n.original_color()));
		assert!(g.edges().iter().all(|e| e.color == e.original_color()));
	}

	#[test]
	fn activity_mode_fades_edges() {
		let mut g = graph();
		let mut h = Highlighter::new(FADE);
		h.apply_color_mode(&mut g, ColorMode::ActivityIndex);
		assert_eq!(g.node("C").unwrap().color, "hot");
		assert_eq!(g.node("A").unwrap().color, "rgb(1,0,0)");
		assert!(g.edges().iter().all(|e| e.color == FADE));
		assert!(h.clear_highlight(&mut g));
		assert_eq!(g.node("C").unwrap().color, "rgb(0,0,1)");
	}

	#[test]
	fn group_matching_respects_hierarchy() {
		assert!(group_matches("news", "news"));
		assert!(group_matches("news-local", "news"));
		assert!(!group_matches("newsroom", "news"));
		assert!(!group_matches("new", "news"));
	}

	#[test]
	fn group_keep_set_expansion() {
		let g = graph();
		let index = AdjacencyIndex::build(&g);
		let only = group_keep_set(&g, &index, "news-local", GroupFilterExpansion::GroupOnly);
		assert_eq!(only, keep(&["B"]));
		let wide = group_keep_set(&g, &index, "news-local", GroupFilterExpansion::WithNeighbors);
		assert_eq!(wide, keep(&["A", "B", "C"]));
	}

	#[test]
	fn color_mode_keys() {
		assert_eq!(ColorMode::from_key("activity_index"), ColorMode::ActivityIndex);
		assert_eq!(ColorMode::from_key("anything"), ColorMode::Group);
		assert_eq!(ColorMode::ActivityIndex.key(), "activity_index");
	}
}
