//! The viewer session: everything a UI handler needs, owned in one place.

use std::collections::HashSet;

use log::{debug, info, warn};

use super::classify::{self, NeighborClasses, Sharings};
use super::highlight::{self, ColorMode, HighlightState, Highlighter};
use super::index::AdjacencyIndex;
use super::model::{Graph, INITIAL_SIZE_MEASURE};
use super::search::{self, SearchOutcome};
use super::types::{GraphData, NodeId};
use crate::config::ViewerSettings;
use crate::error::Result;

/// A click on the graph canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickEvent {
	/// A node was clicked.
	Node(NodeId),
	/// Empty space was clicked.
	Stage,
}

/// The clicked node with its classified neighborhood.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSelection {
	/// Clicked node.
	pub id: NodeId,
	/// Neighbors by direction.
	pub neighbors: NeighborClasses,
	/// Weighted neighbors.
	pub sharings: Sharings,
}

impl NodeSelection {
	/// The nodes that stay lit: the clicked node and all its neighbors.
	pub fn keep_set(&self) -> HashSet<NodeId> {
		let mut keep: HashSet<NodeId> = self.neighbors.iter().cloned().collect();
		keep.insert(self.id.clone());
		keep
	}
}

/// Loaded graph plus interaction state. Built once the data has loaded.
#[derive(Clone, Debug)]
pub struct ViewerSession {
	graph: Graph,
	index: AdjacencyIndex,
	highlighter: Highlighter,
	settings: ViewerSettings,
	selected: Option<NodeId>,
	group_filter: Option<String>,
	size_measure: String,
	size_revision: u64,
	color_mode: ColorMode,
}

impl ViewerSession {
	/// Build graph and index from a parsed document.
	pub fn new(data: GraphData, settings: ViewerSettings) -> Self {
		let graph = Graph::from_data(data, &settings);
		let index = AdjacencyIndex::build(&graph);
		info!("session ready: {} nodes indexed", index.len());
		Self {
			highlighter: Highlighter::new(settings.fade_color.clone()),
			graph,
			index,
			settings,
			selected: None,
			group_filter: None,
			size_measure: INITIAL_SIZE_MEASURE.to_owned(),
			size_revision: 0,
			color_mode: ColorMode::Group,
		}
	}

	/// The graph with its current colors and sizes.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Adjacency index.
	pub fn index(&self) -> &AdjacencyIndex {
		&self.index
	}

	/// Settings the session was built with.
	pub fn settings(&self) -> &ViewerSettings {
		&self.settings
	}

	/// Whether a recoloring is in effect.
	pub fn highlight_state(&self) -> HighlightState {
		self.highlighter.state()
	}

	/// Last clicked node, until the next stage click.
	pub fn selected(&self) -> Option<&NodeId> {
		self.selected.as_ref()
	}

	/// Active group filter.
	pub fn group_filter(&self) -> Option<&str> {
		self.group_filter.as_deref()
	}

	/// Active size measure.
	pub fn size_measure(&self) -> &str {
		&self.size_measure
	}

	/// Bumped on every size change, so renderers know to rescale.
	pub fn size_revision(&self) -> u64 {
		self.size_revision
	}

	/// Active color mode. Any highlight falls back to group colors.
	pub fn color_mode(&self) -> ColorMode {
		self.color_mode
	}

	/// Classify the neighbors of a node.
	pub fn classify(&self, id: &str) -> NeighborClasses {
		classify::classify(&self.index, id)
	}

	/// Weighted neighbors of a node.
	pub fn sharings(&self, id: &str) -> Sharings {
		classify::classify_sharings(&self.index, id)
	}

	/// React to a canvas click.
	///
	/// A node click highlights the node and its neighbors and returns the
	/// selection; clicks on unknown nodes are ignored. A stage click restores
	/// the original colors.
	pub fn handle_click(&mut self, event: ClickEvent) -> Option<NodeSelection> {
		match event {
			ClickEvent::Node(id) => {
				if !self.graph.contains(id.as_str()) {
					warn!("click on unknown node {id}");
					return None;
				}
				let selection = NodeSelection {
					neighbors: self.classify(id.as_str()),
					sharings: self.sharings(id.as_str()),
					id,
				};
				self.highlighter
					.apply_highlight(&mut self.graph, &selection.keep_set());
				self.selected = Some(selection.id.clone());
				self.group_filter = None;
				self.color_mode = ColorMode::Group;
				debug!(
					"selected {}: {} neighbors",
					selection.id,
					selection.neighbors.len()
				);
				Some(selection)
			}
			ClickEvent::Stage => {
				self.selected = None;
				if self.highlighter.clear_highlight(&mut self.graph) {
					self.group_filter = None;
					self.color_mode = ColorMode::Group;
				}
				None
			}
		}
	}

	/// Select a node from a list: a stage click followed by a node click.
	pub fn select_node(&mut self, id: NodeId) -> Option<NodeSelection> {
		self.handle_click(ClickEvent::Stage);
		self.handle_click(ClickEvent::Node(id))
	}

	/// Keep one group lit; an empty selection shows the whole map again.
	pub fn apply_group_filter(&mut self, selection: &str) {
		self.selected = None;
		self.color_mode = ColorMode::Group;
		if selection.is_empty() {
			self.group_filter = None;
			self.highlighter.restore(&mut self.graph);
			return;
		}
		let keep = highlight::group_keep_set(
			&self.graph,
			&self.index,
			selection,
			self.settings.group_filter_expansion,
		);
		self.highlighter.apply_highlight(&mut self.graph, &keep);
		self.group_filter = Some(selection.to_owned());
	}

	/// Size every node by `measure`.
	pub fn set_size_measure(&mut self, measure: &str) {
		self.graph.set_sizes(measure);
		self.size_measure = measure.to_owned();
		self.size_revision += 1;
	}

	/// Switch between group and activity coloring.
	pub fn set_color_mode(&mut self, mode: ColorMode) {
		self.selected = None;
		self.group_filter = None;
		self.highlighter.apply_color_mode(&mut self.graph, mode);
		self.color_mode = mode;
	}

	/// Search node labels.
	pub fn search(&self, query: &str) -> Result<SearchOutcome> {
		search::search_labels(&self.graph, query)
	}
}
