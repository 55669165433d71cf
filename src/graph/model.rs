//! In-memory graph: nodes and edges with their display state.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{info, warn};

use super::color;
use super::types::{GraphData, NodeId, NodeRecord, Temperature};
use crate::config::ViewerSettings;

/// Measure that drives node size right after load.
pub const INITIAL_SIZE_MEASURE: &str = "in_deg";

/// Groups that carry no organization: drawn hollow and grey.
pub const UNAFFILIATED_GROUPS: &[&str] = &["", "-", "wiki"];

/// What the info panel says about a node's group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupNotice {
	/// Group `-`: the channel is not attributed to any organization.
	Unaffiliated,
	/// Group `wiki`: the channel was added from an external list.
	Wiki,
	/// Regular node, show its details.
	Details,
}

/// A graph node and its display state.
#[derive(Clone, Debug)]
pub struct Node {
	/// Node id.
	pub id: NodeId,
	/// Display label.
	pub label: String,
	/// Group tag.
	pub group: String,
	/// Layout x.
	pub x: f64,
	/// Layout y.
	pub y: f64,
	/// Value of the active size measure.
	pub size: f64,
	/// Color currently displayed.
	pub color: String,
	original_color: String,
	activity_color: String,
	/// Profile picture path.
	pub pic: Option<String>,
	/// Channel URL without scheme.
	pub url: Option<String>,
	/// Human readable activity period.
	pub activity_period: Option<String>,
	/// Whether the channel no longer exists.
	pub is_lost: bool,
	/// Location code.
	pub location: Option<String>,
	measures: HashMap<String, f64>,
}

impl Node {
	fn from_record(record: NodeRecord, settings: &ViewerSettings) -> (Self, Option<Temperature>) {
		let mut measures: HashMap<String, f64> = record
			.attributes
			.iter()
			.filter_map(|(key, value)| value.as_f64().map(|v| (key.clone(), v)))
			.collect();
		if let Some(tac) = measures.get("tac").copied() {
			let fans = measures.get("fans").copied().unwrap_or(0.0);
			let ratio = if fans == 0.0 { 0.0 } else { tac / fans };
			measures.insert("tac_on_fans".into(), ratio);
		}

		let color = if record.color.trim().is_empty() {
			settings.default_node_color.clone()
		} else {
			color::rgb(&record.color)
		};

		let node = Self {
			size: measures.get(INITIAL_SIZE_MEASURE).copied().unwrap_or(0.0),
			id: record.id,
			label: record.label,
			group: record.group,
			x: record.x,
			y: record.y,
			original_color: color.clone(),
			activity_color: color.clone(),
			color,
			pic: record.pic,
			url: record.url,
			activity_period: record.activity_period,
			is_lost: record.is_lost,
			location: record.p,
			measures,
		};
		(node, record.temp)
	}

	/// Color captured at load time.
	pub fn original_color(&self) -> &str {
		&self.original_color
	}

	/// Color used by the activity color mode.
	pub fn activity_color(&self) -> &str {
		&self.activity_color
	}

	/// Numeric attribute by name.
	pub fn measure(&self, key: &str) -> Option<f64> {
		self.measures.get(key).copied()
	}

	/// Weighted in-degree as exported.
	pub fn in_degree(&self) -> f64 {
		self.measure("in_deg").unwrap_or(0.0)
	}

	/// Weighted out-degree as exported.
	pub fn out_degree(&self) -> f64 {
		self.measure("out_deg").unwrap_or(0.0)
	}

	/// Subscriber count.
	pub fn fans(&self) -> f64 {
		self.measure("fans").unwrap_or(0.0)
	}

	/// Number of collected messages.
	pub fn messages_count(&self) -> f64 {
		self.measure("messages_count").unwrap_or(0.0)
	}

	/// `@`-less channel handle, i.e. the URL without `t.me/`.
	pub fn handle(&self) -> Option<&str> {
		let url = self.url.as_deref()?;
		Some(url.strip_prefix("t.me/").unwrap_or(url))
	}

	/// Absolute channel URL.
	pub fn profile_url(&self) -> Option<String> {
		self.url.as_ref().map(|url| format!("https://{url}"))
	}

	/// Top of the group hierarchy: everything before the first `-`.
	pub fn main_group(&self) -> &str {
		match self.group.find('-') {
			Some(pos) => &self.group[..pos],
			None => &self.group,
		}
	}

	/// Whether the node belongs to no organization.
	pub fn is_unaffiliated(&self) -> bool {
		UNAFFILIATED_GROUPS.contains(&self.group.as_str())
	}

	/// Which block of the info panel applies.
	pub fn notice(&self) -> GroupNotice {
		match self.group.as_str() {
			"-" => GroupNotice::Unaffiliated,
			"wiki" => GroupNotice::Wiki,
			_ => GroupNotice::Details,
		}
	}
}

/// A directed edge and its display state.
#[derive(Clone, Debug)]
pub struct Edge {
	/// Source node.
	pub source: NodeId,
	/// Target node.
	pub target: NodeId,
	/// Weight.
	pub weight: f64,
	/// Color currently displayed.
	pub color: String,
	original_color: String,
}

impl Edge {
	/// Color captured at load time.
	pub fn original_color(&self) -> &str {
		&self.original_color
	}

	/// Whether source and target are the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

/// Nodes and edges in file order plus an id lookup.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	pub(crate) nodes: Vec<Node>,
	pub(crate) edges: Vec<Edge>,
	positions: HashMap<NodeId, usize>,
}

impl Graph {
	/// Build the graph and capture every original color.
	///
	/// Duplicate node ids keep their first record; edges pointing at unknown
	/// nodes are dropped.
	pub fn from_data(data: GraphData, settings: &ViewerSettings) -> Self {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut positions = HashMap::with_capacity(data.nodes.len());
		let mut temperatures = Vec::with_capacity(data.nodes.len());
		let mut triplets = HashMap::with_capacity(data.nodes.len());

		for record in data.nodes {
			if positions.contains_key(&record.id) {
				warn!("duplicate node id {}, keeping the first record", record.id);
				continue;
			}
			triplets.insert(record.id.clone(), record.color.trim().to_owned());
			let (node, temp) = Node::from_record(record, settings);
			positions.insert(node.id.clone(), nodes.len());
			nodes.push(node);
			temperatures.push(temp);
		}

		let max_score = temperatures
			.iter()
			.filter_map(|t| match t {
				Some(Temperature::Score(v)) => Some(*v),
				_ => None,
			})
			.fold(0.0_f64, f64::max);
		for (node, temp) in nodes.iter_mut().zip(temperatures) {
			match temp {
				Some(Temperature::Color(css)) if !css.is_empty() => node.activity_color = css,
				Some(Temperature::Score(v)) => {
					node.activity_color = color::temperature_gradient(v, max_score)
				}
				_ => {}
			}
		}

		let mut edges = Vec::with_capacity(data.edges.len());
		let mut skipped = 0usize;
		for record in data.edges {
			if !positions.contains_key(&record.source) || !positions.contains_key(&record.target) {
				skipped += 1;
				continue;
			}
			let triplet = if record.color.trim().is_empty() {
				triplets.get(&record.source).map(String::as_str).unwrap_or("")
			} else {
				record.color.trim()
			};
			let color = if triplet.is_empty() {
				settings.default_edge_color.clone()
			} else {
				color::rgba(triplet, settings.edge_alpha)
			};
			edges.push(Edge {
				source: record.source,
				target: record.target,
				weight: record.weight,
				original_color: color.clone(),
				color,
			});
		}
		if skipped > 0 {
			warn!("skipped {skipped} edges with unknown endpoints");
		}
		info!("graph loaded: {} nodes, {} edges", nodes.len(), edges.len());

		Self {
			nodes,
			edges,
			positions,
		}
	}

	/// Nodes in file order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in file order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.positions.get(id).map(|&pos| &self.nodes[pos])
	}

	/// Position of a node in [`Graph::nodes`].
	pub fn position(&self, id: &str) -> Option<usize> {
		self.positions.get(id).copied()
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: &str) -> bool {
		self.positions.contains_key(id)
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the graph has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Resize every node by a measure; nodes without it get zero.
	pub fn set_sizes(&mut self, measure: &str) {
		for node in &mut self.nodes {
			node.size = node.measure(measure).unwrap_or(0.0);
		}
	}

	/// Order ids by label, ignoring case. Unknown ids go last.
	pub fn sort_by_label<I>(&self, ids: I) -> Vec<NodeId>
	where
		I: IntoIterator<Item = NodeId>,
	{
		let mut ids: Vec<NodeId> = ids.into_iter().collect();
		ids.sort_by(|a, b| self.label_order(a, b));
		ids
	}

	fn label_order(&self, a: &NodeId, b: &NodeId) -> Ordering {
		match (self.node(a.as_str()), self.node(b.as_str())) {
			(Some(na), Some(nb)) => na
				.label
				.to_lowercase()
				.cmp(&nb.label.to_lowercase())
				.then_with(|| a.cmp(b)),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => a.cmp(b),
		}
	}
}
