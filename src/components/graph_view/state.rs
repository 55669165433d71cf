use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale;
use crate::graph::ViewerSession;

/// Extra pick radius around a node, in screen pixels.
pub const HIT_SLOP: f64 = 4.0;
/// Pointer travel below which a press and release count as a click.
pub const CLICK_TOLERANCE: f64 = 3.0;
const FIT_MARGIN: f64 = 40.0;

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PointerState {
	pub down: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub moved: bool,
}

/// Canvas-side view of a session: layout, camera, pointer interaction.
///
/// Nodes are addressed by their position in the session graph.
pub struct CanvasState {
	pub graph: ForceGraph<usize, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub pointer: PointerState,
	pub hover: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub layout_running: bool,
	pub positions: Vec<(f64, f64)>,
	pub radii: Vec<f64>,
	pub edge_widths: Vec<f64>,
	pub edges: Vec<(usize, usize)>,
	handles: Vec<DefaultNodeIdx>,
	size_revision: Option<u64>,
	scale_bounds: (f64, f64),
}

impl CanvasState {
	pub fn new(session: &ViewerSession, width: f64, height: f64) -> Self {
		let settings = session.settings();
		let graph_data = session.graph();
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let points: Vec<(f64, f64)> = graph_data.nodes().iter().map(|n| (n.x, n.y)).collect();
		let fitted = scale::fit_positions(&points, width, height, FIT_MARGIN);
		let handles: Vec<DefaultNodeIdx> = fitted
			.iter()
			.enumerate()
			.map(|(i, &(x, y))| {
				graph.add_node(NodeData {
					x,
					y,
					mass: 10.0,
					is_anchor: false,
					user_data: i,
				})
			})
			.collect();

		let mut edges = Vec::with_capacity(graph_data.edges().len());
		for edge in graph_data.edges() {
			if let (Some(src), Some(tgt)) = (
				graph_data.position(edge.source.as_str()),
				graph_data.position(edge.target.as_str()),
			) {
				if src != tgt {
					graph.add_edge(handles[src], handles[tgt], EdgeData::default());
				}
				edges.push((src, tgt));
			}
		}
		let edge_widths = scale::linear(
			graph_data.edges().iter().map(|e| e.weight),
			settings.min_edge_size,
			settings.max_edge_size,
		);

		let mut state = Self {
			graph,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			pointer: PointerState::default(),
			hover: None,
			width,
			height,
			layout_running: settings.run_layout,
			positions: points.iter().map(|_| (0.0, 0.0)).collect(),
			radii: Vec::new(),
			edge_widths,
			edges,
			handles,
			size_revision: None,
			scale_bounds: settings.scale_bounds(),
		};
		state.reset_view();
		state.sync_sizes(session);
		state.sync_positions();
		state
	}

	/// Recompute node radii after the size measure changed.
	pub fn sync_sizes(&mut self, session: &ViewerSession) {
		if self.size_revision == Some(session.size_revision()) {
			return;
		}
		let settings = session.settings();
		self.radii = scale::linear(
			session.graph().nodes().iter().map(|n| n.size),
			settings.min_node_size,
			settings.max_node_size,
		);
		self.size_revision = Some(session.size_revision());
	}

	/// Copy simulated positions out of the force graph.
	pub fn sync_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			if let Some(slot) = positions.get_mut(node.data.user_data) {
				*slot = (node.x() as f64, node.y() as f64);
			}
		});
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let slop = HIT_SLOP / self.transform.k;
		// Later nodes are drawn on top, so the last hit wins.
		self.positions
			.iter()
			.enumerate()
			.filter(|&(i, &(x, y))| {
				let r = self.radii.get(i).copied().unwrap_or(0.0) + slop;
				let (dx, dy) = (x - gx, y - gy);
				dx * dx + dy * dy < r * r
			})
			.map(|(i, _)| i)
			.last()
	}

	pub fn move_node(&mut self, node: usize, x: f32, y: f32) {
		let Some(&handle) = self.handles.get(node) else {
			return;
		};
		self.graph.visit_nodes_mut(|n| {
			if n.index() == handle {
				n.data.x = x;
				n.data.y = y;
				n.data.is_anchor = true;
			}
		});
	}

	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64) {
		let (lo, hi) = self.scale_bounds;
		let new_k = (self.transform.k * factor).clamp(lo, hi);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn zoom_centered(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	pub fn reset_view(&mut self) {
		self.transform = ViewTransform {
			x: self.width / 2.0,
			y: self.height / 2.0,
			k: 1.0,
		};
	}

	pub fn tick(&mut self, dt: f32) {
		if self.layout_running {
			self.graph.update(dt);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ViewerSettings;
	use serde_json::json;

	fn session() -> ViewerSession {
		let data = serde_json::from_value(json!({
			"nodes": [
				{"id": "a", "x": 0, "y": 0, "in_deg": 1},
				{"id": "b", "x": 10, "y": 0, "in_deg": 3}
			],
			"edges": [{"source": "a", "target": "b", "weight": 1}]
		}))
		.unwrap();
		ViewerSession::new(data, ViewerSettings::default())
	}

	#[test]
	fn picks_nodes_and_rescales_sizes() {
		let mut session = session();
		let mut state = CanvasState::new(&session, 280.0, 200.0);
		assert_eq!(state.radii, [1.0, 10.0]);
		assert_eq!(state.positions, [(-100.0, 0.0), (100.0, 0.0)]);
		assert_eq!(state.node_at_position(240.0, 100.0), Some(1));
		assert_eq!(state.node_at_position(140.0, 100.0), None);

		session.set_size_measure("missing");
		state.sync_sizes(&session);
		assert_eq!(state.radii, [10.0, 10.0]);
	}

	#[test]
	fn zoom_is_bounded() {
		let mut state = CanvasState::new(&session(), 280.0, 200.0);
		for _ in 0..20 {
			state.zoom_centered(2.0);
		}
		assert_eq!(state.transform.k, 32.0);
		state.reset_view();
		state.zoom_centered(1.0 / 1.5);
		state.zoom_centered(1.0 / 1.5);
		assert_eq!(state.transform.k, 0.5);
	}
}
