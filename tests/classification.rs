use std::collections::HashSet;

use channel_graph_viewer::config::ViewerSettings;
use channel_graph_viewer::graph::classify::{classify, classify_sharings, neighbors};
use channel_graph_viewer::graph::highlight::Highlighter;
use channel_graph_viewer::graph::{ClickEvent, Graph, GraphData, HighlightState, NodeId, ViewerSession};
use proptest::prelude::*;
use serde_json::json;

const FADE: &str = "rgba(27, 44, 61, .75)";

fn data(nodes: usize, edges: &[(usize, usize)]) -> GraphData {
	let nodes: Vec<_> = (0..nodes)
		.map(|i| json!({"id": i.to_string(), "label": format!("n{i}"), "color": "10,20,30"}))
		.collect();
	let edges: Vec<_> = edges
		.iter()
		.map(|(s, t)| json!({"source": s.to_string(), "target": t.to_string(), "weight": 1}))
		.collect();
	serde_json::from_value(json!({"nodes": nodes, "edges": edges})).unwrap()
}

fn ids(names: &[&str]) -> HashSet<NodeId> {
	names.iter().map(|&n| NodeId::from(n)).collect()
}

fn colors(graph: &Graph) -> (Vec<String>, Vec<String>) {
	(
		graph.nodes().iter().map(|n| n.color.clone()).collect(),
		graph.edges().iter().map(|e| e.color.clone()).collect(),
	)
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
	(1usize..8).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..20)))
}

proptest! {
	#[test]
	fn classes_partition_the_neighborhood((n, edges) in graph_strategy()) {
		let session = ViewerSession::new(data(n, &edges), ViewerSettings::default());
		for i in 0..n {
			let id = i.to_string();
			let classes = classify(session.index(), &id);
			prop_assert!(classes.mutual.is_disjoint(&classes.in_only));
			prop_assert!(classes.mutual.is_disjoint(&classes.out_only));
			prop_assert!(classes.in_only.is_disjoint(&classes.out_only));

			let union: HashSet<NodeId> = classes.iter().cloned().collect();
			prop_assert_eq!(union, neighbors(session.index(), &id));

			let has_self_loop = edges.contains(&(i, i));
			prop_assert_eq!(classes.mutual.contains(id.as_str()), has_self_loop);
		}
	}

	#[test]
	fn sharings_cover_every_other_neighbor((n, edges) in graph_strategy()) {
		let session = ViewerSession::new(data(n, &edges), ViewerSettings::default());
		for i in 0..n {
			let id = i.to_string();
			let sharings = classify_sharings(session.index(), &id);
			let mut expected = neighbors(session.index(), &id);
			expected.remove(id.as_str());
			let seen: HashSet<NodeId> = sharings
				.in_sharing
				.keys()
				.chain(sharings.out_sharing.keys())
				.cloned()
				.collect();
			prop_assert_eq!(seen, expected);
			prop_assert!(sharings.in_sharing.keys().all(|k| !sharings.out_sharing.contains_key(k)));
		}
	}

	#[test]
	fn clicks_then_stage_restore_original_colors(
		(n, edges) in graph_strategy(),
		clicks in prop::collection::vec(0usize..8, 1..5),
	) {
		let mut session = ViewerSession::new(data(n, &edges), ViewerSettings::default());
		let original: Vec<String> = session.graph().nodes().iter().map(|n| n.color.clone()).collect();
		for click in clicks {
			session.handle_click(ClickEvent::Node(NodeId::from((click % n).to_string())));
			let lit = session.graph().nodes().iter().filter(|n| n.color != FADE).count();
			prop_assert!(lit >= 1);
		}
		session.handle_click(ClickEvent::Stage);
		prop_assert_eq!(session.highlight_state(), HighlightState::Cleared);
		let restored: Vec<String> = session.graph().nodes().iter().map(|n| n.color.clone()).collect();
		prop_assert_eq!(&restored, &original);

		// A second stage click has nothing left to clear.
		session.handle_click(ClickEvent::Stage);
		let again: Vec<String> = session.graph().nodes().iter().map(|n| n.color.clone()).collect();
		prop_assert_eq!(again, original);
	}

	#[test]
	fn any_keep_set_clears_back_to_original_colors(
		(n, edges) in graph_strategy(),
		kept in prop::collection::vec(any::<bool>(), 8),
	) {
		let mut graph = Graph::from_data(data(n, &edges), &ViewerSettings::default());
		let original = colors(&graph);
		let keep: HashSet<NodeId> = (0..n)
			.filter(|&i| kept[i])
			.map(|i| NodeId::from(i.to_string()))
			.collect();

		let mut highlighter = Highlighter::new(FADE);
		highlighter.apply_highlight(&mut graph, &keep);
		for edge in graph.edges() {
			let lit = keep.contains(&edge.source) && keep.contains(&edge.target);
			prop_assert_eq!(edge.color != FADE, lit);
		}

		prop_assert!(highlighter.clear_highlight(&mut graph));
		prop_assert_eq!(colors(&graph), original.clone());
		prop_assert!(!highlighter.clear_highlight(&mut graph));
		prop_assert_eq!(colors(&graph), original);
	}
}

fn letters() -> GraphData {
	serde_json::from_value(json!({
		"nodes": [
			{"id": "A", "label": "A", "color": "1,1,1"},
			{"id": "B", "label": "B", "color": "2,2,2"},
			{"id": "C", "label": "C", "color": "3,3,3"},
			{"id": "D", "label": "D", "color": "4,4,4"}
		],
		"edges": [
			{"source": "A", "target": "B", "weight": 2},
			{"source": "B", "target": "A", "weight": 5},
			{"source": "A", "target": "C", "weight": 1}
		]
	}))
	.unwrap()
}

#[test]
fn mutual_and_outbound_neighbors() {
	let session = ViewerSession::new(letters(), ViewerSettings::default());
	let classes = session.classify("A");
	assert_eq!(classes.mutual, ids(&["B"]));
	assert!(classes.in_only.is_empty());
	assert_eq!(classes.out_only, ids(&["C"]));

	let classes = session.classify("C");
	assert_eq!(classes.in_only, ids(&["A"]));
	assert!(session.classify("D").is_empty());
	assert!(session.classify("missing").is_empty());
}

#[test]
fn mutual_sharing_counts_as_inbound() {
	let session = ViewerSession::new(letters(), ViewerSettings::default());
	let sharings = session.sharings("A");
	assert_eq!(sharings.in_sharing.get("B"), Some(&5.0));
	assert_eq!(sharings.out_sharing.get("C"), Some(&1.0));
	assert_eq!(sharings.self_sharing, 0.0);
}

#[test]
fn clicking_a_node_fades_the_rest() {
	let mut session = ViewerSession::new(letters(), ViewerSettings::default());
	let selection = session.handle_click(ClickEvent::Node("A".into())).unwrap();
	assert_eq!(selection.keep_set(), ids(&["A", "B", "C"]));

	let graph = session.graph();
	assert_eq!(graph.node("A").unwrap().color, "rgb(1,1,1)");
	assert_eq!(graph.node("B").unwrap().color, "rgb(2,2,2)");
	assert_eq!(graph.node("C").unwrap().color, "rgb(3,3,3)");
	assert_eq!(graph.node("D").unwrap().color, FADE);
	assert!(graph.edges().iter().all(|e| e.color != FADE));
	assert_eq!(session.highlight_state(), HighlightState::Highlighted);
}
