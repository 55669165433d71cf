//! Label search.

use regex::RegexBuilder;

use super::model::Graph;
use super::types::NodeId;
use crate::error::Result;

/// Queries shorter than this are not run.
pub const MIN_QUERY_CHARS: usize = 3;

/// What a search produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
	/// The query has fewer than [`MIN_QUERY_CHARS`] characters.
	TooShort,
	/// Matching nodes sorted by label, possibly none.
	Matches(Vec<NodeId>),
}

/// Match `query` as a case-insensitive regular expression against every label.
pub fn search_labels(graph: &Graph, query: &str) -> Result<SearchOutcome> {
	if query.chars().count() < MIN_QUERY_CHARS {
		return Ok(SearchOutcome::TooShort);
	}
	let pattern = RegexBuilder::new(query).case_insensitive(true).build()?;
	let hits = graph
		.nodes()
		.iter()
		.filter(|node| pattern.is_match(&node.label))
		.map(|node| node.id.clone());
	Ok(SearchOutcome::Matches(graph.sort_by_label(hits)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ViewerSettings;
	use crate::error::ViewerError;
	use serde_json::json;

	fn graph() -> Graph {
		let data = serde_json::from_value(json!({
			"nodes": [
				{"id": "1", "label": "Radio Verde"},
				{"id": "2", "label": "verde notizie"},
				{"id": "3", "label": "Blu"},
				{"id": "4", "label": "Arcobaleno VERDE"}
			]
		}))
		.unwrap();
		Graph::from_data(data, &ViewerSettings::default())
	}

	#[test]
	fn short_queries_are_refused() {
		assert_eq!(search_labels(&graph(), "ve").unwrap(), SearchOutcome::TooShort);
		assert_eq!(search_labels(&graph(), "").unwrap(), SearchOutcome::TooShort);
	}

	#[test]
	fn matches_ignore_case_and_sort_by_label() {
		let SearchOutcome::Matches(ids) = search_labels(&graph(), "verde").unwrap() else {
			panic!("expected matches");
		};
		let ids: Vec<&str> = ids.iter().map(NodeId::as_str).collect();
		assert_eq!(ids, ["4", "1", "2"]);
	}

	#[test]
	fn no_match_is_empty() {
		assert_eq!(
			search_labels(&graph(), "rosso").unwrap(),
			SearchOutcome::Matches(Vec::new())
		);
	}

	#[test]
	fn patterns_are_regular_expressions() {
		let SearchOutcome::Matches(ids) = search_labels(&graph(), "^bl.$").unwrap() else {
			panic!("expected matches");
		};
		assert_eq!(ids, [NodeId::from("3")]);
		assert!(matches!(
			search_labels(&graph(), "(unclosed"),
			Err(ViewerError::Search(_))
		));
	}
}
