//! Wire format of the exported graph document.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Node identifier. The exporter writes channel ids as numbers; they are kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	/// Borrow the id as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for NodeId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self(id.to_owned())
	}
}

impl From<String> for NodeId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for NodeId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		string_or_number(deserializer).map(Self)
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
	Text(String),
	Int(i64),
	Float(f64),
	Bool(bool),
}

impl Scalar {
	fn into_string(self) -> String {
		match self {
			Scalar::Text(s) => s,
			Scalar::Int(n) => n.to_string(),
			Scalar::Float(n) => n.to_string(),
			Scalar::Bool(b) => b.to_string(),
		}
	}
}

/// Accept a JSON string or number and keep its text form.
pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
	Scalar::deserialize(deserializer).map(Scalar::into_string)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	Ok(Option::<Scalar>::deserialize(deserializer)?
		.map(Scalar::into_string)
		.filter(|s| !s.is_empty()))
}

/// Activity temperature as exported: either a ready CSS color or a raw score.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
	/// A CSS color string.
	Color(String),
	/// A score, mapped onto a gradient against the graph-wide maximum.
	Score(f64),
}

/// One entry of the `nodes` array.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeRecord {
	/// Node id.
	pub id: NodeId,
	/// Display label.
	#[serde(default, deserialize_with = "null_as_default")]
	pub label: String,
	/// Group tag, possibly `-`-delimited.
	#[serde(default, deserialize_with = "null_as_default")]
	pub group: String,
	/// `"r,g,b"` triplet.
	#[serde(default, deserialize_with = "null_as_default")]
	pub color: String,
	/// Exported layout x.
	#[serde(default, deserialize_with = "null_as_default")]
	pub x: f64,
	/// Exported layout y.
	#[serde(default, deserialize_with = "null_as_default")]
	pub y: f64,
	/// Profile picture path.
	#[serde(default, deserialize_with = "optional_text")]
	pub pic: Option<String>,
	/// Channel URL without scheme, e.g. `t.me/name`.
	#[serde(default, deserialize_with = "optional_text")]
	pub url: Option<String>,
	/// Human readable activity period.
	#[serde(default, deserialize_with = "optional_text")]
	pub activity_period: Option<String>,
	/// Whether the channel no longer exists.
	#[serde(default, deserialize_with = "null_as_default")]
	pub is_lost: bool,
	/// Location code.
	#[serde(default, deserialize_with = "optional_text")]
	pub p: Option<String>,
	/// Activity temperature.
	#[serde(default)]
	pub temp: Option<Temperature>,
	/// Every other attribute; numeric ones become size measures.
	#[serde(flatten)]
	pub attributes: HashMap<String, serde_json::Value>,
}

/// One entry of the `edges` array.
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeRecord {
	/// Source node.
	pub source: NodeId,
	/// Target node.
	pub target: NodeId,
	/// Edge weight.
	#[serde(default, alias = "size", deserialize_with = "null_as_default")]
	pub weight: f64,
	/// `"r,g,b"` triplet, empty when the edge takes its source's color.
	#[serde(default, deserialize_with = "null_as_default")]
	pub color: String,
}

/// The whole graph document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// Node records in file order.
	#[serde(default)]
	pub nodes: Vec<NodeRecord>,
	/// Edge records in file order.
	#[serde(default)]
	pub edges: Vec<EdgeRecord>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numeric_ids_become_text() {
		let data: GraphData = serde_json::from_str(
			r#"{"nodes": [{"id": 1234, "label": "a"}],
			    "edges": [{"source": 1234, "target": "x", "weight": 2}]}"#,
		)
		.unwrap();
		assert_eq!(data.nodes[0].id.as_str(), "1234");
		assert_eq!(data.edges[0].source, NodeId::from("1234"));
		assert_eq!(data.edges[0].weight, 2.0);
	}

	#[test]
	fn nulls_and_extras() {
		let data: GraphData = serde_json::from_str(
			r#"{"nodes": [{"id": "a", "label": null, "fans": 10, "pagerank": 0.5,
			               "pic": "", "activity_period": 12, "temp": "hsl(3,100%,50%)"}]}"#,
		)
		.unwrap();
		let node = &data.nodes[0];
		assert_eq!(node.label, "");
		assert_eq!(node.pic, None);
		assert_eq!(node.activity_period.as_deref(), Some("12"));
		assert_eq!(node.temp, Some(Temperature::Color("hsl(3,100%,50%)".into())));
		assert_eq!(node.attributes["fans"], serde_json::json!(10));
		assert!(node.attributes.contains_key("pagerank"));
		assert!(data.edges.is_empty());
	}

	#[test]
	fn size_is_an_alias_for_weight() {
		let edge: EdgeRecord =
			serde_json::from_str(r#"{"source": "a", "target": "b", "size": 3.5}"#).unwrap();
		assert_eq!(edge.weight, 3.5);
		assert_eq!(edge.color, "");
	}
}
