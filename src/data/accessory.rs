//! The accessory document: group labels, legend rows, size measures, totals.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::graph::types::string_or_number;

/// One legend row: `[key, channel count, label, color]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GroupEntry(
	/// Group key.
	#[serde(deserialize_with = "string_or_number")]
	pub String,
	/// Channel count.
	pub u64,
	/// Display name.
	pub String,
	/// Legend color.
	pub String,
);

impl GroupEntry {
	/// Value matched against node groups.
	pub fn key(&self) -> &str {
		&self.0
	}

	/// Channels in the group.
	pub fn count(&self) -> u64 {
		self.1
	}

	/// Display name.
	pub fn label(&self) -> &str {
		&self.2
	}

	/// Legend color.
	pub fn color(&self) -> &str {
		&self.3
	}

	/// Legend text, e.g. `News, 12 channels`.
	pub fn legend_text(&self) -> String {
		format!("{}, {} channels", self.label(), self.count())
	}
}

/// A selectable size measure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measure {
	/// Node attribute name.
	pub key: String,
	/// Display name.
	pub label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MeasureList {
	Pairs(Vec<(String, String)>),
	Map(HashMap<String, String>),
}

fn measure_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<Measure>, D::Error> {
	let measures = match Option::<MeasureList>::deserialize(deserializer)? {
		None => Vec::new(),
		Some(MeasureList::Pairs(pairs)) => pairs
			.into_iter()
			.map(|(key, label)| Measure { key, label })
			.collect(),
		Some(MeasureList::Map(map)) => {
			let mut measures: Vec<Measure> = map
				.into_iter()
				.map(|(key, label)| Measure { key, label })
				.collect();
			measures.sort_by(|a, b| a.label.cmp(&b.label));
			measures
		}
	};
	Ok(measures)
}

/// Display metadata published next to the graph.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AccessoryData {
	/// Main group key to display name.
	#[serde(default)]
	pub main_groups: HashMap<String, String>,
	/// Legend rows, largest group first.
	#[serde(default)]
	pub groups: Vec<GroupEntry>,
	/// Size measures.
	#[serde(default, deserialize_with = "measure_list")]
	pub measures: Vec<Measure>,
	/// Channels known to the crawler.
	#[serde(default)]
	pub total_pages_count: Option<u64>,
	/// Channels shown on the map.
	#[serde(default)]
	pub total_interesting_pages_count: Option<u64>,
}

impl AccessoryData {
	/// Parse the accessory document.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Display name of a main group, falling back to the key itself.
	pub fn main_group_label<'a>(&'a self, key: &'a str) -> &'a str {
		self.main_groups.get(key).map(String::as_str).unwrap_or(key)
	}
}
