//! Viewer settings.
//!
//! Defaults reproduce the look of the published channel map. A deployment can
//! override any subset of fields with a `settings.json` next to the page.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How far a group filter reaches beyond the nodes of the selected group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFilterExpansion {
	/// Keep only members of the group. This is what the published map does.
	#[default]
	GroupOnly,
	/// Keep members of the group and every neighbor of a member.
	WithNeighbors,
}

/// Display and loading configuration.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerSettings {
	/// Canvas background.
	pub background_color: String,
	/// Color given to faded nodes and edges.
	pub fade_color: String,
	/// Alpha applied to edge colors at load time.
	pub edge_alpha: f64,
	/// Node color used when the data file has none.
	pub default_node_color: String,
	/// Edge color used when neither the edge nor its source has a color.
	pub default_edge_color: String,
	/// Label text color.
	pub label_color: String,
	/// Label font family.
	pub font: String,
	/// Label font size in pixels.
	pub label_size: f64,
	/// Minimum on-screen size a node needs before its label is drawn.
	pub label_threshold: f64,
	/// Smallest rendered node radius.
	pub min_node_size: f64,
	/// Largest rendered node radius.
	pub max_node_size: f64,
	/// Thinnest rendered edge.
	pub min_edge_size: f64,
	/// Thickest rendered edge.
	pub max_edge_size: f64,
	/// Smallest camera ratio (deepest zoom).
	pub zoom_min: f64,
	/// Largest camera ratio (widest zoom).
	pub zoom_max: f64,
	/// URL of the zipped graph document.
	pub archive_url: String,
	/// Name of the JSON document inside the archive.
	pub archive_entry: String,
	/// URL of the legend/statistics document.
	pub accessory_url: String,
	/// Run the force simulation instead of keeping the exported positions.
	pub run_layout: bool,
	/// Group filter reach.
	pub group_filter_expansion: GroupFilterExpansion,
}

impl Default for ViewerSettings {
	fn default() -> Self {
		Self {
			background_color: "rgba(17, 34, 51, 1)".into(),
			fade_color: "rgba(27, 44, 61, .75)".into(),
			edge_alpha: 0.25,
			default_node_color: "#333".into(),
			default_edge_color: "#484848".into(),
			label_color: "#FFFFFF".into(),
			font: "sans-serif".into(),
			label_size: 12.0,
			label_threshold: 15.0,
			min_node_size: 1.0,
			max_node_size: 10.0,
			min_edge_size: 0.2,
			max_edge_size: 0.5,
			zoom_min: 0.031_25,
			zoom_max: 2.0,
			archive_url: "data.json.zip".into(),
			archive_entry: "data.json".into(),
			accessory_url: "data_accessory.json".into(),
			run_layout: false,
			group_filter_expansion: GroupFilterExpansion::GroupOnly,
		}
	}
}

impl ViewerSettings {
	/// Parse a settings document; absent fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Bounds on the canvas scale factor, derived from the camera ratio bounds.
	pub fn scale_bounds(&self) -> (f64, f64) {
		(1.0 / self.zoom_max, 1.0 / self.zoom_min)
	}
}
