//! Error type shared by the data layer and the search box.

use thiserror::Error;

/// Everything that can go wrong between fetching the data files and showing the graph.
#[derive(Debug, Error)]
pub enum ViewerError {
	/// The browser fetch failed or returned a non-success status.
	#[error("could not fetch {url}: {reason}")]
	Fetch {
		/// Requested URL.
		url: String,
		/// Status line or JS error text.
		reason: String,
	},

	/// The payload is not a readable zip archive.
	#[error("invalid archive: {0}")]
	Archive(#[from] zip::result::ZipError),

	/// The archive does not contain the expected JSON document.
	#[error("archive has no entry named `{0}`")]
	MissingEntry(String),

	/// Decompressing the entry failed.
	#[error("could not read archive entry: {0}")]
	Io(#[from] std::io::Error),

	/// The graph, accessory or settings document is malformed.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// The search query is not a valid regular expression.
	#[error("invalid search pattern: {0}")]
	Search(#[from] regex::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;
