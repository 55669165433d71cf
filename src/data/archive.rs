//! The zipped graph document.

use std::io::{Cursor, Read};

use log::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Result, ViewerError};
use crate::graph::GraphData;

/// Read one entry of a zip archive as UTF-8 text.
pub fn read_archive_entry(bytes: &[u8], entry: &str) -> Result<String> {
	let mut archive = ZipArchive::new(Cursor::new(bytes))?;
	let mut file = match archive.by_name(entry) {
		Ok(file) => file,
		Err(ZipError::FileNotFound) => return Err(ViewerError::MissingEntry(entry.to_owned())),
		Err(e) => return Err(e.into()),
	};
	let mut text = String::new();
	file.read_to_string(&mut text)?;
	debug!("read {} bytes from {entry}", text.len());
	Ok(text)
}

/// Parse a graph document.
///
/// Some exports wrap the document in a JSON string; both forms are accepted.
pub fn parse_graph(json: &str) -> Result<GraphData> {
	if json.trim_start().starts_with('"') {
		let inner: String = serde_json::from_str(json)?;
		return Ok(serde_json::from_str(&inner)?);
	}
	Ok(serde_json::from_str(json)?)
}

/// Unzip and parse the graph document.
pub fn load_graph_archive(bytes: &[u8], entry: &str) -> Result<GraphData> {
	parse_graph(&read_archive_entry(bytes, entry)?)
}
