//! Browser fetch of the static data files.

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::accessory::AccessoryData;
use super::archive::load_graph_archive;
use crate::config::ViewerSettings;
use crate::error::{Result, ViewerError};
use crate::graph::GraphData;

fn fetch_error(url: &str, reason: impl Into<String>) -> ViewerError {
	ViewerError::Fetch {
		url: url.to_owned(),
		reason: reason.into(),
	}
}

async fn fetch_response(url: &str) -> Result<Response> {
	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::SameOrigin);

	let request = Request::new_with_str_and_init(url, &opts)
		.map_err(|e| fetch_error(url, format!("request error: {e:?}")))?;
	let window = web_sys::window().ok_or_else(|| fetch_error(url, "no window"))?;
	let value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| fetch_error(url, format!("{e:?}")))?;
	let response: Response = value
		.dyn_into()
		.map_err(|_| fetch_error(url, "response is not a Response"))?;
	if !response.ok() {
		return Err(fetch_error(url, format!("HTTP {}", response.status())));
	}
	Ok(response)
}

/// Fetch a file as raw bytes.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
	let response = fetch_response(url).await?;
	let promise = response
		.array_buffer()
		.map_err(|e| fetch_error(url, format!("{e:?}")))?;
	let buffer = JsFuture::from(promise)
		.await
		.map_err(|e| fetch_error(url, format!("{e:?}")))?;
	Ok(Uint8Array::new(&buffer).to_vec())
}

/// Fetch a file as text.
pub async fn fetch_text(url: &str) -> Result<String> {
	let response = fetch_response(url).await?;
	let promise = response
		.text()
		.map_err(|e| fetch_error(url, format!("{e:?}")))?;
	JsFuture::from(promise)
		.await
		.map_err(|e| fetch_error(url, format!("{e:?}")))?
		.as_string()
		.ok_or_else(|| fetch_error(url, "body is not text"))
}

/// Fetch `settings.json`, falling back to defaults when it is absent or invalid.
pub async fn fetch_settings(url: &str) -> ViewerSettings {
	match fetch_text(url).await {
		Ok(text) => ViewerSettings::from_json(&text).unwrap_or_else(|e| {
			log::warn!("ignoring {url}: {e}");
			ViewerSettings::default()
		}),
		Err(e) => {
			log::debug!("using default settings: {e}");
			ViewerSettings::default()
		}
	}
}

/// Fetch, unzip and parse the graph document.
pub async fn fetch_graph(settings: &ViewerSettings) -> Result<GraphData> {
	let bytes = fetch_bytes(&settings.archive_url).await?;
	load_graph_archive(&bytes, &settings.archive_entry)
}

/// Fetch and parse the accessory document.
pub async fn fetch_accessory(settings: &ViewerSettings) -> Result<AccessoryData> {
	AccessoryData::from_json(&fetch_text(&settings.accessory_url).await?)
}
