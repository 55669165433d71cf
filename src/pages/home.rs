use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::graph_view::GraphView;
use crate::components::{Controls, InfoPanel, Legend, SearchBox};
use crate::data::AccessoryData;
use crate::data::fetch::{fetch_accessory, fetch_graph, fetch_settings};
use crate::graph::{NodeSelection, ViewerSession};

const SETTINGS_URL: &str = "settings.json";

#[derive(Clone, Debug, PartialEq)]
enum LoadStatus {
	Loading,
	Building,
	Ready,
	Failed(String),
}

impl LoadStatus {
	fn from_result<T, E: std::fmt::Display>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => Self::Ready,
			Err(e) => Self::Failed(e.to_string()),
		}
	}

	/// Overlay text; nothing once the map is shown.
	fn message(&self) -> Option<String> {
		match self {
			Self::Loading => Some("Loading data…".to_owned()),
			Self::Building => Some("Building the map…".to_owned()),
			Self::Ready => None,
			Self::Failed(reason) => Some(format!("The map could not be loaded: {reason}")),
		}
	}

	fn is_failure(&self) -> bool {
		matches!(self, Self::Failed(_))
	}
}

/// Map page: loads the published data, then shows the graph and its sidebar.
#[component]
pub fn Home() -> impl IntoView {
	let status = RwSignal::new(LoadStatus::Loading);
	let session = RwSignal::new(None::<ViewerSession>);
	let accessory = RwSignal::new(None::<AccessoryData>);
	let selection = RwSignal::new(None::<NodeSelection>);

	spawn_local(async move {
		let settings = fetch_settings(SETTINGS_URL).await;

		let accessory_settings = settings.clone();
		spawn_local(async move {
			match fetch_accessory(&accessory_settings).await {
				Ok(data) => accessory.set(Some(data)),
				Err(e) => log::error!("accessory data unavailable: {e}"),
			}
		});

		let loaded = fetch_graph(&settings).await;
		match &loaded {
			Ok(_) => status.set(LoadStatus::Building),
			Err(e) => log::error!("graph unavailable: {e}"),
		}
		let next = LoadStatus::from_result(&loaded);
		if let Ok(data) = loaded {
			session.set(Some(ViewerSession::new(data, settings)));
		}
		status.set(next);
	});

	let overlay = move || {
		status.with(|status| {
			status.message().map(|text| {
				let class = if status.is_failure() { "status error" } else { "status" };
				view! { <p class=class>{text}</p> }
			})
		})
	};

	view! {
		<div class="fullscreen-graph">
			<Show when=move || session.with(Option::is_some)>
				<GraphView session=session selection=selection fullscreen=true />
			</Show>
			<div class="graph-overlay">{overlay}</div>
		</div>
		<aside class="sidebar">
			<Legend accessory=accessory />
			<Controls session=session selection=selection accessory=accessory />
			<SearchBox session=session selection=selection accessory=accessory />
			<InfoPanel session=session selection=selection accessory=accessory />
		</aside>
	}
}
