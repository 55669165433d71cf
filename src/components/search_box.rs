use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use super::info_panel::NodeLink;
use crate::data::AccessoryData;
use crate::graph::search::MIN_QUERY_CHARS;
use crate::graph::{NodeId, NodeSelection, SearchOutcome, ViewerSession};

#[derive(Clone, Debug, PartialEq)]
enum SearchResult {
	Idle,
	TooShort,
	Found(Vec<NodeId>),
	Invalid(String),
}

fn channel_count(n: usize) -> String {
	match n {
		1 => "1 channel".to_owned(),
		n => format!("{n} channels"),
	}
}

/// Label search form with its result list.
#[component]
pub fn SearchBox(
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	accessory: RwSignal<Option<AccessoryData>>,
) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let result = RwSignal::new(SearchResult::Idle);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let text = query.get_untracked();
		let outcome = session
			.try_with_untracked(|s| s.as_ref().map(|s| s.search(&text)))
			.flatten();
		let next = match outcome {
			None => SearchResult::Idle,
			Some(Ok(SearchOutcome::TooShort)) => SearchResult::TooShort,
			Some(Ok(SearchOutcome::Matches(ids))) => SearchResult::Found(ids),
			Some(Err(err)) => {
				log::warn!("search for {text:?} failed: {err}");
				SearchResult::Invalid(err.to_string())
			}
		};
		result.set(next);
	};

	let results = move || match result.get() {
		SearchResult::Idle => ().into_any(),
		SearchResult::TooShort => view! {
			<p class="search-note">
				{format!("Search for terms of at least {MIN_QUERY_CHARS} characters.")}
			</p>
		}
		.into_any(),
		SearchResult::Invalid(message) => view! { <p class="search-note">{message}</p> }.into_any(),
		SearchResult::Found(ids) if ids.is_empty() => {
			view! { <p class="search-note">"No results."</p> }.into_any()
		}
		SearchResult::Found(ids) => view! {
			<p class="search-note">{channel_count(ids.len())}</p>
			<ul class="list-unstyled search-results">
				{ids
					.into_iter()
					.map(|id| {
						view! {
							<li>
								<NodeLink id=id session=session selection=selection accessory=accessory />
							</li>
						}
					})
					.collect_view()}
			</ul>
		}
		.into_any(),
	};

	view! {
		<form id="search" on:submit=on_submit>
			<input
				type="search"
				placeholder="Search channels"
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>
			<button type="submit">"Search"</button>
		</form>
		<div id="search-results">{results}</div>
	}
}
