use leptos::prelude::*;
use web_sys::MouseEvent;

use super::badge::{Badge, GroupBadge};
use crate::data::AccessoryData;
use crate::graph::classify::summarize_sharings;
use crate::graph::{ClickEvent, GroupNotice, NodeId, NodeSelection, SharingSummary, ViewerSession};

/// Counts are exported as floats; show whole numbers without decimals.
pub fn format_count(value: f64) -> String {
	if value.fract() == 0.0 {
		format!("{value:.0}")
	} else {
		format!("{value:.2}")
	}
}

/// Select a node picked from a list: a stage click, then a node click.
pub fn select_from_list(
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	id: NodeId,
) {
	let picked = session
		.try_update(|s| s.as_mut().and_then(|s| s.select_node(id)))
		.flatten();
	selection.set(picked);
}

#[component]
pub fn NodeLink(
	id: NodeId,
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	accessory: RwSignal<Option<AccessoryData>>,
) -> impl IntoView {
	let found = session
		.try_with_untracked(|s| {
			s.as_ref()
				.and_then(|s| s.graph().node(id.as_str()))
				.map(|n| (n.label.clone(), GroupBadge::for_node(n)))
		})
		.flatten();
	let (label, badge) = match found {
		Some((label, badge)) => (label, Some(badge)),
		None => (id.to_string(), None),
	};
	let on_click = move |ev: MouseEvent| {
		ev.prevent_default();
		select_from_list(session, selection, id.clone());
	};
	view! {
		{badge.map(|badge| view! { <Badge badge=badge accessory=accessory /> " " })}
		<a href="#" class="node-link" on:click=on_click>
			{label}
		</a>
	}
}

#[component]
fn NeighborList(
	title: &'static str,
	ids: Vec<NodeId>,
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	accessory: RwSignal<Option<AccessoryData>>,
) -> impl IntoView {
	let count = ids.len();
	view! {
		<section class="neighbors">
			<h4>{title} " (" {count} ")"</h4>
			<ul class="list-unstyled">
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
		</section>
	}
}

#[component]
fn SharingList(
	title: &'static str,
	summary: SharingSummary,
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	accessory: RwSignal<Option<AccessoryData>>,
) -> impl IntoView {
	view! {
		<section class="sharings">
			<h4>{title} " (" {format_count(summary.total)} ")"</h4>
			{summary
				.groups
				.into_iter()
				.map(|group| {
					let name = accessory
						.with_untracked(|a| match a {
							Some(a) => a.main_group_label(&group.group).to_owned(),
							None => group.group.clone(),
						});
					view! {
						<div class="sharings-separator">
							<strong>{name} " (" {format_count(group.total)} ")"</strong>
							<ul class="list-unstyled">
								{group
									.members
									.into_iter()
									.map(|(id, weight)| {
										view! {
											<li>
												<NodeLink id=id session=session selection=selection accessory=accessory />
												" (" {format_count(weight)} ")"
											</li>
										}
									})
									.collect_view()}
							</ul>
						</div>
					}
				})
				.collect_view()}
		</section>
	}
}

#[component]
fn NodeDetails(
	selection_value: NodeSelection,
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	accessory: RwSignal<Option<AccessoryData>>,
) -> impl IntoView {
	let id = selection_value.id.clone();
	let Some((node, lists)) = session
		.try_with_untracked(|s| {
			let s = s.as_ref()?;
			let node = s.graph().node(id.as_str())?.clone();
			let graph = s.graph();
			let neighbors = &selection_value.neighbors;
			let sharings = &selection_value.sharings;
			Some((
				node,
				(
					graph.sort_by_label(neighbors.mutual.iter().cloned()),
					graph.sort_by_label(neighbors.in_only.iter().cloned()),
					graph.sort_by_label(neighbors.out_only.iter().cloned()),
					summarize_sharings(&sharings.in_sharing, graph),
					summarize_sharings(&sharings.out_sharing, graph),
				),
			))
		})
		.flatten()
	else {
		return view! { <p>"Unknown node " {id.to_string()}</p> }.into_any();
	};
	let (mutual, inbound, outbound, in_sharing, out_sharing) = lists;
	let self_sharing = selection_value.sharings.self_sharing;
	let badge = GroupBadge::for_node(&node);
	let group_name = accessory.with_untracked(|a| match a {
		Some(a) => a.main_group_label(&badge.main_group).to_owned(),
		None => badge.main_group.clone(),
	});

	let details = match node.notice() {
		GroupNotice::Unaffiliated => view! {
			<p class="disclaimer">"This channel is not attributed to any group."</p>
		}
		.into_any(),
		GroupNotice::Wiki => view! {
			<p class="disclaimer">"This channel was added from an external list."</p>
		}
		.into_any(),
		GroupNotice::Details => view! {
			<dl class="node-details">
				<dt>"Group"</dt>
				<dd><Badge badge=badge.clone() accessory=accessory /> " " {group_name}</dd>
				<dt>"Inbound connections"</dt>
				<dd>{format_count(node.in_degree())}</dd>
				<dt>"Outbound connections"</dt>
				<dd>{format_count(node.out_degree())}</dd>
				<dt>"Users"</dt>
				<dd>{format_count(node.fans())}</dd>
				<dt>"Messages"</dt>
				<dd>{format_count(node.messages_count())}</dd>
				<dt>"Activity period"</dt>
				<dd>{node.activity_period.clone().unwrap_or_default()}</dd>
			</dl>
		}
		.into_any(),
	};

	view! {
		<h3>
			<Badge badge=badge accessory=accessory />
			" "
			{node.label.clone()}
		</h3>
		{node.pic.clone().map(|src| view! { <img src=src style="max-width: 60px;" /> })}
		{match (node.handle(), node.profile_url()) {
			(Some(handle), Some(href)) => {
				Some(view! { <a href=href target="_blank">"@" {handle.to_owned()}</a> })
			}
			_ => None,
		}}
		{node.location.clone().map(|p| view! { <p class="location">"[" {p} "]"</p> })}
		{node.is_lost.then(|| view! { <p class="lost">"This channel is no longer reachable."</p> })}
		{details}
		<NeighborList title="Mutual" ids=mutual session=session selection=selection accessory=accessory />
		<NeighborList title="Inbound" ids=inbound session=session selection=selection accessory=accessory />
		<NeighborList title="Outbound" ids=outbound session=session selection=selection accessory=accessory />
		<p class="self-sharing">"Self sharings: " {format_count(self_sharing)}</p>
		<SharingList title="Shared from" summary=in_sharing session=session selection=selection accessory=accessory />
		<SharingList title="Shared to" summary=out_sharing session=session selection=selection accessory=accessory />
	}
	.into_any()
}

/// Sidebar describing the selected node.
#[component]
pub fn InfoPanel(
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	accessory: RwSignal<Option<AccessoryData>>,
) -> impl IntoView {
	let close = move |_: MouseEvent| {
		session.try_update(|s| s.as_mut().map(|s| s.handle_click(ClickEvent::Stage)));
		selection.set(None);
	};

	view! {
		<Show when=move || selection.with(Option::is_some)>
			<aside id="infobar" class="infobar">
				<button class="infobar-toggle" title="Close" on:click=close>"×"</button>
				{move || {
					selection
						.get()
						.map(|value| {
							view! {
								<NodeDetails
									selection_value=value
									session=session
									selection=selection
									accessory=accessory
								/>
							}
						})
				}}
			</aside>
		</Show>
	}
}
