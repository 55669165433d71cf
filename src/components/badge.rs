use leptos::prelude::*;

use crate::data::AccessoryData;
use crate::graph::Node;

/// Neutral color for nodes outside any organization.
const UNAFFILIATED_COLOR: &str = "#ccc";

/// Group marker drawn next to a node name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupBadge {
	pub main_group: String,
	pub hollow: bool,
	pub color: String,
}

impl GroupBadge {
	pub fn for_node(node: &Node) -> Self {
		let hollow = node.is_unaffiliated();
		Self {
			main_group: node.main_group().to_owned(),
			hollow,
			color: if hollow {
				UNAFFILIATED_COLOR.to_owned()
			} else {
				node.original_color().to_owned()
			},
		}
	}

	pub fn symbol(&self) -> &'static str {
		if self.hollow { "○" } else { "●" }
	}
}

#[component]
pub fn Badge(badge: GroupBadge, accessory: RwSignal<Option<AccessoryData>>) -> impl IntoView {
	let symbol = badge.symbol();
	let style = format!("color: {}", badge.color);
	let key = badge.main_group;
	let title = move || {
		accessory.with(|a| match a {
			Some(a) => a.main_group_label(&key).to_owned(),
			None => key.clone(),
		})
	};
	view! {
		<span class="group-badge" style=style title=title>
			{symbol}
		</span>
	}
}
