use leptos::prelude::*;

use crate::data::AccessoryData;

/// Group legend and map totals.
#[component]
pub fn Legend(accessory: RwSignal<Option<AccessoryData>>) -> impl IntoView {
	move || {
		accessory.with(|data| {
			data.as_ref().map(|data| {
				let rows = data
					.groups
					.iter()
					.map(|group| {
						let style = format!("color: {};", group.color());
						view! {
							<li style="padding-bottom: .75em;">
								<span class="legend-dot" style=style>"●"</span>
								" "
								{group.legend_text()}
							</li>
						}
					})
					.collect_view();
				let totals = data.total_pages_count.map(|total| {
					view! {
						<p class="totals">
							"Channels on the map: "
							{data.total_interesting_pages_count.unwrap_or(total)}
							" of "
							{total}
						</p>
					}
				});
				view! {
					<ul id="legend" class="list-unstyled">
						{rows}
					</ul>
					{totals}
				}
			})
		})
	}
}
