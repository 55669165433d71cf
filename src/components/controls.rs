use leptos::ev::Event;
use leptos::prelude::*;

use crate::data::AccessoryData;
use crate::graph::{ColorMode, NodeSelection, ViewerSession};

/// What the selects should show for the current session.
#[derive(Clone, Debug, Default, PartialEq)]
struct ControlValues {
	group: String,
	size: String,
	color: ColorMode,
}

impl ControlValues {
	fn of(session: &ViewerSession) -> Self {
		Self {
			group: session.group_filter().unwrap_or_default().to_owned(),
			size: session.size_measure().to_owned(),
			color: session.color_mode(),
		}
	}
}

/// Group filter, size measure and color mode selects.
#[component]
pub fn Controls(
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	accessory: RwSignal<Option<AccessoryData>>,
) -> impl IntoView {
	let current = Memo::new(move |_| {
		session.with(|s| s.as_ref().map(ControlValues::of).unwrap_or_default())
	});

	let on_group = move |ev: Event| {
		let value = event_target_value(&ev);
		session.try_update(|s| s.as_mut().map(|s| s.apply_group_filter(&value)));
		selection.set(None);
	};
	let on_size = move |ev: Event| {
		let value = event_target_value(&ev);
		session.try_update(|s| s.as_mut().map(|s| s.set_size_measure(&value)));
	};
	let on_color = move |ev: Event| {
		let mode = ColorMode::from_key(&event_target_value(&ev));
		session.try_update(|s| s.as_mut().map(|s| s.set_color_mode(mode)));
		selection.set(None);
	};

	let group_options = move || {
		accessory.with(|data| {
			data.iter()
				.flat_map(|data| data.groups.iter())
				.map(|group| {
					let key = group.key().to_owned();
					let value = key.clone();
					view! {
						<option value=value prop:selected=move || current.with(|c| c.group == key)>
							{group.label().to_owned()}
						</option>
					}
				})
				.collect_view()
		})
	};
	let size_options = move || {
		accessory.with(|data| {
			data.iter()
				.flat_map(|data| data.measures.iter())
				.map(|measure| {
					let key = measure.key.clone();
					view! {
						<option
							value=measure.key.clone()
							prop:selected=move || current.with(|c| c.size == key)
						>
							{measure.label.clone()}
						</option>
					}
				})
				.collect_view()
		})
	};
	let color_option = move |mode: ColorMode, label: &'static str| {
		view! {
			<option value=mode.key() prop:selected=move || current.with(|c| c.color == mode)>
				{label}
			</option>
		}
	};

	view! {
		<div class="controls">
			<label>
				"Group "
				<select id="group-select" on:change=on_group>
					<option value="" prop:selected=move || current.with(|c| c.group.is_empty())>
						"All the map"
					</option>
					{group_options}
				</select>
			</label>
			<label>
				"Size "
				<select id="size-select" on:change=on_size>
					{size_options}
				</select>
			</label>
			<label>
				"Color "
				<select id="color-select" on:change=on_color>
					{color_option(ColorMode::Group, "Group")}
					{color_option(ColorMode::ActivityIndex, "Activity index")}
				</select>
			</label>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ViewerSettings;
	use crate::graph::ClickEvent;
	use serde_json::json;

	fn session() -> ViewerSession {
		let data = serde_json::from_value(json!({
			"nodes": [
				{"id": "a", "group": "news", "color": "1,1,1", "temp": 2},
				{"id": "b", "group": "sport", "color": "2,2,2"}
			],
			"edges": [{"source": "a", "target": "b", "weight": 1}]
		}))
		.unwrap();
		ViewerSession::new(data, ViewerSettings::default())
	}

	#[test]
	fn node_click_resets_the_color_select() {
		let mut session = session();
		session.set_color_mode(ColorMode::ActivityIndex);
		assert_eq!(ControlValues::of(&session).color, ColorMode::ActivityIndex);

		session.handle_click(ClickEvent::Node("a".into()));
		assert_eq!(ControlValues::of(&session).color, ColorMode::Group);
	}

	#[test]
	fn stage_click_resets_the_group_select() {
		let mut session = session();
		session.apply_group_filter("news");
		assert_eq!(ControlValues::of(&session).group, "news");

		session.handle_click(ClickEvent::Stage);
		assert_eq!(
			ControlValues::of(&session),
			ControlValues {
				group: String::new(),
				size: "in_deg".into(),
				color: ColorMode::Group,
			}
		);
	}
}
