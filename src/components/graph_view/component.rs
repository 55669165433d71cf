use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{CLICK_TOLERANCE, CanvasState};
use crate::graph::{ClickEvent, NodeSelection, ViewerSession};

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn GraphView(
	session: RwSignal<Option<ViewerSession>>,
	selection: RwSignal<Option<NodeSelection>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				log::error!("canvas has no 2d context");
				return;
			}
		};
		let Some(initial) = session
			.try_with_untracked(|s| s.as_ref().map(|s| CanvasState::new(s, w, h)))
			.flatten()
		else {
			return;
		};
		*state_init.borrow_mut() = Some(initial);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				s.sync_positions();
				session.try_with_untracked(|sess| {
					if let Some(sess) = sess {
						s.sync_sizes(sess);
						render::render(s, sess, &ctx);
					}
				});
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer.down = true;
			s.pointer.moved = false;
			s.pointer.start_x = x;
			s.pointer.start_y = y;
			if let Some(node) = s.node_at_position(x, y) {
				let (nx, ny) = s.positions[node];
				s.drag.active = true;
				s.drag.node = Some(node);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.drag.node_start_x = nx as f32;
				s.drag.node_start_y = ny as f32;
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pointer.down
				&& ((x - s.pointer.start_x).abs() > CLICK_TOLERANCE
					|| (y - s.pointer.start_y).abs() > CLICK_TOLERANCE)
			{
				s.pointer.moved = true;
			}
			if !s.drag.active {
				s.hover = s.node_at_position(x, y);
			}

			if s.drag.active && s.pointer.moved {
				if let Some(node) = s.drag.node {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.move_node(node, nx, ny);
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let click = {
			let mut guard = state_mu.borrow_mut();
			let Some(ref mut s) = *guard else {
				return;
			};
			let click = if s.pointer.down && !s.pointer.moved {
				pointer_position(canvas_ref, &ev).map(|(x, y)| s.node_at_position(x, y))
			} else {
				None
			};
			s.pointer.down = false;
			s.drag.active = false;
			s.drag.node = None;
			s.pan.active = false;
			click
		};
		let Some(hit) = click else {
			return;
		};
		let event = match hit {
			Some(pos) => session
				.try_with_untracked(|sess| {
					sess.as_ref()
						.and_then(|sess| sess.graph().nodes().get(pos))
						.map(|node| ClickEvent::Node(node.id.clone()))
				})
				.flatten(),
			None => Some(ClickEvent::Stage),
		};
		let Some(event) = event else {
			return;
		};
		let is_node = matches!(event, ClickEvent::Node(_));
		let picked = session
			.try_update(|sess| sess.as_mut().and_then(|sess| sess.handle_click(event)))
			.flatten();
		if is_node {
			selection.set(picked);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer.down = false;
			s.drag.active = false;
			s.drag.node = None;
			s.pan.active = false;
			s.hover = None;
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	let (state_in, state_out, state_reset) = (state.clone(), state.clone(), state.clone());
	let zoom_in = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_in.borrow_mut() {
			s.zoom_centered(2.0);
		}
	};
	let zoom_out = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_out.borrow_mut() {
			s.zoom_centered(1.0 / 1.5);
		}
	};
	let zoom_reset = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_reset.borrow_mut() {
			s.reset_view();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<div class="zoom-controls">
			<button id="zoom_in" title="Zoom in" on:click=zoom_in>"+"</button>
			<button id="zoom_out" title="Zoom out" on:click=zoom_out>"−"</button>
			<button id="zoom_reset" title="Reset zoom" on:click=zoom_reset>"⟲"</button>
		</div>
	}
}
