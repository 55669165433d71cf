use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;
use crate::graph::ViewerSession;

pub fn render(state: &CanvasState, session: &ViewerSession, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&session.settings().background_color);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, session, ctx);
	draw_nodes(state, session, ctx);
	ctx.restore();
}

fn draw_edges(state: &CanvasState, session: &ViewerSession, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let arrow_size = 4.0 / k;
	let edges = session.graph().edges();

	for (i, &(src, tgt)) in state.edges.iter().enumerate() {
		let (Some(&(x1, y1)), Some(&(x2, y2)), Some(edge)) =
			(state.positions.get(src), state.positions.get(tgt), edges.get(i))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (r1, r2) = (
			state.radii.get(src).copied().unwrap_or(0.0),
			state.radii.get(tgt).copied().unwrap_or(0.0),
		);
		let width = state.edge_widths.get(i).copied().unwrap_or(1.0).max(0.5 / k);

		ctx.set_stroke_style_str(&edge.color);
		ctx.set_line_width(width);
		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		ctx.set_fill_style_str(&edge.color);
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_nodes(state: &CanvasState, session: &ViewerSession, ctx: &CanvasRenderingContext2d) {
	let settings = session.settings();
	let nodes = session.graph().nodes();
	let k = state.transform.k;
	let selected = session.selected().and_then(|id| session.graph().position(id.as_str()));

	// Faded nodes first so lit ones stay on top.
	for lit in [false, true] {
		for (i, node) in nodes.iter().enumerate() {
			if (node.color != settings.fade_color) != lit {
				continue;
			}
			let (Some(&(x, y)), Some(&radius)) = (state.positions.get(i), state.radii.get(i)) else {
				continue;
			};

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&node.color);
			ctx.fill();

			let emphasized = state.hover == Some(i) || selected == Some(i);
			if emphasized {
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str(&settings.label_color);
				ctx.set_line_width(1.5 / k);
				ctx.stroke();
			}

			if lit && !node.label.is_empty() && (emphasized || radius * k >= settings.label_threshold) {
				let weight = if emphasized { "bold " } else { "" };
				ctx.set_fill_style_str(&settings.label_color);
				ctx.set_font(&format!("{weight}{}px {}", settings.label_size / k, settings.font));
				let _ = ctx.fill_text(&node.label, x + radius + 3.0 / k, y + 3.0 / k);
			}
		}
	}
}
