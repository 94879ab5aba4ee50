use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::reducer::{self, EdgeDisplay, NodeDisplay};
use super::state::NetworkState;

const BACKGROUND: &str = "#F9FAFB";
const LABEL_COLOR: &str = "#000000";
const LABEL_SIZE: f64 = 14.0;
const LINE_HEIGHT: f64 = 1.2;

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let hovered = state.hover.hovered();
	let k = state.transform.k;
	let mut raised: Vec<((f64, f64, f64, f64), EdgeDisplay)> = Vec::new();

	for (_, edge) in state.graph.edges() {
		let (n1, n2) = (state.graph.node(edge.source), state.graph.node(edge.target));
		let line = (n1.x, n1.y, n2.x, n2.y);
		let shown = reducer::reduce_edge(edge, hovered);
		if shown.raised {
			raised.push((line, shown));
		} else {
			stroke_edge(ctx, line, &shown, k);
		}
	}
	for (line, shown) in &raised {
		stroke_edge(ctx, *line, shown, k);
	}
}

fn stroke_edge(
	ctx: &CanvasRenderingContext2d,
	(x1, y1, x2, y2): (f64, f64, f64, f64),
	shown: &EdgeDisplay,
	k: f64,
) {
	ctx.set_stroke_style_str(&shown.color);
	// edge sizes are screen pixels
	ctx.set_line_width(shown.size / k);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let hovered = state.hover.hovered();
	let k = state.transform.k;
	let mut raised = Vec::new();

	for (idx, node) in state.graph.nodes() {
		let shown = reducer::reduce_node(node, hovered);
		if shown.raised {
			raised.push((idx, node.x, node.y, shown));
		} else {
			fill_node(ctx, node.x, node.y, &shown, k);
		}
	}

	for (idx, x, y, shown) in &raised {
		if Some(*idx) == hovered {
			draw_glow(ctx, *x, *y, shown.size);
		}
		fill_node(ctx, *x, *y, shown, k);
	}
}

fn fill_node(ctx: &CanvasRenderingContext2d, x: f64, y: f64, shown: &NodeDisplay, k: f64) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, shown.size, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&shown.color);
	ctx.fill();

	ctx.set_fill_style_str(LABEL_COLOR);
	let font_size = LABEL_SIZE / k.max(0.5);
	ctx.set_font(&format!("bold {}px sans-serif", font_size));
	for (line, text) in shown.label.lines().enumerate() {
		let _ = ctx.fill_text(
			text,
			x + shown.size + 3.0,
			y + 4.0 + line as f64 * font_size * LINE_HEIGHT,
		);
	}
}

fn draw_glow(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) {
	let glow_radius = radius * 2.2;
	let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) else {
		return;
	};
	let stops = [
		(0.0, "rgba(255, 87, 51, 0.35)"),
		(0.6, "rgba(255, 87, 51, 0.1)"),
		(1.0, "rgba(255, 87, 51, 0)"),
	];
	for (offset, color) in stops {
		if gradient.add_color_stop(offset, color).is_err() {
			return;
		}
	}
	ctx.begin_path();
	let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}
