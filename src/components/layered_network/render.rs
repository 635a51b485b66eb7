use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::layout::{Edge, Graph, Node};
use super::types::Size;

pub const NODE_RADIUS: f64 = 5.0;
pub const ACTIVE_NODE_RADIUS: f64 = 8.0;
const NODE_GLOW_RADIUS: f64 = 14.0;
const PARTICLE_RADIUS: f64 = 3.0;
const PARTICLE_GLOW_RADIUS: f64 = 6.0;
const LABEL_OFFSET: f64 = 15.0;

const EDGE_START_RGB: (u8, u8, u8) = (139, 92, 246);
const EDGE_END_RGB: (u8, u8, u8) = (59, 130, 246);
const PARTICLE_COLOR: &str = "#a78bfa";
const PARTICLE_GLOW_COLOR: &str = "rgba(167, 139, 250, 0.3)";
const LABEL_ACTIVE_COLOR: &str = "#1f2937";
const LABEL_RESTING_COLOR: &str = "#9ca3af";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
	Left,
	Right,
}

impl TextAlign {
	fn as_str(self) -> &'static str {
		match self {
			TextAlign::Left => "left",
			TextAlign::Right => "right",
		}
	}
}

/// 2D target the network is painted on.
pub trait Surface {
	fn size(&self) -> Size;
	fn clear(&mut self);
	fn stroke_gradient_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		stops: (&str, &str),
		width: f64,
	);
	fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str);
	fn fill_text(&mut self, text: &str, at: (f64, f64), align: TextAlign, color: &str);
}

/// Paints one frame. `progress` places the particle on every lit edge.
pub fn render<S: Surface>(graph: &Graph, progress: f64, surface: &mut S) {
	if surface.size().is_empty() {
		return;
	}
	surface.clear();
	draw_edges(graph, progress, surface);
	draw_nodes(graph, surface);
	draw_labels(graph, surface);
}

fn rgba((r, g, b): (u8, u8, u8), alpha: f64) -> String {
	format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

/// Appends a two-digit hex alpha to a `#rrggbb` colour.
pub fn with_alpha(color: &str, alpha: f64) -> String {
	format!("{}{:02x}", color, (alpha.clamp(0.0, 1.0) * 255.0).floor() as u8)
}

pub fn edge_alpha(edge: &Edge) -> f64 {
	(if edge.active { 0.8 } else { 0.2 }) * edge.strength
}

fn draw_edges<S: Surface>(graph: &Graph, progress: f64, surface: &mut S) {
	let nodes = graph.nodes();
	for edge in graph.edges() {
		let (from, to) = (&nodes[edge.from], &nodes[edge.to]);
		let alpha = edge_alpha(edge);
		let width = if edge.active { 2.0 } else { 1.0 };
		surface.stroke_gradient_line(
			(from.x, from.y),
			(to.x, to.y),
			(&rgba(EDGE_START_RGB, alpha), &rgba(EDGE_END_RGB, alpha)),
			width,
		);
		if edge.active {
			draw_particle(from, to, progress, surface);
		}
	}
}

fn draw_particle<S: Surface>(from: &Node, to: &Node, progress: f64, surface: &mut S) {
	let at = (
		from.x + (to.x - from.x) * progress,
		from.y + (to.y - from.y) * progress,
	);
	surface.fill_circle(at, PARTICLE_GLOW_RADIUS, PARTICLE_GLOW_COLOR);
	surface.fill_circle(at, PARTICLE_RADIUS, PARTICLE_COLOR);
}

fn draw_nodes<S: Surface>(graph: &Graph, surface: &mut S) {
	for node in graph.nodes() {
		if node.active {
			surface.fill_circle((node.x, node.y), NODE_GLOW_RADIUS, &with_alpha(&node.color, 0.2));
		}
		let (radius, alpha) = if node.active {
			(ACTIVE_NODE_RADIUS, 1.0)
		} else {
			(NODE_RADIUS, 0.6)
		};
		surface.fill_circle((node.x, node.y), radius, &with_alpha(&node.color, alpha));
	}
}

fn draw_labels<S: Surface>(graph: &Graph, surface: &mut S) {
	let last_layer = graph.layer_count().saturating_sub(1);
	for node in graph.nodes() {
		let Some(label) = node.label.as_deref().filter(|l| !l.is_empty()) else {
			continue;
		};
		if !graph.is_boundary_layer(node.layer) {
			continue;
		}
		let color = if node.active {
			LABEL_ACTIVE_COLOR
		} else {
			LABEL_RESTING_COLOR
		};
		// a lone layer counts as the input side
		if node.layer == 0 || last_layer == 0 {
			surface.fill_text(label, (node.x - LABEL_OFFSET, node.y), TextAlign::Right, color);
		} else {
			surface.fill_text(label, (node.x + LABEL_OFFSET, node.y), TextAlign::Left, color);
		}
	}
}

/// Browser canvas backed surface.
pub struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
	size: Size,
}

impl CanvasSurface {
	pub fn new(ctx: CanvasRenderingContext2d, size: Size) -> Self {
		Self { ctx, size }
	}

	pub fn resize(&mut self, size: Size) {
		self.size = size;
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> Size {
		self.size
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(0.0, 0.0, self.size.width, self.size.height);
	}

	fn stroke_gradient_line(
		&mut self,
		from: (f64, f64),
		to: (f64, f64),
		(start, end): (&str, &str),
		width: f64,
	) {
		let gradient = self.ctx.create_linear_gradient(from.0, from.1, to.0, to.1);
		if gradient.add_color_stop(0.0, start).is_err()
			|| gradient.add_color_stop(1.0, end).is_err()
		{
			return;
		}
		#[allow(deprecated)]
		self.ctx.set_stroke_style(&gradient);
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}

	fn fill_circle(&mut self, (x, y): (f64, f64), radius: f64, color: &str) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		self.ctx.set_fill_style_str(color);
		self.ctx.fill();
	}

	fn fill_text(&mut self, text: &str, (x, y): (f64, f64), align: TextAlign, color: &str) {
		self.ctx.set_font("11px sans-serif");
		self.ctx.set_text_align(align.as_str());
		self.ctx.set_text_baseline("middle");
		self.ctx.set_fill_style_str(color);
		let _ = self.ctx.fill_text(text, x, y);
	}
}
