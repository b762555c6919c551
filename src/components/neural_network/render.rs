use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::Scene;
use super::types::{Point, Rgba};

const EDGE_COLOR: Rgba = Rgba::new(139, 92, 246, 0.15);
const NODE_GLOW: Rgba = Rgba::new(167, 139, 250, 0.45);
const NODE_CORE: Rgba = Rgba::new(221, 214, 254, 0.9);

/// Pulse blob radius relative to the edge's glow radius.
const PULSE_SPREAD: f64 = 2.0;
/// Node glow radius relative to its pulsing size.
const GLOW_SPREAD: f64 = 3.0;
const CORE_SCALE: f64 = 0.6;

/// Minimal set of draw calls the scene needs.
pub trait Painter {
	fn clear(&mut self, width: f64, height: f64);
	fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba);
	/// Filled circle with a radial gradient from `color` at the center to
	/// fully transparent at `radius`.
	fn glow(&mut self, center: Point, radius: f64, color: Rgba);
	fn disc(&mut self, center: Point, radius: f64, color: Rgba);
}

/// Node size for the current glow phase.
pub fn pulse_size(radius: f64, phase: f64) -> f64 {
	radius * (1.0 + 0.5 * (phase * PI).sin() * 0.3)
}

pub fn draw_scene<P: Painter + ?Sized>(scene: &Scene, painter: &mut P) {
	painter.clear(scene.width, scene.height);
	draw_edges(scene, painter);
	draw_nodes(scene, painter);
}

fn draw_edges<P: Painter + ?Sized>(scene: &Scene, painter: &mut P) {
	for edge in &scene.edges {
		let (from, to) = (scene.nodes[edge.source].pos, scene.nodes[edge.target].pos);
		painter.line(from, to, edge.width, EDGE_COLOR);
		if edge.active {
			let at = from.lerp(to, edge.progress);
			painter.glow(at, edge.glow_radius * PULSE_SPREAD, edge.color);
		}
	}
}

fn draw_nodes<P: Painter + ?Sized>(scene: &Scene, painter: &mut P) {
	for node in &scene.nodes {
		let size = pulse_size(node.radius, node.phase);
		painter.glow(node.pos, size * GLOW_SPREAD, NODE_GLOW);
		painter.disc(node.pos, size * CORE_SCALE, NODE_CORE);
	}
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn line(&mut self, from: Point, to: Point, width: f64, color: Rgba) {
		self.set_stroke_style_str(&color.to_string());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.x, from.y);
		self.line_to(to.x, to.y);
		self.stroke();
	}

	fn glow(&mut self, center: Point, radius: f64, color: Rgba) {
		let Ok(gradient) =
			self.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)
		else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.to_string());
		let _ = gradient.add_color_stop(1.0, &color.transparent().to_string());
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}

	fn disc(&mut self, center: Point, radius: f64, color: Rgba) {
		self.begin_path();
		let _ = self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		self.set_fill_style_str(&color.to_string());
		self.fill();
	}
}
