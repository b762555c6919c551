use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use super::config::{NetworkConfig, ResizePolicy};
use super::graph;
use super::pulse;
use super::render::{self, Painter};
use super::surface::SurfaceMetrics;
use super::types::{Edge, Node};

/// Everything that is simulated and drawn. Rebuilt wholesale by the
/// generator; only phases, progress and activity change between rebuilds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	/// Node count per layer.
	pub layers: Vec<usize>,
	pub width: f64,
	pub height: f64,
}

/// Owns the scene, its config and its random source.
pub struct NetworkState<R = StdRng> {
	config: NetworkConfig,
	scene: Scene,
	rng: R,
	/// Cleared while the surface has no pixels.
	drawable: bool,
}

impl<R: Rng> NetworkState<R> {
	/// Starts with an empty scene; nothing is drawn until the first
	/// non-degenerate [`resize`](Self::resize).
	pub fn new(config: NetworkConfig, rng: R) -> Self {
		Self {
			config,
			scene: Scene::default(),
			rng,
			drawable: false,
		}
	}

	#[cfg(test)]
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// Adapts the scene to a new addressable size. Degenerate sizes only pause
	/// drawing; the next real size brings the scene back.
	pub fn resize(&mut self, metrics: SurfaceMetrics) {
		let SurfaceMetrics { width, height, .. } = metrics;
		if metrics.is_degenerate() {
			debug!("surface {width}x{height} has no pixels, pausing");
			self.drawable = false;
			return;
		}
		match self.config.resize {
			ResizePolicy::Relayout if !self.scene.nodes.is_empty() => {
				graph::relayout(&mut self.scene, width, height, &mut self.rng);
			}
			_ => {
				self.scene = graph::generate(&self.config, width, height, &mut self.rng);
				debug!(
					"generated {} nodes and {} edges for {width}x{height}",
					self.scene.nodes.len(),
					self.scene.edges.len()
				);
			}
		}
		self.drawable = true;
	}

	/// Advances the pulse state by one tick.
	pub fn advance(&mut self) {
		pulse::step(&mut self.scene, &self.config.pulse, &mut self.rng);
	}

	/// One tick: simulate, then draw. Skipped entirely while not drawable.
	pub fn frame<P: Painter + ?Sized>(&mut self, painter: &mut P) {
		if !self.drawable {
			return;
		}
		self.advance();
		render::draw_scene(&self.scene, painter);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;
	use crate::components::neural_network::render::tests::{Call, Recorder};

	fn state(policy: ResizePolicy) -> NetworkState {
		NetworkState::new(
			NetworkConfig::default().with_resize(policy),
			StdRng::seed_from_u64(17),
		)
	}

	#[test]
	fn nothing_is_drawn_before_first_resize() {
		let mut state = state(ResizePolicy::Regenerate);
		let mut rec = Recorder::default();
		state.frame(&mut rec);
		assert!(rec.calls.is_empty());
		assert!(state.scene().nodes.is_empty());
	}

	#[test]
	fn resize_regenerates_by_default() {
		let mut state = state(ResizePolicy::Regenerate);
		state.resize(SurfaceMetrics::new(800.0, 600.0, 1.0));
		let before = state.scene().clone();
		state.resize(SurfaceMetrics::new(400.0, 300.0, 1.0));
		assert_eq!(state.scene().nodes.len(), 27);
		assert_eq!((state.scene().width, state.scene().height), (400.0, 300.0));
		assert_ne!(state.scene().edges, before.edges);
	}

	#[test]
	fn relayout_policy_keeps_animation_state() {
		let mut state = state(ResizePolicy::Relayout);
		state.resize(SurfaceMetrics::new(800.0, 600.0, 1.0));
		for _ in 0..50 {
			state.advance();
		}
		let before = state.scene().clone();
		state.resize(SurfaceMetrics::new(400.0, 300.0, 1.0));
		assert_eq!(state.scene().edges, before.edges);
		assert_ne!(state.scene().nodes[0].pos, before.nodes[0].pos);
	}

	#[test]
	fn degenerate_size_pauses_drawing() {
		let mut state = state(ResizePolicy::Regenerate);
		state.resize(SurfaceMetrics::new(800.0, 600.0, 1.0));
		state.resize(SurfaceMetrics::new(0.0, 600.0, 1.0));
		let frozen = state.scene().clone();
		let mut rec = Recorder::default();
		state.frame(&mut rec);
		assert!(rec.calls.is_empty());
		assert_eq!(state.scene(), &frozen);

		state.resize(SurfaceMetrics::new(640.0, 480.0, 1.0));
		state.frame(&mut rec);
		assert_eq!(rec.calls[0], Call::Clear(640.0, 480.0));
	}

	#[test]
	fn zero_area_mount_draws_once_container_grows() {
		let mut state = state(ResizePolicy::Regenerate);
		state.resize(SurfaceMetrics::new(1280.0, 0.0, 2.0));
		let mut rec = Recorder::default();
		for _ in 0..10 {
			state.frame(&mut rec);
		}
		assert!(rec.calls.is_empty());
		assert!(state.scene().nodes.is_empty());

		state.resize(SurfaceMetrics::new(1280.0, 360.0, 2.0));
		state.frame(&mut rec);
		assert_eq!(rec.calls[0], Call::Clear(1280.0, 360.0));
		assert_eq!(state.scene().nodes.len(), 27);
	}

	#[test]
	fn frame_advances_then_draws_everything() {
		let mut state = state(ResizePolicy::Regenerate);
		state.resize(SurfaceMetrics::new(800.0, 600.0, 1.0));
		let phase = state.scene().nodes[0].phase;
		let mut rec = Recorder::default();
		state.frame(&mut rec);
		let node = &state.scene().nodes[0];
		assert!((node.phase - (phase + node.phase_rate) % 1.0).abs() < 1e-12);
		let lines = rec.calls.iter().filter(|c| matches!(c, Call::Line(..))).count();
		let discs = rec.calls.iter().filter(|c| matches!(c, Call::Disc(..))).count();
		assert_eq!(lines, state.scene().edges.len());
		assert_eq!(discs, 27);
	}
}
