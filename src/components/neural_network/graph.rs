//! Layered graph generation.
//!
//! Nodes are placed in evenly spaced columns, one per layer, with a little
//! vertical jitter so the result does not read as a grid. Every node outside
//! the last layer fans out to between one and three distinct nodes of the
//! next layer.

use rand::Rng;
use rand::seq::index;

use super::config::NetworkConfig;
use super::state::Scene;
use super::types::{Edge, Node, Point, Rgba};

/// Vertical jitter as a fraction of the surface height, applied both ways.
const JITTER: f64 = 0.05;
const MAX_FAN_OUT: usize = 3;

/// Translucent violet that every pulse color is jittered around.
const PULSE_BASE: Rgba = Rgba::new(139, 92, 246, 0.8);
const PULSE_JITTER: i16 = 25;

/// Builds a fresh scene for a `width` x `height` surface.
pub fn generate<R: Rng + ?Sized>(
	config: &NetworkConfig,
	width: f64,
	height: f64,
	rng: &mut R,
) -> Scene {
	let layers = config.layers();
	let positions = layout(layers, width, height, rng);

	let mut nodes: Vec<Node> = layers
		.iter()
		.enumerate()
		.flat_map(|(layer, &count)| std::iter::repeat_n(layer, count))
		.zip(positions)
		.map(|(layer, pos)| Node {
			pos,
			layer,
			radius: rng.gen_range(3.0..5.0),
			phase: rng.gen_range(0.0..1.0),
			phase_rate: rng.gen_range(0.02..0.05),
			edges: Vec::new(),
		})
		.collect();

	let mut edges = Vec::new();
	let mut start = 0;
	for pair in layers.windows(2) {
		let (count, next_count) = (pair[0], pair[1]);
		let next_start = start + count;
		for source in start..next_start {
			let fan_out = rng.gen_range(1..=MAX_FAN_OUT).min(next_count);
			for offset in index::sample(rng, next_count, fan_out) {
				nodes[source].edges.push(edges.len());
				edges.push(random_edge(source, next_start + offset, rng));
			}
		}
		start = next_start;
	}

	Scene {
		nodes,
		edges,
		layers: layers.to_vec(),
		width,
		height,
	}
}

/// Moves every node to a freshly jittered position for a new surface size,
/// leaving edges and animation state untouched.
pub fn relayout<R: Rng + ?Sized>(scene: &mut Scene, width: f64, height: f64, rng: &mut R) {
	let positions = layout(&scene.layers, width, height, rng);
	for (node, pos) in scene.nodes.iter_mut().zip(positions) {
		node.pos = pos;
	}
	scene.width = width;
	scene.height = height;
}

/// Node positions in layer order. Divisors are always at least 2, so a zero
/// sized surface collapses everything onto the origin instead of dividing by
/// zero.
fn layout<R: Rng + ?Sized>(layers: &[usize], width: f64, height: f64, rng: &mut R) -> Vec<Point> {
	let columns = (layers.len() + 1) as f64;
	let jitter = height * JITTER;
	let mut positions = Vec::with_capacity(layers.iter().sum());
	for (layer, &count) in layers.iter().enumerate() {
		let x = (layer + 1) as f64 * width / columns;
		let rows = (count + 1) as f64;
		for i in 0..count {
			let y = (i + 1) as f64 * height / rows;
			let offset = if jitter > 0.0 {
				rng.gen_range(-jitter..jitter)
			} else {
				0.0
			};
			positions.push(Point::new(x, y + offset));
		}
	}
	positions
}

fn random_edge<R: Rng + ?Sized>(source: usize, target: usize, rng: &mut R) -> Edge {
	Edge {
		source,
		target,
		width: rng.gen_range(0.5..1.5),
		active: rng.gen_bool(0.5),
		progress: 0.0,
		speed: rng.gen_range(0.005..0.015),
		glow_radius: rng.gen_range(2.0..4.0),
		color: pulse_color(rng),
	}
}

fn pulse_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba {
	let mut channel = |base: u8| {
		(base as i16 + rng.gen_range(-PULSE_JITTER..=PULSE_JITTER)).clamp(0, 255) as u8
	};
	Rgba::new(
		channel(PULSE_BASE.r),
		channel(PULSE_BASE.g),
		channel(PULSE_BASE.b),
		PULSE_BASE.a,
	)
}
