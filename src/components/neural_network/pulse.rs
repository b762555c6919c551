//! Per-tick pulse state machines.
//!
//! Edges carry a pulse from source to target while active and go idle at
//! random once it arrives. Nodes glow on their own clock and occasionally fire,
//! waking some of their idle outgoing edges. There is no global schedule;
//! bursts of activity emerge from those local rolls.

use rand::Rng;

use super::config::PulseParams;
use super::state::Scene;

/// Advances every edge, then every node, by one tick.
pub fn step<R: Rng + ?Sized>(scene: &mut Scene, params: &PulseParams, rng: &mut R) {
	for edge in &mut scene.edges {
		if edge.active {
			edge.progress += edge.speed;
			if edge.progress > 1.0 {
				edge.progress = 0.0;
				edge.active = roll(rng, params.survive);
			}
		} else if roll(rng, params.reactivate) {
			edge.active = true;
		}
	}

	for node in &mut scene.nodes {
		node.phase = (node.phase + node.phase_rate) % 1.0;
		if !roll(rng, params.fire) {
			continue;
		}
		for &idx in &node.edges {
			let edge = &mut scene.edges[idx];
			if !edge.active && roll(rng, params.fire_spread) {
				edge.active = true;
				edge.progress = 0.0;
			}
		}
	}
}

fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
	let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
	rng.gen_bool(chance)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::neural_network::config::NetworkConfig;
	use crate::components::neural_network::graph;
	use crate::components::neural_network::types::{Edge, Node, Point, Rgba};

	fn node(phase_rate: f64, edges: Vec<usize>) -> Node {
		Node {
			pos: Point::default(),
			layer: 0,
			radius: 4.0,
			phase: 0.0,
			phase_rate,
			edges,
		}
	}

	fn edge(active: bool, progress: f64, speed: f64) -> Edge {
		Edge {
			source: 0,
			target: 1,
			width: 1.0,
			active,
			progress,
			speed,
			glow_radius: 3.0,
			color: Rgba::new(139, 92, 246, 0.8),
		}
	}

	fn make_scene(nodes: Vec<Node>, edges: Vec<Edge>) -> Scene {
		Scene {
			nodes,
			edges,
			layers: vec![1, 1],
			width: 100.0,
			height: 100.0,
		}
	}

	#[test]
	fn progress_stays_in_unit_interval() {
		let mut rng = StdRng::seed_from_u64(42);
		let mut scene = graph::generate(&NetworkConfig::default(), 800.0, 600.0, &mut rng);
		let params = PulseParams::default();
		for _ in 0..5_000 {
			step(&mut scene, &params, &mut rng);
			for edge in &scene.edges {
				assert!((0.0..=1.0).contains(&edge.progress), "{}", edge.progress);
			}
		}
	}

	#[test]
	fn arriving_pulse_wraps_and_resamples_activity() {
		// Node firing disabled so only the survival roll decides.
		let params = PulseParams {
			fire: 0.0,
			..PulseParams::default()
		};
		let mut rng = StdRng::seed_from_u64(8);
		let trials = 10_000;
		let mut survived = 0;
		for _ in 0..trials {
			let mut scene = make_scene(vec![node(0.03, vec![0]), node(0.03, vec![])], vec![edge(true, 0.95, 0.1)]);
			step(&mut scene, &params, &mut rng);
			let edge = &scene.edges[0];
			assert!((0.0..0.1).contains(&edge.progress));
			if edge.active {
				survived += 1;
			}
		}
		let ratio = survived as f64 / trials as f64;
		assert!((0.77..0.83).contains(&ratio), "ratio {ratio}");
	}

	#[test]
	fn progress_advances_by_speed_while_active() {
		let mut rng = StdRng::seed_from_u64(0);
		let mut scene = make_scene(vec![], vec![edge(true, 0.2, 0.01)]);
		step(&mut scene, &PulseParams::default(), &mut rng);
		assert!((scene.edges[0].progress - 0.21).abs() < 1e-12);
		assert!(scene.edges[0].active);
	}

	#[test]
	fn isolated_node_phase_stays_below_one() {
		let mut rng = StdRng::seed_from_u64(3);
		let mut scene = make_scene(vec![node(0.049, vec![])], vec![]);
		let params = PulseParams::default();
		for _ in 0..10_000 {
			step(&mut scene, &params, &mut rng);
			let phase = scene.nodes[0].phase;
			assert!((0.0..1.0).contains(&phase), "{phase}");
		}
	}

	#[test]
	fn idle_edges_wake_up_eventually() {
		let params = PulseParams {
			fire: 0.0,
			..PulseParams::default()
		};
		let mut rng = StdRng::seed_from_u64(12);
		let mut scene = make_scene(vec![], vec![edge(false, 0.4, 0.01)]);
		let mut ticks = 0;
		while !scene.edges[0].active {
			step(&mut scene, &params, &mut rng);
			ticks += 1;
			assert!(ticks < 20_000);
		}
		assert_eq!(scene.edges[0].progress, 0.4);
	}

	#[test]
	fn firing_node_restarts_idle_edges() {
		let params = PulseParams {
			survive: 0.8,
			reactivate: 0.0,
			fire: 1.0,
			fire_spread: 1.0,
		};
		let mut rng = StdRng::seed_from_u64(4);
		let mut scene = make_scene(
			vec![node(0.03, vec![0, 1]), node(0.03, vec![])],
			vec![edge(false, 0.6, 0.01), edge(true, 0.5, 0.01)],
		);
		step(&mut scene, &params, &mut rng);
		assert!(scene.edges[0].active);
		assert_eq!(scene.edges[0].progress, 0.0);
		assert!((scene.edges[1].progress - 0.51).abs() < 1e-12);
	}

	#[test]
	fn out_of_range_chances_are_clamped() {
		let params = PulseParams {
			survive: 2.0,
			reactivate: -1.0,
			fire: f64::NAN,
			fire_spread: 0.3,
		};
		let mut rng = StdRng::seed_from_u64(4);
		let mut scene = make_scene(vec![node(0.03, vec![1])], vec![edge(true, 0.99, 0.05), edge(false, 0.0, 0.01)]);
		step(&mut scene, &params, &mut rng);
		assert!(scene.edges[0].active);
		assert!(!scene.edges[1].active);
	}
}
