//! Construction-time settings for the backdrop.

/// Layer sizes used when none are given: input, two hidden layers, output.
pub const DEFAULT_LAYERS: [usize; 4] = [6, 8, 8, 5];

/// What happens to the scene when the container changes size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
	/// Throw away every node and edge and generate a fresh graph.
	#[default]
	Regenerate,
	/// Recompute node positions only; edges and animation state survive.
	Relayout,
}

/// Per-tick probabilities driving the pulse state machines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseParams {
	/// Chance an edge stays active after its pulse reaches the target.
	pub survive: f64,
	/// Chance an idle edge wakes up on its own in a given tick.
	pub reactivate: f64,
	/// Chance a node fires in a given tick.
	pub fire: f64,
	/// Chance each idle outgoing edge is woken by a firing node.
	pub fire_spread: f64,
}

impl Default for PulseParams {
	fn default() -> Self {
		Self {
			survive: 0.8,
			reactivate: 0.005,
			fire: 0.01,
			fire_spread: 0.3,
		}
	}
}

/// Full configuration of one `<NeuralNetworkCanvas/>` instance.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	layers: Vec<usize>,
	/// Pulse probabilities.
	pub pulse: PulseParams,
	/// Resize behavior.
	pub resize: ResizePolicy,
}

impl NetworkConfig {
	/// Builds a config from layer sizes. Empty layers are dropped since they
	/// would leave the previous layer with nowhere to connect.
	pub fn with_layers(layers: impl IntoIterator<Item = usize>) -> Self {
		Self {
			layers: layers.into_iter().filter(|&n| n > 0).collect(),
			..Self::default()
		}
	}

	/// Same config with a different resize behavior.
	pub fn with_resize(mut self, resize: ResizePolicy) -> Self {
		self.resize = resize;
		self
	}

	/// Node count per layer, first layer first.
	pub fn layers(&self) -> &[usize] {
		&self.layers
	}

	/// Sum of all layer sizes.
	pub fn total_nodes(&self) -> usize {
		self.layers.iter().sum()
	}
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			layers: DEFAULT_LAYERS.to_vec(),
			pulse: PulseParams::default(),
			resize: ResizePolicy::default(),
		}
	}
}
