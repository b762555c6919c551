mod component;
mod config;
mod error;
mod graph;
mod pulse;
mod render;
mod scheduler;
mod state;
mod surface;
mod types;

pub use component::NeuralNetworkCanvas;
pub use config::{DEFAULT_LAYERS, NetworkConfig, PulseParams, ResizePolicy};
