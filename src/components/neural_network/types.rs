use std::fmt;

/// A point in addressable (density-independent) surface coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Linear interpolation towards `other`; `t = 0` is `self`.
	pub fn lerp(self, other: Point, t: f64) -> Point {
		Point::new(
			self.x + (other.x - self.x) * t,
			self.y + (other.y - self.y) * t,
		)
	}
}

/// A color with straight alpha, formatted as a CSS `rgba()` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Rgba {
	pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn transparent(self) -> Self {
		self.with_alpha(0.0)
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// A neuron. Edges are referenced by index into `Scene::edges`.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub pos: Point,
	pub layer: usize,
	pub radius: f64,
	/// Glow phase in `[0, 1)`.
	pub phase: f64,
	pub phase_rate: f64,
	pub edges: Vec<usize>,
}

/// A connection from a node to one in the next layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub source: usize,
	pub target: usize,
	pub width: f64,
	pub active: bool,
	/// Pulse position along source→target, always in `[0, 1]`.
	pub progress: f64,
	pub speed: f64,
	pub glow_radius: f64,
	pub color: Rgba,
}
