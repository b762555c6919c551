//! Pixel-density-correct drawing surface.
//!
//! The canvas backing store is `size × devicePixelRatio` pixels while every
//! draw call uses CSS pixels; the scale transform is applied once per resize.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, Window};

use super::error::SurfaceError;
use super::types::Point;

/// Addressable size and pixel density of a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
	pub width: f64,
	pub height: f64,
	pub density: f64,
}

impl SurfaceMetrics {
	pub fn new(width: f64, height: f64, density: f64) -> Self {
		let size = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
		let density = if density.is_finite() && density > 0.0 {
			density
		} else {
			1.0
		};
		Self {
			width: size(width),
			height: size(height),
			density,
		}
	}

	/// Backing store resolution in device pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		let corner = self.to_backing(Point::new(self.width, self.height));
		(corner.x.floor() as u32, corner.y.floor() as u32)
	}

	/// Canvas transform `[a, b, c, d, e, f]` mapping CSS pixels to device pixels.
	pub fn transform(&self) -> [f64; 6] {
		[self.density, 0.0, 0.0, self.density, 0.0, 0.0]
	}

	/// Where an addressable point lands in the backing store.
	pub fn to_backing(&self, p: Point) -> Point {
		let [a, b, c, d, e, f] = self.transform();
		Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
	}

	/// Nothing can be drawn on a surface with no pixels.
	pub fn is_degenerate(&self) -> bool {
		let (w, h) = self.backing_size();
		w == 0 || h == 0
	}
}

impl Default for SurfaceMetrics {
	fn default() -> Self {
		Self::new(0.0, 0.0, 1.0)
	}
}

/// A canvas together with its 2d context.
pub struct DrawingSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	metrics: SurfaceMetrics,
}

impl DrawingSurface {
	pub fn attach(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
			.ok_or(SurfaceError::ContextUnavailable)?;
		Ok(Self {
			canvas,
			ctx,
			metrics: SurfaceMetrics::default(),
		})
	}

	/// The element the canvas stretches over.
	pub fn container(&self) -> Option<Element> {
		self.canvas.parent_element()
	}

	/// Reads the container's size, falling back to the viewport when the
	/// canvas is not attached to anything.
	pub fn measure(&self, window: &Window) -> SurfaceMetrics {
		let (w, h) = match self.container() {
			Some(parent) => (parent.client_width() as f64, parent.client_height() as f64),
			None => (
				window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
				window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
			),
		};
		SurfaceMetrics::new(w, h, window.device_pixel_ratio())
	}

	/// Resizes the backing store and re-applies the density transform.
	/// Setting the canvas size resets its transform, so this must run after.
	pub fn resize(&mut self, metrics: SurfaceMetrics) {
		let (bw, bh) = metrics.backing_size();
		self.canvas.set_width(bw);
		self.canvas.set_height(bh);
		let [a, b, c, d, e, f] = metrics.transform();
		let _ = self.ctx.set_transform(a, b, c, d, e, f);
		self.metrics = metrics;
	}

	pub fn metrics(&self) -> SurfaceMetrics {
		self.metrics
	}

	pub fn context_mut(&mut self) -> &mut CanvasRenderingContext2d {
		&mut self.ctx
	}
}
