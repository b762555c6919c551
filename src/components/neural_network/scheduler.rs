//! One simulate-and-draw step per display refresh.
//!
//! [`FrameScheduler`] holds the bookkeeping (at most one pending tick, a
//! one-way teardown) and delegates the actual scheduling to a
//! [`RefreshHost`], which in the browser is `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{ResizeObserver, Window};

/// Slot holding the per-tick closure. Shared between the host, which hands it
/// to `requestAnimationFrame`, and the component, which drops it on cleanup.
pub type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// The host's refresh facility.
pub trait RefreshHost {
	type Handle: Copy;

	/// Asks for one callback on the next refresh.
	fn request_tick(&mut self) -> Option<Self::Handle>;
	fn cancel_tick(&mut self, handle: Self::Handle);
	/// Stops delivering resize notifications.
	fn detach_resize(&mut self);
}

pub struct FrameScheduler<H: RefreshHost> {
	host: H,
	pending: Option<H::Handle>,
	torn_down: bool,
	ticks: u64,
}

impl<H: RefreshHost> FrameScheduler<H> {
	pub fn new(host: H) -> Self {
		Self {
			host,
			pending: None,
			torn_down: false,
			ticks: 0,
		}
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	/// Requests the first tick. Does nothing if a tick is already pending or
	/// the scheduler has been torn down.
	pub fn start(&mut self) {
		if self.torn_down || self.pending.is_some() {
			return;
		}
		self.pending = self.host.request_tick();
	}

	/// Called from the host's callback. Runs `frame` and requests the next
	/// tick, unless teardown already happened. Returns whether `frame` ran.
	pub fn run_tick(&mut self, frame: impl FnOnce()) -> bool {
		self.pending = None;
		if self.torn_down {
			return false;
		}
		frame();
		self.ticks += 1;
		self.pending = self.host.request_tick();
		true
	}

	/// Cancels the pending tick, then detaches the resize listener. Safe to
	/// call more than once.
	pub fn teardown(&mut self) {
		if self.torn_down {
			return;
		}
		self.torn_down = true;
		if let Some(handle) = self.pending.take() {
			self.host.cancel_tick(handle);
		}
		self.host.detach_resize();
		debug!("frame scheduler torn down after {} ticks", self.ticks);
	}

	pub fn is_torn_down(&self) -> bool {
		self.torn_down
	}

	#[cfg(test)]
	pub fn ticks(&self) -> u64 {
		self.ticks
	}
}

/// Resize notifications for one canvas. The same callback serves a
/// `ResizeObserver` on the container and the window `resize` event, which is
/// the only signal for `devicePixelRatio` changes.
pub struct ResizeWatch {
	callback: Closure<dyn FnMut()>,
	observer: Option<ResizeObserver>,
}

impl ResizeWatch {
	/// Registers `callback` with the window and, when there is one, starts
	/// observing `container`. Fails only if the window listener cannot be
	/// added; a missing `ResizeObserver` leaves the window listener alone.
	pub fn attach(
		window: &Window,
		container: Option<&web_sys::Element>,
		callback: Closure<dyn FnMut()>,
	) -> Result<Self, JsValue> {
		window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
		let observer = container.and_then(|container| {
			match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
				Ok(observer) => {
					observer.observe(container);
					Some(observer)
				}
				Err(err) => {
					warn!("ResizeObserver unavailable, following window resizes only: {err:?}");
					None
				}
			}
		});
		Ok(Self { callback, observer })
	}

	fn detach(self, window: &Window) {
		if let Some(observer) = &self.observer {
			observer.disconnect();
		}
		let _ = window
			.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
	}
}

/// `requestAnimationFrame` plus the canvas' [`ResizeWatch`].
pub struct BrowserHost {
	window: Window,
	tick: TickSlot,
	resize: Option<ResizeWatch>,
}

impl BrowserHost {
	pub fn new(window: Window, tick: TickSlot, resize: Option<ResizeWatch>) -> Self {
		Self {
			window,
			tick,
			resize,
		}
	}

	pub fn window(&self) -> &Window {
		&self.window
	}
}

impl RefreshHost for BrowserHost {
	type Handle = i32;

	fn request_tick(&mut self) -> Option<i32> {
		let tick = self.tick.borrow();
		let cb = tick.as_ref()?;
		match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => Some(handle),
			Err(err) => {
				warn!("requestAnimationFrame failed: {err:?}");
				None
			}
		}
	}

	fn cancel_tick(&mut self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}

	fn detach_resize(&mut self) {
		if let Some(watch) = self.resize.take() {
			watch.detach(&self.window);
		}
	}
}
