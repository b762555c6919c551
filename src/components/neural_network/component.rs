use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::config::NetworkConfig;
use super::error::SurfaceError;
use super::scheduler::{BrowserHost, FrameScheduler, ResizeWatch, TickSlot};
use super::state::NetworkState;
use super::surface::DrawingSurface;

/// Everything one mounted canvas owns.
struct Runtime {
	scheduler: FrameScheduler<BrowserHost>,
	network: NetworkState,
	surface: DrawingSurface,
}

impl Runtime {
	fn tick(&mut self) {
		let Runtime {
			scheduler,
			network,
			surface,
		} = self;
		scheduler.run_tick(|| network.frame(surface.context_mut()));
	}

	fn handle_resize(&mut self) {
		if self.scheduler.is_torn_down() {
			return;
		}
		let metrics = self.surface.measure(self.scheduler.host().window());
		if metrics == self.surface.metrics() {
			return;
		}
		self.surface.resize(metrics);
		self.network.resize(metrics);
	}
}

type RuntimeSlot = Rc<RefCell<Option<Runtime>>>;

/// Animated layered-graph backdrop. Stretches over its positioned container.
#[component]
pub fn NeuralNetworkCanvas(
	#[prop(default = NetworkConfig::default())] config: NetworkConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let runtime: RuntimeSlot = Rc::new(RefCell::new(None));
	let tick: TickSlot = Rc::new(RefCell::new(None));
	let (runtime_init, tick_init) = (runtime.clone(), tick.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if runtime_init.borrow().is_some() {
			return;
		}
		let nodes = config.total_nodes();
		match mount(canvas.into(), config.clone(), &runtime_init, &tick_init) {
			Ok(()) => info!("neural network backdrop mounted with {nodes} nodes"),
			Err(err) => warn!("neural network backdrop disabled: {err}"),
		}
	});

	let cleanup = SendWrapper::new((runtime, tick));
	on_cleanup(move || {
		let (runtime, tick) = cleanup.take();
		if let Some(mut rt) = runtime.borrow_mut().take() {
			rt.scheduler.teardown();
		}
		// The tick closure captures the runtime slot; dropping it breaks the cycle.
		tick.borrow_mut().take();
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="neural-network-canvas"
			aria-hidden="true"
			style="position: absolute; inset: 0; width: 100%; height: 100%; display: block; pointer-events: none;"
		/>
	}
}

fn mount(
	canvas: HtmlCanvasElement,
	config: NetworkConfig,
	slot: &RuntimeSlot,
	tick: &TickSlot,
) -> Result<(), SurfaceError> {
	let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
	let mut surface = DrawingSurface::attach(canvas)?;
	let metrics = surface.measure(&window);
	surface.resize(metrics);

	let mut network = NetworkState::new(config, StdRng::from_entropy());
	network.resize(metrics);

	let slot_resize = slot.clone();
	let on_resize = Closure::<dyn FnMut()>::new(move || {
		if let Some(rt) = slot_resize.borrow_mut().as_mut() {
			rt.handle_resize();
		}
	});
	let watch = ResizeWatch::attach(&window, surface.container().as_ref(), on_resize)
		.map_err(|_| SurfaceError::Listener)?;

	let host = BrowserHost::new(window, tick.clone(), Some(watch));
	*slot.borrow_mut() = Some(Runtime {
		scheduler: FrameScheduler::new(host),
		network,
		surface,
	});

	let slot_tick = slot.clone();
	*tick.borrow_mut() = Some(Closure::new(move || {
		if let Some(rt) = slot_tick.borrow_mut().as_mut() {
			rt.tick();
		}
	}));

	if let Some(rt) = slot.borrow_mut().as_mut() {
		rt.scheduler.start();
	}
	Ok(())
}
