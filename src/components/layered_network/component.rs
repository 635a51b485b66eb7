use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ResizeObserver};

use super::error::SurfaceError;
use super::frame_loop::{FrameLoop, FrameScheduler};
use super::render::CanvasSurface;
use super::session::NetworkSession;
use super::types::{LayerSpec, LayoutParams, Size, WaveParams, default_layers};

/// Fixed width/height overrides; `None` follows the container.
type FixedSize = (Option<f64>, Option<f64>);

fn measure(canvas: &HtmlCanvasElement, (width, height): FixedSize) -> Size {
	let parent = canvas.parent_element();
	Size::new(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SurfaceError> {
	canvas
		.get_context("2d")
		.map_err(SurfaceError::context)?
		.ok_or_else(|| SurfaceError::NoContext("null context".into()))?
		.dyn_into()
		.map_err(|obj| SurfaceError::context(obj.into()))
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` backed scheduler.
struct RafScheduler {
	on_frame: FrameCallback,
}

impl FrameScheduler for RafScheduler {
	fn request(&mut self) -> Option<i32> {
		let window = web_sys::window()?;
		let on_frame = self.on_frame.borrow();
		let cb = on_frame.as_ref()?;
		window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(|err| warn!("requestAnimationFrame failed: {:?}", err))
			.ok()
	}

	fn cancel(&mut self, handle: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}

/// Browser handles around one [`FrameLoop`]: canvas surface, frame closure, resize observer.
#[derive(Clone)]
struct AnimationLoop {
	frames: Rc<RefCell<FrameLoop<RafScheduler>>>,
	surface: Rc<RefCell<Option<CanvasSurface>>>,
	on_frame: FrameCallback,
	observer: Rc<RefCell<Option<(ResizeObserver, Closure<dyn FnMut()>)>>>,
}

impl AnimationLoop {
	fn new(session: NetworkSession, active: bool) -> Self {
		let on_frame: FrameCallback = Rc::new(RefCell::new(None));
		let scheduler = RafScheduler {
			on_frame: on_frame.clone(),
		};
		Self {
			frames: Rc::new(RefCell::new(FrameLoop::new(session, scheduler, active))),
			surface: Rc::new(RefCell::new(None)),
			on_frame,
			observer: Rc::new(RefCell::new(None)),
		}
	}

	fn start(&self, canvas: &HtmlCanvasElement, fixed: FixedSize) -> Result<(), SurfaceError> {
		if self.on_frame.borrow().is_some() || self.frames.borrow().is_torn_down() {
			return Ok(());
		}
		web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let ctx = context_2d(canvas)?;

		let size = measure(canvas, fixed);
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);
		*self.surface.borrow_mut() = Some(CanvasSurface::new(ctx, size));

		let this = self.clone();
		*self.on_frame.borrow_mut() = Some(Closure::new(move || this.frame()));

		if let (Some(_), Some(_)) = fixed {
			debug!("Fixed canvas size, not observing container");
		} else if let Err(err) = self.observe(canvas, fixed) {
			warn!("Layered network will not follow resizes: {}", err);
		}
		self.frames.borrow_mut().mount(size);
		Ok(())
	}

	fn observe(&self, canvas: &HtmlCanvasElement, fixed: FixedSize) -> Result<(), SurfaceError> {
		let Some(container) = canvas.parent_element() else {
			return Ok(());
		};
		let (this, canvas) = (self.clone(), canvas.clone());
		let cb: Closure<dyn FnMut()> = Closure::new(move || this.resize(&canvas, fixed));
		let observer =
			ResizeObserver::new(cb.as_ref().unchecked_ref()).map_err(SurfaceError::observer)?;
		observer.observe(&container);
		*self.observer.borrow_mut() = Some((observer, cb));
		Ok(())
	}

	fn resize(&self, canvas: &HtmlCanvasElement, fixed: FixedSize) {
		let size = measure(canvas, fixed);
		if !self.frames.borrow_mut().resize(size) {
			return;
		}
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);
		if let Some(surface) = self.surface.borrow_mut().as_mut() {
			surface.resize(size);
		}
	}

	fn frame(&self) {
		let mut surface = self.surface.borrow_mut();
		let Some(surface) = surface.as_mut() else {
			return;
		};
		self.frames.borrow_mut().frame(surface);
	}

	fn set_active(&self, active: bool) {
		self.frames.borrow_mut().set_active(active);
	}

	fn teardown(&self) {
		self.frames.borrow_mut().teardown();
		if let Some((observer, _cb)) = self.observer.borrow_mut().take() {
			observer.disconnect();
		}
		self.surface.borrow_mut().take();
		// breaks the closure -> loop reference cycle
		self.on_frame.borrow_mut().take();
	}
}

/// Animated layered network. `active` starts and parks the wave.
#[component]
pub fn LayeredNetworkCanvas(
	#[prop(into)] active: Signal<bool>,
	#[prop(default = default_layers())] layers: Vec<LayerSpec>,
	#[prop(default = WaveParams::default())] wave: WaveParams,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
	let animation = AnimationLoop::new(
		NetworkSession::new(layers, LayoutParams::default(), wave, seed),
		active.get_untracked(),
	);

	let animation_mount = animation.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Err(err) = animation_mount.start(&canvas, (width, height)) {
			warn!("Layered network disabled: {}", err);
		}
	});

	let animation_active = animation.clone();
	Effect::new(move |_| {
		animation_active.set_active(active.get());
	});

	let animation_cleanup = SendWrapper::new(animation);
	on_cleanup(move || animation_cleanup.teardown());

	view! {
		<canvas
			node_ref=canvas_ref
			class="layered-network-canvas"
			style="display: block;"
		/>
	}
}
