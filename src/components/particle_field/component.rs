//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page
//! content. On mount it sizes the canvas to the window, builds the particle
//! set, attaches window input listeners and starts the animation loop. On
//! cleanup the loop is cancelled and every listener removed.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::animation::AnimationLoop;
use super::input::{InputAdapter, viewport_size};
use super::render;
use super::state::FieldState;
use super::theme::FieldStyle;

/// Everything owned by one mounted field. Dropping it tears the field down.
struct FieldRuntime {
	state: Rc<RefCell<FieldState>>,
	animation: AnimationLoop,
	input: InputAdapter,
}

impl FieldRuntime {
	fn teardown(self) {
		self.animation.stop();
		self.input.detach();
		self.state.borrow_mut().reset();
		info!("particle-field: unmounted");
	}
}

/// The 2D context of `canvas`, or `None` if the browser can't provide one.
fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	match canvas.get_context("2d") {
		Ok(Some(ctx)) => ctx.dyn_into().ok(),
		Ok(None) => None,
		Err(e) => {
			warn!("particle-field: getContext failed: {:?}", e);
			None
		}
	}
}

fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	canvas.set_width(width.max(0.0) as u32);
	canvas.set_height(height.max(0.0) as u32);
}

fn mount(canvas: HtmlCanvasElement, window: &Window, style: FieldStyle) -> Option<FieldRuntime> {
	let Some(ctx) = context_2d(&canvas) else {
		warn!("particle-field: 2d canvas unsupported, rendering nothing");
		return None;
	};
	let (w, h) = viewport_size(window)?;
	size_canvas(&canvas, w, h);

	let state = Rc::new(RefCell::new(FieldState::new(style.sanitized(), w, h)));

	let (state_resize, canvas_resize) = (state.clone(), canvas.clone());
	let input = InputAdapter::attach(window, state.borrow().pointer_handle(), move |nw, nh| {
		size_canvas(&canvas_resize, nw, nh);
		state_resize.borrow_mut().resize(nw, nh);
	});

	let animation = AnimationLoop::new();
	let state_anim = state.clone();
	let mut revealed = false;
	animation.start(move || {
		let mut s = state_anim.borrow_mut();
		s.tick();
		render::render(&s, &ctx);

		// Fade in once there is something on the canvas.
		if !revealed {
			// Leptos' ElementExt also has a `style`, so name the DOM one.
			if let Err(e) = web_sys::HtmlElement::style(&canvas).set_property("opacity", "1") {
				warn!("particle-field: fade-in failed: {:?}", e);
			}
			revealed = true;
		}
	});

	Some(FieldRuntime {
		state,
		animation,
		input,
	})
}

/// Animated particle background.
///
/// Fills the viewport behind the page, ignores pointer events itself and
/// follows the mouse or first touch point through window listeners. Pass a
/// [`FieldStyle`] as `config` to tune it; the default is [`FieldStyle::enhanced`].
#[component]
pub fn ParticleField(#[prop(default = FieldStyle::default())] config: FieldStyle) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let runtime: Rc<RefCell<Option<FieldRuntime>>> = Rc::new(RefCell::new(None));
	let fade_in_ms = config.fade_in_ms;

	let runtime_init = runtime.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if runtime_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("particle-field: no window, rendering nothing");
			return;
		};
		*runtime_init.borrow_mut() = mount(canvas.into(), &window, config.clone());
	});

	let runtime_cleanup = SendWrapper::new(runtime);
	on_cleanup(move || {
		if let Some(rt) = runtime_cleanup.borrow_mut().take() {
			rt.teardown();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field"
			aria-hidden="true"
			style=format!(
				"position: fixed; inset: 0; width: 100%; height: 100%; \
				 pointer-events: none; z-index: 0; opacity: 0; \
				 transition: opacity {fade_in_ms}ms ease-out;"
			)
		/>
	}
}
