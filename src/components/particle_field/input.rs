//! Window listeners feeding the simulation: pointer moves, first-touch moves
//! and viewport resizes.
//!
//! Listeners are held by [`InputAdapter`] and removed on [`InputAdapter::detach`]
//! or drop.

use std::cell::RefCell;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, MouseEvent, TouchEvent, Window};

use super::physics::Pointer;
use super::state::SharedPointer;

type Listener = Closure<dyn FnMut(Event)>;

/// Current viewport size in CSS pixels.
pub fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some((width, height))
}

fn mouse_point(ev: &MouseEvent) -> Pointer {
	Pointer::new(ev.client_x() as f64, ev.client_y() as f64)
}

fn touch_point(ev: &TouchEvent) -> Option<Pointer> {
	let touch = ev.touches().get(0)?;
	Some(Pointer::new(touch.client_x() as f64, touch.client_y() as f64))
}

/// Owns the window listeners for one mounted field.
pub struct InputAdapter {
	window: Window,
	listeners: RefCell<Vec<(&'static str, Listener)>>,
}

impl InputAdapter {
	/// Register `mousemove`, `touchmove` and `resize` on `window`.
	///
	/// Pointer samples overwrite `pointer`; `on_resize` receives the new
	/// viewport size after every resize event.
	pub fn attach(
		window: &Window,
		pointer: SharedPointer,
		mut on_resize: impl FnMut(f64, f64) + 'static,
	) -> Self {
		let mouse_pointer = pointer.clone();
		let mousemove: Listener = Closure::new(move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				mouse_pointer.set(Some(mouse_point(ev)));
			}
		});

		let touchmove: Listener = Closure::new(move |ev: Event| {
			if let Some(point) = ev.dyn_ref::<TouchEvent>().and_then(touch_point) {
				pointer.set(Some(point));
			}
		});

		let resize: Listener = Closure::new(move |_: Event| {
			if let Some((w, h)) = web_sys::window().as_ref().and_then(viewport_size) {
				on_resize(w, h);
			}
		});

		let adapter = Self {
			window: window.clone(),
			listeners: RefCell::new(Vec::new()),
		};
		for (name, listener) in [
			("mousemove", mousemove),
			("touchmove", touchmove),
			("resize", resize),
		] {
			match adapter
				.window
				.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
			{
				Ok(()) => adapter.listeners.borrow_mut().push((name, listener)),
				Err(e) => warn!("particle-field: failed to add {} listener: {:?}", name, e),
			}
		}
		debug!("particle-field: input listeners attached");
		adapter
	}

	pub fn is_attached(&self) -> bool {
		!self.listeners.borrow().is_empty()
	}

	/// Event names with a live listener, in registration order.
	pub fn events(&self) -> Vec<&'static str> {
		self.listeners.borrow().iter().map(|(name, _)| *name).collect()
	}

	/// Remove every listener registered by [`InputAdapter::attach`].
	pub fn detach(&self) {
		let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
		if listeners.is_empty() {
			return;
		}
		for (name, listener) in &listeners {
			if let Err(e) = self
				.window
				.remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
			{
				warn!("particle-field: failed to remove {} listener: {:?}", name, e);
			}
		}
		debug!("particle-field: input listeners detached");
	}
}

impl Drop for InputAdapter {
	fn drop(&mut self) {
		self.detach();
	}
}
