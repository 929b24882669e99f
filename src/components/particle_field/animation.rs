//! Self-rescheduling `requestAnimationFrame` loop with explicit teardown.
//!
//! At most one frame is pending at any time; the next one is requested only
//! after the current frame callback has returned. `start` while running and
//! `stop` while idle are both no-ops, so repeated mount/unmount cycles never
//! leave a second callback chain behind.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[derive(Default)]
struct LoopInner {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
	handle: Cell<Option<i32>>,
}

impl LoopInner {
	/// Request the next frame, unless the loop was stopped meanwhile.
	fn schedule(&self) {
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			warn!("particle-field: no window, animation loop halted");
			return;
		};
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => self.handle.set(Some(handle)),
			Err(e) => warn!("particle-field: requestAnimationFrame failed: {:?}", e),
		}
	}
}

/// Handle to a running (or idle) animation loop. Dropping it stops the loop.
#[derive(Default)]
pub struct AnimationLoop {
	inner: Rc<LoopInner>,
}

impl AnimationLoop {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_running(&self) -> bool {
		self.inner.callback.borrow().is_some()
	}

	/// Start calling `frame` once per animation frame.
	///
	/// Returns `false` without side effects if the loop is already running.
	pub fn start(&self, mut frame: impl FnMut() + 'static) -> bool {
		if self.is_running() {
			return false;
		}

		let weak: Weak<LoopInner> = Rc::downgrade(&self.inner);
		let callback = Closure::<dyn FnMut()>::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.handle.set(None);
			frame();
			inner.schedule();
		});
		*self.inner.callback.borrow_mut() = Some(callback);
		self.inner.schedule();
		debug!("particle-field: animation loop started");
		true
	}

	/// Cancel the pending frame and release the callback.
	///
	/// Returns `false` if the loop was not running.
	pub fn stop(&self) -> bool {
		if let Some(handle) = self.inner.handle.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(handle);
			}
		}
		let was_running = self.inner.callback.borrow_mut().take().is_some();
		if was_running {
			debug!("particle-field: animation loop stopped");
		}
		was_running
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
