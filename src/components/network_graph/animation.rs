//! The "Animate Network" toggle: a two-state switch that owns the refresh
//! timer driving the force layout.

use log::warn;
use wasm_bindgen::prelude::*;

/// Period of the redraw timer while the layout runs.
pub const REFRESH_PERIOD_MS: i32 = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimationState {
	#[default]
	Stopped,
	Running,
}

impl AnimationState {
	pub fn button_label(self) -> &'static str {
		match self {
			AnimationState::Stopped => "Animate Network",
			AnimationState::Running => "Stop Animation",
		}
	}
}

/// Something that can run a periodic callback and cancel it again.
pub trait Scheduler {
	type Handle;

	/// Starts the periodic callback. `None` if the host refused.
	fn schedule(&mut self, period_ms: i32) -> Option<Self::Handle>;
	fn cancel(&mut self, handle: Self::Handle);
}

pub struct AnimationToggle<S: Scheduler> {
	scheduler: S,
	timer: Option<S::Handle>,
}

impl<S: Scheduler> AnimationToggle<S> {
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			timer: None,
		}
	}

	pub fn state(&self) -> AnimationState {
		if self.timer.is_some() {
			AnimationState::Running
		} else {
			AnimationState::Stopped
		}
	}

	/// Returns false if already running or the timer could not be scheduled.
	pub fn start(&mut self) -> bool {
		if self.timer.is_some() {
			return false;
		}
		self.timer = self.scheduler.schedule(REFRESH_PERIOD_MS);
		if self.timer.is_none() {
			warn!("network: refresh timer could not be scheduled");
		}
		self.timer.is_some()
	}

	pub fn stop(&mut self) -> bool {
		match self.timer.take() {
			Some(handle) => {
				self.scheduler.cancel(handle);
				true
			}
			None => false,
		}
	}

	pub fn toggle(&mut self) -> AnimationState {
		match self.state() {
			AnimationState::Running => {
				self.stop();
			}
			AnimationState::Stopped => {
				self.start();
			}
		}
		self.state()
	}
}

/// `window.setInterval` driving a Rust callback.
pub struct IntervalScheduler {
	callback: Closure<dyn FnMut()>,
}

impl IntervalScheduler {
	pub fn new(callback: Closure<dyn FnMut()>) -> Self {
		Self { callback }
	}
}

impl Scheduler for IntervalScheduler {
	type Handle = i32;

	fn schedule(&mut self, period_ms: i32) -> Option<i32> {
		let window = web_sys::window()?;
		window
			.set_interval_with_callback_and_timeout_and_arguments_0(
				self.callback.as_ref().unchecked_ref(),
				period_ms,
			)
			.map_err(|e| warn!("network: setInterval failed: {:?}", e))
			.ok()
	}

	fn cancel(&mut self, handle: i32) {
		if let Some(window) = web_sys::window() {
			window.clear_interval_with_handle(handle);
		}
	}
}
