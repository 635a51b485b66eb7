use log::debug;

use super::render::Surface;
use super::session::{NetworkSession, TickOutcome};
use super::types::Size;

/// Source of display-refresh callbacks, e.g. `requestAnimationFrame`.
pub trait FrameScheduler {
	/// Asks for one callback. Returns a handle, or `None` if nothing was scheduled.
	fn request(&mut self) -> Option<i32>;
	fn cancel(&mut self, handle: i32);
}

/// Keeps at most one frame pending and parks when there is nothing to animate.
pub struct FrameLoop<F> {
	session: NetworkSession,
	scheduler: F,
	pending: Option<i32>,
	active: bool,
}

impl<F: FrameScheduler> FrameLoop<F> {
	pub fn new(session: NetworkSession, scheduler: F, active: bool) -> Self {
		Self {
			session,
			scheduler,
			pending: None,
			active,
		}
	}

	pub fn is_torn_down(&self) -> bool {
		self.session.is_torn_down()
	}

	#[cfg(test)]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	pub fn mount(&mut self, size: Size) {
		self.session.mount(size);
		self.schedule();
	}

	/// Runs the scheduled tick and reschedules while the wave is running.
	pub fn frame<S: Surface>(&mut self, surface: &mut S) -> TickOutcome {
		self.pending = None;
		let outcome = self.session.tick(self.active, surface);
		if outcome.keep_running() {
			self.schedule();
		} else if outcome == TickOutcome::Rested {
			debug!("Animation parked at frame {}", self.session.frame());
		}
		outcome
	}

	pub fn set_active(&mut self, active: bool) {
		self.active = active;
		if active {
			self.schedule();
		}
	}

	/// Rebuilds for a new size and schedules a repaint. Returns whether the size changed.
	pub fn resize(&mut self, size: Size) -> bool {
		if !self.session.resize(size) {
			return false;
		}
		self.schedule();
		true
	}

	pub fn teardown(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel(handle);
		}
		self.session.teardown();
	}

	fn schedule(&mut self) {
		if self.pending.is_some() || self.session.is_torn_down() {
			return;
		}
		self.pending = self.scheduler.request();
	}
}
