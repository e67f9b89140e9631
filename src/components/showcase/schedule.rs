//! Coalescing helpers for event-driven work.

use std::cell::Cell;

/// Lets at most one deferred update be pending at a time.
///
/// Scroll events arrive far faster than frames; only the first event after
/// each flush schedules a frame callback.
#[derive(Debug, Default)]
pub struct FrameGate {
	pending: Cell<bool>,
}

impl FrameGate {
	/// Returns `true` if the caller should schedule the update.
	pub fn request(&self) -> bool {
		!self.pending.replace(true)
	}

	/// Called by the scheduled update once it has run.
	pub fn release(&self) {
		self.pending.set(false);
	}

	/// Whether an update is scheduled and has not run yet.
	pub fn is_pending(&self) -> bool {
		self.pending.get()
	}
}

/// Trailing-edge debounce keyed by generation.
///
/// Each trigger bumps the generation; a delayed callback only acts if its
/// generation is still the latest when it fires.
#[derive(Debug, Default)]
pub struct Debounce {
	generation: Cell<u64>,
}

impl Debounce {
	/// Start a new generation and return it.
	pub fn trigger(&self) -> u64 {
		let next = self.generation.get().wrapping_add(1);
		self.generation.set(next);
		next
	}

	/// Whether `generation` is still the latest trigger.
	pub fn is_current(&self, generation: u64) -> bool {
		self.generation.get() == generation
	}
}

/// Switch-off deadline polled from the frame loop.
///
/// Re-arming while armed keeps the earlier deadline, so a repeated trigger
/// does not extend an effect that is already running.
#[derive(Debug, Default)]
pub struct Deadline {
	until_ms: Cell<Option<f64>>,
}

impl Deadline {
	/// Expire `duration_ms` after `now_ms`, unless an earlier deadline is pending.
	pub fn arm(&self, now_ms: f64, duration_ms: f64) {
		let next = now_ms + duration_ms;
		let until = match self.until_ms.get() {
			Some(current) => current.min(next),
			None => next,
		};
		self.until_ms.set(Some(until));
	}

	/// Returns `true` exactly once, on the first poll at or past the deadline.
	pub fn expired(&self, now_ms: f64) -> bool {
		match self.until_ms.get() {
			Some(until) if now_ms >= until => {
				self.until_ms.set(None);
				true
			}
			_ => false,
		}
	}

	/// Whether a deadline is pending.
	pub fn is_armed(&self) -> bool {
		self.until_ms.get().is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gate_coalesces_until_released() {
		let gate = FrameGate::default();
		assert!(gate.request());
		assert!(!gate.request());
		assert!(!gate.request());
		assert!(gate.is_pending());

		gate.release();
		assert!(!gate.is_pending());
		assert!(gate.request());
	}

	#[test]
	fn debounce_only_honours_latest_trigger() {
		let d = Debounce::default();
		let first = d.trigger();
		let second = d.trigger();
		let third = d.trigger();

		assert!(!d.is_current(first));
		assert!(!d.is_current(second));
		assert!(d.is_current(third));
	}

	#[test]
	fn deadline_fires_once_at_first_arming() {
		let d = Deadline::default();
		assert!(!d.expired(0.0));

		d.arm(0.0, 3000.0);
		assert!(!d.expired(2999.0));
		d.arm(1000.0, 3000.0);
		assert!(d.expired(3000.0));
		assert!(!d.expired(4000.0));
		assert!(!d.is_armed());

		d.arm(5000.0, 3000.0);
		assert!(d.is_armed());
		assert!(d.expired(8000.0));
	}
}
