//! An explicit, clock-driven debouncer.
//!
//! The owner feeds it values with [`Debouncer::schedule`] and asks it with
//! [`Debouncer::poll`] whether the quiet period has elapsed. No timers or
//! background tasks are involved, so the timing contract can be tested by
//! stepping a [`ManualClock`] instead of sleeping.

use std::{
  sync::Arc,
  time::{
    Duration,
    Instant,
  },
};

use parking_lot::Mutex;

/// Source of the current time.
pub trait Clock {
  fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> Instant {
    Instant::now()
  }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
  now: Arc<Mutex<Instant>>,
}

impl ManualClock {
  pub fn new() -> Self {
    Self {
      now: Arc::new(Mutex::new(Instant::now())),
    }
  }

  pub fn advance(&self, by: Duration) {
    *self.now.lock() += by;
  }
}

impl Default for ManualClock {
  fn default() -> Self {
    Self::new()
  }
}

impl Clock for ManualClock {
  fn now(&self) -> Instant {
    *self.now.lock()
  }
}

/// Holds at most one pending value together with the instant it becomes due.
///
/// Every [`schedule`](Self::schedule) replaces the pending value and pushes the
/// deadline to `now + delay`, so a burst of calls closer together than `delay`
/// yields exactly one value once the burst is over.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
  delay:    Duration,
  deadline: Option<Instant>,
  pending:  Option<T>,
}

impl<T> Debouncer<T> {
  pub const fn new(delay: Duration) -> Self {
    Self {
      delay,
      deadline: None,
      pending: None,
    }
  }

  pub const fn delay(&self) -> Duration {
    self.delay
  }

  /// Replace the pending value and restart the quiet period.
  /// Returns the new deadline.
  pub fn schedule(&mut self, value: T, now: Instant) -> Instant {
    let deadline = now + self.delay;
    self.pending = Some(value);
    self.deadline = Some(deadline);
    deadline
  }

  /// Drop the pending value, if any, without firing it.
  pub fn cancel(&mut self) -> Option<T> {
    self.deadline = None;
    self.pending.take()
  }

  pub const fn is_pending(&self) -> bool {
    self.pending.is_some()
  }

  pub const fn deadline(&self) -> Option<Instant> {
    self.deadline
  }

  /// Time left until the pending value fires, `None` when idle.
  pub fn remaining(&self, now: Instant) -> Option<Duration> {
    self
      .deadline
      .map(|deadline| deadline.saturating_duration_since(now))
  }

  /// Take the pending value once its deadline has been reached.
  pub fn poll(&mut self, now: Instant) -> Option<T> {
    match self.deadline {
      Some(deadline) if now >= deadline => {
        self.deadline = None;
        self.pending.take()
      },
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::{
    Clock,
    Debouncer,
    ManualClock,
  };

  const DELAY: Duration = Duration::from_millis(200);

  #[test]
  fn fires_once_after_quiet_period() {
    let clock = ManualClock::new();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.schedule("a", clock.now());

    clock.advance(Duration::from_millis(199));
    assert_eq!(debouncer.poll(clock.now()), None);

    clock.advance(Duration::from_millis(1));
    assert_eq!(debouncer.poll(clock.now()), Some("a"));
    assert_eq!(debouncer.poll(clock.now()), None);
    assert!(!debouncer.is_pending());
  }

  #[test]
  fn burst_collapses_to_last_value() {
    let clock = ManualClock::new();
    let mut debouncer = Debouncer::new(DELAY);
    let mut fired = Vec::new();

    for value in ["c", "ca", "cat", "cats"] {
      debouncer.schedule(value, clock.now());
      clock.advance(Duration::from_millis(150));
      fired.extend(debouncer.poll(clock.now()));
    }
    clock.advance(DELAY);
    fired.extend(debouncer.poll(clock.now()));

    assert_eq!(fired, vec!["cats"]);
  }

  #[test]
  fn cancel_discards_pending_value() {
    let clock = ManualClock::new();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.schedule(1, clock.now());
    assert_eq!(debouncer.cancel(), Some(1));

    clock.advance(DELAY * 2);
    assert_eq!(debouncer.poll(clock.now()), None);
    assert_eq!(debouncer.remaining(clock.now()), None);
  }

  #[test]
  fn remaining_counts_down() {
    let clock = ManualClock::new();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.schedule((), clock.now());
    clock.advance(Duration::from_millis(50));
    assert_eq!(
      debouncer.remaining(clock.now()),
      Some(Duration::from_millis(150))
    );
  }
}
