//! Scoped listener registration.
//!
//! A component acquires a [`Subscription`] when it becomes active and keeps it
//! for as long as it wants to receive a kind of event. Dropping the guard
//! unregisters it, so a component that is unmounted can never be left
//! listening. Hosts ask [`Subscriptions::active`] which listeners are live
//! before routing an event.

use std::{
  fmt,
  sync::{
    Arc,
    Weak,
  },
};

use parking_lot::Mutex;

struct Registry<T> {
  next_id: u64,
  entries: Vec<(u64, T)>,
}

pub struct Subscriptions<T> {
  inner: Arc<Mutex<Registry<T>>>,
}

impl<T> Subscriptions<T> {
  pub fn new() -> Self {
    Self {
      inner: Arc::new(Mutex::new(Registry {
        next_id: 0,
        entries: Vec::new(),
      })),
    }
  }

  /// Register `listener` until the returned guard is dropped.
  #[must_use = "the subscription is released as soon as the guard is dropped"]
  pub fn subscribe(&self, listener: T) -> Subscription<T> {
    let mut registry = self.inner.lock();
    let id = registry.next_id;
    registry.next_id += 1;
    registry.entries.push((id, listener));
    Subscription {
      id,
      registry: Arc::downgrade(&self.inner),
    }
  }

  pub fn len(&self) -> usize {
    self.inner.lock().entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl<T: Clone> Subscriptions<T> {
  /// Live listeners, most recently subscribed first.
  pub fn active(&self) -> Vec<T> {
    self
      .inner
      .lock()
      .entries
      .iter()
      .rev()
      .map(|(_, listener)| listener.clone())
      .collect()
  }
}

impl<T: PartialEq> Subscriptions<T> {
  pub fn contains(&self, listener: &T) -> bool {
    self
      .inner
      .lock()
      .entries
      .iter()
      .any(|(_, entry)| entry == listener)
  }
}

impl<T> Clone for Subscriptions<T> {
  fn clone(&self) -> Self {
    Self {
      inner: Arc::clone(&self.inner),
    }
  }
}

impl<T> Default for Subscriptions<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> fmt::Debug for Subscriptions<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscriptions")
      .field("len", &self.len())
      .finish()
  }
}

/// Guard for one registered listener. Unregisters on drop.
pub struct Subscription<T> {
  id:       u64,
  registry: Weak<Mutex<Registry<T>>>,
}

impl<T> Subscription<T> {
  pub fn is_active(&self) -> bool {
    self
      .registry
      .upgrade()
      .is_some_and(|registry| registry.lock().entries.iter().any(|(id, _)| *id == self.id))
  }
}

impl<T> Drop for Subscription<T> {
  fn drop(&mut self) {
    if let Some(registry) = self.registry.upgrade() {
      registry.lock().entries.retain(|(id, _)| *id != self.id);
    }
  }
}

impl<T> fmt::Debug for Subscription<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscription").field("id", &self.id).finish()
  }
}
