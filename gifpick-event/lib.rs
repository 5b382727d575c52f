//! Event plumbing shared by the picker core and its hosts.
//!
//! Nothing in here knows about GIFs: it provides the debouncer the picker uses
//! to collapse keystrokes, the scoped subscriptions components hold while they
//! are mounted, request sequencing for async searches, and the channel helpers
//! the synchronous UI loop uses to hand work to async tasks.

mod channel;
mod debounce;
mod sequence;
mod subscription;

pub use channel::send_blocking;
pub use debounce::{
  Clock,
  Debouncer,
  ManualClock,
  SystemClock,
};
pub use sequence::RequestSequence;
pub use subscription::{
  Subscription,
  Subscriptions,
};
