use std::time::Duration;

use futures_executor::block_on;
use tokio::sync::mpsc::{
  Sender,
  error::{
    SendTimeoutError,
    TrySendError,
  },
};

/// Maximum time to block when sending to a full channel.
/// Kept very short so a busy worker never stalls the event loop.
const SEND_TIMEOUT_MS: u64 = 2;

/// Send an event to a channel, blocking only briefly if the channel is full.
///
/// This is called from the synchronous UI loop to hand work to async tasks.
/// A non-blocking send is tried first; if the channel is full it blocks for
/// at most `SEND_TIMEOUT_MS` milliseconds. A value that still does not fit is
/// handed back so the caller can retry it later. Sends to a closed channel
/// are logged and dropped.
#[must_use = "a returned value was not delivered"]
pub fn send_blocking<T>(tx: &Sender<T>, data: T) -> Option<T> {
  match tx.try_send(data) {
    Ok(()) => None,
    Err(TrySendError::Full(data)) => {
      match block_on(tx.send_timeout(data, Duration::from_millis(SEND_TIMEOUT_MS))) {
        Ok(()) => None,
        Err(SendTimeoutError::Timeout(data)) => {
          log::debug!("channel stayed full, handing the event back");
          Some(data)
        },
        Err(SendTimeoutError::Closed(_)) => {
          log::warn!("Attempted to send to closed channel");
          None
        },
      }
    },
    Err(TrySendError::Closed(_)) => {
      log::warn!("Attempted to send to closed channel");
      None
    },
  }
}

#[cfg(test)]
mod tests {
  use tokio::sync::mpsc;

  use super::send_blocking;

  #[test]
  fn send_blocking_delivers_when_there_is_room() {
    let (tx, mut rx) = mpsc::channel(1);
    assert_eq!(send_blocking(&tx, 7u32), None);
    assert_eq!(rx.try_recv().ok(), Some(7));
  }

  #[test]
  fn send_blocking_hands_back_when_full() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();
    let (tx, mut rx) = mpsc::channel(1);
    assert_eq!(send_blocking(&tx, 1u32), None);
    assert_eq!(send_blocking(&tx, 2u32), Some(2));
    assert_eq!(rx.try_recv().ok(), Some(1));
    assert!(rx.try_recv().is_err());
  }

  #[test]
  fn send_blocking_drops_on_closed_channel() {
    let (tx, rx) = mpsc::channel::<u32>(1);
    drop(rx);
    assert_eq!(send_blocking(&tx, 1), None);
  }
}
