/// Monotonic tags for async requests, so that a response can be checked
/// against the most recently issued request before it is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSequence {
  latest: u64,
}

impl RequestSequence {
  pub const fn new() -> Self {
    Self { latest: 0 }
  }

  /// Issue the next tag. Tags start at 1.
  pub fn next(&mut self) -> u64 {
    self.latest += 1;
    self.latest
  }

  pub const fn latest(&self) -> u64 {
    self.latest
  }

  pub const fn is_latest(&self, seq: u64) -> bool {
    self.latest != 0 && seq == self.latest
  }
}

#[cfg(test)]
mod tests {
  use super::RequestSequence;

  #[test]
  fn only_the_newest_tag_is_latest() {
    let mut sequence = RequestSequence::new();
    assert!(!sequence.is_latest(0));

    let first = sequence.next();
    let second = sequence.next();
    assert!(second > first);
    assert!(sequence.is_latest(second));
    assert!(!sequence.is_latest(first));
  }
}
