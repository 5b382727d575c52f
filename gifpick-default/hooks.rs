use gifpick_search::ResultItem;

/// Callbacks a host can attach to the popover. Every method has a no-op
/// default, so a host only overrides what it cares about.
pub trait PickerHooks {
  /// Runs once for every open -> closed transition.
  fn on_close(&mut self) {}

  /// Runs when the user picks a result.
  fn on_pick(&mut self, _item: &ResultItem) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl PickerHooks for NoHooks {}
