use core::sync::atomic::{AtomicBool, Ordering};

/// Single-slot "touch event pending" mailbox shared between the host's IRQ
/// handler and the polling thread.
///
/// The host declares one in a `static`, passes a reference to
/// [`Cst816s::new`](crate::Cst816s::new), and calls [`EventFlag::signal`]
/// from its rising-edge interrupt handler for the INT pin. The driver
/// consumes the flag from [`Cst816s::available`](crate::Cst816s::available).
///
/// Multiple interrupts before a poll collapse into one pending event; there
/// is no backlog. The consume side is an atomic swap, so a signal landing
/// between any two instructions of the poll path is never lost.
pub struct EventFlag(AtomicBool);

impl EventFlag {
  /// Create a flag with no event pending.
  pub const fn new() -> Self {
    Self(AtomicBool::new(false))
  }

  /// Mark a touch event as pending.
  ///
  /// The only operation safe to call from interrupt context: a single
  /// atomic store, no bus access, no allocation.
  pub fn signal(&self) {
    self.0.store(true, Ordering::Relaxed);
  }

  /// Whether an event is pending, without consuming it.
  pub fn is_pending(&self) -> bool {
    self.0.load(Ordering::Relaxed)
  }

  /// Consume the pending event, if any.
  pub(crate) fn take(&self) -> bool {
    self.0.swap(false, Ordering::Relaxed)
  }
}

impl Default for EventFlag {
  fn default() -> Self {
    Self::new()
  }
}
