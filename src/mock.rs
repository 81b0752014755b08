//! Hand-rolled HAL doubles for the unit tests.
//!
//! Pin transitions, delays, and bus transfers are recorded into one ordered
//! trace so sequence-sensitive properties (the reset pulse shape, the
//! standby-write ordering) can be asserted exactly.

use core::cell::RefCell;
use core::convert::Infallible;
use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource, Operation, SevenBitAddress};

use crate::reg::I2C_ADDR;

/// One observable side effect of the driver, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
  High,
  Low,
  DelayMs(u32),
  BusRead(u8),
  BusWrite(u8, u8),
  IrqWait,
}

const TRACE_CAP: usize = 24;

pub(crate) struct Trace(RefCell<([Option<Step>; TRACE_CAP], usize)>);

impl Trace {
  pub fn new() -> Self {
    Self(RefCell::new(([None; TRACE_CAP], 0)))
  }

  pub fn push(&self, step: Step) {
    let mut inner = self.0.borrow_mut();
    let len = inner.1;
    inner.0[len] = Some(step);
    inner.1 = len + 1;
  }

  pub fn assert_eq(&self, expected: &[Step]) {
    let inner = self.0.borrow();
    assert_eq!(inner.1, expected.len(), "trace length");
    for (i, step) in expected.iter().enumerate() {
      assert_eq!(inner.0[i], Some(*step), "trace step {}", i);
    }
  }
}

pub(crate) struct MockPin<'a>(&'a Trace);

impl<'a> MockPin<'a> {
  pub fn new(trace: &'a Trace) -> Self {
    Self(trace)
  }
}

impl embedded_hal::digital::ErrorType for MockPin<'_> {
  type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin<'_> {
  fn set_low(&mut self) -> Result<(), Infallible> {
    self.0.push(Step::Low);
    Ok(())
  }

  fn set_high(&mut self) -> Result<(), Infallible> {
    self.0.push(Step::High);
    Ok(())
  }
}

pub(crate) struct MockDelay<'a>(&'a Trace);

impl<'a> MockDelay<'a> {
  pub fn new(trace: &'a Trace) -> Self {
    Self(trace)
  }
}

impl embedded_hal::delay::DelayNs for MockDelay<'_> {
  fn delay_ns(&mut self, _ns: u32) {}

  // overridden so the trace records whole milliseconds, not ns chunks
  fn delay_ms(&mut self, ms: u32) {
    self.0.push(Step::DelayMs(ms));
  }
}

impl embedded_hal_async::delay::DelayNs for MockDelay<'_> {
  async fn delay_ns(&mut self, _ns: u32) {}

  async fn delay_ms(&mut self, ms: u32) {
    self.0.push(Step::DelayMs(ms));
  }
}

pub(crate) struct MockIrq<'a>(&'a Trace);

impl<'a> MockIrq<'a> {
  pub fn new(trace: &'a Trace) -> Self {
    Self(trace)
  }
}

impl embedded_hal::digital::ErrorType for MockIrq<'_> {
  type Error = Infallible;
}

impl embedded_hal_async::digital::Wait for MockIrq<'_> {
  async fn wait_for_high(&mut self) -> Result<(), Infallible> {
    Ok(())
  }

  async fn wait_for_low(&mut self) -> Result<(), Infallible> {
    Ok(())
  }

  async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
    self.0.push(Step::IrqWait);
    Ok(())
  }

  async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
    Ok(())
  }

  async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
    Ok(())
  }
}

#[derive(Clone, Copy)]
struct ReadExp {
  reg: u8,
  data: [u8; 8],
  len: usize,
}

const EXP_CAP: usize = 4;

/// Canned I²C device: serves queued register reads in order, records writes,
/// panics on anything unexpected.
pub(crate) struct MockBus<'a> {
  trace: Option<&'a Trace>,
  reads: [Option<ReadExp>; EXP_CAP],
  queued: usize,
  cursor: usize,
  fail: bool,
}

impl<'a> MockBus<'a> {
  pub fn new(trace: Option<&'a Trace>) -> Self {
    Self { trace, reads: [None; EXP_CAP], queued: 0, cursor: 0, fail: false }
  }

  /// A bus that refuses to acknowledge anything.
  pub fn failing() -> Self {
    Self { fail: true, ..Self::new(None) }
  }

  pub fn expect_read(mut self, reg: u8, data: &[u8]) -> Self {
    let mut exp = ReadExp { reg, data: [0; 8], len: data.len() };
    exp.data[..data.len()].copy_from_slice(data);
    self.reads[self.queued] = Some(exp);
    self.queued += 1;
    self
  }

  fn transfer(&mut self, address: SevenBitAddress, ops: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
    if self.fail {
      return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
    }
    assert_eq!(address, I2C_ADDR, "device address");

    let mut reg = None;
    for op in ops.iter_mut() {
      match op {
        Operation::Write(bytes) => {
          assert!(!bytes.is_empty(), "empty write");
          reg = Some(bytes[0]);
          if bytes.len() > 1 {
            assert_eq!(bytes.len(), 2, "only single-byte register writes expected");
            if let Some(trace) = self.trace {
              trace.push(Step::BusWrite(bytes[0], bytes[1]));
            }
          }
        }
        Operation::Read(buf) => {
          let reg = reg.expect("read without register select");
          let exp = self.reads[self.cursor].expect("unexpected register read");
          self.cursor += 1;
          assert_eq!(reg, exp.reg, "register address");
          assert_eq!(buf.len(), exp.len, "read length");
          buf.copy_from_slice(&exp.data[..exp.len]);
          if let Some(trace) = self.trace {
            trace.push(Step::BusRead(reg));
          }
        }
      }
    }
    Ok(())
  }
}

impl embedded_hal::i2c::ErrorType for MockBus<'_> {
  type Error = ErrorKind;
}

impl embedded_hal::i2c::I2c<SevenBitAddress> for MockBus<'_> {
  fn transaction(
    &mut self,
    address: SevenBitAddress,
    operations: &mut [Operation<'_>],
  ) -> Result<(), ErrorKind> {
    self.transfer(address, operations)
  }
}

impl embedded_hal_async::i2c::I2c<SevenBitAddress> for MockBus<'_> {
  async fn transaction(
    &mut self,
    address: SevenBitAddress,
    operations: &mut [Operation<'_>],
  ) -> Result<(), ErrorKind> {
    self.transfer(address, operations)
  }
}

/// Minimal executor for the async tests; every mock future resolves on the
/// first poll.
pub(crate) fn block_on<F: Future>(fut: F) -> F::Output {
  fn clone(ptr: *const ()) -> RawWaker {
    RawWaker::new(ptr, &VTABLE)
  }
  fn noop(_: *const ()) {}
  static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);

  let waker = unsafe { Waker::from_raw(RawWaker::new(core::ptr::null(), &VTABLE)) };
  let mut cx = Context::from_waker(&waker);
  let mut fut = pin!(fut);
  loop {
    if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
      return out;
    }
  }
}
