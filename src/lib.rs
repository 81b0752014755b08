#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `no_std` driver for the Hynitron CST816S capacitive touch and gesture
//! controller.
//!
//! The CST816S reports single-finger touch coordinates and a small set of
//! firmware-detected gestures over I²C, and raises an interrupt line when a
//! new report is ready. This crate exposes that as:
//!
//! - A blocking driver built on `embedded-hal` 1.0 traits, with the
//!   interrupt-to-poll handoff the chip expects: the host's IRQ handler does
//!   nothing but flag the event, and the multi-byte bus read is deferred to
//!   the next [`Cst816s::available`] call in normal context
//! - Typed gesture and event decoding instead of raw register bytes
//! - The chip's power-on reset choreography and deep-standby entry
//! - An async variant in [`asynch`] for hosts that prefer to `await` the
//!   interrupt line via `embedded-hal-async`
//!
//! ```no_run
//! use cst816s::{Cst816s, Error, EventFlag};
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::i2c::{I2c, SevenBitAddress};
//!
//! static TOUCH_PENDING: EventFlag = EventFlag::new();
//!
//! fn example<I2C, RST, D, E>(i2c: I2C, reset: RST, mut delay: D) -> Result<(), Error<E, RST::Error>>
//! where
//!   I2C: I2c<SevenBitAddress, Error = E>,
//!   RST: OutputPin,
//!   D: DelayNs,
//! {
//!   let mut touch = Cst816s::new(i2c, reset, &TOUCH_PENDING);
//!   touch.begin(&mut delay)?;
//!
//!   // Arm a rising-edge interrupt on the INT pin with your HAL and call
//!   // `TOUCH_PENDING.signal()` from the handler — nothing else.
//!
//!   loop {
//!     if touch.available()? {
//!       let data = touch.touch();
//!       let _ = (data.x, data.y, touch.event_name());
//!     }
//!   }
//! }
//! ```

pub mod asynch;
mod event;
mod flag;
mod reg;
mod rw;

#[cfg(test)]
mod mock;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, SevenBitAddress};

pub use event::{EventKind, Gesture, TouchData};
pub use flag::EventFlag;
use reg::{Reg, DEEP_SLEEP};

/// Errors that can occur while interacting with the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E, P> {
  /// I²C bus transaction failed with the underlying driver error.
  I2c(E),
  /// The reset or interrupt pin could not be driven.
  Pin(P),
  /// An operation attempted to write a payload larger than the on-stack
  /// scratch buffer.
  BufferOverflow,
}

/// Blocking driver for the CST816S controller.
///
/// The driver owns the I²C peripheral and the reset pin, and borrows a
/// host-owned [`EventFlag`] that bridges the touch interrupt to the polling
/// path. Create an instance with [`Cst816s::new`] (no I/O), then call
/// [`Cst816s::begin`] to reset the chip and read its identification block.
pub struct Cst816s<'a, I, RST> {
  i2c: I,
  reset: RST,
  flag: &'a EventFlag,
  touch: TouchData,
  version: u8,
  version_info: [u8; 3],
}

impl<'a, I, E, RST, P> Cst816s<'a, I, RST>
where
  I: I2c<SevenBitAddress, Error = E>,
  RST: OutputPin<Error = P>,
{
  /// Create a new driver instance from the bus, the reset pin, and the
  /// shared pending-event flag.
  ///
  /// The hardware is untouched until [`Cst816s::begin`] is called.
  pub fn new(i2c: I, reset: RST, flag: &'a EventFlag) -> Self {
    Self { i2c, reset, flag, touch: TouchData::default(), version: 0, version_info: [0; 3] }
  }

  /// Reset the chip and read its identification block.
  ///
  /// The reset pulse is HIGH for 50 ms, LOW for 5 ms, HIGH for 50 ms — the
  /// asymmetric shape the chip's power-on reset window requires. The
  /// firmware version and version-info registers are then read, with a 5 ms
  /// settle delay between them.
  ///
  /// Afterwards, arm a rising-edge interrupt on the INT pin and call
  /// [`EventFlag::signal`] from the handler.
  pub fn begin<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E, P>> {
    self.reset.set_high().map_err(Error::Pin)?;
    delay.delay_ms(50);
    self.reset.set_low().map_err(Error::Pin)?;
    delay.delay_ms(5);
    self.reset.set_high().map_err(Error::Pin)?;
    delay.delay_ms(50);

    let mut version = [0u8; 1];
    self.read_regs(Reg::Version, &mut version)?;
    delay.delay_ms(5);
    let mut info = [0u8; 3];
    self.read_regs(Reg::VersionInfo, &mut info)?;

    self.version = version[0];
    self.version_info = info;
    Ok(())
  }

  /// Poll for a pending touch event.
  ///
  /// If the IRQ handler has signalled since the last call, this performs
  /// the deferred 6-byte report read, decodes it into the snapshot returned
  /// by [`Cst816s::touch`], and returns `Ok(true)`. Otherwise it returns
  /// `Ok(false)` immediately, without touching the bus.
  ///
  /// Call from normal (non-interrupt) context at whatever cadence suits the
  /// host. The flag consume is an atomic swap, so an interrupt firing
  /// mid-poll is picked up by the next call rather than lost. If the read
  /// fails the event is still consumed and the previous snapshot is left
  /// intact.
  pub fn available(&mut self) -> Result<bool, Error<E, P>> {
    if !self.flag.take() {
      return Ok(false);
    }
    let mut raw = [0u8; 6];
    self.read_regs(Reg::GestureId, &mut raw)?;
    self.touch = TouchData::from_report(&raw);
    Ok(true)
  }

  /// Latest decoded touch snapshot.
  pub fn touch(&self) -> TouchData {
    self.touch
  }

  /// Label of the last decoded gesture, `"UNKNOWN"` for unrecognized codes.
  pub fn event_name(&self) -> &'static str {
    self.touch.gesture.name()
  }

  /// Firmware version byte read during [`Cst816s::begin`].
  pub fn firmware_version(&self) -> u8 {
    self.version
  }

  /// Version-info block (chip id, project id, firmware version) read during
  /// [`Cst816s::begin`].
  pub fn version_info(&self) -> [u8; 3] {
    self.version_info
  }

  /// Put the controller into deep standby.
  ///
  /// Pulses reset (LOW 5 ms, HIGH 50 ms) and then writes the standby
  /// command to the power-control register. Waking the chip requires
  /// another [`Cst816s::begin`].
  pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E, P>> {
    self.reset.set_low().map_err(Error::Pin)?;
    delay.delay_ms(5);
    self.reset.set_high().map_err(Error::Pin)?;
    delay.delay_ms(50);
    self.write_regs(Reg::SleepMode, &[DEEP_SLEEP])
  }

  /// Consume the driver and return the bus and reset pin.
  pub fn release(self) -> (I, RST) {
    (self.i2c, self.reset)
  }
}
