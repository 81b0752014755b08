//! Async flavour of the driver, for hosts that `await` the INT line instead
//! of taking a hardware interrupt.
//!
//! The blocking [`Cst816s`](crate::Cst816s) splits interrupt-context
//! flagging from deferred bus I/O; here the executor provides that split,
//! so the driver owns the INT pin as an [`embedded_hal_async::digital::Wait`]
//! and [`Cst816s::next_event`] simply suspends until the chip raises it.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::event::TouchData;
use crate::reg::{Reg, DEEP_SLEEP, I2C_ADDR};
use crate::Error;

/// Async driver for the CST816S controller.
pub struct Cst816s<I, IRQ, RST> {
  i2c: I,
  irq: IRQ,
  reset: RST,
  touch: TouchData,
  version: u8,
  version_info: [u8; 3],
}

impl<I, E, IRQ, RST, P> Cst816s<I, IRQ, RST>
where
  I: I2c<SevenBitAddress, Error = E>,
  IRQ: Wait<Error = P>,
  RST: OutputPin<Error = P>,
{
  /// Create a new driver instance from the bus, the INT pin, and the reset
  /// pin. The hardware is untouched until [`Cst816s::begin`] is called.
  pub fn new(i2c: I, irq: IRQ, reset: RST) -> Self {
    Self { i2c, irq, reset, touch: TouchData::default(), version: 0, version_info: [0; 3] }
  }

  /// Reset the chip and read its identification block.
  ///
  /// Same pulse shape and settle delays as the blocking driver: HIGH 50 ms,
  /// LOW 5 ms, HIGH 50 ms, then the version and version-info reads 5 ms
  /// apart.
  pub async fn begin<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E, P>> {
    self.reset.set_high().map_err(Error::Pin)?;
    delay.delay_ms(50).await;
    self.reset.set_low().map_err(Error::Pin)?;
    delay.delay_ms(5).await;
    self.reset.set_high().map_err(Error::Pin)?;
    delay.delay_ms(50).await;

    let mut version = [0u8; 1];
    self.read_regs(Reg::Version, &mut version).await?;
    delay.delay_ms(5).await;
    let mut info = [0u8; 3];
    self.read_regs(Reg::VersionInfo, &mut info).await?;

    self.version = version[0];
    self.version_info = info;
    Ok(())
  }

  /// Wait for the next touch interrupt, then read and decode the report.
  ///
  /// Suspends on a rising edge of the INT line. Each completion reflects
  /// the latest report only; events raised while a read is in progress are
  /// picked up by the next call.
  pub async fn next_event(&mut self) -> Result<TouchData, Error<E, P>> {
    self.irq.wait_for_rising_edge().await.map_err(Error::Pin)?;
    let mut raw = [0u8; 6];
    self.read_regs(Reg::GestureId, &mut raw).await?;
    self.touch = TouchData::from_report(&raw);
    Ok(self.touch)
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

  /// Version-info block read during [`Cst816s::begin`].
  pub fn version_info(&self) -> [u8; 3] {
    self.version_info
  }

  /// Put the controller into deep standby, with the same reset pulse and
  /// standby write as the blocking driver.
  pub async fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<E, P>> {
    self.reset.set_low().map_err(Error::Pin)?;
    delay.delay_ms(5).await;
    self.reset.set_high().map_err(Error::Pin)?;
    delay.delay_ms(50).await;
    self.write_regs(Reg::SleepMode, &[DEEP_SLEEP]).await
  }

  /// Consume the driver and return the bus and pins.
  pub fn release(self) -> (I, IRQ, RST) {
    (self.i2c, self.irq, self.reset)
  }

  async fn read_regs(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Error<E, P>> {
    self.i2c.write_read(I2C_ADDR, &[reg as u8], buf).await.map_err(Error::I2c)
  }

  async fn write_regs(&mut self, reg: Reg, data: &[u8]) -> Result<(), Error<E, P>> {
    let len = data.len();
    if len >= 8 {
      return Err(Error::BufferOverflow);
    }
    let mut buf = [0u8; 8];
    buf[0] = reg as u8;
    buf[1..=len].copy_from_slice(data);
    self.i2c.write(I2C_ADDR, &buf[..=len]).await.map_err(Error::I2c)
  }
}
