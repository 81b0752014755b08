use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::reg::{Reg, I2C_ADDR};
use crate::{Cst816s, Error};

// Largest register-select + payload staged for a single write.
const SCRATCH: usize = 8;

impl<I, E, RST, P> Cst816s<'_, I, RST>
where
  I: I2c<SevenBitAddress, Error = E>,
  RST: OutputPin<Error = P>,
{
  /// Issue a register-select then read `buf.len()` bytes, as one I²C
  /// transaction. A non-acknowledged transfer surfaces as [`Error::I2c`];
  /// no retries are attempted at this layer.
  pub(crate) fn read_regs(&mut self, reg: Reg, buf: &mut [u8]) -> Result<(), Error<E, P>> {
    self.i2c.write_read(I2C_ADDR, &[reg as u8], buf).map_err(Error::I2c)
  }

  /// Issue a register-select followed by the payload bytes in a single
  /// write.
  pub(crate) fn write_regs(&mut self, reg: Reg, data: &[u8]) -> Result<(), Error<E, P>> {
    let len = data.len();
    if len >= SCRATCH {
      return Err(Error::BufferOverflow);
    }
    let mut buf = [0u8; SCRATCH];
    buf[0] = reg as u8;
    buf[1..=len].copy_from_slice(data);
    self.i2c.write(I2C_ADDR, &buf[..=len]).map_err(Error::I2c)
  }
}
