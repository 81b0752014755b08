/******************************************************************************
 * Hynitron CST816S — registers used by this driver.                          *
 * The chip has no public datasheet; the map below is the de-facto one        *
 * shared by the vendor reference code and existing ports.                    *
*******************************************************************************/

pub(crate) const I2C_ADDR: u8 = 0x15;

/// Value written to [`Reg::SleepMode`] to enter deep standby.
pub(crate) const DEEP_SLEEP: u8 = 0x03;

#[allow(dead_code)]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  // Touch report block (0x01..0x06), read as one 6-byte run
  GestureId = 0x01,
  FingerNum = 0x02,
  XposH = 0x03,
  XposL = 0x04,
  YposH = 0x05,
  YposL = 0x06,

  // Firmware identification
  Version = 0x15,
  // 3-byte block: chip id, project id, firmware version
  VersionInfo = 0xA7,

  // Power control
  SleepMode = 0xA5,
}
