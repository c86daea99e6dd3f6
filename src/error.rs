use derive_more::{Display, Error};
use embedded_hal::i2c::ErrorKind;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while talking to the NeoTrellis panels.
///
/// Only [`MultiTrellis::begin`](crate::trellis::MultiTrellis::begin) failures are fatal.
/// Errors during the frame loop are logged and the loop keeps running.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(not(feature = "host"), derive(defmt::Format))]
pub enum Error {
    /// An I2C transaction with a seesaw chip failed.
    #[display("I2C bus error: {_0:?}")]
    I2c(#[error(not(source))] ErrorKind),

    /// A panel answered with a chip id that is not a seesaw.
    #[display("unknown seesaw hardware id {found:#04x} at address {address:#04x}")]
    UnknownHardwareId {
        /// 7-bit I2C address of the panel.
        address: u8,
        /// Id byte read from the status register.
        found: u8,
    },

    /// A key number outside the matrix was used.
    #[display("key {_0} is outside the key matrix")]
    KeyOutOfRange(#[error(not(source))] u8),
}
