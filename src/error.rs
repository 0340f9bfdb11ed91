use crate::aqi::AqiError;
use crate::frame::FrameError;

/// Errors returned by the driver.
///
/// `E` is the error type of the underlying I2C implementation. A bus failure
/// is surfaced unchanged and untried; whether to retry is the caller's
/// decision. None of these errors leave the driver in an inconsistent state,
/// so the next poll cycle may simply try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The I2C transaction failed (device absent, NACK, bus timeout).
    #[cfg_attr(feature = "thiserror", error("i2c bus error: {0:?}"))]
    Bus(E),
    /// The received frame failed validation; the data was discarded.
    #[cfg_attr(feature = "thiserror", error("frame decode failed: {0}"))]
    Frame(FrameError),
    /// The AQI engine was handed an out-of-domain concentration.
    #[cfg_attr(feature = "thiserror", error("aqi derivation failed: {0}"))]
    Aqi(AqiError),
}

impl<E> From<FrameError> for Error<E> {
    fn from(err: FrameError) -> Self {
        Error::Frame(err)
    }
}

impl<E> From<AqiError> for Error<E> {
    fn from(err: AqiError) -> Self {
        Error::Aqi(err)
    }
}
