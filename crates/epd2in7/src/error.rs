//! Driver errors
//!
//! - [`BuilderError`]: rejected configuration
//! - [`Error`]: a display operation failed
//! - [`DimensionMismatch`]: an image of the wrong size, reported by the codec
//!   and wrapped in [`Error::DimensionMismatch`] by the driver
//! - [`InterfaceError`](crate::interface::InterfaceError): bus, pin or busy
//!   timeout failures of the stock [`Interface`](crate::interface::Interface)
//!
//! No operation retries. After any [`Error::Interface`] raised mid-refresh the
//! driver forgets its cached frame, so the next
//! [`smart_update`](crate::display::Epd::smart_update) redraws the whole panel.
//!
//! ## Example
//!
//! ```
//! use epd2in7::{Builder, BuilderError};
//!
//! let result = Builder::new().busy_poll_interval_ms(0).build();
//! assert!(matches!(result, Err(BuilderError::InvalidPollInterval)));
//! ```

use crate::interface::DisplayInterface;

/// A failed display operation
///
/// Carries the interface's own error type in [`Error::Interface`].
pub enum Error<I: DisplayInterface> {
    /// The [`DisplayInterface`] failed part way through a transaction
    Interface(I::Error),
    /// Image size does not match the panel
    DimensionMismatch(DimensionMismatch),
    /// A partial refresh needs the previously displayed frame, and there is none
    NoPreviousFrame,
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::DimensionMismatch(e) => write!(f, "{e}"),
            Error::NoPreviousFrame => write!(f, "No frame has been displayed yet"),
        }
    }
}

// Written out so that `I` itself does not need to be `Debug`
impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Error::DimensionMismatch(e) => f.debug_tuple("DimensionMismatch").field(e).finish(),
            Error::NoPreviousFrame => f.write_str("NoPreviousFrame"),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<DimensionMismatch> for Error<I> {
    fn from(e: DimensionMismatch) -> Self {
        Error::DimensionMismatch(e)
    }
}

/// An image whose size differs from the panel's
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionMismatch {
    /// Width the panel needs
    pub expected_width: u32,
    /// Height the panel needs
    pub expected_height: u32,
    /// Width of the image provided
    pub width: u32,
    /// Height of the image provided
    pub height: u32,
}

impl core::fmt::Display for DimensionMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Image must be same dimensions as display ({}x{}), got {}x{}",
            self.expected_width, self.expected_height, self.width, self.height
        )
    }
}

impl core::error::Error for DimensionMismatch {}

/// Configuration rejected by [`Builder::build`](crate::config::Builder::build)
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// BUSY poll interval must be at least 1 ms
    InvalidPollInterval,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::InvalidPollInterval => {
                write!(f, "Busy poll interval must be greater than zero")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
