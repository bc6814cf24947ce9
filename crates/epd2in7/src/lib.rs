//! Waveshare 2.7" e-Paper Display Driver
//!
//! A driver for the 176x264 monochrome 2.7" e-paper panel with smart partial
//! refresh.
//!
//! ## Features
//!
//! - `no_std` compatible (needs `alloc`); enable `std` to build against the standard library
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Full refresh, partial refresh, and fast partial refresh
//! - [`Epd::smart_update`] picks the cheapest safe refresh and forces a full
//!   refresh every `partial_refresh_limit` updates to limit burn-in
//! - Portrait or landscape input images
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use epd2in7::{Builder, Epd, Frame, Interface, HEIGHT, WIDTH};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst, busy);
//! let config = match Builder::new().partial_refresh_limit(16).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut epd = Epd::new(interface, config);
//! let mut page = Frame::new(WIDTH, HEIGHT);
//! let _ = epd.smart_update(&page, &mut delay); // full refresh
//!
//! page.set_pixel(10, 10, false);
//! let _ = epd.smart_update(&page, &mut delay); // partial refresh
//! let _ = epd.sleep(&mut delay);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Command definitions
pub mod command;
/// Driver configuration types and builder
pub mod config;
/// Frame diff helpers for partial updates
pub mod diff;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Frame buffer encoding
pub mod framebuffer;
/// Pixel sources and frame snapshots
pub mod image;
/// Hardware interface abstraction
pub mod interface;
/// Waveform look-up tables
pub mod lut;
/// Coordinate rotation utilities
pub mod rotation;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

/// Panel width in pixels
pub const WIDTH: u32 = 176;
/// Panel height in pixels
pub const HEIGHT: u32 = 264;

pub use config::{Builder, Config, DEFAULT_PARTIAL_REFRESH_LIMIT, Rotation};
pub use diff::{BoundingBox, Region};
pub use display::{Epd, State, UpdateKind};
pub use error::{BuilderError, DimensionMismatch, Error};
pub use image::{Frame, PixelSource};
pub use interface::{
    BusyWait, DEFAULT_BUSY_POLL_INTERVAL_MS, DisplayInterface, Interface, InterfaceError,
    SPI_FREQUENCY_HZ, SPI_MODE,
};
pub use lut::{LUT_FAST, LUT_NORMAL, Waveform, WaveformTable};
pub use rotation::Rotated;
