//! Panel wiring and the byte protocol
//!
//! The 2.7" panel hangs off an SPI bus ([`SPI_FREQUENCY_HZ`], [`SPI_MODE`])
//! plus three GPIOs:
//! - **DC** (output): low for a command byte, high for data
//! - **RST** (output): pulsed low to reset the controller
//! - **BUSY** (input): low while a refresh or power-up is in progress
//!
//! ## Example
//!
//! ```rust,ignore
//! use epd2in7::{BusyWait, DisplayInterface, Interface};
//!
//! let mut interface = Interface::new(spi_device, dc_pin, rst_pin, busy_pin);
//!
//! interface.reset(&mut delay)?;
//! interface.send_command(0x04)?; // Power on
//! interface.busy_wait(&mut delay, BusyWait::default())?;
//! ```

use core::fmt::Debug;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::{MODE_0, Mode, SpiDevice},
};

use crate::command::GET_STATUS;

/// SPI clock the panel is driven at
pub const SPI_FREQUENCY_HZ: u32 = 2_000_000;

/// SPI polarity/phase the panel expects (CPOL = 0, CPHA = 0, MSB first)
pub const SPI_MODE: Mode = MODE_0;

/// Time the reset line is held in each phase of a hardware reset
pub const RESET_DELAY_MS: u32 = 200;

/// Default BUSY polling interval
pub const DEFAULT_BUSY_POLL_INTERVAL_MS: u32 = 50;

/// How [`DisplayInterface::busy_wait`] polls the BUSY line
///
/// `timeout_ms: None` waits forever, which is what the vendor sequence does.
/// Set a bound when a stuck panel must not hang the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusyWait {
    /// Delay between two reads of the BUSY line
    pub poll_interval_ms: u32,
    /// Give up after roughly this long
    pub timeout_ms: Option<u32>,
}

impl Default for BusyWait {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_BUSY_POLL_INTERVAL_MS,
            timeout_ms: None,
        }
    }
}

/// Byte-level access to the panel controller
///
/// [`Epd`](crate::display::Epd) only talks to the panel through this trait.
/// [`Interface`] is the embedded-hal implementation; tests and boards with
/// unusual wiring can provide their own.
pub trait DisplayInterface {
    /// Failure reported by the bus, the pins or the busy wait
    type Error: Debug;

    /// Write one command byte with DC held low
    ///
    /// # Errors
    ///
    /// Bus or pin failure.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Write parameter or pixel bytes with DC held high
    ///
    /// A slice goes out exactly as if its bytes were written one by one.
    ///
    /// # Errors
    ///
    /// Bus or pin failure.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Pulse RST: low for [`RESET_DELAY_MS`], then high for [`RESET_DELAY_MS`]
    ///
    /// # Errors
    ///
    /// Pin failure.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Block until BUSY reads idle, polling as `wait` describes
    ///
    /// # Errors
    ///
    /// [`InterfaceError::Timeout`] (or the implementation's equivalent) once
    /// `wait.timeout_ms` has passed.
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D, wait: BusyWait) -> Result<(), Self::Error>;
}

/// Failure of an [`Interface`] operation
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// The SPI device failed
    Spi(SpiErr),
    /// DC, RST or BUSY failed
    Pin(PinErr),
    /// BUSY stayed low past the configured timeout
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Spi(e) => write!(f, "SPI write failed: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "GPIO failed: {e:?}"),
            InterfaceError::Timeout => write!(f, "Panel stayed busy past the timeout"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// [`DisplayInterface`] over an embedded-hal [`SpiDevice`] and three GPIOs
///
/// DC, RST and BUSY must share one pin error type.
#[derive(Debug)]
pub struct Interface<SPI, DC, RST, BUSY> {
    spi: SPI,
    /// Low selects command, high selects data
    dc: DC,
    /// Active low
    rst: RST,
    /// Low while the panel works
    busy: BUSY,
}

impl<SPI, DC, RST, BUSY> Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Bundle the bus and pins
    ///
    /// `spi` must already run at [`SPI_FREQUENCY_HZ`] in [`SPI_MODE`].
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self { spi, dc, rst, busy }
    }

    /// Hand the bus and pins back
    pub fn release(self) -> (SPI, DC, RST, BUSY) {
        (self.spi, self.dc, self.rst, self.busy)
    }
}

impl<SPI, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D, wait: BusyWait) -> Result<(), Self::Error> {
        // The panel sometimes misses the ready edge; a status read wakes BUSY up.
        self.send_command(GET_STATUS)?;

        let mut waited_ms = 0u32;
        loop {
            if self.busy.is_high().map_err(InterfaceError::Pin)? {
                return Ok(());
            }
            if let Some(timeout_ms) = wait.timeout_ms {
                if waited_ms >= timeout_ms {
                    log::warn!("busy wait gave up after {waited_ms} ms");
                    return Err(InterfaceError::Timeout);
                }
            }
            self.send_command(GET_STATUS)?;
            delay.delay_ms(wait.poll_interval_ms);
            waited_ms = waited_ms.saturating_add(wait.poll_interval_ms);
        }
    }
}
