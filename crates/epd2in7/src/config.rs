//! Driver configuration types and builder

pub use crate::error::BuilderError;
use crate::interface::{BusyWait, DEFAULT_BUSY_POLL_INTERVAL_MS};

/// Consecutive partial refreshes allowed before a full refresh is forced
pub const DEFAULT_PARTIAL_REFRESH_LIMIT: u32 = 32;

/// Orientation of the images handed to the driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// Portrait, the panel's native 176x264 layout
    #[default]
    Rotate0,
    /// Landscape: callers pass 264x176 images, turned 90 degrees onto the panel
    Rotate90,
}

/// Driver configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Forced full refresh after this many consecutive partial refreshes
    pub partial_refresh_limit: u32,
    /// Allow the fast waveform inside [`Epd::smart_update`](crate::display::Epd::smart_update)
    pub fast_refresh: bool,
    /// Orientation of input images
    pub rotation: Rotation,
    /// BUSY polling behavior
    pub busy_wait: BusyWait,
}

impl Default for Config {
    fn default() -> Self {
        Builder::new().settings()
    }
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use epd2in7::{Builder, Rotation};
///
/// let config = Builder::new()
///     .partial_refresh_limit(8)
///     .fast_refresh(false)
///     .rotation(Rotation::Rotate90)
///     .busy_timeout_ms(Some(10_000))
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.partial_refresh_limit, 8);
/// ```
pub struct Builder {
    partial_refresh_limit: u32,
    fast_refresh: bool,
    rotation: Rotation,
    busy_poll_interval_ms: u32,
    busy_timeout_ms: Option<u32>,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            partial_refresh_limit: DEFAULT_PARTIAL_REFRESH_LIMIT,
            fast_refresh: true,
            rotation: Rotation::Rotate0,
            busy_poll_interval_ms: DEFAULT_BUSY_POLL_INTERVAL_MS,
            // Vendor behavior: wait for the panel however long it takes
            busy_timeout_ms: None,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many partial refreshes may run between two full refreshes
    pub fn partial_refresh_limit(mut self, limit: u32) -> Self {
        self.partial_refresh_limit = limit;
        self
    }

    /// Enable or disable the fast waveform for eligible smart updates
    pub fn fast_refresh(mut self, enabled: bool) -> Self {
        self.fast_refresh = enabled;
        self
    }

    /// Set input image orientation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the BUSY polling interval
    pub fn busy_poll_interval_ms(mut self, interval_ms: u32) -> Self {
        self.busy_poll_interval_ms = interval_ms;
        self
    }

    /// Bound the BUSY wait. `None` waits forever.
    pub fn busy_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    fn settings(&self) -> Config {
        Config {
            partial_refresh_limit: self.partial_refresh_limit,
            fast_refresh: self.fast_refresh,
            rotation: self.rotation,
            busy_wait: BusyWait {
                poll_interval_ms: self.busy_poll_interval_ms,
                timeout_ms: self.busy_timeout_ms,
            },
        }
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidPollInterval` if the poll interval is zero
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.busy_poll_interval_ms == 0 {
            return Err(BuilderError::InvalidPollInterval);
        }
        Ok(self.settings())
    }
}
