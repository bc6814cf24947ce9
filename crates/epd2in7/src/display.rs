//! Core display operations
//!
//! [`Epd`] sequences full and partial refresh transactions, keeps a copy of
//! the last frame it put on the panel, and decides per update which kind of
//! refresh to run.

use alloc::vec;
use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::command::{
    BOOSTER_SOFT_START, DATA_START_TRANSMISSION_1, DATA_START_TRANSMISSION_2, DEEP_SLEEP,
    DEEP_SLEEP_CHECK_CODE, DISPLAY_REFRESH, PANEL_SETTING, PARTIAL_DATA_START_TRANSMISSION_1,
    PARTIAL_DATA_START_TRANSMISSION_2, PARTIAL_DISPLAY_REFRESH, PLL_CONTROL, POWER_ON,
    POWER_OPTIMIZATION, POWER_SETTING, VCM_DC_SETTING,
};
use crate::config::{Config, Rotation};
use crate::diff::{self, Region};
use crate::error::Error;
use crate::framebuffer;
use crate::image::{Frame, PixelSource};
use crate::interface::DisplayInterface;
use crate::lut::Waveform;
use crate::rotation::Rotated;
use crate::{HEIGHT, WIDTH};

type DisplayResult<I, T = ()> = core::result::Result<T, Error<I>>;

/// Settle time between transmission stages
const STAGE_DELAY_MS: u32 = 2;

/// Power setting: VDS_EN VDG_EN, VCOM_HV VGHL_LV, VDH, VDL, VDHR
const POWER_SETTING_DATA: [u8; 5] = [0x03, 0x00, 0x2B, 0x2B, 0x09];

const BOOSTER_SOFT_START_DATA: [u8; 3] = [0x07, 0x07, 0x17];

/// Vendor "power optimization" register writes, sent verbatim
const POWER_OPTIMIZATION_DATA: [[u8; 2]; 7] = [
    [0x60, 0xA5],
    [0x89, 0xA5],
    [0x90, 0x00],
    [0x93, 0x2A],
    [0xA0, 0xA5],
    [0xA1, 0x00],
    [0x73, 0x41],
];

/// KW-BF KWR-AF BWROTP 0F
const PANEL_SETTING_DATA: u8 = 0xAF;

/// 3A 100HZ, 29 150Hz, 39 200HZ, 31 171HZ
const PLL_CONTROL_DATA: u8 = 0x3A;

const VCM_DC_SETTING_DATA: u8 = 0x12;

/// Controller lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Not initialized since construction or the last reset
    #[default]
    Uninitialized,
    /// Running the init sequence
    Initializing,
    /// Accepting display operations
    Ready,
    /// In deep sleep; needs [`Epd::reset`] then [`Epd::init`]
    Sleeping,
}

/// What [`Epd::smart_update`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateKind {
    /// Full refresh with the normal waveform
    Full,
    /// Partial refresh of `region`
    Partial {
        /// Byte-aligned region that was refreshed
        region: Region,
        /// Whether the fast waveform was used
        fast: bool,
    },
    /// Image identical to what is shown; nothing was sent
    Unchanged,
}

/// Driver for the 2.7" panel
///
/// Owns the hardware interface, the last displayed frame and the
/// partial refresh counter.
///
/// ## Sleep
///
/// After [`Epd::sleep`] the controller only wakes up through a hardware
/// reset. Call [`Epd::reset`] and then [`Epd::init`] before any display
/// operation; display calls made while asleep are not recovered by the driver.
pub struct Epd<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Driver configuration
    config: Config,
    state: State,
    /// Last frame shown, in native panel orientation
    last_frame: Option<Frame>,
    partial_refresh_count: u32,
}

impl<I> Epd<I>
where
    I: DisplayInterface,
{
    /// Create a new driver instance. No bytes are sent until first use.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: State::Uninitialized,
            last_frame: None,
            partial_refresh_count: 0,
        }
    }

    /// Panel width in pixels
    pub fn width(&self) -> u32 {
        WIDTH
    }

    /// Panel height in pixels
    pub fn height(&self) -> u32 {
        HEIGHT
    }

    /// Current controller state
    pub fn state(&self) -> State {
        self.state
    }

    /// `true` once [`Epd::init`] has completed
    pub fn is_ready(&self) -> bool {
        self.state == State::Ready
    }

    /// Partial refreshes since the last full refresh
    pub fn partial_refresh_count(&self) -> u32 {
        self.partial_refresh_count
    }

    /// The frame currently on the panel, if known
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Give back the hardware interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Hardware reset
    ///
    /// The controller forgets its configuration, so the driver returns to
    /// [`State::Uninitialized`].
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.reset(delay).map_err(Error::Interface)?;
        self.state = State::Uninitialized;
        debug!("epd: reset");
        Ok(())
    }

    /// Perform hardware reset and the vendor initialization sequence
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.state = State::Initializing;
        match self.run_init(delay) {
            Ok(()) => {
                self.state = State::Ready;
                debug!("epd: ready");
                Ok(())
            }
            Err(e) => {
                self.state = State::Uninitialized;
                Err(e)
            }
        }
    }

    fn run_init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface.reset(delay).map_err(Error::Interface)?;

        self.send_command(POWER_SETTING)?;
        self.send_data(&POWER_SETTING_DATA)?;

        self.send_command(BOOSTER_SOFT_START)?;
        self.send_data(&BOOSTER_SOFT_START_DATA)?;

        for data in &POWER_OPTIMIZATION_DATA {
            self.send_command(POWER_OPTIMIZATION)?;
            self.send_data(data)?;
        }

        self.send_command(PARTIAL_DISPLAY_REFRESH)?;
        self.send_data(&[0x00])?;

        self.send_command(POWER_ON)?;
        self.busy_wait(delay)?;

        self.send_command(PANEL_SETTING)?;
        self.send_data(&[PANEL_SETTING_DATA])?;

        self.send_command(PLL_CONTROL)?;
        self.send_data(&[PLL_CONTROL_DATA])?;

        self.send_command(VCM_DC_SETTING)?;
        self.send_data(&[VCM_DC_SETTING_DATA])?;
        delay.delay_ms(STAGE_DELAY_MS);

        self.set_lut(false)
    }

    /// Enter deep sleep mode
    ///
    /// Resume with [`Epd::reset`] followed by [`Epd::init`].
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send_command(DEEP_SLEEP)?;
        delay.delay_ms(STAGE_DELAY_MS);
        self.send_data(&[DEEP_SLEEP_CHECK_CODE])?;
        self.state = State::Sleeping;
        debug!("epd: deep sleep");
        Ok(())
    }

    /// Load the normal (`fast = false`) or fast waveform tables
    pub fn set_lut(&mut self, fast: bool) -> DisplayResult<I> {
        let waveform = Waveform::from_fast(fast);
        trace!("epd: loading {waveform:?} waveform");
        for (register, table) in waveform.table().registers() {
            self.send_command(register)?;
            self.send_data(table)?;
        }
        Ok(())
    }

    /// Display a full frame with a full screen refresh
    ///
    /// Initializes the controller first if it has not been initialized.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `image` is not panel sized (after
    /// rotation); nothing is sent in that case.
    pub fn display_frame<P, D>(&mut self, image: &P, delay: &mut D) -> DisplayResult<I>
    where
        P: PixelSource + ?Sized,
        D: DelayNs,
    {
        let frame = self.snapshot(image)?;
        let result = self.show_full(frame, delay);
        self.forget_on_interface_error(result)
    }

    /// Display a partial frame, only refreshing the given area
    ///
    /// `x` and `y` are the top left corner, `h` and `w` the size of the area.
    /// `x` is rounded down and `w` rounded up to multiples of 8; the area is
    /// not clamped to the panel. With `fast`, the fast waveform is loaded for
    /// this refresh only.
    ///
    /// The area is always in native portrait coordinates (176 wide, 264
    /// tall), also under [`Rotation::Rotate90`] where `image` itself is
    /// landscape. A landscape rectangle `(lx, ly, lw, lh)` on a 264 pixel
    /// wide image covers `x = ly`, `y = 264 - lx - lw`, `w = lh`, `h = lw`.
    ///
    /// The old and new region buffers are sized from `h` and `w`, so keep
    /// the area within the panel.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if `image` is not panel sized and
    /// [`Error::NoPreviousFrame`] if nothing has been displayed yet; nothing
    /// is sent in either case.
    #[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
    pub fn display_partial_frame<P, D>(
        &mut self,
        image: &P,
        x: u32,
        y: u32,
        h: u32,
        w: u32,
        fast: bool,
        delay: &mut D,
    ) -> DisplayResult<I>
    where
        P: PixelSource + ?Sized,
        D: DelayNs,
    {
        let frame = self.snapshot(image)?;
        let result = self.show_partial(frame, Region::new(x, y, h, w), fast, delay);
        self.forget_on_interface_error(result)
    }

    /// Display a frame, deciding which refresh to use
    ///
    /// - Full refresh when nothing has been displayed yet, or after
    ///   `partial_refresh_limit` partial refreshes in a row (burn-in guard).
    /// - Nothing at all when the image matches the panel.
    /// - Otherwise a partial refresh of the changed area. The fast waveform
    ///   is used when enabled and the area was all white before; drawing on
    ///   blank paper does not ghost, anything else might.
    pub fn smart_update<P, D>(&mut self, image: &P, delay: &mut D) -> DisplayResult<I, UpdateKind>
    where
        P: PixelSource + ?Sized,
        D: DelayNs,
    {
        let frame = self.snapshot(image)?;
        let result = self.smart_update_frame(frame, delay);
        self.forget_on_interface_error(result)
    }

    fn smart_update_frame<D: DelayNs>(
        &mut self,
        frame: Frame,
        delay: &mut D,
    ) -> DisplayResult<I, UpdateKind> {
        let Some(last) = self.last_frame.as_ref() else {
            debug!("epd: no frame displayed yet, full refresh");
            self.show_full(frame, delay)?;
            return Ok(UpdateKind::Full);
        };

        if self.partial_refresh_count >= self.config.partial_refresh_limit {
            debug!(
                "epd: {} partial refreshes since last full refresh, full refresh",
                self.partial_refresh_count
            );
            self.show_full(frame, delay)?;
            return Ok(UpdateKind::Full);
        }

        let Some(bbox) = diff::bounding_box(last, &frame)? else {
            trace!("epd: frame unchanged");
            return Ok(UpdateKind::Unchanged);
        };

        // Only the old content decides: blank-to-anything is safe with the
        // quick waveform.
        let fast = self.config.fast_refresh && diff::is_all_white(last, bbox);
        let region = Region::covering(bbox, WIDTH, HEIGHT);
        debug!("epd: partial refresh {region:?} fast={fast}");

        self.show_partial(frame, region, fast, delay)?;
        Ok(UpdateKind::Partial { region, fast })
    }

    fn show_full<D: DelayNs>(&mut self, frame: Frame, delay: &mut D) -> DisplayResult<I> {
        self.ensure_initialized(delay)?;
        self.set_lut(false)?;

        let len = frame.as_bytes().len();

        trace!("epd: full refresh, stage 1");
        self.send_command(DATA_START_TRANSMISSION_1)?;
        delay.delay_ms(STAGE_DELAY_MS);
        self.send_data(&vec![0xFF; len])?;
        delay.delay_ms(STAGE_DELAY_MS);

        trace!("epd: full refresh, stage 2");
        self.send_command(DATA_START_TRANSMISSION_2)?;
        delay.delay_ms(STAGE_DELAY_MS);
        self.send_data(frame.as_bytes())?;
        delay.delay_ms(STAGE_DELAY_MS);

        self.send_command(DISPLAY_REFRESH)?;
        self.busy_wait(delay)?;

        self.last_frame = Some(frame);
        self.partial_refresh_count = 0;
        Ok(())
    }

    fn show_partial<D: DelayNs>(
        &mut self,
        frame: Frame,
        region: Region,
        fast: bool,
        delay: &mut D,
    ) -> DisplayResult<I> {
        if self.last_frame.is_none() {
            return Err(Error::NoPreviousFrame);
        }
        self.ensure_initialized(delay)?;
        let Some(last) = self.last_frame.as_ref() else {
            return Err(Error::NoPreviousFrame);
        };

        let region = region.aligned();
        let Region { x, y, h, w } = region;
        let old = framebuffer::encode_region(last, x, y, h, w);
        let new = framebuffer::encode_region(&frame, x, y, h, w);
        let header = region.header();

        if fast {
            self.set_lut(true)?;
            delay.delay_ms(STAGE_DELAY_MS);
        }

        trace!("epd: partial refresh, old content");
        self.send_command(PARTIAL_DATA_START_TRANSMISSION_1)?;
        delay.delay_ms(STAGE_DELAY_MS);
        self.send_data(&header)?;
        delay.delay_ms(STAGE_DELAY_MS);
        self.send_data(&old)?;
        delay.delay_ms(STAGE_DELAY_MS);

        trace!("epd: partial refresh, new content");
        self.send_command(PARTIAL_DATA_START_TRANSMISSION_2)?;
        delay.delay_ms(STAGE_DELAY_MS);
        self.send_data(&header)?;
        self.send_data(&new)?;
        delay.delay_ms(STAGE_DELAY_MS);

        self.send_command(PARTIAL_DISPLAY_REFRESH)?;
        delay.delay_ms(STAGE_DELAY_MS);
        self.send_data(&header)?;
        self.busy_wait(delay)?;

        if fast {
            self.set_lut(false)?;
        }

        self.last_frame = Some(frame);
        self.partial_refresh_count = self.partial_refresh_count.saturating_add(1);
        Ok(())
    }

    fn ensure_initialized<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        match self.state {
            State::Uninitialized => self.init(delay),
            State::Sleeping => {
                warn!("epd: display while asleep; reset() and init() first");
                Ok(())
            }
            State::Initializing | State::Ready => Ok(()),
        }
    }

    /// Deep copy `image` in panel orientation, checking its size
    fn snapshot<P: PixelSource + ?Sized>(&self, image: &P) -> DisplayResult<I, Frame> {
        let frame = match self.config.rotation {
            Rotation::Rotate0 => {
                framebuffer::check_dimensions(image, WIDTH, HEIGHT)?;
                Frame::from_source(image)
            }
            Rotation::Rotate90 => {
                framebuffer::check_dimensions(image, HEIGHT, WIDTH)?;
                Frame::from_source(&Rotated::new(image))
            }
        };
        Ok(frame)
    }

    /// The panel no longer matches the cache after a failed transaction;
    /// drop it so the next smart update redraws everything.
    fn forget_on_interface_error<T>(&mut self, result: DisplayResult<I, T>) -> DisplayResult<I, T> {
        if let Err(Error::Interface(e)) = &result {
            if self.last_frame.take().is_some() {
                warn!("epd: interface error ({e:?}), cached frame dropped");
            }
        }
        result
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.interface
            .busy_wait(delay, self.config.busy_wait)
            .map_err(Error::Interface)
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}
