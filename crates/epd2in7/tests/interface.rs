//! Wire-level tests for `Interface` against embedded-hal mocks.
//!
//! Run with: cargo test -p epd2in7 --test interface

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use epd2in7::{
    BusyWait, Builder, DisplayInterface, Epd, Error, Frame, HEIGHT, Interface, InterfaceError,
    LUT_FAST, LUT_NORMAL, State, WIDTH, WaveformTable,
};

const GET_STATUS: u8 = 0x71;

/// Expected SPI and DC traffic, built up one command or data write at a time.
#[derive(Default)]
struct Wire {
    spi: Vec<SpiTransaction<u8>>,
    dc: Vec<PinTransaction>,
}

impl Wire {
    fn command(mut self, command: u8) -> Self {
        self.dc.push(PinTransaction::set(PinState::Low));
        self.write(&[command]);
        self
    }

    fn data(mut self, data: &[u8]) -> Self {
        self.dc.push(PinTransaction::set(PinState::High));
        self.write(data);
        self
    }

    fn write(&mut self, data: &[u8]) {
        self.spi.extend([
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(data.to_vec()),
            SpiTransaction::transaction_end(),
        ]);
    }
}

/// Traffic of `Epd::init` after the reset pulse, with BUSY idle on the first read
fn init_wire(wire: Wire) -> Wire {
    let mut wire = wire
        .command(0x01)
        .data(&[0x03, 0x00, 0x2B, 0x2B, 0x09])
        .command(0x06)
        .data(&[0x07, 0x07, 0x17]);
    for pair in [
        [0x60, 0xA5],
        [0x89, 0xA5],
        [0x90, 0x00],
        [0x93, 0x2A],
        [0xA0, 0xA5],
        [0xA1, 0x00],
        [0x73, 0x41],
    ] {
        wire = wire.command(0xF8).data(&pair);
    }
    wire = wire
        .command(0x16)
        .data(&[0x00])
        .command(0x04)
        .command(GET_STATUS)
        .command(0x00)
        .data(&[0xAF])
        .command(0x30)
        .data(&[0x3A])
        .command(0x82)
        .data(&[0x12]);
    waveform(wire, &LUT_NORMAL)
}

fn waveform(mut wire: Wire, table: &WaveformTable) -> Wire {
    for (register, data) in table.registers() {
        wire = wire.command(register).data(data);
    }
    wire
}

fn busy_pin(levels: &[PinState]) -> PinMock {
    let transactions: Vec<PinTransaction> = levels
        .iter()
        .map(|level| PinTransaction::get(*level))
        .collect();
    PinMock::new(&transactions)
}

fn idle_pin() -> PinMock {
    PinMock::new(&[])
}

#[test]
fn test_command_and_data_drive_dc() {
    let wire = Wire::default().command(0x12).data(&[0xDE, 0xAD]);
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut rst = idle_pin();
    let mut busy = idle_pin();

    let mut interface = Interface::new(spi.clone(), dc.clone(), rst.clone(), busy.clone());
    interface.send_command(0x12).unwrap();
    interface.send_data(&[0xDE, 0xAD]).unwrap();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

#[test]
fn test_reset_pulses_rst_low_then_high() {
    let mut spi = SpiMock::new(&[]);
    let mut dc = idle_pin();
    let mut rst = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    let mut busy = idle_pin();

    let mut interface = Interface::new(spi.clone(), dc.clone(), rst.clone(), busy.clone());
    interface.reset(&mut NoopDelay).unwrap();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

#[test]
fn test_busy_wait_returns_when_idle() {
    let wire = Wire::default().command(GET_STATUS);
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut rst = idle_pin();
    let mut busy = busy_pin(&[PinState::High]);

    let mut interface = Interface::new(spi.clone(), dc.clone(), rst.clone(), busy.clone());
    interface
        .busy_wait(&mut NoopDelay, BusyWait::default())
        .unwrap();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

#[test]
fn test_busy_wait_requests_status_between_polls() {
    // Low means busy
    let wire = Wire::default()
        .command(GET_STATUS)
        .command(GET_STATUS)
        .command(GET_STATUS);
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut rst = idle_pin();
    let mut busy = busy_pin(&[PinState::Low, PinState::Low, PinState::High]);

    let mut interface = Interface::new(spi.clone(), dc.clone(), rst.clone(), busy.clone());
    interface
        .busy_wait(&mut NoopDelay, BusyWait::default())
        .unwrap();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

#[test]
fn test_busy_wait_times_out() {
    // 0 ms, 50 ms and 100 ms reads are all busy; the third one gives up
    let wire = Wire::default()
        .command(GET_STATUS)
        .command(GET_STATUS)
        .command(GET_STATUS);
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut rst = idle_pin();
    let mut busy = busy_pin(&[PinState::Low, PinState::Low, PinState::Low]);

    let mut interface = Interface::new(spi.clone(), dc.clone(), rst.clone(), busy.clone());
    let wait = BusyWait {
        poll_interval_ms: 50,
        timeout_ms: Some(100),
    };
    let result = interface.busy_wait(&mut NoopDelay, wait);
    assert!(
        matches!(result, Err(InterfaceError::Timeout)),
        "busy_wait must time out when BUSY never goes high"
    );

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

#[test]
fn test_init_wire_sequence() {
    let wire = init_wire(Wire::default());
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut rst = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    let mut busy = busy_pin(&[PinState::High]);

    let interface = Interface::new(spi.clone(), dc.clone(), rst.clone(), busy.clone());
    let mut epd = Epd::new(interface, Builder::new().build().unwrap());
    epd.init(&mut NoopDelay).unwrap();
    assert_eq!(epd.state(), State::Ready);

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

#[test]
fn test_sleep_wire_sequence() {
    let wire = Wire::default().command(0x07).data(&[0xA5]);
    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut rst = idle_pin();
    let mut busy = idle_pin();

    let interface = Interface::new(spi.clone(), dc.clone(), rst.clone(), busy.clone());
    let mut epd = Epd::new(interface, Builder::new().build().unwrap());
    epd.sleep(&mut NoopDelay).unwrap();
    assert_eq!(epd.state(), State::Sleeping);

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

fn assert_error<E: core::error::Error>() {}

#[test]
fn test_driver_error_over_stock_interface_is_an_error() {
    assert_error::<Error<Interface<SpiMock<u8>, PinMock, PinMock, PinMock>>>();

    let error: Error<Interface<SpiMock<u8>, PinMock, PinMock, PinMock>> =
        Error::Interface(InterfaceError::Timeout);
    assert_eq!(format!("{error:?}"), "Interface(Timeout)");
    assert_eq!(format!("{error}"), "Interface error: Timeout");
}

#[test]
fn test_busy_timeout_during_refresh_drops_cached_frame() {
    let blank = Frame::new(WIDTH, HEIGHT);
    let mut inked = blank.clone();
    inked.set_pixel(0, 0, false);
    // Region x = 0, y = 0, h = 1, w = 8
    let header = [0x00, 0x00, 0x00, 0x00, 0x00, 0x08, 0x00, 0x01];

    let mut wire = init_wire(Wire::default());
    wire = waveform(wire, &LUT_NORMAL)
        .command(0x10)
        .data(&vec![0xFF; blank.as_bytes().len()])
        .command(0x13)
        .data(blank.as_bytes())
        .command(0x12)
        .command(GET_STATUS);
    wire = waveform(wire, &LUT_FAST)
        .command(0x14)
        .data(&header)
        .data(&[0xFF])
        .command(0x15)
        .data(&header)
        .data(&[0x7F])
        .command(0x16)
        .data(&header)
        .command(GET_STATUS);

    let mut spi = SpiMock::new(&wire.spi);
    let mut dc = PinMock::new(&wire.dc);
    let mut rst = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    // Idle for init and the full refresh, then stuck busy
    let mut busy = busy_pin(&[PinState::High, PinState::High, PinState::Low]);

    let config = Builder::new().busy_timeout_ms(Some(0)).build().unwrap();
    let interface = Interface::new(spi.clone(), dc.clone(), rst.clone(), busy.clone());
    let mut epd = Epd::new(interface, config);

    epd.display_frame(&blank, &mut NoopDelay).unwrap();
    assert_eq!(epd.last_frame(), Some(&blank));

    let result = epd.smart_update(&inked, &mut NoopDelay);
    assert!(
        matches!(result, Err(Error::Interface(InterfaceError::Timeout))),
        "unexpected result: {result:?}"
    );
    assert!(epd.last_frame().is_none());

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}
