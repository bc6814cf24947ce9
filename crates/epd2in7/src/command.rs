// 2.7" e-Paper (IL91874-class controller) command definitions

// Power and panel setup
pub const PANEL_SETTING: u8 = 0x00; // Panel setting
pub const POWER_SETTING: u8 = 0x01; // Power setting
pub const POWER_ON: u8 = 0x04; // Power on
pub const BOOSTER_SOFT_START: u8 = 0x06; // Booster soft-start control
pub const DEEP_SLEEP: u8 = 0x07; // Deep sleep
pub const PLL_CONTROL: u8 = 0x30; // PLL (frame rate) control
pub const VCM_DC_SETTING: u8 = 0x82; // VCOM DC setting
pub const POWER_OPTIMIZATION: u8 = 0xF8; // Undocumented vendor register

// Full frame transmission
pub const DATA_START_TRANSMISSION_1: u8 = 0x10; // Old data / stage 1
pub const DISPLAY_REFRESH: u8 = 0x12; // Full display refresh
pub const DATA_START_TRANSMISSION_2: u8 = 0x13; // New data / stage 2

// Partial frame transmission
pub const PARTIAL_DATA_START_TRANSMISSION_1: u8 = 0x14; // Partial old data
pub const PARTIAL_DATA_START_TRANSMISSION_2: u8 = 0x15; // Partial new data
pub const PARTIAL_DISPLAY_REFRESH: u8 = 0x16; // Partial display refresh

// Waveform LUT registers
pub const LUT_FOR_VCOM: u8 = 0x20; // VCOM LUT
pub const LUT_WHITE_TO_WHITE: u8 = 0x21; // White to white LUT
pub const LUT_BLACK_TO_WHITE: u8 = 0x22; // Black to white LUT
pub const LUT_WHITE_TO_BLACK: u8 = 0x23; // White to black LUT
pub const LUT_BLACK_TO_BLACK: u8 = 0x24; // Black to black LUT

// Status
pub const GET_STATUS: u8 = 0x71; // Get status (also nudges BUSY)

/// Check code required as the deep sleep parameter
pub const DEEP_SLEEP_CHECK_CODE: u8 = 0xA5;
