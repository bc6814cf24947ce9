//! Waveform look-up tables
//!
//! The controller drives every pixel transition from five register tables:
//! one for VCOM and one per (old, new) color pair. The byte values are vendor
//! constants and must reach the panel unchanged.

use crate::command::{
    LUT_BLACK_TO_BLACK, LUT_BLACK_TO_WHITE, LUT_FOR_VCOM, LUT_WHITE_TO_BLACK, LUT_WHITE_TO_WHITE,
};

/// Length of the VCOM table in bytes
pub const VCOM_LUT_LEN: usize = 44;
/// Length of each pixel transition table in bytes
pub const TRANSITION_LUT_LEN: usize = 42;

/// Which waveform set to load
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Full multi-phase flush. Best contrast, no ghosting.
    #[default]
    Normal,
    /// Single-phase quick update. Lower contrast, burns in if overused.
    Fast,
}

impl Waveform {
    /// `true` selects [`Waveform::Fast`]
    pub fn from_fast(fast: bool) -> Self {
        if fast { Waveform::Fast } else { Waveform::Normal }
    }

    /// The table set for this waveform
    pub fn table(self) -> &'static WaveformTable {
        match self {
            Waveform::Normal => &LUT_NORMAL,
            Waveform::Fast => &LUT_FAST,
        }
    }
}

/// A complete set of waveform tables
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveformTable {
    /// VCOM
    pub vcom: [u8; VCOM_LUT_LEN],
    /// White to white
    pub ww: [u8; TRANSITION_LUT_LEN],
    /// Black to white
    pub bw: [u8; TRANSITION_LUT_LEN],
    /// White to black
    pub wb: [u8; TRANSITION_LUT_LEN],
    /// Black to black
    pub bb: [u8; TRANSITION_LUT_LEN],
}

impl WaveformTable {
    /// Register/table pairs in upload order
    pub fn registers(&self) -> [(u8, &[u8]); 5] {
        [
            (LUT_FOR_VCOM, &self.vcom[..]),
            (LUT_WHITE_TO_WHITE, &self.ww[..]),
            (LUT_BLACK_TO_WHITE, &self.bw[..]),
            (LUT_WHITE_TO_BLACK, &self.wb[..]),
            (LUT_BLACK_TO_BLACK, &self.bb[..]),
        ]
    }
}

/// Pads a short phase list out to a fixed table length with zeros
const fn pad<const N: usize>(head: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < head.len() {
        out[i] = head[i];
        i += 1;
    }
    out
}

/// Vendor default waveforms
pub const LUT_NORMAL: WaveformTable = WaveformTable {
    vcom: [
        0x00, 0x00, //
        0x00, 0x1A, 0x1A, 0x00, 0x00, 0x01, //
        0x00, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x00, 0x0E, 0x01, 0x0E, 0x01, 0x10, //
        0x00, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x00, 0x04, 0x10, 0x00, 0x00, 0x05, //
        0x00, 0x03, 0x0E, 0x00, 0x00, 0x0A, //
        0x00, 0x23, 0x00, 0x00, 0x00, 0x01, //
    ],
    ww: [
        0x90, 0x1A, 0x1A, 0x00, 0x00, 0x01, //
        0x40, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x84, 0x0E, 0x01, 0x0E, 0x01, 0x10, //
        0x80, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x00, 0x04, 0x10, 0x00, 0x00, 0x05, //
        0x00, 0x03, 0x0E, 0x00, 0x00, 0x0A, //
        0x00, 0x23, 0x00, 0x00, 0x00, 0x01, //
    ],
    bw: [
        0xA0, 0x1A, 0x1A, 0x00, 0x00, 0x01, //
        0x00, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x84, 0x0E, 0x01, 0x0E, 0x01, 0x10, //
        0x90, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0xB0, 0x04, 0x10, 0x00, 0x00, 0x05, //
        0xB0, 0x03, 0x0E, 0x00, 0x00, 0x0A, //
        0xC0, 0x23, 0x00, 0x00, 0x00, 0x01, //
    ],
    wb: [
        0x90, 0x1A, 0x1A, 0x00, 0x00, 0x01, //
        0x20, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x84, 0x0E, 0x01, 0x0E, 0x01, 0x10, //
        0x10, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x00, 0x04, 0x10, 0x00, 0x00, 0x05, //
        0x00, 0x03, 0x0E, 0x00, 0x00, 0x0A, //
        0x00, 0x23, 0x00, 0x00, 0x00, 0x01, //
    ],
    bb: [
        0x90, 0x1A, 0x1A, 0x00, 0x00, 0x01, //
        0x40, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x84, 0x0E, 0x01, 0x0E, 0x01, 0x10, //
        0x80, 0x0A, 0x0A, 0x00, 0x00, 0x08, //
        0x00, 0x04, 0x10, 0x00, 0x00, 0x05, //
        0x00, 0x03, 0x0E, 0x00, 0x00, 0x0A, //
        0x00, 0x23, 0x00, 0x00, 0x00, 0x01, //
    ],
};

/// Quick update waveforms: one short drive phase per transition
pub const LUT_FAST: WaveformTable = WaveformTable {
    vcom: pad(&[0x00, 0x00, 0x00, 0x0E, 0x00, 0x00, 0x00, 0x01]),
    ww: pad(&[0xA0, 0x0E, 0x00, 0x00, 0x00, 0x01]),
    bw: pad(&[0xA0, 0x0E, 0x00, 0x00, 0x00, 0x01]),
    wb: pad(&[0x50, 0x0E, 0x00, 0x00, 0x00, 0x01]),
    bb: pad(&[0x50, 0x0E, 0x00, 0x00, 0x00, 0x01]),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_upload_in_vcom_ww_bw_wb_bb_order() {
        let regs: [u8; 5] = LUT_NORMAL.registers().map(|(reg, _)| reg);
        assert_eq!(regs, [0x20, 0x21, 0x22, 0x23, 0x24]);
    }

    #[test]
    fn fast_tables_are_padded_to_full_length() {
        for (reg, table) in LUT_FAST.registers() {
            let expected = if reg == LUT_FOR_VCOM {
                VCOM_LUT_LEN
            } else {
                TRANSITION_LUT_LEN
            };
            assert_eq!(table.len(), expected);
        }
        assert_eq!(LUT_FAST.wb[0], 0x50);
        assert!(LUT_FAST.wb[6..].iter().all(|b| *b == 0));
    }

    #[test]
    fn waveform_selects_table() {
        assert_eq!(Waveform::from_fast(false), Waveform::Normal);
        assert_eq!(Waveform::from_fast(true).table(), &LUT_FAST);
        assert_eq!(Waveform::Normal.table(), &LUT_NORMAL);
    }
}
