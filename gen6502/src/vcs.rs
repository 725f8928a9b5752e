//! Atari 2600 (VCS) hardware registers and frame-timing routines
//!
//! A frame is 3 lines of vertical sync, 37 lines of vertical blank, 192
//! visible lines and 30 lines of overscan. The routines here emit the
//! boilerplate around the visible part.

use crate::error::{GenError, ensure_equal, ensure_in_range};
use crate::program::Program;

// TIA write registers, all in the zero page.
pub const VSYNC: u8 = 0x00;
pub const VBLANK: u8 = 0x01;
pub const WSYNC: u8 = 0x02;
pub const RSYNC: u8 = 0x03;
pub const NUSIZ0: u8 = 0x04;
pub const NUSIZ1: u8 = 0x05;
pub const COLUP0: u8 = 0x06;
pub const COLUP1: u8 = 0x07;
pub const COLUPF: u8 = 0x08;
pub const COLUBK: u8 = 0x09;
pub const CTRLPF: u8 = 0x0A;
pub const REFP0: u8 = 0x0B;
pub const REFP1: u8 = 0x0C;
pub const PF0: u8 = 0x0D;
pub const PF1: u8 = 0x0E;
pub const PF2: u8 = 0x0F;
pub const RESP0: u8 = 0x10;
pub const RESP1: u8 = 0x11;
pub const RESM0: u8 = 0x12;
pub const RESM1: u8 = 0x13;
pub const RESBL: u8 = 0x14;
pub const AUDC0: u8 = 0x15;
pub const AUDC1: u8 = 0x16;
pub const AUDF0: u8 = 0x17;
pub const AUDF1: u8 = 0x18;
pub const AUDV0: u8 = 0x19;
pub const AUDV1: u8 = 0x1A;
pub const GRP0: u8 = 0x1B;
pub const GRP1: u8 = 0x1C;
pub const ENAM0: u8 = 0x1D;
pub const ENAM1: u8 = 0x1E;
pub const ENABL: u8 = 0x1F;
pub const HMP0: u8 = 0x20;
pub const HMP1: u8 = 0x21;
pub const HMM0: u8 = 0x22;
pub const HMM1: u8 = 0x23;
pub const HMBL: u8 = 0x24;
pub const VDELP0: u8 = 0x25;
pub const VDELP1: u8 = 0x26;
pub const VDELBL: u8 = 0x27;
pub const RESMP0: u8 = 0x28;
pub const RESMP1: u8 = 0x29;
pub const HMOVE: u8 = 0x2A;
pub const HMCLR: u8 = 0x2B;
pub const CXCLR: u8 = 0x2C;

// PIA (RIOT) registers. These need absolute addressing.
pub const SWCHA: u16 = 0x280;
pub const SWACNT: u16 = 0x281;
pub const SWCHB: u16 = 0x282;
pub const SWBCNT: u16 = 0x283;
pub const INTIM: u16 = 0x284;
pub const TIM1T: u16 = 0x294;
pub const TIM8T: u16 = 0x295;
pub const TIM64T: u16 = 0x296;
pub const T1024T: u16 = 0x297;

/// Parses an eight-digit binary literal such as `"00000010"`.
pub fn binary(digits: &str) -> Result<u8, GenError> {
    ensure_equal("binary literal width", 8, digits.len() as i64)?;
    u8::from_str_radix(digits, 2).map_err(|_| GenError::InvalidBinary(digits.to_string()))
}

/// NTSC colour byte: hue in the high nibble, luminance in bits 1..=3.
pub fn colour(hue: u8, luminance: u8) -> Result<u8, GenError> {
    ensure_in_range("colour hue", hue, 0, 15)?;
    ensure_in_range("colour luminance", luminance, 0, 7)?;
    Ok((hue << 4) | (luminance << 1))
}

pub const BLACK: u8 = 0x00;

/// Registers of one of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub reflect: u8,
    pub reset: u8,
    pub graphics: u8,
    pub horizontal_motion: u8,
    pub vertical_delay: u8,
}

impl Player {
    pub fn new(index: u8) -> Result<Self, GenError> {
        ensure_in_range("player index", index, 0, 1)?;
        Ok(Self {
            reflect: REFP0 + index,
            reset: RESP0 + index,
            graphics: GRP0 + index,
            horizontal_motion: HMP0 + index,
            vertical_delay: VDELP0 + index,
        })
    }
}

/// Registers of one of the two missiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Missile {
    pub reset: u8,
    pub enable: u8,
    pub horizontal_motion: u8,
    pub reset_to_player: u8,
}

impl Missile {
    pub fn new(index: u8) -> Result<Self, GenError> {
        ensure_in_range("missile index", index, 0, 1)?;
        Ok(Self {
            reset: RESM0 + index,
            enable: ENAM0 + index,
            horizontal_motion: HMM0 + index,
            reset_to_player: RESMP0 + index,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ball {
    pub reset: u8,
    pub enable: u8,
    pub horizontal_motion: u8,
    pub vertical_delay: u8,
}

pub const BALL: Ball = Ball {
    reset: RESBL,
    enable: ENABL,
    horizontal_motion: HMBL,
    vertical_delay: VDELBL,
};

/// Registers of one of the two sound channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Audio {
    pub control: u8,
    pub frequency: u8,
    pub volume: u8,
}

impl Audio {
    pub fn new(index: u8) -> Result<Self, GenError> {
        ensure_in_range("audio channel", index, 0, 1)?;
        Ok(Self {
            control: AUDC0 + index,
            frequency: AUDF0 + index,
            volume: AUDV0 + index,
        })
    }
}

impl Program {
    /// Halts the CPU until the start of the next scan line.
    pub fn wsync(&mut self) -> Result<(), GenError> {
        self.sta_zero_page(WSYNC)?;
        Ok(())
    }

    /// Applies the horizontal motion registers. Must directly follow a WSYNC.
    pub fn hmove(&mut self) -> Result<(), GenError> {
        self.sta_zero_page(HMOVE)?;
        Ok(())
    }

    /// Interrupts off, decimal mode off, stack pointer to $FF.
    pub fn clean_start(&mut self) -> Result<(), GenError> {
        self.sei()?;
        self.cld()?;
        self.ldx_immediate(0xFF)?;
        self.txs()?;
        Ok(())
    }

    /// Three lines of vertical sync, then arms the timer for the vertical blank.
    pub fn start_of_vertical_blank(&mut self) -> Result<(), GenError> {
        self.lda_immediate(i32::from(binary("00000010")?))?;
        self.sta_zero_page(VSYNC)?;
        self.wsync()?;
        self.wsync()?;
        self.wsync()?;
        self.lda_immediate(43)?;
        self.sta_absolute(TIM64T)?;
        self.lda_immediate(i32::from(binary("00000000")?))?;
        self.sta_zero_page(VSYNC)?;
        Ok(())
    }

    /// Spins on the timer until the vertical blank is over, then ends it.
    /// `suffix` keeps the loop label unique per call site.
    pub fn wait_for_end_of_vertical_blank(&mut self, suffix: &str) -> Result<(), GenError> {
        let wait = format!("WaitForVblankEnd-{}", suffix);
        self.label(wait.as_str());
        self.lda_absolute(INTIM)?;
        self.bne(wait)?;

        self.wsync()?;
        self.sta_zero_page(VBLANK)?;
        Ok(())
    }

    /// Starts the vertical blank and waits out 30 lines of overscan.
    pub fn overscan(&mut self, suffix: &str) -> Result<(), GenError> {
        self.lda_immediate(2)?;
        self.wsync()?;
        self.sta_zero_page(VBLANK)?;

        self.ldx_immediate(30)?;
        let wait = format!("overScanWaitLoop-{}", suffix);
        self.label(wait.as_str());
        self.wsync()?;
        self.dex()?;
        self.bne(wait)?;
        Ok(())
    }
}
