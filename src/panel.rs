//! The radio management panel controller.
//!
//! Owns the five tuning channels, the selection state machine, the HF
//! submode, and the control cycle that services the encoders, the keypad,
//! and inbound host events.

use log::debug;

use crate::bcd;
use crate::channel::{PairedChannel, SingleChannel, TuningChannel};
use crate::command::OffsetWidth;
use crate::display::{DisplayPanel, DisplaySink};
use crate::encoder::RotaryEncoder;
use crate::error::Result;
use crate::event::Event;
use crate::input::{InputLine, KeyScanner};
use crate::protocol::SerialProtocol;

/// Key codes delivered by the keypad scanner.
pub mod key {
    pub const VHF1: u8 = 0x00;
    pub const VHF2: u8 = 0x01;
    pub const VHF3: u8 = 0x02;
    pub const SWAP: u8 = 0x03;
    pub const HF1: u8 = 0x04;
    pub const SEL: u8 = 0x05;
    pub const HF2: u8 = 0x06;
    pub const AM: u8 = 0x07;
    pub const NAV: u8 = 0x08;
    pub const VOR: u8 = 0x09;
    pub const ILS: u8 = 0x0A;
    pub const MLS: u8 = 0x0B;
    pub const ADF: u8 = 0x0C;
    pub const BFO: u8 = 0x0D;
}

/// Indicator lamp bits, as wired on the panel.
pub mod indicator {
    pub const NAV: u16 = 0x0040;
    pub const VOR: u16 = 0x0020;
    pub const ILS: u16 = 0x0001;
    pub const MLS: u16 = 0x0004;
    pub const ADF: u16 = 0x0008;
    pub const BFO: u16 = 0x0010;
    pub const HF1: u16 = 0x0400;
    pub const HF2: u16 = 0x0800;
    pub const AM: u16 = 0x1000;
    pub const VHF1: u16 = 0x4000;
    pub const VHF2: u16 = 0x2000;
    pub const VHF3: u16 = 0x0100;
}

/// Sim offsets holding the BCD COM frequencies.
pub const COM1_ACTIVE_OFFSET: u16 = 0x034E;
pub const COM1_STANDBY_OFFSET: u16 = 0x311A;
pub const COM2_ACTIVE_OFFSET: u16 = 0x3118;
pub const COM2_STANDBY_OFFSET: u16 = 0x311C;

/// HF transmission submode, toggled by the AM key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HfMode {
    Ssb,
    Am,
}

/// The panel's channel slots, in rack order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelId {
    Vhf1,
    Vhf2,
    Vhf3,
    Hf1,
    Hf2,
}

const NUM_CHANNELS: usize = 5;

impl ChannelId {
    fn index(self) -> usize {
        self as usize
    }

    fn from_key(code: u8) -> Option<ChannelId> {
        match code {
            key::VHF1 => Some(ChannelId::Vhf1),
            key::VHF2 => Some(ChannelId::Vhf2),
            key::VHF3 => Some(ChannelId::Vhf3),
            key::HF1 => Some(ChannelId::Hf1),
            key::HF2 => Some(ChannelId::Hf2),
            _ => None,
        }
    }

    fn is_hf(self) -> bool {
        matches!(self, ChannelId::Hf1 | ChannelId::Hf2)
    }
}

/// The radio management panel.
///
/// Exactly one channel is selected at all times once `setup` has run.
/// Everything is serviced from `cycle`, one pass per control loop
/// iteration; nothing here blocks.
pub struct RadioPanel {
    displays: DisplayPanel,
    channels: [TuningChannel; NUM_CHANNELS],
    selected: ChannelId,
    hf_mode: HfMode,
    inner: RotaryEncoder,
    outer: RotaryEncoder,
    keypad: Box<dyn KeyScanner>,
    power: Box<dyn InputLine>,
    powered: bool,
}

impl RadioPanel {
    pub fn new(
        sink: Box<dyn DisplaySink>,
        inner: RotaryEncoder,
        outer: RotaryEncoder,
        keypad: Box<dyn KeyScanner>,
        power: Box<dyn InputLine>,
    ) -> Self {
        let channels = [
            TuningChannel::Paired(
                PairedChannel::new(122_800, 118_000, 136_975, indicator::VHF1)
                    .with_offsets(COM1_ACTIVE_OFFSET, COM1_STANDBY_OFFSET),
            ),
            TuningChannel::Paired(
                PairedChannel::new(122_800, 118_000, 136_975, indicator::VHF2)
                    .with_offsets(COM2_ACTIVE_OFFSET, COM2_STANDBY_OFFSET),
            ),
            TuningChannel::Single(SingleChannel::new(
                122_800,
                118_000,
                136_975,
                indicator::VHF3,
            )),
            TuningChannel::Paired(PairedChannel::new(10_000, 2_000, 29_999, indicator::HF1)),
            TuningChannel::Paired(PairedChannel::new(10_000, 2_000, 29_999, indicator::HF2)),
        ];
        Self {
            displays: DisplayPanel::new(sink),
            channels,
            selected: ChannelId::Vhf1,
            hf_mode: HfMode::Ssb,
            inner,
            outer,
            keypad,
            power,
            powered: false,
        }
    }

    /// One-time init: select COM1 and subscribe to the sim's COM offsets
    /// so host-side retunes reach the panel.
    pub fn setup(&mut self, proto: &mut SerialProtocol) -> Result<()> {
        self.select_channel(ChannelId::Vhf1);
        for channel in &self.channels {
            if let TuningChannel::Paired(paired) = channel {
                if let Some(address) = paired.active_offset() {
                    proto.observe_offset(address, OffsetWidth::U16)?;
                }
                if let Some(address) = paired.standby_offset() {
                    proto.observe_offset(address, OffsetWidth::U16)?;
                }
            }
        }
        Ok(())
    }

    /// Run one control cycle: power switch, encoders, keypad, host events.
    pub fn cycle(&mut self, proto: &mut SerialProtocol) -> Result<()> {
        let on = self.power.is_high();
        if on != self.powered {
            self.powered = on;
            if on {
                self.displays.power_on();
            } else {
                self.displays.power_off();
            }
        }
        if !self.powered {
            return Ok(());
        }

        let inner_steps = self.inner.read();
        let outer_steps = self.outer.read();
        let idx = self.selected.index();
        let inner_applied = self.channels[idx].on_inner_increment(inner_steps, proto)?;
        let outer_applied = self.channels[idx].on_outer_increment(outer_steps, proto)?;
        if inner_applied != 0 || outer_applied != 0 {
            self.channels[idx].render(&mut self.displays);
        }

        if let Some(code) = self.keypad.poll_key() {
            self.handle_key(code, proto)?;
        }

        if let Some(&Event::OffsetUpdate { address, value }) = proto.poll_event()? {
            self.apply_offset_update(address, value);
        }

        Ok(())
    }

    /// Dispatch one key code. Unassigned codes are ignored.
    pub fn handle_key(&mut self, code: u8, proto: &mut SerialProtocol) -> Result<()> {
        match code {
            key::SWAP => {
                self.channels[self.selected.index()].swap(&mut self.displays, proto)?;
                self.refresh_indicators();
            }
            key::AM => self.toggle_hf_mode(),
            _ => {
                if let Some(id) = ChannelId::from_key(code) {
                    self.select_channel(id);
                }
            }
        }
        Ok(())
    }

    /// Apply a host-side offset change to whichever channel side owns the
    /// address, bypassing the tuning path, and re-render that side.
    pub fn apply_offset_update(&mut self, address: u16, value: i64) {
        let freq = bcd::freq_from_bcd(value as u16);
        for channel in &mut self.channels {
            if let TuningChannel::Paired(paired) = channel {
                if paired.active_offset() == Some(address) {
                    debug!("host retuned active {address:#06X} to {freq}");
                    paired.set_active(freq, &mut self.displays);
                } else if paired.standby_offset() == Some(address) {
                    debug!("host retuned standby {address:#06X} to {freq}");
                    paired.set_standby(freq, &mut self.displays);
                }
            }
        }
    }

    fn select_channel(&mut self, id: ChannelId) {
        self.selected = id;
        self.channels[id.index()].on_selected(&mut self.displays);
        self.refresh_indicators();
    }

    fn toggle_hf_mode(&mut self) {
        if self.selected.is_hf() {
            self.hf_mode = match self.hf_mode {
                HfMode::Ssb => HfMode::Am,
                HfMode::Am => HfMode::Ssb,
            };
            self.refresh_indicators();
        }
    }

    fn refresh_indicators(&mut self) {
        let mut bits = self.channels[self.selected.index()].indicator();
        if self.selected.is_hf() && self.hf_mode == HfMode::Am {
            bits |= indicator::AM;
        }
        self.displays.print_indicators(bits);
    }

    pub fn selected(&self) -> ChannelId {
        self.selected
    }

    pub fn hf_mode(&self) -> HfMode {
        self.hf_mode
    }

    pub fn channel(&self, id: ChannelId) -> &TuningChannel {
        &self.channels[id.index()]
    }
}
