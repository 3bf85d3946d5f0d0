//! The tunable frequency channels behind the radio panel.
//!
//! Two kinds exist: [`PairedChannel`] keeps an active/standby frequency
//! pair with a swap key (the COM and HF radios), and [`SingleChannel`]
//! keeps one frequency whose tuning is gated by an ACARS port selector.
//! [`TuningChannel`] is the closed set of both, dispatched by match.

use crate::bcd;
use crate::command::OffsetWidth;
use crate::display::{DisplayPanel, DisplayUnit};
use crate::error::Result;
use crate::protocol::SerialProtocol;
use crate::ranged::RangedValue;

/// kHz per inner (fine) encoder step.
pub const INNER_STEP: i64 = 25;
/// kHz per outer (coarse) encoder step.
pub const OUTER_STEP: i64 = 1_000;

/// A channel with separate active and standby frequencies.
///
/// Only the standby side is tunable; the active side changes through
/// `swap` or an inbound offset event from the host. Channels tied to sim
/// offsets report every standby change and both sides of a swap as BCD
/// `WRITE_OFFSET` traffic.
pub struct PairedChannel {
    active: RangedValue,
    standby: RangedValue,
    indicator: u16,
    active_offset: Option<u16>,
    standby_offset: Option<u16>,
}

impl PairedChannel {
    pub fn new(value: i64, min: i64, max: i64, indicator: u16) -> Self {
        Self {
            active: RangedValue::new(value, min, max),
            standby: RangedValue::new(value, min, max),
            indicator,
            active_offset: None,
            standby_offset: None,
        }
    }

    /// Tie this channel to a pair of sim offsets.
    pub fn with_offsets(mut self, active: u16, standby: u16) -> Self {
        self.active_offset = Some(active);
        self.standby_offset = Some(standby);
        self
    }

    pub fn active(&self) -> i64 {
        self.active.value()
    }

    pub fn standby(&self) -> i64 {
        self.standby.value()
    }

    pub fn active_offset(&self) -> Option<u16> {
        self.active_offset
    }

    pub fn standby_offset(&self) -> Option<u16> {
        self.standby_offset
    }

    /// Overwrite the active frequency from the host and re-render it.
    pub fn set_active(&mut self, value: i64, displays: &mut DisplayPanel) {
        self.active.set(value);
        displays.print_frequency(&self.active, DisplayUnit::Left);
    }

    /// Overwrite the standby frequency from the host and re-render it.
    pub fn set_standby(&mut self, value: i64, displays: &mut DisplayPanel) {
        self.standby.set(value);
        displays.print_frequency(&self.standby, DisplayUnit::Right);
    }

    fn render(&self, displays: &mut DisplayPanel) {
        displays.print_frequency(&self.active, DisplayUnit::Left);
        displays.print_frequency(&self.standby, DisplayUnit::Right);
    }

    fn standby_increment(
        &mut self,
        steps: i64,
        multiplier: i64,
        proto: &mut SerialProtocol,
    ) -> Result<i64> {
        let applied = self.standby.increment(steps * multiplier);
        if applied != 0 && let Some(offset) = self.standby_offset {
            self.write_bcd(offset, self.standby.value(), proto)?;
        }
        Ok(applied)
    }

    fn swap(&mut self, displays: &mut DisplayPanel, proto: &mut SerialProtocol) -> Result<()> {
        self.active.swap(&mut self.standby);
        self.render(displays);
        // Standby first, active second; the host treats the active write
        // as the tuning commit.
        if let Some(offset) = self.standby_offset {
            self.write_bcd(offset, self.standby.value(), proto)?;
        }
        if let Some(offset) = self.active_offset {
            self.write_bcd(offset, self.active.value(), proto)?;
        }
        Ok(())
    }

    fn write_bcd(&self, offset: u16, freq: i64, proto: &mut SerialProtocol) -> Result<()> {
        proto.write_offset(offset, OffsetWidth::U16, bcd::freq_to_bcd(freq) as i64)
    }
}

/// Which port the ACARS channel is patched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSelect {
    Ground,
    Open,
}

/// The ACARS channel: one frequency plus a port selector.
///
/// Tuning only responds while the port selector is on Ground. The swap
/// key toggles the selector, which also flips which display unit carries
/// the frequency and which shows the ACARS legend.
pub struct SingleChannel {
    freq: RangedValue,
    indicator: u16,
    port: PortSelect,
}

impl SingleChannel {
    pub fn new(value: i64, min: i64, max: i64, indicator: u16) -> Self {
        Self {
            freq: RangedValue::new(value, min, max),
            indicator,
            port: PortSelect::Ground,
        }
    }

    pub fn value(&self) -> i64 {
        self.freq.value()
    }

    pub fn port(&self) -> PortSelect {
        self.port
    }

    fn increment(&mut self, steps: i64, multiplier: i64) -> i64 {
        match self.port {
            PortSelect::Ground => self.freq.increment(steps * multiplier),
            PortSelect::Open => 0,
        }
    }

    fn freq_unit(&self) -> DisplayUnit {
        match self.port {
            PortSelect::Ground => DisplayUnit::Right,
            PortSelect::Open => DisplayUnit::Left,
        }
    }

    fn acars_unit(&self) -> DisplayUnit {
        match self.port {
            PortSelect::Ground => DisplayUnit::Left,
            PortSelect::Open => DisplayUnit::Right,
        }
    }

    fn configure_displays(&self, displays: &mut DisplayPanel) {
        displays.set_numeric(self.freq_unit());
        displays.set_text(self.acars_unit());
    }

    fn render(&self, displays: &mut DisplayPanel) {
        displays.print_frequency(&self.freq, self.freq_unit());
        displays.print_acars(self.acars_unit());
    }

    fn swap(&mut self, displays: &mut DisplayPanel) {
        self.port = match self.port {
            PortSelect::Ground => PortSelect::Open,
            PortSelect::Open => PortSelect::Ground,
        };
        self.configure_displays(displays);
        self.render(displays);
    }
}

/// A slot on the radio panel's channel rack.
pub enum TuningChannel {
    Paired(PairedChannel),
    Single(SingleChannel),
}

impl TuningChannel {
    /// Indicator lamp bits lit while this channel is selected.
    pub fn indicator(&self) -> u16 {
        match self {
            TuningChannel::Paired(ch) => ch.indicator,
            TuningChannel::Single(ch) => ch.indicator,
        }
    }

    /// Take over the shared displays after this channel is selected.
    pub fn on_selected(&mut self, displays: &mut DisplayPanel) {
        match self {
            TuningChannel::Paired(ch) => {
                displays.set_numeric(DisplayUnit::Left);
                displays.set_numeric(DisplayUnit::Right);
                ch.render(displays);
            }
            TuningChannel::Single(ch) => {
                ch.configure_displays(displays);
                ch.render(displays);
            }
        }
    }

    /// Apply inner (fine) encoder steps. Returns the applied kHz delta.
    pub fn on_inner_increment(
        &mut self,
        steps: i64,
        proto: &mut SerialProtocol,
    ) -> Result<i64> {
        match self {
            TuningChannel::Paired(ch) => ch.standby_increment(steps, INNER_STEP, proto),
            TuningChannel::Single(ch) => Ok(ch.increment(steps, INNER_STEP)),
        }
    }

    /// Apply outer (coarse) encoder steps. Returns the applied kHz delta.
    pub fn on_outer_increment(
        &mut self,
        steps: i64,
        proto: &mut SerialProtocol,
    ) -> Result<i64> {
        match self {
            TuningChannel::Paired(ch) => ch.standby_increment(steps, OUTER_STEP, proto),
            TuningChannel::Single(ch) => Ok(ch.increment(steps, OUTER_STEP)),
        }
    }

    /// Redraw this channel on the displays.
    pub fn render(&self, displays: &mut DisplayPanel) {
        match self {
            TuningChannel::Paired(ch) => ch.render(displays),
            TuningChannel::Single(ch) => ch.render(displays),
        }
    }

    /// The swap key: exchange active/standby, or toggle the ACARS port.
    pub fn swap(&mut self, displays: &mut DisplayPanel, proto: &mut SerialProtocol) -> Result<()> {
        match self {
            TuningChannel::Paired(ch) => ch.swap(displays, proto),
            TuningChannel::Single(ch) => {
                ch.swap(displays);
                Ok(())
            }
        }
    }

    pub fn as_paired_mut(&mut self) -> Option<&mut PairedChannel> {
        match self {
            TuningChannel::Paired(ch) => Some(ch),
            TuningChannel::Single(_) => None,
        }
    }
}
