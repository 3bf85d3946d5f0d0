//! The radio panel's two-unit 7-segment rendering surface.
//!
//! The LED driver chip itself lives outside this crate behind
//! [`DisplaySink`]; this module owns what to show, which mode each unit
//! is in, and the blank-and-restart dance around mode changes.

use crate::ranged::RangedValue;

/// Digits per display unit.
pub const DIGITS: usize = 6;

/// Blank digit in numeric (decoded) mode.
pub const BLANK_NUMERIC: u8 = 0x0F;
/// Blank digit in text (raw segment) mode.
pub const BLANK_TEXT: u8 = 0x00;

/// Raw segment patterns spelling "ACARS" (leading blank).
pub const ACARS_GLYPHS: [u8; DIGITS] = [0x00, 0x77, 0x4E, 0x77, 0x46, 0x5B];

/// One of the two physical display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayUnit {
    Left,
    Right,
}

impl DisplayUnit {
    fn index(self) -> usize {
        match self {
            DisplayUnit::Left => 0,
            DisplayUnit::Right => 1,
        }
    }
}

/// Rendering mode of a display unit.
///
/// Numeric decodes digit values 0-9 (0x0F blank); Text takes raw segment
/// masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Numeric,
    Text,
}

/// The driver-chip interface consumed by the core.
pub trait DisplaySink {
    /// Request a rendering mode for a unit.
    fn set_mode(&mut self, unit: DisplayUnit, mode: DisplayMode);

    /// Write a full digit pattern to a unit, leftmost digit first.
    fn write_digits(&mut self, unit: DisplayUnit, digits: &[u8; DIGITS]);

    /// Activate the given indicator lamps.
    fn write_indicators(&mut self, bits: u16);

    fn power_on(&mut self, unit: DisplayUnit);
    fn power_off(&mut self, unit: DisplayUnit);
}

/// The two displays plus the per-unit mode bookkeeping.
pub struct DisplayPanel {
    sink: Box<dyn DisplaySink>,
    modes: [DisplayMode; 2],
}

impl DisplayPanel {
    /// Driver chips come up in decoded (numeric) mode.
    pub fn new(sink: Box<dyn DisplaySink>) -> Self {
        Self {
            sink,
            modes: [DisplayMode::Numeric; 2],
        }
    }

    /// Set the given unit to print numbers.
    pub fn set_numeric(&mut self, unit: DisplayUnit) {
        self.set_mode(unit, DisplayMode::Numeric);
    }

    /// Set the given unit to print text.
    pub fn set_text(&mut self, unit: DisplayUnit) {
        self.set_mode(unit, DisplayMode::Text);
    }

    fn set_mode(&mut self, unit: DisplayUnit, mode: DisplayMode) {
        if self.modes[unit.index()] == mode {
            return;
        }
        // While the mode is switched the unit is shut down and blanked,
        // so the digits never show decoded garbage mid-transition.
        self.sink.power_off(unit);
        self.sink.set_mode(unit, mode);
        self.sink.write_digits(unit, &blank_pattern(mode));
        self.sink.power_on(unit);
        self.modes[unit.index()] = mode;
    }

    /// Print a frequency on the given unit.
    ///
    /// The value is x1000 magnitude: the last three digits are the
    /// fractional part. Nothing is printed unless the unit is in numeric
    /// mode.
    pub fn print_frequency(&mut self, freq: &RangedValue, unit: DisplayUnit) {
        if self.modes[unit.index()] == DisplayMode::Numeric {
            self.sink.write_digits(unit, &frequency_digits(freq.value()));
        }
    }

    /// Print the fixed "ACARS" glyphs on the given unit.
    ///
    /// Nothing is printed unless the unit is in text mode.
    pub fn print_acars(&mut self, unit: DisplayUnit) {
        if self.modes[unit.index()] == DisplayMode::Text {
            self.sink.write_digits(unit, &ACARS_GLYPHS);
        }
    }

    /// Activate the given indicator lamps.
    pub fn print_indicators(&mut self, bits: u16) {
        self.sink.write_indicators(bits);
    }

    pub fn power_on(&mut self) {
        self.sink.power_on(DisplayUnit::Left);
        self.sink.power_on(DisplayUnit::Right);
    }

    pub fn power_off(&mut self) {
        self.sink.power_off(DisplayUnit::Left);
        self.sink.power_off(DisplayUnit::Right);
    }
}

/// Digit pattern for a x1000 frequency: three integer digits with leading
/// zeros blanked, then three fractional digits zero-padded.
fn frequency_digits(value: i64) -> [u8; DIGITS] {
    let int_part = value / 1_000;
    let dec_part = value % 1_000;

    let mut digits = [
        ((int_part / 100) % 10) as u8,
        ((int_part / 10) % 10) as u8,
        (int_part % 10) as u8,
        ((dec_part / 100) % 10) as u8,
        ((dec_part / 10) % 10) as u8,
        (dec_part % 10) as u8,
    ];
    if digits[0] == 0 {
        digits[0] = BLANK_NUMERIC;
        if digits[1] == 0 {
            digits[1] = BLANK_NUMERIC;
        }
    }
    digits
}

fn blank_pattern(mode: DisplayMode) -> [u8; DIGITS] {
    match mode {
        DisplayMode::Numeric => [BLANK_NUMERIC; DIGITS],
        DisplayMode::Text => [BLANK_TEXT; DIGITS],
    }
}
