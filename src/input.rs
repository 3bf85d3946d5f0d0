//! Interfaces to the panel's scanned hardware.
//!
//! The electrical side (GPIO reads, shift registers, keypad matrix scan)
//! lives outside this crate; these traits are the seams it plugs into.

/// A single digital input line, sampled on demand.
pub trait InputLine {
    /// Current level of the line. `true` is high.
    fn is_high(&mut self) -> bool;
}

/// A keypad scanner delivering decoded key codes.
pub trait KeyScanner {
    /// The next pressed key code, or `None` when no key is pending.
    fn poll_key(&mut self) -> Option<u8>;
}

/// A parallel input bus delivering one packed byte of switch state.
pub trait InputBus {
    /// Whether the bus has fresh data to read.
    fn data_ready(&mut self) -> bool;

    /// Read the current switch byte.
    fn read_byte(&mut self) -> u8;
}
