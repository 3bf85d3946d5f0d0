use crate::input::InputLine;
use crate::ranged::RangedValue;

/// A two-phase rotary encoder.
///
/// The encoder produces quadrature signals on two lines; the phase shift
/// between them gives the direction of rotation. This decoder counts one
/// step per falling edge of phase A only — half the full quadrature
/// resolution, which is plenty for a tuning knob and keeps the sampling
/// loop trivial.
pub struct RotaryEncoder {
    line_a: Box<dyn InputLine>,
    line_b: Box<dyn InputLine>,
    last_a: bool,
}

impl RotaryEncoder {
    pub fn new(line_a: Box<dyn InputLine>, line_b: Box<dyn InputLine>) -> Self {
        Self {
            line_a,
            line_b,
            last_a: false,
        }
    }

    /// Sample both phases and return the step since the last call.
    ///
    /// `+1` for a falling edge of A with B high, `-1` with B low, `0`
    /// when A did not fall.
    pub fn read(&mut self) -> i64 {
        let a = self.line_a.is_high();
        let b = self.line_b.is_high();
        let step = if !a && self.last_a {
            if b { 1 } else { -1 }
        } else {
            0
        };
        self.last_a = a;
        step
    }

    /// Read a step, scale it by `multiplier`, and apply it to `target`.
    ///
    /// Returns the delta actually applied (0 when there was no step or
    /// the target is saturated).
    pub fn read_into(&mut self, target: &mut RangedValue, multiplier: i64) -> i64 {
        let delta = self.read() * multiplier;
        if delta != 0 { target.increment(delta) } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedLine;

    fn encoder(a: &[bool], b: &[bool]) -> RotaryEncoder {
        RotaryEncoder::new(
            Box::new(ScriptedLine::new(a)),
            Box::new(ScriptedLine::new(b)),
        )
    }

    #[test]
    fn test_falling_edge_b_high_steps_up() {
        let mut enc = encoder(&[true, false], &[true, true]);
        assert_eq!(enc.read(), 0); // rising edge
        assert_eq!(enc.read(), 1); // falling edge, B high
    }

    #[test]
    fn test_falling_edge_b_low_steps_down() {
        let mut enc = encoder(&[true, false], &[false, false]);
        assert_eq!(enc.read(), 0);
        assert_eq!(enc.read(), -1);
    }

    #[test]
    fn test_no_edge_no_step() {
        let mut enc = encoder(&[false, false, true, true], &[true, true, true, true]);
        assert_eq!(enc.read(), 0);
        assert_eq!(enc.read(), 0);
        assert_eq!(enc.read(), 0); // rising edge
        assert_eq!(enc.read(), 0); // steady high
    }

    #[test]
    fn test_read_into_applies_multiplier() {
        let mut enc = encoder(&[true, false], &[true, true]);
        let mut value = RangedValue::new(118_000, 118_000, 136_975);
        assert_eq!(enc.read_into(&mut value, 25), 0);
        assert_eq!(enc.read_into(&mut value, 25), 25);
        assert_eq!(value.value(), 118_025);
    }

    #[test]
    fn test_read_into_saturated_returns_zero() {
        let mut enc = encoder(&[true, false], &[true, true]);
        let mut value = RangedValue::new(136_975, 118_000, 136_975);
        enc.read();
        assert_eq!(enc.read_into(&mut value, 1000), 0);
        assert_eq!(value.value(), 136_975);
    }
}
