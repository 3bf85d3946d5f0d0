//! BCD packing of COM frequencies for the simulator's radio offsets.
//!
//! The sim stores a COM frequency as a 16-bit word of four BCD nibbles
//! covering the tens through ten-thousands digits of the kHz value; the
//! leading `1` of the MHz part is implicit. 122800 kHz therefore packs to
//! `0x2280`.

/// Pack a frequency in kHz into the 4-nibble BCD offset word.
///
/// The units digit is dropped: only the tens, hundreds, thousands and
/// ten-thousands digits are kept, lowest digit in the lowest nibble.
pub fn freq_to_bcd(freq: i64) -> u16 {
    let mut word = 0u16;
    word |= (((freq / 10) % 10) as u16) << 0;
    word |= (((freq / 100) % 10) as u16) << 4;
    word |= (((freq / 1_000) % 10) as u16) << 8;
    word |= (((freq / 10_000) % 10) as u16) << 12;
    word
}

/// Unpack a BCD offset word into a frequency in kHz.
///
/// The integer MHz part is fixed at 100. Channels whose reconstructed
/// value ends in 70 or 20 sit on the 8.33/25 kHz grid's uneven points and
/// actually lie 5 kHz higher (..75, ..25), so those get a +5 correction.
/// This rule is specific to the sim's frequency grid, not a rounding
/// convention.
pub fn freq_from_bcd(word: u16) -> i64 {
    let mut freq = 100_000i64;
    freq += ((word & 0x000F) >> 0) as i64 * 10;
    freq += ((word & 0x00F0) >> 4) as i64 * 100;
    freq += ((word & 0x0F00) >> 8) as i64 * 1_000;
    freq += ((word & 0xF000) >> 12) as i64 * 10_000;
    if freq % 100 == 70 || freq % 100 == 20 {
        freq += 5;
    }
    freq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freq_to_bcd() {
        assert_eq!(freq_to_bcd(122_800), 0x2280);
        assert_eq!(freq_to_bcd(118_000), 0x1800);
        assert_eq!(freq_to_bcd(136_975), 0x3697);
    }

    #[test]
    fn test_freq_from_bcd() {
        assert_eq!(freq_from_bcd(0x2280), 122_800);
        assert_eq!(freq_from_bcd(0x1800), 118_000);
    }

    #[test]
    fn test_roundtrip_plain() {
        for freq in [118_000, 122_800, 128_450, 136_975] {
            assert_eq!(freq_from_bcd(freq_to_bcd(freq)), freq);
        }
    }

    #[test]
    fn test_grid_correction_70() {
        // Encoding drops the units digit, so 118070 packs to 0x1807;
        // decode lands on the real channel at 118075.
        assert_eq!(freq_to_bcd(118_070), 0x1807);
        assert_eq!(freq_from_bcd(0x1807), 118_075);
    }

    #[test]
    fn test_grid_correction_20() {
        assert_eq!(freq_from_bcd(freq_to_bcd(118_020)), 118_025);
    }

    #[test]
    fn test_no_correction_on_25() {
        // ..25 and ..75 decode to themselves (their units digit was
        // dropped by the encoder and restored by the correction).
        assert_eq!(freq_from_bcd(freq_to_bcd(118_025)), 118_025);
        assert_eq!(freq_from_bcd(freq_to_bcd(118_075)), 118_075);
    }
}
