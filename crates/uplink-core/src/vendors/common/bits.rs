/// Extract the inclusive bit range `first..=last` from `value`.
///
/// Bit 0 is the least significant bit. Used by the bitfield decoder family
/// and by packed-timestamp decoding.
pub fn extract_bits(value: u128, first: u32, last: u32) -> u128 {
    debug_assert!(first <= last && last < 128);
    let width = last - first + 1;
    let mask = if width == 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    };
    (value >> first) & mask
}

/// Interpret a byte slice as one big-endian unsigned integer.
///
/// The payload must fit in 128 bits; bitfield layouts are all 16 bytes or
/// less.
pub fn be_uint(bytes: &[u8]) -> u128 {
    bytes.iter().fold(0u128, |acc, b| (acc << 8) | *b as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_inclusive_range() {
        // 0b1011_0100: bits 2..=4 are 0b101
        assert_eq!(extract_bits(0b1011_0100, 2, 4), 0b101);
    }

    #[test]
    fn single_bit() {
        assert_eq!(extract_bits(0b100, 2, 2), 1);
        assert_eq!(extract_bits(0b100, 1, 1), 0);
    }

    #[test]
    fn be_uint_matches_manual() {
        assert_eq!(be_uint(&[0x01, 0x02]), 0x0102);
        assert_eq!(be_uint(&[]), 0);
    }
}
