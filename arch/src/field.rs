// ----------------------------------------------------------------------------
// Bit field boundaries of a 32-bit machine word, (msb, lsb)

pub const WORD_BITS: usize = 32;

pub struct Field;

impl Field {
    pub const OPCODE: (usize, usize) = (31, 26);
    pub const RS: (usize, usize) = (25, 21);
    pub const RT: (usize, usize) = (20, 16);
    pub const RD: (usize, usize) = (15, 11);
    pub const SHAMT: (usize, usize) = (10, 6);
    pub const FUNCT: (usize, usize) = (5, 0);
    pub const IMM: (usize, usize) = (15, 0);
    pub const TARGET: (usize, usize) = (25, 0);
}

// ----------------------------------------------------------------------------

/// Two's complement rendering of `value` truncated to `width` bits.
pub fn to_bits(value: i64, width: usize) -> String {
    let mask = if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    format!("{:0>width$b}", (value as u64) & mask, width = width)
}

pub fn fits_signed(value: i64, width: usize) -> bool {
    let min = -(1i64 << (width - 1));
    let max = (1i64 << (width - 1)) - 1;
    min <= value && value <= max
}

pub fn fits_unsigned(value: i64, width: usize) -> bool {
    0 <= value && value < (1i64 << width)
}

/// Slice a binary word string at (msb, lsb), bit 31 being the first character.
pub fn slice(word: &str, (msb, lsb): (usize, usize)) -> Option<&str> {
    if word.len() != WORD_BITS || msb < lsb || msb >= WORD_BITS {
        return None;
    }
    word.get(WORD_BITS - 1 - msb..WORD_BITS - lsb)
}

/// Parse a binary word string back to its value.
pub fn word(bits: &str) -> Option<u32> {
    if bits.len() != WORD_BITS {
        return None;
    }
    u32::from_str_radix(bits, 2).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bits() {
        assert_eq!(to_bits(3, 16), "0000000000000011");
        assert_eq!(to_bits(-1, 16), "1111111111111111");
        assert_eq!(to_bits(-2, 5), "11110");
        assert_eq!(to_bits(0x00400000, 26), "00010000000000000000000000");
    }

    #[test]
    fn test_fits() {
        assert!(fits_signed(32767, 16));
        assert!(fits_signed(-32768, 16));
        assert!(!fits_signed(32768, 16));
        assert!(!fits_signed(100000, 16));
        assert!(fits_unsigned(31, 5));
        assert!(!fits_unsigned(32, 5));
        assert!(!fits_unsigned(-1, 5));
        assert!(fits_unsigned(0x03FF_FFFF, 26));
        assert!(!fits_unsigned(0x0400_0000, 26));
    }

    #[test]
    fn test_slice() {
        let w = "00000001001010100100000000100000";
        assert_eq!(slice(w, Field::OPCODE), Some("000000"));
        assert_eq!(slice(w, Field::RS), Some("01001"));
        assert_eq!(slice(w, Field::RT), Some("01010"));
        assert_eq!(slice(w, Field::RD), Some("01000"));
        assert_eq!(slice(w, Field::SHAMT), Some("00000"));
        assert_eq!(slice(w, Field::FUNCT), Some("100000"));
        assert_eq!(slice("0101", Field::FUNCT), None);
        assert_eq!(word(w), Some(0x012A4020));
    }
}
