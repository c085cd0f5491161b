//! A fixed-length, bit-packed vector used as the working representation
//! for every permutation and substitution step of the cipher.
//!
//! The algorithm only ever deals with lengths of 4, 6, 28, 32, 48, 56 and
//! 64 bits, so a single `u64` holds any value we need. Bits are indexed
//! most-significant first: position 0 is the leftmost bit of the declared
//! length, matching the 1-based bit numbering of the DES tables (minus one).

/// An ordered sequence of up to 64 bits with an explicit length.
///
/// Values are immutable; every transformation returns a new `Bits`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Bits {
    value: u64,
    len: u32,
}

impl Bits {
    /// Packs an unsigned value into a bit vector of the given length.
    /// The value must be representable in `len` bits.
    pub fn new(value: u64, len: u32) -> Bits {
        debug_assert!(len <= 64);
        debug_assert!(len == 64 || value < (1u64 << len));
        Bits { value, len }
    }

    /// Builds a 64-bit vector from 8 bytes: byte `i`'s bit `j` (most
    /// significant first) becomes position `i * 8 + j`.
    pub fn from_bytes(bytes: [u8; 8]) -> Bits {
        Bits {
            value: u64::from_be_bytes(bytes),
            len: 64,
        }
    }

    /// Inverse of [`Bits::from_bytes`]. Only defined for 64-bit vectors.
    pub fn to_bytes(self) -> [u8; 8] {
        debug_assert_eq!(self.len, 64);
        return self.value.to_be_bytes();
    }

    /// The unsigned big-endian interpretation of the bits.
    pub fn value(self) -> u64 {
        self.value
    }

    pub fn len(self) -> u32 {
        self.len
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Bit at position `i`, counted from the most significant end; 0 or 1.
    pub fn bit(self, i: u32) -> u64 {
        debug_assert!(i < self.len);
        return (self.value >> (self.len - 1 - i)) & 1;
    }

    /// Reorders the bits through a table of 1-based source positions:
    /// output bit `i` is the input bit named by `table[i]`. The output
    /// length is the table length, so a table may select, drop or
    /// duplicate source bits.
    pub fn permute(self, table: &[u8]) -> Bits {
        debug_assert!(table.len() <= 64);
        let mut value: u64 = 0;
        for &position in table.iter() {
            debug_assert!(1 <= position && u32::from(position) <= self.len);
            value = (value << 1) | self.bit(u32::from(position) - 1);
        }
        return Bits {
            value,
            len: table.len() as u32,
        };
    }

    /// Rotates left by `n` positions: every bit moves toward the most
    /// significant end, and the vacated high bits wrap to the low end.
    pub fn rotate_left(self, n: u32) -> Bits {
        debug_assert!(n < self.len);
        let value = ((self.value << n) | (self.value >> (self.len - n))) & mask(self.len);
        Bits {
            value,
            len: self.len,
        }
    }

    /// Bitwise XOR of two vectors of equal length.
    pub fn xor(self, other: Bits) -> Bits {
        debug_assert_eq!(self.len, other.len);
        Bits {
            value: self.value ^ other.value,
            len: self.len,
        }
    }

    /// Concatenation: `self` supplies the most significant bits.
    pub fn concat(self, other: Bits) -> Bits {
        debug_assert!(self.len + other.len <= 64);
        Bits {
            value: (self.value << other.len) | other.value,
            len: self.len + other.len,
        }
    }

    /// Splits an even-length vector into its left and right halves.
    pub fn split(self) -> (Bits, Bits) {
        debug_assert_eq!(self.len % 2, 0);
        let half = self.len / 2;
        let left = Bits {
            value: self.value >> half,
            len: half,
        };
        let right = Bits {
            value: self.value & mask(half),
            len: half,
        };
        return (left, right);
    }

    /// The `len` bits starting at position `start`.
    pub fn slice(self, start: u32, len: u32) -> Bits {
        debug_assert!(start + len <= self.len);
        Bits {
            value: (self.value >> (self.len - start - len)) & mask(len),
            len,
        }
    }
}

fn mask(len: u32) -> u64 {
    if len == 64 {
        return u64::MAX;
    }
    return (1u64 << len) - 1;
}
