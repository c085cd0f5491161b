//! Single-block implementation of the DES cipher primitive (FIPS
//! Publication 46-3).
//!
//! The crate encrypts and decrypts exactly one 64-bit block per call under
//! a 64-bit key (56 effective bits). Modes of operation, padding and
//! multi-block processing are deliberately not provided; a caller that
//! needs them must layer them on top and hand this crate one 8-byte block
//! at a time.
//!
//! ```
//! let ciphertext = des_core::encrypt_block(b"abcdefgh", b"12345678").unwrap();
//! let plaintext = des_core::decrypt_block(&ciphertext, b"12345678").unwrap();
//! assert_eq!(&plaintext, b"abcdefgh");
//! ```
//!
//! The engine is purely functional: round keys are an explicit value
//! produced by [`generate_round_keys`], all tables are immutable constants,
//! and any number of threads may encrypt concurrently without coordination.
//! Per-round internals are traced through the `log` crate at trace level.

pub mod bits;
pub mod des;
pub mod tables;

use std::error;
use std::fmt;

use crate::bits::Bits;
use crate::des::RoundKeys;

/// Keys and blocks are both exactly this many bytes.
pub const BLOCK_SIZE: usize = 8;

/// The ways a caller can hand us unusable input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// A key or block was not exactly [`BLOCK_SIZE`] bytes. Not retryable;
    /// the caller must supply correctly sized input.
    InvalidInputLength { expected: usize, actual: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidInputLength { expected, actual } => write!(
                f,
                "invalid input length: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl error::Error for Error {}

fn to_block(data: &[u8]) -> Result<Bits, Error> {
    if data.len() != BLOCK_SIZE {
        return Err(Error::InvalidInputLength {
            expected: BLOCK_SIZE,
            actual: data.len(),
        });
    }
    let mut bytes = [0u8; BLOCK_SIZE];
    bytes.copy_from_slice(data);
    return Ok(Bits::from_bytes(bytes));
}

/// Derives the 16 round keys from an 8-byte key.
///
/// The schedule is deterministic and always in encryption order; pass it
/// to [`des::encrypt_block`] and [`des::decrypt_block`] to process many
/// blocks without re-deriving it.
pub fn generate_round_keys(key: &[u8]) -> Result<RoundKeys, Error> {
    return Ok(des::generate_round_keys(to_block(key)?));
}

/// Encrypts one 8-byte block under an 8-byte key.
pub fn encrypt_block(plaintext: &[u8], key: &[u8]) -> Result<[u8; BLOCK_SIZE], Error> {
    let keys = des::generate_round_keys(to_block(key)?);
    return Ok(des::encrypt_block(to_block(plaintext)?, &keys).to_bytes());
}

/// Decrypts one 8-byte block under an 8-byte key.
pub fn decrypt_block(ciphertext: &[u8], key: &[u8]) -> Result<[u8; BLOCK_SIZE], Error> {
    let keys = des::generate_round_keys(to_block(key)?);
    return Ok(des::decrypt_block(to_block(ciphertext)?, &keys).to_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn hamming_distance(a: &[u8; 8], b: &[u8; 8]) -> u32 {
        let mut distance = 0;
        for i in 0..8 {
            distance += (a[i] ^ b[i]).count_ones();
        }
        return distance;
    }

    fn flip_bit(block: &[u8; 8], bit: usize) -> [u8; 8] {
        let mut flipped = *block;
        flipped[bit / 8] ^= 0x80 >> (bit % 8);
        return flipped;
    }

    #[test]
    fn inv_encrypt_decrypt() {
        let mut rng = rand::thread_rng();
        for _ in 0..256 {
            let plaintext: [u8; 8] = rng.gen();
            let key: [u8; 8] = rng.gen();

            let ciphertext = encrypt_block(&plaintext, &key).unwrap();
            let decrypted = decrypt_block(&ciphertext, &key).unwrap();
            assert_eq!(decrypted, plaintext);
        }
    }

    #[test]
    fn known_answer_ascii_vector() {
        let ciphertext = encrypt_block(b"abcdefgh", b"12345678").unwrap();
        assert_eq!(ciphertext, [0x94, 0xD4, 0x43, 0x6B, 0xC3, 0xB5, 0xB6, 0x93]);

        let plaintext = decrypt_block(&ciphertext, b"12345678").unwrap();
        assert_eq!(&plaintext, b"abcdefgh");
    }

    #[test]
    fn known_answer_all_zero_inputs() {
        // Even the degenerate all-zero key and block must come out as the
        // standard, decidedly non-zero ciphertext.
        let ciphertext = encrypt_block(&[0u8; 8], &[0u8; 8]).unwrap();
        assert_eq!(ciphertext, [0x8C, 0xA6, 0x4D, 0xE9, 0xC1, 0xB1, 0x23, 0xA7]);

        let plaintext = decrypt_block(&ciphertext, &[0u8; 8]).unwrap();
        assert_eq!(plaintext, [0u8; 8]);
    }

    #[test]
    fn avalanche_on_plaintext_bits() {
        let key = *b"12345678";
        let plaintext = *b"abcdefgh";
        let baseline = encrypt_block(&plaintext, &key).unwrap();

        let mut total = 0;
        for bit in 0..64 {
            let ciphertext = encrypt_block(&flip_bit(&plaintext, bit), &key).unwrap();
            let distance = hamming_distance(&baseline, &ciphertext);
            // A single distance is binomially distributed around 32; allow
            // a wide per-flip band and a tight band on the mean.
            assert!(
                distance >= 16 && distance <= 48,
                "bit {}: distance {}",
                bit,
                distance
            );
            total += distance;
        }
        let mean = total / 64;
        assert!(mean >= 24 && mean <= 40, "mean distance {}", mean);
    }

    #[test]
    fn key_sensitivity_on_effective_bits() {
        let key = *b"12345678";
        let plaintext = *b"abcdefgh";
        let baseline = encrypt_block(&plaintext, &key).unwrap();

        for bit in 0..64 {
            // Every 8th key bit is a parity bit that PC-1 drops, so
            // flipping it cannot change the ciphertext.
            if bit % 8 == 7 {
                continue;
            }
            let ciphertext = encrypt_block(&plaintext, &flip_bit(&key, bit)).unwrap();
            let distance = hamming_distance(&baseline, &ciphertext);
            assert!(
                distance >= 16 && distance <= 48,
                "key bit {}: distance {}",
                bit,
                distance
            );
        }
    }

    #[test]
    fn parity_key_bits_are_ignored() {
        let key = *b"12345678";
        let plaintext = *b"abcdefgh";
        let baseline = encrypt_block(&plaintext, &key).unwrap();

        for bit in (7..64).step_by(8) {
            let ciphertext = encrypt_block(&plaintext, &flip_bit(&key, bit)).unwrap();
            assert_eq!(ciphertext, baseline);
        }
    }

    #[test]
    fn rejects_wrong_input_lengths() {
        let short = [0u8; 7];
        let long = [0u8; 9];
        let block = [0u8; 8];

        let expected_short = Error::InvalidInputLength {
            expected: 8,
            actual: 7,
        };
        let expected_long = Error::InvalidInputLength {
            expected: 8,
            actual: 9,
        };

        assert_eq!(generate_round_keys(&short).unwrap_err(), expected_short);
        assert_eq!(encrypt_block(&block, &long).unwrap_err(), expected_long);
        assert_eq!(encrypt_block(&short, &block).unwrap_err(), expected_short);
        assert_eq!(decrypt_block(&long, &block).unwrap_err(), expected_long);
        assert_eq!(decrypt_block(&block, &short).unwrap_err(), expected_short);
    }
}
