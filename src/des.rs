//! The DES engine: key schedule, Feistel round function and the 16-round
//! block cipher driver.
//!
//! Everything here is a pure function over [`Bits`] values. The round keys
//! are returned to the caller as an immutable value and passed back in for
//! each block, so encryption and decryption can share one schedule; the
//! two directions differ only in the order the driver walks the keys.

use log::trace;

use crate::bits::Bits;
use crate::tables;

/// The 16 round keys of 48 bits each, always in encryption order.
pub type RoundKeys = [Bits; 16];

/// Direction in which the driver consumes the round keys. `Forward`
/// encrypts, `Reverse` decrypts; the Feistel structure is otherwise
/// identical for both.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyOrder {
    Forward,
    Reverse,
}

/// Derives the 16 round keys from a 64-bit key.
///
/// PC-1 selects 56 of the 64 key bits and the result is split into two
/// 28-bit halves. Each round rotates both halves left by the scheduled
/// amount and compresses the concatenation through PC-2. The rotation
/// state carries forward from round to round, so round `n` sees the sum
/// of all shifts up to `n`.
pub fn generate_round_keys(key: Bits) -> RoundKeys {
    debug_assert_eq!(key.len(), 64);

    let (mut c, mut d) = key.permute(&tables::PC_1).split();
    trace!("key schedule: C0 {:07x} D0 {:07x}", c.value(), d.value());

    let mut keys = [Bits::new(0, 48); 16];
    for round in 0..16 {
        c = c.rotate_left(tables::LEFT_SHIFTS[round]);
        d = d.rotate_left(tables::LEFT_SHIFTS[round]);
        keys[round] = c.concat(d).permute(&tables::PC_2);
        trace!(
            "key schedule: round {:2} C {:07x} D {:07x} K {:012x}",
            round + 1,
            c.value(),
            d.value(),
            keys[round].value()
        );
    }
    return keys;
}

/// The Feistel round function f.
///
/// Expands the 32-bit half block to 48 bits through E, mixes in the round
/// key, substitutes eight 6-bit groups through the S-boxes and permutes
/// the concatenated 32-bit result through P.
pub fn feistel(half: Bits, round_key: Bits) -> Bits {
    debug_assert_eq!(half.len(), 32);
    debug_assert_eq!(round_key.len(), 48);

    let mixed = half.permute(&tables::E).xor(round_key);

    let mut substituted = Bits::new(0, 0);
    for group in 0..8 {
        let chunk = mixed.slice(group as u32 * 6, 6);
        // The outer bits of the group select the S-box row, the four
        // inner bits the column.
        let row = (chunk.bit(0) << 1) | chunk.bit(5);
        let column = chunk.slice(1, 4).value();
        let output = tables::S_BOXES[group][(row * 16 + column) as usize];
        trace!(
            "s-box {}: input {:02x} row {} col {:2} -> {:x}",
            group + 1,
            chunk.value(),
            row,
            column,
            output
        );
        substituted = substituted.concat(Bits::new(u64::from(output), 4));
    }

    return substituted.permute(&tables::P);
}

/// Runs one block through the 16-round Feistel network.
///
/// The block passes through the initial permutation and is split into
/// halves L and R. Each round sets `L = R` and `R = L ^ f(R, K)`, with K
/// taken from `keys` in the requested order. After the last round the
/// halves are rejoined swapped (R before L) and sent through the final
/// permutation.
pub fn crypt_block(block: Bits, keys: &RoundKeys, order: KeyOrder) -> Bits {
    debug_assert_eq!(block.len(), 64);

    let (mut left, mut right) = block.permute(&tables::IP).split();
    trace!("L0 {:08x} R0 {:08x}", left.value(), right.value());

    for round in 0..16 {
        let index = match order {
            KeyOrder::Forward => round,
            KeyOrder::Reverse => 15 - round,
        };
        let next_right = left.xor(feistel(right, keys[index]));
        left = right;
        right = next_right;
        trace!(
            "L{:<2} {:08x} R{:<2} {:08x}",
            round + 1,
            left.value(),
            round + 1,
            right.value()
        );
    }

    return right.concat(left).permute(&tables::IP_INV);
}

/// Encrypts one 64-bit block with a previously generated schedule.
pub fn encrypt_block(block: Bits, keys: &RoundKeys) -> Bits {
    crypt_block(block, keys, KeyOrder::Forward)
}

/// Decrypts one 64-bit block with a previously generated schedule.
pub fn decrypt_block(block: Bits, keys: &RoundKeys) -> Bits {
    crypt_block(block, keys, KeyOrder::Reverse)
}
