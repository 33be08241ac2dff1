//! Seed mixing and the first draw of the reference platform's default PRNG.
//!
//! The game combines up to five integers into an RNG seed and then consumes
//! exactly one value from a freshly constructed generator. Only that first
//! draw is ever observed, so the whole generator collapses to a single
//! linear congruential step over the Mersenne prime modulus.

use crate::hash::hash_ints;

/// The Mersenne prime 2^31 - 1, modulus for all seed arithmetic.
pub const SEED_MODULUS: i64 = 2_147_483_647;

const LCG_MULTIPLIER: i64 = 1_121_899_819;
const LCG_INCREMENT: i64 = 1_559_595_546;

/// Combine five integers and a mode flag into a deterministic RNG seed.
///
/// Each argument is reduced modulo [`SEED_MODULUS`] with truncated
/// remainder semantics (sign follows the dividend), matching the game.
/// Legacy mode sums the reduced values; the modern path hashes them.
/// Negative results are legal and resolved by the absolute value taken
/// in [`next_double`] / [`next_int`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn mix_seed(a: i64, b: i64, c: i64, d: i64, e: i64, legacy: bool) -> i32 {
    let a = a % SEED_MODULUS;
    let b = b % SEED_MODULUS;
    let c = c % SEED_MODULUS;
    let d = d % SEED_MODULUS;
    let e = e % SEED_MODULUS;

    if legacy {
        ((a + b + c + d + e) % SEED_MODULUS) as i32
    } else {
        hash_ints(&[a as i32, b as i32, c as i32, d as i32, e as i32])
    }
}

/// First output of the reference PRNG seeded with `seed`.
///
/// The generator takes the absolute value of its seed; `i32::MIN` has no
/// 32-bit negation and saturates to `i32::MAX`. The result is always in
/// `[0, SEED_MODULUS)`.
fn first_draw(seed: i32) -> i64 {
    let magnitude = i64::from(seed.checked_abs().unwrap_or(i32::MAX));
    (LCG_MULTIPLIER * magnitude + LCG_INCREMENT) % SEED_MODULUS
}

/// Uniform double in `[0, 1)` derived from the first draw.
///
/// The divisor is the modulus itself, not 2^31; this mirrors the
/// reference's `Sample() * (1.0 / int.MaxValue)` pattern exactly.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn next_double(seed: i32) -> f64 {
    first_draw(seed) as f64 / 2_147_483_647.0
}

/// Bounded integer in `[0, max)` derived from the first draw.
///
/// Returns 0 when `max` is not positive.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn next_int(seed: i32, max: i32) -> i32 {
    if max <= 0 {
        return 0;
    }
    ((first_draw(seed) * i64::from(max)) / SEED_MODULUS) as i32
}
