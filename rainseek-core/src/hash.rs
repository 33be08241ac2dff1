//! Deterministic 32-bit hashing shared by the seed mixer and the weather oracle.
//!
//! The reference game derives its context seeds from xxHash32 with seed 0 and
//! then reinterprets the digest as a signed 32-bit integer. Reproducing that
//! reinterpretation bit-for-bit is what keeps every downstream probability
//! roll aligned with the game, so all hashing funnels through [`hash_bytes`].

use smallvec::SmallVec;
use std::hash::Hasher;
use std::sync::OnceLock;
use twox_hash::XxHash32;

/// Hash a byte buffer with xxHash32 (seed 0), reinterpreted as `i32`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn hash_bytes(data: &[u8]) -> i32 {
    let mut hasher = XxHash32::with_seed(0);
    hasher.write(data);
    // XxHash32 reports through the 64-bit Hasher interface; only the low
    // 32 bits carry the digest.
    hasher.finish() as u32 as i32
}

/// Hash the UTF-8 bytes of a string.
#[must_use]
pub fn hash_string(value: &str) -> i32 {
    hash_bytes(value.as_bytes())
}

/// Hash a sequence of 32-bit integers, each packed as little-endian `u32`.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn hash_ints(values: &[i32]) -> i32 {
    // Five 4-byte lanes is the common case; keep the scratch on the stack.
    let mut data: SmallVec<[u8; 20]> = SmallVec::with_capacity(values.len() * 4);
    for value in values {
        data.extend_from_slice(&(*value as u32).to_le_bytes());
    }
    hash_bytes(&data)
}

/// Hash of the `"location_weather"` context key, derived once per process.
#[must_use]
pub fn location_weather_hash() -> i32 {
    static HASH: OnceLock<i32> = OnceLock::new();
    *HASH.get_or_init(|| hash_string("location_weather"))
}

/// Hash of the `"summer_rain_chance"` context key, derived once per process.
#[must_use]
pub fn summer_rain_chance_hash() -> i32 {
    static HASH: OnceLock<i32> = OnceLock::new();
    *HASH.get_or_init(|| hash_string("summer_rain_chance"))
}
