//! Rainseek engine
//!
//! Deterministic first-year weather oracle and parallel game-seed search.
//! This crate reproduces the reference game's seed derivation bit-for-bit
//! (xxHash32 context hashes, additive legacy mixing and the first draw of
//! the platform PRNG) and scans seed ranges for calendars that satisfy
//! user-supplied rainfall conditions. It performs no I/O of its own; the
//! caller supplies an [`EventSink`] and receives streamed progress frames
//! plus a sorted [`SearchSummary`].

pub mod events;
pub mod feature;
pub mod hash;
pub mod model;
pub mod numbers;
pub mod rng;
pub mod search;
pub mod weather;

// Re-export commonly used types
pub use events::{EventSink, MemorySink, NullSink, SearchEvent};
pub use feature::{ConditionSet, SearchFeature, WeatherFeature};
pub use hash::{hash_ints, hash_string, location_weather_hash, summer_rain_chance_hash};
pub use model::{
    DAYS_PER_SEASON, DAYS_PER_YEAR, MAX_SEED, RequestError, SearchRequest, Season,
    WeatherCondition,
};
pub use rng::{SEED_MODULUS, mix_seed, next_double, next_int};
pub use search::{
    CancelToken, SearchOptions, SearchSummary, search, search_with, worker_count_for,
};
pub use weather::{
    GREEN_RAIN_CANDIDATES, WeatherCalendar, WeatherDetail, WeatherOracle, check, green_rain_day,
    predict,
};
