//! Request and condition types crossing the JSON boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest admissible game seed (`i32::MAX`).
pub const MAX_SEED: i64 = 2_147_483_647;

/// Days per in-game season.
pub const DAYS_PER_SEASON: i32 = 28;

/// Days covered by a first-year calendar (spring + summer + fall).
pub const DAYS_PER_YEAR: usize = 84;

/// In-game season, serialized as its capitalized English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Self; 3] = [Self::Spring, Self::Summer, Self::Fall];

    /// Zero-based season index used by day arithmetic.
    #[must_use]
    pub const fn index(self) -> i32 {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Fall => 2,
        }
    }

    /// Season containing an absolute day in `[1, 84]`.
    #[must_use]
    pub const fn of_day(absolute_day: i32) -> Self {
        match (absolute_day - 1) / DAYS_PER_SEASON {
            0 => Self::Spring,
            1 => Self::Summer,
            _ => Self::Fall,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        })
    }
}

/// A rainfall requirement over an inclusive day window of one season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherCondition {
    pub season: Season,
    pub start_day: i32,
    pub end_day: i32,
    pub min_rain_days: i32,
}

impl WeatherCondition {
    /// First absolute day of the window, in `[1, 84]`.
    #[must_use]
    pub const fn absolute_start(&self) -> i32 {
        self.season.index() * DAYS_PER_SEASON + self.start_day
    }

    /// Last absolute day of the window, in `[1, 84]`.
    #[must_use]
    pub const fn absolute_end(&self) -> i32 {
        self.season.index() * DAYS_PER_SEASON + self.end_day
    }

    /// Check the window bounds and threshold.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` when a day falls outside `[1, 28]`, the
    /// window is inverted, or the rain threshold is negative.
    pub fn validate(&self) -> Result<(), RequestError> {
        for (field, value) in [("startDay", self.start_day), ("endDay", self.end_day)] {
            if !(1..=DAYS_PER_SEASON).contains(&value) {
                return Err(RequestError::DayOutOfRange { field, value });
            }
        }
        if self.end_day < self.start_day {
            return Err(RequestError::DayWindowInverted {
                start: self.start_day,
                end: self.end_day,
            });
        }
        if self.min_rain_days < 0 {
            return Err(RequestError::NegativeRainThreshold {
                value: self.min_rain_days,
            });
        }
        Ok(())
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}: at least {} rain days",
            self.season, self.start_day, self.end_day, self.min_rain_days
        )
    }
}

/// A seed search request as received at the JSON boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub start_seed: i64,
    pub end_seed: i64,
    #[serde(default)]
    pub use_legacy_random: bool,
    #[serde(default)]
    pub weather_conditions: Vec<WeatherCondition>,
    pub output_limit: i32,
}

impl SearchRequest {
    /// Number of seeds covered by the inclusive range.
    #[must_use]
    pub const fn total_seeds(&self) -> i64 {
        self.end_seed - self.start_seed + 1
    }

    /// Validate the whole request before any work starts.
    ///
    /// A single-seed range (`start == end`) is legal; an empty condition
    /// list means every seed matches.
    ///
    /// # Errors
    ///
    /// Returns the first `RequestError` encountered: seed bounds, seed
    /// ordering, condition windows, or a non-positive output limit.
    pub fn validate(&self) -> Result<(), RequestError> {
        for value in [self.start_seed, self.end_seed] {
            if !(0..=MAX_SEED).contains(&value) {
                return Err(RequestError::SeedOutOfRange { value });
            }
        }
        if self.start_seed > self.end_seed {
            return Err(RequestError::SeedRangeInverted {
                start: self.start_seed,
                end: self.end_seed,
            });
        }
        for condition in &self.weather_conditions {
            condition.validate()?;
        }
        if self.output_limit < 1 {
            return Err(RequestError::LimitTooSmall {
                value: self.output_limit,
            });
        }
        Ok(())
    }
}

/// Errors raised when a search request violates its documented bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("seed {value} outside supported range 0..={MAX_SEED}")]
    SeedOutOfRange { value: i64 },
    #[error("start seed {start} must not exceed end seed {end}")]
    SeedRangeInverted { start: i64, end: i64 },
    #[error("{field} must be between 1 and 28 (got {value})")]
    DayOutOfRange { field: &'static str, value: i32 },
    #[error("end day {end} precedes start day {start}")]
    DayWindowInverted { start: i32, end: i32 },
    #[error("minimum rain days must not be negative (got {value})")]
    NegativeRainThreshold { value: i32 },
    #[error("output limit must be at least 1 (got {value})")]
    LimitTooSmall { value: i32 },
}
