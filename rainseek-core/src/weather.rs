//! First-year weather oracle.
//!
//! Maps a game seed and random mode to the 84-day rain calendar covering
//! spring, summer and fall of year one. The oracle is a pure function of its
//! inputs: scripted days and festivals are fixed, the summer green-rain day
//! is drawn once per seed, and every remaining day rolls an independent
//! probability seeded from the day index and the game seed.

use serde::{Deserialize, Serialize};

use crate::hash::{location_weather_hash, summer_rain_chance_hash};
use crate::model::{DAYS_PER_SEASON, DAYS_PER_YEAR, Season, WeatherCondition};
use crate::rng::{mix_seed, next_double, next_int};

/// Candidate days for the summer green rain, indexed by the per-seed draw.
pub const GREEN_RAIN_CANDIDATES: [i32; 8] = [5, 6, 7, 14, 15, 16, 18, 23];

/// Rain probability for unscripted spring and fall days.
const BASE_RAIN_CHANCE: f64 = 0.183;

/// Rain probability for summer day 1, before the per-day ramp.
const SUMMER_RAIN_BASE: f64 = 0.12;

/// Per-day increment of the summer rain ramp.
const SUMMER_RAIN_RAMP: f64 = 0.003;

/// Rain verdicts for absolute days 1..=84 of year one.
///
/// Exactly 84 entries, always fully populated by [`WeatherOracle::predict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCalendar {
    days: [bool; DAYS_PER_YEAR],
}

impl WeatherCalendar {
    const fn clear() -> Self {
        Self {
            days: [false; DAYS_PER_YEAR],
        }
    }

    /// Number of days covered by the calendar; always 84.
    #[must_use]
    pub const fn len(&self) -> usize {
        DAYS_PER_YEAR
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether the given absolute day (1-based, `[1, 84]`) is rainy.
    ///
    /// # Panics
    ///
    /// Panics when `absolute_day` lies outside the calendar.
    #[must_use]
    pub fn is_rainy(&self, absolute_day: i32) -> bool {
        let index = usize::try_from(absolute_day - 1).expect("day must be at least 1");
        self.days[index]
    }

    fn set(&mut self, absolute_day: i32, rainy: bool) {
        let index = usize::try_from(absolute_day - 1).expect("day must be at least 1");
        self.days[index] = rainy;
    }

    /// Count rainy days in the inclusive absolute window `[start, end]`.
    #[must_use]
    pub fn rain_days_between(&self, start: i32, end: i32) -> i32 {
        (start..=end).filter(|&day| self.is_rainy(day)).count() as i32
    }

    /// Whether the calendar satisfies a single rainfall condition.
    #[must_use]
    pub fn satisfies(&self, condition: &WeatherCondition) -> bool {
        self.rain_days_between(condition.absolute_start(), condition.absolute_end())
            >= condition.min_rain_days
    }

    /// Day-of-month numbers (1..=28) of the rainy days in one season.
    #[must_use]
    pub fn rainy_days_in(&self, season: Season) -> Vec<i32> {
        let offset = season.index() * DAYS_PER_SEASON;
        (1..=DAYS_PER_SEASON)
            .filter(|&day| self.is_rainy(offset + day))
            .collect()
    }
}

impl Default for WeatherCalendar {
    fn default() -> Self {
        Self::clear()
    }
}

/// Per-season rain listing attached to found events on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDetail {
    pub spring_rain: Vec<i32>,
    pub summer_rain: Vec<i32>,
    pub fall_rain: Vec<i32>,
    pub green_rain_day: i32,
}

impl WeatherDetail {
    /// Summarize a predicted calendar for one seed.
    #[must_use]
    pub fn from_calendar(calendar: &WeatherCalendar, green_rain_day: i32) -> Self {
        Self {
            spring_rain: calendar.rainy_days_in(Season::Spring),
            summer_rain: calendar.rainy_days_in(Season::Summer),
            fall_rain: calendar.rainy_days_in(Season::Fall),
            green_rain_day,
        }
    }
}

/// Reusable oracle holding the per-worker scratch calendar.
///
/// Prediction never allocates; the same 84-entry buffer is rewritten for
/// every seed a worker scans.
#[derive(Debug, Clone, Default)]
pub struct WeatherOracle {
    calendar: WeatherCalendar,
}

impl WeatherOracle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Predict the full first-year calendar for one seed.
    pub fn predict(&mut self, game_seed: i32, legacy: bool) -> &WeatherCalendar {
        let green_day = green_rain_day(game_seed, legacy);
        for day in 1..=DAYS_PER_YEAR as i32 {
            self.calendar
                .set(day, is_rainy_day(day, game_seed, legacy, green_day));
        }
        &self.calendar
    }
}

/// Predict a first-year calendar without a reusable oracle.
#[must_use]
pub fn predict(game_seed: i32, legacy: bool) -> WeatherCalendar {
    let mut oracle = WeatherOracle::new();
    *oracle.predict(game_seed, legacy)
}

/// The summer day-of-month carrying green rain for this seed, fixed for
/// the whole year.
#[must_use]
pub fn green_rain_day(game_seed: i32, legacy: bool) -> i32 {
    let year = 1;
    let seed = mix_seed(year * 777, i64::from(game_seed), 0, 0, 0, legacy);
    let index = next_int(seed, GREEN_RAIN_CANDIDATES.len() as i32);
    GREEN_RAIN_CANDIDATES[index as usize]
}

/// Whether a seed's calendar satisfies every condition.
///
/// An empty condition list accepts all seeds.
#[must_use]
pub fn check(game_seed: i32, legacy: bool, conditions: &[WeatherCondition]) -> bool {
    if conditions.is_empty() {
        return true;
    }
    let calendar = predict(game_seed, legacy);
    conditions.iter().all(|c| calendar.satisfies(c))
}

/// Decide one day; the first matching rule wins.
fn is_rainy_day(absolute_day: i32, game_seed: i32, legacy: bool, green_rain_day: i32) -> bool {
    let season = (absolute_day - 1) / DAYS_PER_SEASON;
    let day_of_month = ((absolute_day - 1) % DAYS_PER_SEASON) + 1;

    match season {
        0 => match day_of_month {
            1 | 2 | 4 | 5 => return false,
            3 => return true,
            // Egg Festival, Flower Dance
            13 | 24 => return false,
            _ => {}
        },
        1 => {
            if day_of_month == green_rain_day {
                return true;
            }
            // Luau, Dance of the Moonlight Jellies
            if day_of_month == 11 || day_of_month == 28 {
                return false;
            }
            // Scripted thunderstorms on days 13 and 26.
            if day_of_month % 13 == 0 {
                return true;
            }
            let seed = mix_seed(
                i64::from(absolute_day - 1),
                i64::from(game_seed / 2),
                i64::from(summer_rain_chance_hash()),
                0,
                0,
                legacy,
            );
            let chance = SUMMER_RAIN_BASE + SUMMER_RAIN_RAMP * f64::from(day_of_month - 1);
            return next_double(seed) < chance;
        }
        _ => {
            // Stardew Valley Fair, Spirit's Eve
            if day_of_month == 16 || day_of_month == 27 {
                return false;
            }
        }
    }

    let seed = mix_seed(
        i64::from(location_weather_hash()),
        i64::from(game_seed),
        i64::from(absolute_day - 1),
        0,
        0,
        legacy,
    );
    next_double(seed) < BASE_RAIN_CHANCE
}
