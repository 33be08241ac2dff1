//! Search feature predicates.
//!
//! A feature decides whether one seed belongs in the result set. Features
//! are a closed sum so the scan loop dispatches statically; adding a new
//! predicate kind extends the enum and every match is checked at compile
//! time.

use smallvec::SmallVec;
use std::fmt::Write as _;

use crate::model::WeatherCondition;
use crate::weather::WeatherOracle;

/// Inline capacity covering typical requests without heap spill.
pub type ConditionSet = SmallVec<[WeatherCondition; 4]>;

/// One enabled predicate kind.
#[derive(Debug, Clone)]
pub enum SearchFeature {
    Weather(WeatherFeature),
}

impl SearchFeature {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Weather(_) => "weather",
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Weather(feature) => feature.is_enabled(),
        }
    }

    /// Human-readable summary of the configured predicate, for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Weather(feature) => feature.describe(),
        }
    }

    /// Whether the seed satisfies this feature.
    pub fn check(&mut self, game_seed: i32, legacy: bool) -> bool {
        match self {
            Self::Weather(feature) => feature.check(game_seed, legacy),
        }
    }
}

/// Rainfall predicate over the first-year calendar.
///
/// Owns its oracle scratch buffer, so every worker carries a private
/// instance and the scan shares no mutable state.
#[derive(Debug, Clone)]
pub struct WeatherFeature {
    conditions: ConditionSet,
    oracle: WeatherOracle,
    enabled: bool,
}

impl WeatherFeature {
    #[must_use]
    pub fn new(conditions: impl IntoIterator<Item = WeatherCondition>) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
            oracle: WeatherOracle::new(),
            enabled: true,
        }
    }

    #[must_use]
    pub fn conditions(&self) -> &[WeatherCondition] {
        &self.conditions
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn describe(&self) -> String {
        if self.conditions.is_empty() {
            return String::from("no rainfall conditions");
        }
        let mut out = String::new();
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            let _ = write!(out, "{condition}");
        }
        out
    }

    /// Whether the seed's calendar meets every condition.
    ///
    /// Empty conditions accept all seeds. Conditions are ANDed and the
    /// first failure short-circuits.
    pub fn check(&mut self, game_seed: i32, legacy: bool) -> bool {
        if self.conditions.is_empty() {
            return true;
        }
        let calendar = self.oracle.predict(game_seed, legacy);
        self.conditions.iter().all(|c| calendar.satisfies(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Season;

    fn spring_condition() -> WeatherCondition {
        WeatherCondition {
            season: Season::Spring,
            start_day: 1,
            end_day: 10,
            min_rain_days: 5,
        }
    }

    #[test]
    fn empty_feature_accepts_every_seed() {
        let mut feature = WeatherFeature::new([]);
        assert!(feature.check(0, false));
        assert!(feature.check(12_345, true));
        assert_eq!(feature.describe(), "no rainfall conditions");
    }

    #[test]
    fn conditions_are_anded() {
        let strict_summer = WeatherCondition {
            season: Season::Summer,
            start_day: 1,
            end_day: 10,
            min_rain_days: 9,
        };
        let mut relaxed = WeatherFeature::new([spring_condition()]);
        let mut strict = WeatherFeature::new([spring_condition(), strict_summer]);
        assert!(relaxed.check(59, false));
        assert!(!strict.check(59, false));
    }

    #[test]
    fn variant_dispatch_matches_inner_feature() {
        let mut feature = SearchFeature::Weather(WeatherFeature::new([spring_condition()]));
        assert_eq!(feature.name(), "weather");
        assert!(feature.is_enabled());
        assert!(feature.check(59, false));
        assert!(!feature.check(58, false));
        assert_eq!(feature.describe(), "Spring 1-10: at least 5 rain days");
    }

    #[test]
    fn disabled_flag_is_reported() {
        let mut inner = WeatherFeature::new([spring_condition()]);
        inner.set_enabled(false);
        let feature = SearchFeature::Weather(inner);
        assert!(!feature.is_enabled());
    }

    #[test]
    fn describe_joins_multiple_conditions() {
        let fall = WeatherCondition {
            season: Season::Fall,
            start_day: 1,
            end_day: 28,
            min_rain_days: 10,
        };
        let feature = WeatherFeature::new([spring_condition(), fall]);
        assert_eq!(
            feature.describe(),
            "Spring 1-10: at least 5 rain days; Fall 1-28: at least 10 rain days"
        );
    }
}
