use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime, Timelike};
use melon_core::{Clock, CoreError, CoreResult, RandomSource, SystemClock, ThreadRandom};
use serde::{Deserialize, Serialize};

/// Snapshot of the moment a price is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingContext {
    pub timestamp: NaiveDateTime,
}

impl PricingContext {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self { timestamp }
    }

    /// Day of week, Monday = 0
    pub fn weekday(&self) -> u32 {
        self.timestamp.weekday().num_days_from_monday()
    }

    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Lowest base price per melon (inclusive)
    pub min_base_price: i32,

    /// Highest base price per melon (inclusive)
    pub max_base_price: i32,

    /// Added to the base price during the peak window
    pub peak_surcharge: f64,

    /// First hour of the peak window (24h clock, inclusive)
    pub peak_start_hour: u32,

    /// Last hour of the peak window (inclusive)
    pub peak_end_hour: u32,

    /// Last weekday of the peak window, Monday = 0
    pub last_peak_weekday: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            min_base_price: 5,
            max_base_price: 9,
            peak_surcharge: 4.0,
            peak_start_hour: 8,
            peak_end_hour: 11,
            last_peak_weekday: 4,
        }
    }
}

impl PricingConfig {
    /// Reject rule sets the engine cannot draw from
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_base_price > self.max_base_price {
            return Err(CoreError::Configuration(format!(
                "min_base_price {} exceeds max_base_price {}",
                self.min_base_price, self.max_base_price
            )));
        }
        if self.peak_start_hour > self.peak_end_hour || self.peak_end_hour > 23 {
            return Err(CoreError::Configuration(format!(
                "invalid peak window {}..={}",
                self.peak_start_hour, self.peak_end_hour
            )));
        }
        if self.last_peak_weekday > 6 {
            return Err(CoreError::Configuration(format!(
                "last_peak_weekday {} is past Sunday (6)",
                self.last_peak_weekday
            )));
        }
        Ok(())
    }
}

/// Computes per-melon base prices
#[derive(Clone)]
pub struct PricingEngine {
    config: PricingConfig,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl PricingEngine {
    /// Engine backed by the host clock and the thread-local generator
    pub fn new(config: PricingConfig) -> CoreResult<Self> {
        Self::with_sources(config, Arc::new(SystemClock), Arc::new(ThreadRandom))
    }

    /// Rejects rule sets that `validate` refuses
    pub fn with_sources(
        config: PricingConfig,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self { config, clock, random })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn context(&self) -> PricingContext {
        PricingContext::new(self.clock.now())
    }

    /// Weekday morning rush
    pub fn is_peak(&self, context: &PricingContext) -> bool {
        context.weekday() <= self.config.last_peak_weekday
            && (self.config.peak_start_hour..=self.config.peak_end_hour).contains(&context.hour())
    }

    /// Random base price, plus the surcharge inside the peak window
    pub fn base_price(&self) -> f64 {
        let context = self.context();
        let drawn = self
            .random
            .draw(self.config.min_base_price..=self.config.max_base_price);

        let peak = self.is_peak(&context);
        let price = if peak {
            f64::from(drawn) + self.config.peak_surcharge
        } else {
            f64::from(drawn)
        };

        tracing::debug!(
            drawn,
            peak,
            price,
            weekday = context.weekday(),
            hour = context.hour(),
            "computed melon base price"
        );
        price
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self {
            config: PricingConfig::default(),
            clock: Arc::new(SystemClock),
            random: Arc::new(ThreadRandom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use melon_core::{FixedClock, FixedRandom};

    // 2024-03-04 is a Monday
    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    fn engine(timestamp: NaiveDateTime, drawn: i32) -> PricingEngine {
        PricingEngine::with_sources(
            PricingConfig::default(),
            Arc::new(FixedClock(timestamp)),
            Arc::new(FixedRandom(drawn)),
        )
        .unwrap()
    }

    #[test]
    fn test_context_weekday_starts_monday() {
        assert_eq!(PricingContext::new(at(4, 10)).weekday(), 0);
        assert_eq!(PricingContext::new(at(8, 10)).weekday(), 4);
        assert_eq!(PricingContext::new(at(10, 10)).weekday(), 6);
    }

    #[test]
    fn test_peak_window_bounds() {
        let engine = engine(at(4, 8), 5);

        assert!(engine.is_peak(&PricingContext::new(at(4, 8))));
        assert!(engine.is_peak(&PricingContext::new(at(6, 11))));
        assert!(engine.is_peak(&PricingContext::new(at(8, 9))));

        assert!(!engine.is_peak(&PricingContext::new(at(4, 7))));
        assert!(!engine.is_peak(&PricingContext::new(at(4, 12))));
        // Saturday and Sunday mornings
        assert!(!engine.is_peak(&PricingContext::new(at(9, 9))));
        assert!(!engine.is_peak(&PricingContext::new(at(10, 9))));
    }

    #[test]
    fn test_base_price_off_peak() {
        assert_eq!(engine(at(4, 14), 7).base_price(), 7.0);
        assert_eq!(engine(at(9, 9), 5).base_price(), 5.0);
    }

    #[test]
    fn test_base_price_peak_surcharge() {
        assert_eq!(engine(at(5, 10), 7).base_price(), 11.0);
        assert_eq!(engine(at(8, 8), 9).base_price(), 13.0);
    }

    #[test]
    fn test_random_base_price_in_range() {
        let off_peak = PricingEngine::with_sources(
            PricingConfig::default(),
            Arc::new(FixedClock(at(9, 10))),
            Arc::new(ThreadRandom),
        )
        .unwrap();
        let peak = PricingEngine::with_sources(
            PricingConfig::default(),
            Arc::new(FixedClock(at(5, 10))),
            Arc::new(ThreadRandom),
        )
        .unwrap();

        for _ in 0..200 {
            let price = off_peak.base_price();
            assert!((5.0..=9.0).contains(&price));
            let price = peak.base_price();
            assert!((9.0..=13.0).contains(&price));
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(PricingConfig::default().validate().is_ok());

        let inverted = PricingConfig {
            min_base_price: 10,
            max_base_price: 9,
            ..Default::default()
        };
        assert!(matches!(inverted.validate(), Err(CoreError::Configuration(_))));

        let bad_window = PricingConfig {
            peak_start_hour: 12,
            peak_end_hour: 11,
            ..Default::default()
        };
        assert!(bad_window.validate().is_err());

        let past_sunday = PricingConfig {
            last_peak_weekday: 7,
            ..Default::default()
        };
        assert!(matches!(past_sunday.validate(), Err(CoreError::Configuration(_))));

        let weekend_too = PricingConfig {
            last_peak_weekday: 6,
            ..Default::default()
        };
        assert!(weekend_too.validate().is_ok());
    }

    #[test]
    fn test_engine_rejects_inverted_price_range() {
        let inverted = PricingConfig {
            min_base_price: 10,
            max_base_price: 9,
            ..Default::default()
        };

        let result = PricingEngine::with_sources(
            inverted.clone(),
            Arc::new(FixedClock(at(4, 9))),
            Arc::new(FixedRandom(7)),
        );
        assert!(matches!(result, Err(CoreError::Configuration(_))));
        assert!(PricingEngine::new(inverted).is_err());

        let bad_weekday = PricingConfig {
            last_peak_weekday: 9,
            ..Default::default()
        };
        assert!(PricingEngine::new(bad_weekday).is_err());
    }

    #[test]
    fn test_default_engine_prices_in_range() {
        let engine = PricingEngine::default();
        assert_eq!(engine.config(), &PricingConfig::default());

        let price = engine.base_price();
        assert!((5.0..=13.0).contains(&price));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PricingConfig =
            serde_json::from_str(r#"{ "peak_surcharge": 2.5 }"#).unwrap();

        assert_eq!(config.peak_surcharge, 2.5);
        assert_eq!(config.min_base_price, 5);
        assert_eq!(config.peak_end_hour, 11);
    }
}
