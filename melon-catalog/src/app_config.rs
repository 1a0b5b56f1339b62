use std::env;

use melon_core::{CoreError, CoreResult};
use serde::Deserialize;

use crate::pricing::PricingConfig;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl Config {
    /// Layered load: `config/default`, `config/{RUN_MODE}`, `config/local`,
    /// then `MELON__*` environment overrides. Every source is optional.
    pub fn load() -> CoreResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `MELON__PRICING__PEAK_SURCHARGE=2.5`
            .add_source(config::Environment::with_prefix("MELON").separator("__"))
            .build()
            .map_err(|e| CoreError::Configuration(e.to_string()))?;

        Self::from_source(s)
    }

    fn from_source(source: config::Config) -> CoreResult<Self> {
        let config: Self = source
            .try_deserialize()
            .map_err(|e| CoreError::Configuration(e.to_string()))?;
        config.pricing.validate()?;

        tracing::info!(pricing = ?config.pricing, "loaded melon pricing configuration");
        Ok(config)
    }
}
