pub mod pricing;
pub mod app_config;

pub use pricing::{PricingConfig, PricingContext, PricingEngine};
pub use app_config::Config;
