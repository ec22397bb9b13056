//! Configuration, rate limiting and retry for the Itinera engine.
//!
//! - [`ItineraConfig`]: layered TOML/environment configuration
//! - [`RateLimiter`]: governor-backed request limits plus retry of transient failures
//! - [`PostCallDelay`]: fixed pause after every call to a throttled provider

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod limiter;
mod throttle;
mod tier;

pub use config::{
    AnnotationConfig, EngineConfig, GeocodingConfig, ItineraConfig, PrimaryGeocoderConfig,
    SecondaryGeocoderConfig, TierConfig,
};
pub use limiter::RateLimiter;
pub use throttle::PostCallDelay;
pub use tier::Tier;
