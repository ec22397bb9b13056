//! Layered configuration for the engine and its external providers.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (include_str! from itinera.toml)
//! 2. `~/.config/itinera/itinera.toml`
//! 3. `./itinera.toml`
//! 4. `ITINERA__SECTION__KEY` environment variables

use crate::Tier;
use config::{Config, Environment, File, FileFormat};
use itinera_core::TagVocabulary;
use itinera_error::{ConfigError, ItineraError, ItineraResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../itinera.toml");

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Maximum great-circle distance of a rendered segment
    pub max_segment_km: f64,
    /// Directory holding one cache record per document
    pub cache_dir: PathBuf,
    /// Directory holding source documents
    pub source_dir: PathBuf,
    /// Suffix appended to a document id to form its source file name
    pub source_suffix: String,
    /// Directory the renderer payload is written to
    pub output_dir: PathBuf,
    /// Region hint used when inference fails
    pub default_region_hint: String,
    /// Render colors cycled by batch index
    pub palette: Vec<String>,
}

/// Free-text geocoding provider settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PrimaryGeocoderConfig {
    /// Search endpoint base URL
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Mandatory pause after every call
    pub post_call_delay_ms: u64,
}

impl PrimaryGeocoderConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Mandatory pause after every call.
    pub fn post_call_delay(&self) -> Duration {
        Duration::from_millis(self.post_call_delay_ms)
    }
}

/// Address-search geocoding provider settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SecondaryGeocoderConfig {
    /// Address search endpoint
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl SecondaryGeocoderConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Both geocoding tiers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeocodingConfig {
    /// Region-scoped free-text provider
    pub primary: PrimaryGeocoderConfig,
    /// Exact address provider
    pub secondary: SecondaryGeocoderConfig,
}

/// Request limits of the annotation capability.
///
/// ```toml
/// [annotation.tier]
/// name = "Default"
/// rpm = 60
/// rpd = 10000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TierConfig {
    /// Name of the tier
    pub name: String,
    /// Requests per minute limit
    #[serde(default)]
    pub rpm: Option<u32>,
    /// Requests per day limit
    #[serde(default)]
    pub rpd: Option<u32>,
}

impl Tier for TierConfig {
    fn rpm(&self) -> Option<u32> {
        self.rpm
    }

    fn rpd(&self) -> Option<u32> {
        self.rpd
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// OpenAI-compatible chat-completion settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnnotationConfig {
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Model used for event extraction
    pub extraction_model: String,
    /// Model used for region-hint inference
    pub hint_model: String,
    /// Model used for sentiment and tag annotation
    pub annotation_model: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Sampling temperature for extraction
    pub extraction_temperature: f32,
    /// Sampling temperature for region hints
    pub hint_temperature: f32,
    /// Sampling temperature for annotation
    pub annotation_temperature: f32,
    /// Retries of a transient failure before giving up; unset follows the error kind
    #[serde(default)]
    pub max_retries: Option<usize>,
    /// Request limits
    pub tier: TierConfig,
}

impl AnnotationConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level Itinera configuration.
///
/// # Example
///
/// ```no_run
/// use itinera_rate_limit::ItineraConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ItineraConfig::load()?;
/// println!("Segments up to {} km", config.engine.max_segment_km);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ItineraConfig {
    /// Engine-wide settings
    pub engine: EngineConfig,
    /// Geocoding providers
    pub geocoding: GeocodingConfig,
    /// Annotation capability
    pub annotation: AnnotationConfig,
    /// Closed tag vocabularies
    pub vocabulary: TagVocabulary,
}

impl ItineraConfig {
    /// The bundled defaults alone.
    pub fn bundled() -> ItineraResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load configuration from a specific file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ItineraResult<Self> {
        debug!("Loading configuration from file");

        if !path.as_ref().exists() {
            return Err(ConfigError::new(format!(
                "Configuration file not found: {}",
                path.as_ref().display()
            ))
            .into());
        }

        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref()))
                .add_source(Self::environment()),
        )
    }

    /// Load configuration with precedence: env > current dir > home dir > bundled.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> ItineraResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/itinera/itinera.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("itinera").required(false))
            .add_source(Self::environment());

        Self::build(builder)
    }

    fn environment() -> Environment {
        Environment::with_prefix("ITINERA")
            .separator("__")
            .try_parsing(true)
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> ItineraResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ItineraError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ItineraError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> ItineraResult<()> {
        if self.engine.palette.is_empty() {
            return Err(ConfigError::new("engine.palette must not be empty").into());
        }
        if !(self.engine.max_segment_km.is_finite() && self.engine.max_segment_km > 0.0) {
            return Err(ConfigError::new(format!(
                "engine.max_segment_km must be positive, got {}",
                self.engine.max_segment_km
            ))
            .into());
        }
        if self.vocabulary.move_tags().is_empty() || self.vocabulary.action_tags().is_empty() {
            return Err(ConfigError::new("vocabulary tag lists must not be empty").into());
        }
        if self.engine.source_suffix.is_empty() {
            return Err(ConfigError::new("engine.source_suffix must not be empty").into());
        }
        Ok(())
    }
}
