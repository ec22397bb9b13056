//! Free-text geocoding against a Nominatim search endpoint.

use async_trait::async_trait;
use itinera_core::Coordinates;
use itinera_error::{GeocodeError, GeocodeErrorKind, GeocodeResult, HttpError, ItineraResult};
use itinera_interface::Geocoder;
use itinera_rate_limit::{PostCallDelay, PrimaryGeocoderConfig};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// One hit of a Nominatim `/search?format=json` response.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Parse a Nominatim JSON body into the first hit's coordinates.
///
/// Nominatim encodes coordinates as decimal strings.
pub fn parse_nominatim_response(query: &str, body: &str) -> GeocodeResult<Coordinates> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)
        .map_err(|e| GeocodeError::new(GeocodeErrorKind::Malformed(e.to_string())))?;

    let first = places
        .first()
        .ok_or_else(|| GeocodeError::new(GeocodeErrorKind::NoResults(query.to_string())))?;

    let latitude = first.lat.trim().parse::<f64>().map_err(|e| {
        GeocodeError::new(GeocodeErrorKind::Malformed(format!(
            "latitude '{}': {}",
            first.lat, e
        )))
    })?;
    let longitude = first.lon.trim().parse::<f64>().map_err(|e| {
        GeocodeError::new(GeocodeErrorKind::Malformed(format!(
            "longitude '{}': {}",
            first.lon, e
        )))
    })?;

    Ok(Coordinates::new(latitude, longitude))
}

/// Primary geocoding provider.
///
/// Every call, successful or not, is followed by the configured
/// post-call delay to honor the provider's usage policy.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    delay: PostCallDelay,
}

impl NominatimGeocoder {
    /// Build a geocoder from its configuration section.
    pub fn new(config: &PrimaryGeocoderConfig) -> ItineraResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build geocoding client: {}", e)))?;

        debug!(base_url = %config.base_url, "Creating Nominatim geocoder");

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            delay: PostCallDelay::new(config.post_call_delay()),
        })
    }

    async fn search(&self, query: &str) -> GeocodeResult<Coordinates> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::new(GeocodeErrorKind::Http(e.to_string())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::new(GeocodeErrorKind::Http(e.to_string())))?;

        if !status.is_success() {
            return Err(GeocodeError::new(GeocodeErrorKind::Status {
                status: status.as_u16(),
                message: body,
            }));
        }

        parse_nominatim_response(query, &body)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self), fields(provider = "nominatim"))]
    async fn geocode(&self, query: &str) -> GeocodeResult<Coordinates> {
        self.delay.run(self.search(query)).await
    }

    fn provider_name(&self) -> &'static str {
        "nominatim"
    }
}
