//! Address search against the GSI (Geospatial Information Authority of Japan) endpoint.

use async_trait::async_trait;
use itinera_core::Coordinates;
use itinera_error::{GeocodeError, GeocodeErrorKind, GeocodeResult, HttpError, ItineraResult};
use itinera_interface::Geocoder;
use itinera_rate_limit::SecondaryGeocoderConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct GsiFeature {
    geometry: GsiGeometry,
}

#[derive(Debug, Deserialize)]
struct GsiGeometry {
    /// GeoJSON order: `[lon, lat]`
    coordinates: Vec<f64>,
}

/// Parse a GSI address-search body into the first feature's coordinates.
pub fn parse_gsi_response(query: &str, body: &str) -> GeocodeResult<Coordinates> {
    let features: Vec<GsiFeature> = serde_json::from_str(body)
        .map_err(|e| GeocodeError::new(GeocodeErrorKind::Malformed(e.to_string())))?;

    let first = features
        .first()
        .ok_or_else(|| GeocodeError::new(GeocodeErrorKind::NoResults(query.to_string())))?;

    match first.geometry.coordinates.as_slice() {
        [longitude, latitude, ..] => Ok(Coordinates::new(*latitude, *longitude)),
        other => Err(GeocodeError::new(GeocodeErrorKind::Malformed(format!(
            "expected [lon, lat], got {:?}",
            other
        )))),
    }
}

/// Secondary geocoding provider, keyed by place name alone.
#[derive(Debug, Clone)]
pub struct GsiGeocoder {
    client: Client,
    base_url: String,
}

impl GsiGeocoder {
    /// Build a geocoder from its configuration section.
    pub fn new(config: &SecondaryGeocoderConfig) -> ItineraResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build geocoding client: {}", e)))?;

        debug!(base_url = %config.base_url, "Creating GSI geocoder");

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for GsiGeocoder {
    #[instrument(skip(self), fields(provider = "gsi"))]
    async fn geocode(&self, query: &str) -> GeocodeResult<Coordinates> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
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

        parse_gsi_response(query, &body)
    }

    fn provider_name(&self) -> &'static str {
        "gsi"
    }
}
