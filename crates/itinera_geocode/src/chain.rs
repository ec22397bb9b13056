//! Ordered coordinate lookup: primary, secondary, then the model's estimate.

use itinera_core::{Coordinates, Resolution, ResolutionSource};
use itinera_interface::Geocoder;
use tracing::{debug, info, instrument, warn};

/// Fixed-order resolution chain over two providers and a fallback coordinate.
///
/// Tiers run strictly one after another and stop at the first usable hit.
pub struct ResolutionChain {
    primary: Box<dyn Geocoder>,
    secondary: Box<dyn Geocoder>,
}

impl ResolutionChain {
    /// Chain `primary` (region-scoped) before `secondary` (place name only).
    pub fn new(primary: Box<dyn Geocoder>, secondary: Box<dyn Geocoder>) -> Self {
        Self { primary, secondary }
    }

    /// Resolve `place`, falling back to the model-supplied `fallback`.
    ///
    /// Returns `None` when every tier fails. A fallback with either component
    /// zero is never used.
    #[instrument(skip(self, fallback), fields(place = %place))]
    pub async fn resolve_place(
        &self,
        place: &str,
        region_hint: &str,
        fallback: Option<Coordinates>,
    ) -> Option<Resolution> {
        let scoped_query = format!("{}, {}", place, region_hint);
        if let Some(coordinates) = self.primary.resolve(&scoped_query).await {
            debug!(%coordinates, "Resolved by primary provider");
            return Some(Resolution {
                coordinates,
                source: ResolutionSource::Primary,
            });
        }

        if let Some(coordinates) = self.secondary.resolve(place).await {
            debug!(%coordinates, "Resolved by secondary provider");
            return Some(Resolution {
                coordinates,
                source: ResolutionSource::Secondary,
            });
        }

        match fallback {
            Some(coordinates) if is_usable_estimate(&coordinates) => {
                info!(%coordinates, "Using model-estimated coordinates");
                Some(Resolution {
                    coordinates,
                    source: ResolutionSource::ModelEstimate,
                })
            }
            _ => {
                warn!(region_hint, "All resolution tiers failed, stay left unresolved");
                None
            }
        }
    }
}

/// A model estimate counts only if valid and neither component is zero.
fn is_usable_estimate(coordinates: &Coordinates) -> bool {
    coordinates.is_valid() && coordinates.latitude != 0.0 && coordinates.longitude != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_with_a_zero_component_is_rejected() {
        assert!(is_usable_estimate(&Coordinates::new(36.6, 138.6)));
        assert!(!is_usable_estimate(&Coordinates::new(0.0, 138.6)));
        assert!(!is_usable_estimate(&Coordinates::new(36.6, 0.0)));
        assert!(!is_usable_estimate(&Coordinates::SENTINEL));
        assert!(!is_usable_estimate(&Coordinates::new(136.6, 38.6)));
    }
}
