//! Tests for the ordered resolution chain.

mod test_utils;

use itinera_core::{Coordinates, ResolutionSource};
use itinera_geocode::ResolutionChain;
use test_utils::MockGeocoder;

const YUBATAKE: Coordinates = Coordinates {
    latitude: 36.6214,
    longitude: 138.5968,
};
const ESTIMATE: Coordinates = Coordinates {
    latitude: 36.62,
    longitude: 138.59,
};

fn chain(primary: &MockGeocoder, secondary: &MockGeocoder) -> ResolutionChain {
    ResolutionChain::new(Box::new(primary.clone()), Box::new(secondary.clone()))
}

#[tokio::test]
async fn test_primary_hit_short_circuits() {
    let primary = MockGeocoder::hit("primary", YUBATAKE);
    let secondary = MockGeocoder::hit("secondary", ESTIMATE);

    let resolution = chain(&primary, &secondary)
        .resolve_place("湯畑", "群馬県", Some(ESTIMATE))
        .await
        .expect("primary should resolve");

    assert_eq!(resolution.coordinates, YUBATAKE);
    assert_eq!(resolution.source, ResolutionSource::Primary);
    assert_eq!(primary.queries(), vec!["湯畑, 群馬県".to_string()]);
    assert_eq!(secondary.call_count(), 0);
}

#[tokio::test]
async fn test_secondary_is_queried_with_place_only() {
    let primary = MockGeocoder::miss("primary");
    let secondary = MockGeocoder::hit("secondary", YUBATAKE);

    let resolution = chain(&primary, &secondary)
        .resolve_place("湯畑", "群馬県", None)
        .await
        .expect("secondary should resolve");

    assert_eq!(resolution.source, ResolutionSource::Secondary);
    assert_eq!(secondary.queries(), vec!["湯畑".to_string()]);
}

#[tokio::test]
async fn test_valid_fallback_used_when_providers_fail() {
    let primary = MockGeocoder::miss("primary");
    let secondary = MockGeocoder::miss("secondary");

    let resolution = chain(&primary, &secondary)
        .resolve_place("湯畑", "群馬県", Some(ESTIMATE))
        .await
        .expect("fallback should resolve");

    assert_eq!(resolution.coordinates, ESTIMATE);
    assert_eq!(resolution.source, ResolutionSource::ModelEstimate);
    assert_eq!(primary.call_count(), 1);
    assert_eq!(secondary.call_count(), 1);
}

#[tokio::test]
async fn test_all_tiers_failing_returns_none() {
    let primary = MockGeocoder::miss("primary");
    let secondary = MockGeocoder::miss("secondary");
    let chain = chain(&primary, &secondary);

    assert!(chain.resolve_place("謎", "日本", None).await.is_none());
    assert!(
        chain
            .resolve_place("謎", "日本", Some(Coordinates::SENTINEL))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_sentinel_from_providers_is_never_returned() {
    let primary = MockGeocoder::hit("primary", Coordinates::SENTINEL);
    let secondary = MockGeocoder::hit("secondary", Coordinates::SENTINEL);

    let resolution = chain(&primary, &secondary)
        .resolve_place("湯畑", "群馬県", Some(ESTIMATE))
        .await
        .expect("fallback should resolve");

    assert!(!resolution.coordinates.is_sentinel());
    assert_eq!(resolution.source, ResolutionSource::ModelEstimate);
}

#[tokio::test]
async fn test_out_of_range_provider_hit_falls_through() {
    let primary = MockGeocoder::hit("primary", Coordinates::new(138.5968, 36.6214));
    let secondary = MockGeocoder::hit("secondary", YUBATAKE);

    let resolution = chain(&primary, &secondary)
        .resolve_place("湯畑", "群馬県", None)
        .await
        .expect("secondary should resolve");

    assert_eq!(resolution.source, ResolutionSource::Secondary);
}
