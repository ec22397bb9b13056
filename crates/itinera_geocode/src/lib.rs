//! Geocoding providers and the resolution chain.
//!
//! [`NominatimGeocoder`] answers region-scoped free-text queries and pauses
//! after every call. [`GsiGeocoder`] answers exact address searches.
//! [`ResolutionChain`] tries them in that order before accepting the
//! narrative model's own coordinate estimate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod gsi;
mod nominatim;

pub use chain::ResolutionChain;
pub use gsi::{parse_gsi_response, GsiGeocoder};
pub use nominatim::{parse_nominatim_response, NominatimGeocoder};
