//! Core data types for the Itinera itinerary resolution engine.
//!
//! An [`Itinerary`] owns an ordered list of [`Event`]s, each either a [`Stay`]
//! at a place or a [`Move`] between places. Event order is the only timeline.
//! [`ResolvedSegment`]s are derived views borrowed from an itinerary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotation;
mod coordinates;
mod event;
mod itinerary;
mod message;
mod palette;
mod segment;
mod vocabulary;

pub use annotation::{clamp_score, Annotation, NEUTRAL_SCORE};
pub use coordinates::{Coordinates, EARTH_RADIUS_KM};
pub use event::{Event, Move, Resolution, ResolutionSource, Stay, UNKNOWN_MEANS};
pub use itinerary::Itinerary;
pub use message::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, Message, Role};
pub use palette::color_for;
pub use segment::ResolvedSegment;
pub use vocabulary::{TagVocabulary, DEFAULT_ACTION_TAGS, DEFAULT_MOVE_TAGS};
