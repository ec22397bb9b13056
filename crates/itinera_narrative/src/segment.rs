//! Distance-gated route segments between consecutive resolved stays.

use itinera_core::{Event, Move, ResolvedSegment, Stay};

/// Segments longer than this are treated as implausible by default.
pub const DEFAULT_MAX_SEGMENT_KM: f64 = 100.0;

/// Pair consecutive resolved stays no farther apart than `max_distance_km`.
///
/// Unresolved stays are skipped. Each segment carries the first move whose
/// position lies strictly between its two stays, if there is one.
///
/// # Examples
///
/// ```
/// use itinera_core::{Coordinates, Event, Move, Resolution, ResolutionSource, Stay};
/// use itinera_narrative::segment;
///
/// let at = |position, place: &str, lat, lon| {
///     let mut stay = Stay::new(position, place);
///     stay.resolve(Resolution {
///         coordinates: Coordinates::new(lat, lon),
///         source: ResolutionSource::Primary,
///     });
///     Event::from(stay)
/// };
///
/// let events = vec![
///     at(0, "草津温泉", 36.6222, 138.5964),
///     Event::from(Move::new(1, "徒歩")),
///     at(2, "湯畑", 36.6214, 138.5968),
/// ];
///
/// let segments = segment(&events, 100.0);
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].means(), Some("徒歩"));
/// ```
pub fn segment(events: &[Event], max_distance_km: f64) -> Vec<ResolvedSegment<'_>> {
    let resolved: Vec<&Stay> = events
        .iter()
        .filter_map(Event::as_stay)
        .filter(|stay| stay.is_resolved())
        .collect();

    resolved
        .windows(2)
        .filter_map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let distance_km = from.coordinates().as_ref()?.distance_km(to.coordinates().as_ref()?);

            if distance_km > max_distance_km {
                tracing::debug!(
                    from = %from.place(),
                    to = %to.place(),
                    distance_km,
                    "Segment exceeds distance limit"
                );
                return None;
            }

            Some(ResolvedSegment {
                from,
                to,
                via: move_between(events, *from.position(), *to.position()),
                distance_km,
            })
        })
        .collect()
}

fn move_between(events: &[Event], after: usize, before: usize) -> Option<&Move> {
    events
        .iter()
        .filter_map(Event::as_move)
        .find(|mv| *mv.position() > after && *mv.position() < before)
}
