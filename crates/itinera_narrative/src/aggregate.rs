//! Per-place annotation with one capability call per distinct resolved place.

use itinera_core::{Annotation, Event};
use itinera_error::ItineraResult;
use itinera_interface::Annotator;
use tracing::{debug, error, instrument, warn};

/// Stays sharing one place name.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct PlaceGroup {
    /// Shared place name
    place: String,
    /// Indices into the event slice, in order
    indices: Vec<usize>,
    /// Non-empty experience texts joined by single spaces, in order
    combined_text: String,
}

/// Counts from one aggregation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationReport {
    /// Distinct places found
    pub places: usize,
    /// Places that received a capability result
    pub annotated: usize,
    /// Places left neutral after a recoverable failure
    pub failed: usize,
    /// Places skipped because none of their stays resolved
    pub unresolved: usize,
}

/// Group stays by identical place name, in first-appearance order.
///
/// # Examples
///
/// ```
/// use itinera_core::{Event, Move, Stay};
/// use itinera_narrative::group_by_place;
///
/// let events = vec![
///     Event::from(Stay::new(0, "湯畑").with_experience_text("到着")),
///     Event::from(Move::new(1, "徒歩")),
///     Event::from(Stay::new(2, "西の河原")),
///     Event::from(Stay::new(3, "湯畑").with_experience_text("散策")),
/// ];
///
/// let groups = group_by_place(&events);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].place(), "湯畑");
/// assert_eq!(groups[0].indices(), &vec![0, 3]);
/// assert_eq!(groups[0].combined_text(), "到着 散策");
/// ```
pub fn group_by_place(events: &[Event]) -> Vec<PlaceGroup> {
    let mut groups: Vec<PlaceGroup> = Vec::new();

    for (index, stay) in events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| event.as_stay().map(|stay| (index, stay)))
    {
        let text = stay.experience_text().trim();
        match groups.iter_mut().find(|group| group.place == *stay.place()) {
            Some(group) => {
                group.indices.push(index);
                if !text.is_empty() {
                    if !group.combined_text.is_empty() {
                        group.combined_text.push(' ');
                    }
                    group.combined_text.push_str(text);
                }
            }
            None => groups.push(PlaceGroup {
                place: stay.place().clone(),
                indices: vec![index],
                combined_text: text.to_string(),
            }),
        }
    }

    groups
}

/// Annotate resolved stays, calling `annotator` exactly once per distinct
/// place with at least one resolved stay.
///
/// The result for a place is copied onto every stay with that place. Places
/// with no resolved stay are not sent and keep neutral values. A recoverable
/// failure leaves the place's stays neutral; a fatal one (authentication,
/// quota) is returned immediately.
#[instrument(skip(events, annotator), fields(events = events.len()))]
pub async fn aggregate_and_annotate(
    events: &mut [Event],
    annotator: &dyn Annotator,
) -> ItineraResult<AggregationReport> {
    let groups = group_by_place(events);
    let mut report = AggregationReport {
        places: groups.len(),
        ..AggregationReport::default()
    };

    for group in &groups {
        let resolved = group.indices.iter().any(|&index| {
            events[index]
                .as_stay()
                .is_some_and(|stay| stay.is_resolved())
        });
        if !resolved {
            debug!(place = %group.place, "No resolved stay, leaving neutral");
            report.unresolved += 1;
            continue;
        }

        let annotation = match annotator.annotate(&group.place, &group.combined_text).await {
            Ok(annotation) => {
                report.annotated += 1;
                annotation
            }
            Err(e) if e.is_fatal() => {
                error!(place = %group.place, error = %e, "Fatal annotation failure");
                return Err(e);
            }
            Err(e) => {
                warn!(place = %group.place, error = %e, "Annotation failed, using neutral result");
                report.failed += 1;
                Annotation::neutral()
            }
        };

        for &index in &group.indices {
            if let Some(stay) = events[index].as_stay_mut() {
                stay.apply_annotation(&annotation);
            }
        }
    }

    debug!(
        places = report.places,
        annotated = report.annotated,
        failed = report.failed,
        unresolved = report.unresolved,
        "Annotation pass complete"
    );
    Ok(report)
}
