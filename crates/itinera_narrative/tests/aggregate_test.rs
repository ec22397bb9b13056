//! Tests for per-place annotation.

mod test_utils;

use itinera_core::{Annotation, Coordinates, Event, Move, Resolution, ResolutionSource, Stay};
use itinera_error::AnnotationErrorKind;
use itinera_narrative::aggregate_and_annotate;
use std::collections::BTreeSet;
use test_utils::MockAnnotator;

fn resolved(position: usize, place: &str, text: &str) -> Event {
    let mut stay = Stay::new(position, place).with_experience_text(text);
    stay.resolve(Resolution {
        coordinates: Coordinates::new(36.6214, 138.5968),
        source: ResolutionSource::Primary,
    });
    Event::from(stay)
}

fn kusatsu_events() -> Vec<Event> {
    vec![
        resolved(0, "湯畑", "到着"),
        Event::from(Move::new(1, "徒歩")),
        resolved(2, "西の河原公園", "露天風呂"),
        Event::from(Move::new(3, "徒歩")),
        resolved(4, "湯畑", "散策"),
    ]
}

#[tokio::test]
async fn test_fragments_are_joined_and_result_copied_to_every_stay() -> anyhow::Result<()> {
    let annotator =
        MockAnnotator::new().answering("湯畑", Annotation::new(0.8, ["景色鑑賞"]));
    let mut events = kusatsu_events();

    let report = aggregate_and_annotate(&mut events, &annotator).await?;

    assert_eq!(report.places, 2);
    assert_eq!(report.annotated, 2);
    assert_eq!(report.failed, 0);

    let yubatake_calls: Vec<_> = annotator
        .calls()
        .into_iter()
        .filter(|(place, _)| place == "湯畑")
        .collect();
    assert_eq!(yubatake_calls, vec![("湯畑".to_string(), "到着 散策".to_string())]);

    let expected: BTreeSet<String> = ["景色鑑賞".to_string()].into();
    for stay in events.iter().filter_map(Event::as_stay) {
        if stay.place() == "湯畑" {
            assert_eq!(*stay.sentiment_score(), 0.8);
            assert_eq!(stay.tags(), &expected);
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_annotation_runs_once_per_distinct_place() -> anyhow::Result<()> {
    let annotator = MockAnnotator::new();
    let mut events: Vec<Event> = (0..6)
        .map(|position| resolved(position, "草津温泉", "入浴"))
        .collect();

    aggregate_and_annotate(&mut events, &annotator).await?;

    assert_eq!(annotator.call_count(), 1);
    assert_eq!(annotator.calls()[0].1, "入浴 入浴 入浴 入浴 入浴 入浴");
    Ok(())
}

#[tokio::test]
async fn test_recoverable_failure_leaves_place_neutral() -> anyhow::Result<()> {
    let annotator = MockAnnotator::new()
        .failing("湯畑", AnnotationErrorKind::Http("timeout".into()))
        .answering("西の河原公園", Annotation::new(0.9, ["入浴"]));
    let mut events = kusatsu_events();

    let report = aggregate_and_annotate(&mut events, &annotator).await?;

    assert_eq!(report.failed, 1);
    assert_eq!(report.annotated, 1);
    let yubatake = events[0].as_stay().unwrap();
    assert_eq!(*yubatake.sentiment_score(), 0.5);
    assert!(yubatake.tags().is_empty());
    assert_eq!(*events[2].as_stay().unwrap().sentiment_score(), 0.9);
    Ok(())
}

#[tokio::test]
async fn test_quota_failure_is_returned() {
    let annotator = MockAnnotator::new()
        .failing("湯畑", AnnotationErrorKind::QuotaExceeded("insufficient_quota".into()));
    let mut events = kusatsu_events();

    let err = aggregate_and_annotate(&mut events, &annotator)
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(annotator.call_count(), 1);
}

#[tokio::test]
async fn test_stays_without_text_are_still_annotated() -> anyhow::Result<()> {
    let annotator = MockAnnotator::new();
    let mut events = vec![resolved(0, "草津温泉", "")];

    aggregate_and_annotate(&mut events, &annotator).await?;

    assert_eq!(annotator.calls(), vec![("草津温泉".to_string(), String::new())]);
    Ok(())
}

#[tokio::test]
async fn test_places_without_a_resolved_stay_are_not_annotated() -> anyhow::Result<()> {
    let annotator = MockAnnotator::new()
        .answering("湯畑", Annotation::new(0.8, ["景色鑑賞"]))
        .answering("どこでもない", Annotation::new(0.1, ["散歩"]));
    let mut events = vec![
        resolved(0, "湯畑", "到着"),
        Event::from(Move::new(1, "徒歩")),
        Event::from(Stay::new(2, "どこでもない").with_experience_text("迷子")),
    ];

    let report = aggregate_and_annotate(&mut events, &annotator).await?;

    assert_eq!(annotator.call_count(), 1);
    assert_eq!(annotator.calls()[0].0, "湯畑");
    assert_eq!(report.places, 2);
    assert_eq!(report.annotated, 1);
    assert_eq!(report.unresolved, 1);
    let lost = events[2].as_stay().unwrap();
    assert_eq!(*lost.sentiment_score(), 0.5);
    assert!(lost.tags().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_place_with_one_resolved_stay_annotates_all_its_stays() -> anyhow::Result<()> {
    let annotator = MockAnnotator::new().answering("湯畑", Annotation::new(0.7, ["入浴"]));
    let mut events = vec![
        Event::from(Stay::new(0, "湯畑").with_experience_text("到着")),
        resolved(1, "湯畑", "散策"),
    ];

    aggregate_and_annotate(&mut events, &annotator).await?;

    assert_eq!(annotator.calls(), vec![("湯畑".to_string(), "到着 散策".to_string())]);
    assert_eq!(*events[0].as_stay().unwrap().sentiment_score(), 0.7);
    Ok(())
}
