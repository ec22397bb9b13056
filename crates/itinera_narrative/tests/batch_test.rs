//! Tests for the batch driver and render payload.

mod test_utils;

use chrono::{TimeZone, Utc};
use itinera_cache::InMemoryItineraryCache;
use itinera_core::{Coordinates, Event, Itinerary, Move, Stay};
use itinera_error::AnnotationErrorKind;
use itinera_geocode::ResolutionChain;
use itinera_narrative::{
    output_file_name, write_payload, BatchRunner, ItineraryEngine, RenderPayload, DEFAULT_CENTER,
};
use serde_json::{json, Value};
use std::path::Path;
use test_utils::{resolved_stay, write_source, MockAnnotator, MockExtractor, TableGeocoder};

const PALETTE: [&str; 2] = ["blue", "red"];

fn runner(annotator: MockAnnotator, source_dir: &Path) -> BatchRunner {
    let extractor = MockExtractor::new(
        "群馬県",
        vec![
            json!({"type": "stay", "place": "草津温泉"}),
            json!({"type": "move", "means": "徒歩"}),
            json!({"type": "stay", "place": "湯畑"}),
        ],
    );
    let primary = TableGeocoder::new("primary")
        .with("草津温泉, 群馬県", Coordinates::new(36.6222, 138.5964))
        .with("湯畑, 群馬県", Coordinates::new(36.6214, 138.5968));
    let engine = ItineraryEngine::new(
        Box::new(extractor),
        Box::new(annotator),
        ResolutionChain::new(Box::new(primary), Box::new(TableGeocoder::new("secondary"))),
        Box::new(InMemoryItineraryCache::new()),
        source_dir,
        ".tra.json",
    );
    BatchRunner::new(engine, PALETTE.iter().map(|c| c.to_string()).collect())
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|id| id.to_string()).collect()
}

#[tokio::test]
async fn test_colors_follow_batch_index_and_skips_continue() -> anyhow::Result<()> {
    let source = tempfile::tempdir()?;
    for id in ["a", "c", "d"] {
        write_source(source.path(), id, &["草津を旅した。"]);
    }
    let runner = runner(MockAnnotator::new(), source.path());

    let report = runner.run(&ids(&["a", "b", "c", "d"])).await;

    assert!(report.completed());
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].document_id(), "b");
    let colors: Vec<&str> = report
        .itineraries
        .iter()
        .map(|itinerary| itinerary.color().as_str())
        .collect();
    assert_eq!(colors, vec!["blue", "blue", "red"]);
    Ok(())
}

#[tokio::test]
async fn test_fatal_error_stops_batch_and_keeps_completed() -> anyhow::Result<()> {
    let source = tempfile::tempdir()?;
    write_source(source.path(), "a", &["草津を旅した。"]);
    write_source(source.path(), "b", &["草津を旅した。"]);
    let annotator = MockAnnotator::new()
        .failing("湯畑", AnnotationErrorKind::QuotaExceeded("insufficient_quota".into()));
    let shared = annotator.clone();
    let runner = runner(annotator, source.path());

    // a fails while annotating 湯畑, so nothing completes
    let report = runner.run(&ids(&["a", "b"])).await;

    assert!(!report.completed());
    assert!(report.itineraries.is_empty());
    assert!(report.aborted.as_deref().unwrap_or_default().contains("quota"));
    assert_eq!(shared.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_documents_before_a_fatal_error_are_kept() -> anyhow::Result<()> {
    let source = tempfile::tempdir()?;
    write_source(source.path(), "a", &["草津を旅した。"]);
    write_source(source.path(), "b", &["草津を旅した。"]);
    write_source(source.path(), "c", &["草津を旅した。"]);
    let runner = runner(MockAnnotator::new(), source.path());

    let first = runner.run(&ids(&["a"])).await;
    assert_eq!(first.itineraries.len(), 1);

    // a is served from cache, b reaches the revoked key
    let failing = runner_with_cache_of(&first.itineraries[0], source.path());
    let report = failing.run(&ids(&["a", "b", "c"])).await;

    assert_eq!(report.itineraries.len(), 1);
    assert_eq!(report.itineraries[0].document_id(), "a");
    assert!(report.aborted.is_some());
    Ok(())
}

fn runner_with_cache_of(itinerary: &Itinerary, source_dir: &Path) -> BatchRunner {
    use itinera_interface::ItineraryStore;

    let cache = InMemoryItineraryCache::new();
    cache.store(itinerary).expect("store");
    let engine = ItineraryEngine::new(
        Box::new(MockExtractor::new("群馬県", vec![json!({"place": "湯畑"})])),
        Box::new(
            MockAnnotator::new()
                .failing("湯畑", AnnotationErrorKind::Authentication("revoked".into())),
        ),
        ResolutionChain::new(
            Box::new(
                TableGeocoder::new("primary")
                    .with("湯畑, 群馬県", Coordinates::new(36.6214, 138.5968)),
            ),
            Box::new(TableGeocoder::new("secondary")),
        ),
        Box::new(cache),
        source_dir,
        ".tra.json",
    );
    BatchRunner::new(engine, vec!["blue".to_string()])
}

fn sample_itinerary() -> Itinerary {
    Itinerary::new(
        "1234",
        vec![
            Event::from(Stay::new(0, "不明な宿")),
            resolved_stay(1, "草津温泉", 36.6222, 138.5964),
            Event::from(Move::new(2, "徒歩")),
            resolved_stay(3, "湯畑", 36.6214, 138.5968),
        ],
        "blue",
        "群馬県",
    )
}

#[test]
fn test_payload_renders_only_resolved_stays() {
    let itineraries = vec![sample_itinerary()];

    let payload = RenderPayload::new(&itineraries, 100.0);

    assert_eq!(payload.center, Coordinates::new(36.6222, 138.5964));
    let rendered = &payload.itineraries[0];
    assert_eq!(rendered.stays.len(), 2);
    assert_eq!(rendered.moves.len(), 1);
    assert_eq!(rendered.segments.len(), 1);
    assert_eq!(rendered.segments[0].means(), Some("徒歩"));
}

#[test]
fn test_payload_center_defaults_to_tokyo_station() {
    let itineraries = vec![Itinerary::new(
        "1",
        vec![Event::from(Stay::new(0, "不明な宿"))],
        "blue",
        "日本",
    )];

    let payload = RenderPayload::new(&itineraries, 100.0);

    assert_eq!(payload.center, DEFAULT_CENTER);
}

#[test]
fn test_payload_is_written_under_batch_name() -> anyhow::Result<()> {
    let output = tempfile::tempdir()?;
    let itineraries = vec![sample_itinerary()];
    let payload = RenderPayload::new(&itineraries, 100.0);
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    let name = output_file_name(&["1234"], &now);

    let path = write_payload(output.path(), &name, &payload)?;

    assert_eq!(path, output.path().join("trace_map_1234.json"));
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(written["itineraries"][0]["document_id"], "1234");
    assert_eq!(written["itineraries"][0]["stays"].as_array().map(Vec::len), Some(2));
    assert_eq!(written["itineraries"][0]["segments"][0]["via"]["means"], "徒歩");
    Ok(())
}
