//! Tests for region-hint inference and event extraction.

mod test_utils;

use itinera_error::AnnotationErrorKind;
use itinera_interface::NarrativeExtractor;
use itinera_models::{ExtractionSettings, LlmNarrativeExtractor};
use test_utils::{MockLanguageModel, Reply};

fn settings() -> ExtractionSettings {
    ExtractionSettings {
        extraction_model: "gpt-4o".to_string(),
        extraction_temperature: 0.5,
        hint_model: "gpt-3.5-turbo".to_string(),
        hint_temperature: 0.2,
        default_region_hint: "日本".to_string(),
    }
}

#[tokio::test]
async fn test_region_hint_is_trimmed() -> anyhow::Result<()> {
    let model = MockLanguageModel::answering("  群馬県\n");
    let extractor = LlmNarrativeExtractor::new(model.clone(), settings());

    let hint = extractor.region_hint("草津温泉に行きました。").await?;

    assert_eq!(hint, "群馬県");
    assert_eq!(model.requests()[0].model, "gpt-3.5-turbo");
    assert_eq!(model.requests()[0].temperature, Some(0.2));
    Ok(())
}

#[tokio::test]
async fn test_region_hint_defaults_on_failure() -> anyhow::Result<()> {
    let model = MockLanguageModel::new([Reply::Fail(AnnotationErrorKind::Http(
        "connection reset".to_string(),
    ))]);
    let extractor = LlmNarrativeExtractor::new(model, settings());

    assert_eq!(extractor.region_hint("旅行記").await?, "日本");
    Ok(())
}

#[tokio::test]
async fn test_region_hint_for_blank_narrative_skips_call() -> anyhow::Result<()> {
    let model = MockLanguageModel::default();
    let extractor = LlmNarrativeExtractor::new(model.clone(), settings());

    assert_eq!(extractor.region_hint("  ").await?, "日本");
    assert_eq!(model.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_region_hint_propagates_quota_failure() {
    let model = MockLanguageModel::new([Reply::Fail(AnnotationErrorKind::QuotaExceeded(
        "insufficient_quota".to_string(),
    ))]);
    let extractor = LlmNarrativeExtractor::new(model, settings());

    let err = extractor.region_hint("旅行記").await.expect_err("quota is fatal");
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_extract_events_strips_fences() -> anyhow::Result<()> {
    let model = MockLanguageModel::answering(
        "以下が結果です。\n```json\n[\n  {\"type\": \"stay\", \"place\": \"湯畑\", \"latitude\": 36.6214, \"longitude\": 138.5968},\n  {\"type\": \"move\", \"means\": \"徒歩\"}\n]\n```",
    );
    let extractor = LlmNarrativeExtractor::new(model.clone(), settings());

    let records = extractor.extract_events("湯畑を散策", "群馬県").await?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["place"], "湯畑");
    assert_eq!(records[1]["means"], "徒歩");
    assert!(model.requests()[0].messages[0].content.contains("群馬県"));
    Ok(())
}

#[tokio::test]
async fn test_extract_events_rejects_non_list() -> anyhow::Result<()> {
    let model = MockLanguageModel::answering(r#"{"place": "湯畑"}"#);
    let extractor = LlmNarrativeExtractor::new(model, settings());

    assert!(extractor.extract_events("湯畑", "群馬県").await?.is_empty());
    Ok(())
}
