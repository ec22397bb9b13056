//! Source narrative documents and document id lists.

use itinera_error::{ItineraResult, SourceError, SourceErrorKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One entry of a source document.
#[derive(Debug, Deserialize)]
struct SourceEntry {
    #[serde(default)]
    text: Vec<String>,
}

/// Path of the source document for `document_id`.
///
/// # Examples
///
/// ```
/// use itinera_narrative::source_path;
/// use std::path::Path;
///
/// let path = source_path(Path::new("data"), "1234", ".tra.json");
/// assert_eq!(path, Path::new("data/1234.tra.json"));
/// ```
pub fn source_path(source_dir: &Path, document_id: &str, suffix: &str) -> PathBuf {
    source_dir.join(format!("{}{}", document_id, suffix))
}

/// Concatenate every text fragment of a source document with single spaces.
///
/// # Examples
///
/// ```
/// use itinera_narrative::parse_narrative;
///
/// let body = r#"[{"text": ["草津に到着。", "湯畑を散策。"]}, {"text": ["温泉に入った。"]}]"#;
/// let narrative = parse_narrative("1234", body).unwrap();
/// assert_eq!(narrative, "草津に到着。 湯畑を散策。 温泉に入った。");
/// ```
pub fn parse_narrative(document_id: &str, body: &str) -> ItineraResult<String> {
    let entries: Vec<SourceEntry> = serde_json::from_str(body).map_err(|e| {
        SourceError::new(SourceErrorKind::Parse(format!("{}: {}", document_id, e)))
    })?;

    let narrative = entries
        .iter()
        .flat_map(|entry| entry.text.iter())
        .map(|fragment| fragment.trim())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if narrative.is_empty() {
        return Err(SourceError::new(SourceErrorKind::Empty(document_id.to_string())).into());
    }
    Ok(narrative)
}

/// Read and flatten the source document for `document_id`.
#[tracing::instrument(skip(source_dir))]
pub fn read_narrative(source_dir: &Path, document_id: &str, suffix: &str) -> ItineraResult<String> {
    let path = source_path(source_dir, document_id, suffix);
    if !path.exists() {
        return Err(SourceError::new(SourceErrorKind::NotFound(path.display().to_string())).into());
    }

    let body = std::fs::read_to_string(&path).map_err(|e| {
        SourceError::new(SourceErrorKind::Read(format!("{}: {}", path.display(), e)))
    })?;

    let narrative = parse_narrative(document_id, &body)?;
    tracing::debug!(chars = narrative.chars().count(), "Loaded narrative");
    Ok(narrative)
}

/// Split a comma-separated id list, ignoring blanks.
///
/// # Examples
///
/// ```
/// use itinera_narrative::parse_document_ids;
///
/// assert_eq!(parse_document_ids("12, 34,,56\n"), vec!["12", "34", "56"]);
/// ```
pub fn parse_document_ids(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a comma-separated id list file. An empty list is an error.
pub fn read_document_ids(path: &Path) -> ItineraResult<Vec<String>> {
    let list = std::fs::read_to_string(path).map_err(|e| {
        SourceError::new(SourceErrorKind::IdList(format!("{}: {}", path.display(), e)))
    })?;

    let ids = parse_document_ids(&list);
    if ids.is_empty() {
        return Err(SourceError::new(SourceErrorKind::IdList(format!(
            "{}: no document ids",
            path.display()
        )))
        .into());
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_without_text_are_ignored() {
        let body = r#"[{"title": "day 1"}, {"text": ["到着"]}]"#;
        assert_eq!(parse_narrative("1", body).unwrap(), "到着");
    }

    #[test]
    fn document_with_no_fragments_is_empty() {
        let err = parse_narrative("1", r#"[{"text": []}]"#).unwrap_err();
        assert!(err.to_string().contains("no text"));
    }

    #[test]
    fn non_array_document_fails_to_parse() {
        let err = parse_narrative("1", r#"{"text": ["a"]}"#).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn blank_id_list_yields_nothing() {
        assert!(parse_document_ids(" , ,\n").is_empty());
    }
}
