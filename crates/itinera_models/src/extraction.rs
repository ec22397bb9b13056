//! Utilities for pulling JSON out of model responses.
//!
//! Models often wrap JSON in markdown fences or surround it with prose.

use itinera_error::{ItineraResult, JsonError};

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` or bare ``` ... ```
/// 2. Whichever of `[ ... ]` or `{ ... }` starts first, with balanced nesting
///
/// # Errors
///
/// Returns an error if no JSON-looking text is found.
///
/// # Examples
///
/// ```
/// use itinera_models::extract_json;
///
/// let response = "```json\n[{\"place\": \"湯畑\"}]\n```";
/// assert_eq!(extract_json(response).unwrap(), "[{\"place\": \"湯畑\"}]");
///
/// let response = "訪問地は次の通りです: {\"emotion_score\": 0.8}";
/// assert_eq!(extract_json(response).unwrap(), "{\"emotion_score\": 0.8}");
/// ```
pub fn extract_json(response: &str) -> ItineraResult<String> {
    if let Some(json) = extract_from_code_block(response) {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let ordered = match (bracket_pos, brace_pos) {
        (Some(b), Some(c)) if b < c => [('[', ']'), ('{', '}')],
        (Some(_), None) => [('[', ']'), ('{', '}')],
        _ => [('{', '}'), ('[', ']')],
    };

    for (open, close) in ordered {
        if let Some(json) = extract_balanced(response, open, close) {
            return Ok(json);
        }
    }

    tracing::debug!(response_length = response.len(), "No JSON found in model response");

    Err(JsonError::new(format!(
        "No JSON found in response (length: {})",
        response.len()
    ))
    .into())
}

/// Extract content from a markdown code block.
///
/// A missing closing fence (truncated response) yields everything after the
/// opening fence.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let after_fence = start + 3;

    // Skip the language tag, if any
    let content_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);

    let content = match response[content_start..].find("```") {
        Some(end) => &response[content_start..content_start + end],
        None => &response[content_start..],
    };
    Some(content.trim().to_string())
}

/// Extract content between balanced delimiters, ignoring those inside strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON into `T`.
///
/// # Errors
///
/// Returns an error if `json_str` is not valid JSON for `T`.
pub fn parse_json<T>(json_str: &str) -> ItineraResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::debug!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        JsonError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}
