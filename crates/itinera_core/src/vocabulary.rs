//! Closed tag vocabularies for annotation.

use serde::{Deserialize, Serialize};

/// Default transport categories.
pub const DEFAULT_MOVE_TAGS: &[&str] = &[
    "徒歩",
    "車椅子",
    "自転車(電動)",
    "自転車(非電動)",
    "バイク",
    "バス",
    "タクシー",
    "自動車(運転)",
    "自動車(同乗)",
];

/// Default activity categories.
pub const DEFAULT_ACTION_TAGS: &[&str] = &[
    "食事(飲酒あり)",
    "食事(飲酒なし・不明)",
    "軽食(カフェなど)",
    "買い物(日用品)",
    "買い物(お土産)",
    "ジョギング",
    "ウォーキング",
    "ハイキング",
    "散歩",
    "スポーツ",
    "レジャー",
    "ドライブ",
    "景色鑑賞",
    "名所観光",
    "休養・くつろぎ",
    "仕事",
    "介護・看護",
    "育児",
    "通院・療養",
];

/// Transport and activity categories an annotation may use.
///
/// # Examples
///
/// ```
/// use itinera_core::TagVocabulary;
///
/// let vocabulary = TagVocabulary::default();
/// assert!(vocabulary.contains("景色鑑賞"));
/// assert!(vocabulary.contains("バス"));
/// assert!(!vocabulary.contains("宇宙旅行"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TagVocabulary {
    /// Transport categories
    move_tags: Vec<String>,
    /// Activity categories
    action_tags: Vec<String>,
}

impl TagVocabulary {
    /// Build a vocabulary from explicit lists.
    pub fn new(move_tags: Vec<String>, action_tags: Vec<String>) -> Self {
        Self {
            move_tags,
            action_tags,
        }
    }

    /// Whether `tag` belongs to either list.
    pub fn contains(&self, tag: &str) -> bool {
        self.move_tags.iter().any(|t| t == tag) || self.action_tags.iter().any(|t| t == tag)
    }

    /// Keep only tags from the vocabulary, trimmed and deduplicated.
    pub fn filter<'a, I>(&self, tags: I) -> std::collections::BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        tags.into_iter()
            .map(str::trim)
            .filter(|tag| self.contains(tag))
            .map(str::to_string)
            .collect()
    }
}

impl Default for TagVocabulary {
    fn default() -> Self {
        Self {
            move_tags: DEFAULT_MOVE_TAGS.iter().map(|t| t.to_string()).collect(),
            action_tags: DEFAULT_ACTION_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_discards_unknown_tags() {
        let vocabulary = TagVocabulary::default();
        let kept = vocabulary.filter(["景色鑑賞", " 散歩 ", "宇宙旅行", "散歩"]);
        assert_eq!(kept.len(), 2);
        assert!(kept.contains("景色鑑賞"));
        assert!(kept.contains("散歩"));
    }

    #[test]
    fn custom_vocabulary_replaces_defaults() {
        let vocabulary = TagVocabulary::new(vec!["walk".into()], vec!["onsen".into()]);
        assert!(vocabulary.contains("onsen"));
        assert!(!vocabulary.contains("徒歩"));
    }
}
