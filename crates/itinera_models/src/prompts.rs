//! Prompt construction for the three model tasks.

use itinera_core::{Message, TagVocabulary};

/// Messages asking for the single prefecture a narrative most likely covers.
pub fn region_hint_messages(narrative: &str) -> Vec<Message> {
    vec![
        Message::system("都道府県名を答えるときは、県名のみを答えてください。"),
        Message::user(format!(
            "以下の旅行記から筆者が訪れたと考えられる都道府県を1つだけ答えてください。\
             特定の語句にこだわらず、旅行記全体から総合的に判断してください。\n\n{}",
            narrative
        )),
    ]
}

/// Messages asking for an ordered JSON list of stay and move records.
pub fn extraction_messages(narrative: &str, region_hint: &str) -> Vec<Message> {
    vec![
        Message::system(format!(
            "あなたは旅行記から訪問地と移動を正確に抽出する旅行ガイドです。\
             日本の「{}」周辺の地理に詳しいです。",
            region_hint
        )),
        Message::user(format!(
            r#"以下の旅行記から、訪れた場所と場所の間の移動を時系列順に抽出してください。
訪問は "type": "stay" とし、"place"（地名）、"latitude"（緯度）、"longitude"（経度）、
"experience"（その場所での経験）、"reasoning"（その座標と推定した理由）を含めてください。
移動は "type": "move" とし、"means"（移動手段）と "experience"（移動中の経験）を含めてください。
緯度経度は「{region}」周辺の地理とテキストの文脈から、できるだけ高い精度で推定してください。
出力は必ずJSON形式のリストのみとしてください。
例:
[
  {{"type": "stay", "place": "草津温泉バスターミナル", "latitude": 36.6222, "longitude": 138.5964, "experience": "草津温泉バスターミナルに到着しました。", "reasoning": "到着地として明記されているため。"}},
  {{"type": "move", "means": "徒歩", "experience": "坂道を歩いて湯畑へ向かいました。"}},
  {{"type": "stay", "place": "湯畑", "latitude": 36.6214, "longitude": 138.5968, "experience": "湯畑を散策しました。", "reasoning": "草津温泉の中心的な観光地であるため。"}}
]
テキスト: {narrative}"#,
            region = region_hint,
            narrative = narrative
        )),
    ]
}

/// Messages asking for a sentiment score and vocabulary tags as a JSON object.
pub fn annotation_messages(text: &str, vocabulary: &TagVocabulary) -> Vec<Message> {
    vec![
        Message::system(
            "あなたはテキストを分析し、指定されたJSON形式で感情スコアとタグを正確に出力する専門家です。",
        ),
        Message::user(format!(
            r#"以下は旅行中のある場所での経験を記述したテキストです。
1. 感情分析: テキスト全体の感情を0.0（非常にネガティブ）から1.0（非常にポジティブ）で評価してください。ニュートラルは0.5です。
2. 移動タグ: 「移動手段」タグリストから関連するタグをすべて選んでください。
3. 行動タグ: 「行動」タグリストから関連するタグをすべて選んでください。
該当するタグがなければ空のリスト [] としてください。
出力は次のキーを持つJSONオブジェクトのみとしてください: "emotion_score"（数値）, "move_tags"（文字列のリスト）, "action_tags"（文字列のリスト）
例: {{"emotion_score": 0.85, "move_tags": ["バス", "徒歩"], "action_tags": ["景色鑑賞"]}}
---
「移動手段」タグリスト: {moves}
---
「行動」タグリスト: {actions}
---
テキスト: 「{text}」"#,
            moves = vocabulary.move_tags().join(", "),
            actions = vocabulary.action_tags().join(", "),
            text = text
        )),
    ]
}
