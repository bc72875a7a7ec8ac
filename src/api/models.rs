//! バックエンドが返すレコードの型
//!
//! 数値フィールドは受信したままの`serde_json::Value`で保持し、
//! アクセサ経由でのみ数値化する。

use crate::analytics::coercion::coerce_count;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// チャンネルレコード（`GET /api/channel`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub thumbnail: String,
    pub subscribers: Value,
    pub views: Value,
    pub videos: Value,
}

impl ChannelRecord {
    pub fn subscriber_count(&self) -> f64 {
        coerce_count(&self.subscribers)
    }

    pub fn view_count(&self) -> f64 {
        coerce_count(&self.views)
    }

    pub fn video_count(&self) -> f64 {
        coerce_count(&self.videos)
    }
}

/// 動画レコード（`GET /api/videos`の配列要素）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub video_id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub thumbnail: String,
    pub views: Value,
    pub likes: Value,
    pub comments: Value,
    #[serde(deserialize_with = "lenient_optional_text")]
    pub published_at: Option<String>,
}

impl VideoRecord {
    pub fn view_count(&self) -> f64 {
        coerce_count(&self.views)
    }

    pub fn like_count(&self) -> f64 {
        coerce_count(&self.likes)
    }

    pub fn comment_count(&self) -> f64 {
        coerce_count(&self.comments)
    }
}

/// null・数値・文字列のいずれでも受け付けるテキストフィールド
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
