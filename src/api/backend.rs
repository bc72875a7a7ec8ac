//! 分析バックエンドクライアント
//!
//! `GET {base}/api/channel?query=..`と`GET {base}/api/videos?query=..`の2つを扱う。

use crate::api::models::{ChannelRecord, VideoRecord};
use crate::config::BackendConfig;
use crate::error::{FetchFailure, LensError, LensResult};
use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};

pub const CHANNEL_ENDPOINT: &str = "/api/channel";
pub const VIDEOS_ENDPOINT: &str = "/api/videos";

/// 分析バックエンドのトレイト
#[async_trait]
pub trait AnalyticsBackend: Send + Sync {
    /// チャンネルレコードを取得
    async fn fetch_channel(&self, query: &str) -> Result<ChannelRecord, FetchFailure>;

    /// 動画一覧を取得（配列以外のレスポンスは空として扱う）
    async fn fetch_videos(&self, query: &str) -> Result<Vec<VideoRecord>, FetchFailure>;
}

/// reqwestによるHTTP実装
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> LensResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| LensError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// エンドポイントURLを構築（クエリはパーセントエンコード）
    pub fn endpoint_url(&self, endpoint: &str, query: &str) -> String {
        format!(
            "{}{}?query={}",
            self.base_url,
            endpoint,
            urlencoding::encode(query)
        )
    }

    async fn get_json(&self, endpoint: &str, query: &str) -> Result<Value, FetchFailure> {
        let url = self.endpoint_url(endpoint, query);
        let start = Instant::now();

        tracing::debug!(url = %url, "📡 API request sent");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("❌ Request to {} failed: {}", endpoint, e);
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                endpoint = endpoint,
                status = status.as_u16(),
                "⚠️ Non-success response from backend"
            );
            return Err(FetchFailure::status(endpoint, status.as_u16()));
        }

        let text = response.text().await?;

        tracing::debug!(
            endpoint = endpoint,
            response_size_bytes = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "📨 API response received"
        );

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl AnalyticsBackend for HttpBackend {
    async fn fetch_channel(&self, query: &str) -> Result<ChannelRecord, FetchFailure> {
        let value = self.get_json(CHANNEL_ENDPOINT, query).await?;
        parse_channel(value)
    }

    async fn fetch_videos(&self, query: &str) -> Result<Vec<VideoRecord>, FetchFailure> {
        let value = self.get_json(VIDEOS_ENDPOINT, query).await?;
        Ok(parse_videos(value))
    }
}

/// チャンネルのペイロードを解釈（オブジェクト以外は失敗）
pub fn parse_channel(value: Value) -> Result<ChannelRecord, FetchFailure> {
    if !value.is_object() {
        return Err(FetchFailure::malformed(
            CHANNEL_ENDPOINT,
            format!("expected a JSON object, got {}", json_kind(&value)),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

/// 動画一覧のペイロードを解釈
///
/// 配列以外は空のリストになる。配列内で解釈できない要素は読み飛ばす。
pub fn parse_videos(value: Value) -> Vec<VideoRecord> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            tracing::warn!(
                "⚠️ Video list payload is {}, treating as empty",
                json_kind(&other)
            );
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, item)| match serde_json::from_value::<VideoRecord>(item) {
                Ok(video) => Some(video),
                Err(e) => {
                    tracing::debug!(index = index, error = %e, "Skipping malformed video entry");
                    None
                }
            },
        )
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
