//! エラー型定義
//!
//! 取得系の失敗は`FetchFailure`一種類にまとめ、セッション境界で
//! ユーザー向けメッセージへ変換する。

use thiserror::Error;

/// 取得失敗時にユーザーへ表示するメッセージ
pub const FETCH_FAILURE_MESSAGE: &str =
    "Failed to fetch channel data. Please check the channel name and try again.";

/// バックエンド呼び出しの失敗
///
/// バリアントはログ用に原因を保持するだけで、呼び出し側では区別しない。
#[derive(Error, Debug)]
pub enum FetchFailure {
    /// ネットワークエラー・タイムアウト
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 2xx以外のステータス
    #[error("Unexpected HTTP status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// JSONとして読めないレスポンス
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// JSONだが期待した形ではないレスポンス
    #[error("Malformed {endpoint} payload: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl FetchFailure {
    pub fn status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
        }
    }

    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// ユーザー向けメッセージ（原因によらず同一）
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILURE_MESSAGE
    }
}

/// クレート全体のエラー型
#[derive(Error, Debug)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl LensError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type LensResult<T> = Result<T, LensError>;
