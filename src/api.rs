pub mod backend; // 分析バックエンドHTTPクライアント
pub mod models;

pub use backend::{AnalyticsBackend, HttpBackend};
pub use models::{ChannelRecord, VideoRecord};
