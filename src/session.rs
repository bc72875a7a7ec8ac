//! 分析セッション
//!
//! クエリ・ロード状態・エラー・取得済みレコードを1つのスナップショットとして保持し、
//! 「分析」アクションで2つのバックエンド呼び出しを行う。
//!
//! 同時に複数の分析が走った場合は、リクエストトークンが最新のものだけを反映する
//! （古い結果は破棄）。

use crate::api::backend::AnalyticsBackend;
use crate::api::models::{ChannelRecord, VideoRecord};
use crate::dashboard::{DashboardView, ViewOptions};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// セッション状態のスナップショット
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// 入力中のクエリ
    pub query: String,
    /// 最後に分析を開始したクエリ
    pub analyzed_query: Option<String>,
    pub channel: Option<ChannelRecord>,
    pub videos: Vec<VideoRecord>,
    pub loading: bool,
    pub error: Option<String>,
    /// この状態を生成した分析のトークン（0は未分析）
    pub request_token: u64,
}

/// セッションの状態区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initial,
    Loading,
    Ready,
    Failed,
}

impl SessionSnapshot {
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.error.is_some() {
            SessionPhase::Failed
        } else if self.channel.is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Initial
        }
    }
}

/// `analyze`の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    /// クエリが空のためリクエストしなかった
    Skipped,
    /// 結果をセッションに反映した
    Applied,
    /// 取得に失敗し、エラーをセッションに反映した
    Failed,
    /// より新しい分析が開始されていたため結果を破棄した
    Discarded,
}

/// 分析セッション（オーケストレーター）
pub struct AnalysisSession {
    backend: Arc<dyn AnalyticsBackend>,
    state: RwLock<SessionSnapshot>,
    last_token: AtomicU64,
}

impl AnalysisSession {
    pub fn new(backend: Arc<dyn AnalyticsBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(SessionSnapshot::default()),
            last_token: AtomicU64::new(0),
        }
    }

    /// 現在の状態を取得
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.read().clone()
    }

    /// 現在の状態から表示用ビューを導出
    pub fn view(&self, options: &ViewOptions) -> DashboardView {
        DashboardView::from_snapshot(&self.state.read(), options)
    }

    /// クエリを更新（取得済みの結果はそのまま）
    pub fn set_query(&self, query: impl Into<String>) {
        self.state.write().query = query.into();
    }

    /// クエリを設定して分析
    pub async fn analyze_query(&self, query: impl Into<String>) -> AnalyzeOutcome {
        self.set_query(query);
        self.analyze().await
    }

    /// 現在のクエリで分析を実行
    ///
    /// 開始時にチャンネル・動画・エラーをクリアしてから2つの取得を並行で行う。
    pub async fn analyze(&self) -> AnalyzeOutcome {
        let (token, query) = {
            let mut state = self.state.write();
            if state.query.trim().is_empty() {
                debug!("Query is empty, skipping analysis");
                return AnalyzeOutcome::Skipped;
            }

            let token = self.last_token.fetch_add(1, Ordering::SeqCst) + 1;
            let query = state.query.clone();

            state.request_token = token;
            state.analyzed_query = Some(query.clone());
            state.channel = None;
            state.videos.clear();
            state.error = None;
            state.loading = true;

            (token, query)
        };

        info!(token = token, query = %query, "🔍 Starting channel analysis");

        let result = tokio::try_join!(
            self.backend.fetch_channel(&query),
            self.backend.fetch_videos(&query)
        );

        let mut state = self.state.write();
        if state.request_token != token {
            debug!(
                token = token,
                current_token = state.request_token,
                "🗑️ Discarding stale analysis result"
            );
            return AnalyzeOutcome::Discarded;
        }

        state.loading = false;
        match result {
            Ok((channel, videos)) => {
                info!(
                    token = token,
                    channel = %channel.title,
                    video_count = videos.len(),
                    "✅ Channel analysis completed"
                );
                state.channel = Some(channel);
                state.videos = videos;
                AnalyzeOutcome::Applied
            }
            Err(e) => {
                warn!(token = token, error = %e, "❌ Channel analysis failed");
                state.channel = None;
                state.videos.clear();
                state.error = Some(e.user_message().to_string());
                AnalyzeOutcome::Failed
            }
        }
    }
}
