//! スナップショットから表示用ビューモデルを導出する
//!
//! `DashboardView::from_snapshot`は純粋関数で、状態が変わるたびに呼び出して使う。

use crate::analytics::chart::{build_chart, ChartDataset, ChartScale};
use crate::analytics::metrics::{ChannelTotals, DerivedMetrics};
use crate::analytics::ranking::{rank_videos, table_listing, RankOptions};
use crate::api::models::{ChannelRecord, VideoRecord};
use crate::config::DisplayConfig;
use crate::session::SessionSnapshot;
use serde::Serialize;

/// ビュー生成オプション
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub chart_scale: ChartScale,
    pub top_count: usize,
    pub table_count: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        DisplayConfig::default().into()
    }
}

impl From<DisplayConfig> for ViewOptions {
    fn from(config: DisplayConfig) -> Self {
        Self {
            chart_scale: config.chart_scale,
            top_count: config.top_count,
            table_count: config.table_count,
        }
    }
}

/// チャンネル概要カード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelCard {
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: String,
    pub subscribers: u64,
    pub views: u64,
    pub videos: u64,
}

impl ChannelCard {
    fn from_record(channel: &ChannelRecord, totals: &ChannelTotals) -> Self {
        Self {
            title: channel.title.clone(),
            description: channel
                .description
                .as_ref()
                .filter(|text| !text.trim().is_empty())
                .cloned(),
            thumbnail: channel.thumbnail.clone(),
            subscribers: as_count(totals.subscribers),
            views: as_count(totals.views),
            videos: as_count(totals.videos),
        }
    }
}

/// 動画1行分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRow {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// `YYYY-MM-DD`形式（解釈できない場合は受信した文字列のまま）
    pub published: Option<String>,
}

impl From<&VideoRecord> for VideoRow {
    fn from(video: &VideoRecord) -> Self {
        Self {
            video_id: video.video_id.clone(),
            title: video.title.clone(),
            thumbnail: video.thumbnail.clone(),
            views: as_count(video.view_count()),
            likes: as_count(video.like_count()),
            comments: as_count(video.comment_count()),
            published: video.published_at.as_deref().and_then(format_published),
        }
    }
}

/// ダッシュボード全体のビューモデル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub channel: Option<ChannelCard>,
    pub metrics: Option<DerivedMetrics>,
    pub chart: Option<ChartDataset>,
    pub top_videos: Vec<VideoRow>,
    pub video_table: Vec<VideoRow>,
    /// トップパフォーマンスパネルを表示するか
    pub show_top_videos: bool,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &SessionSnapshot, options: &ViewOptions) -> Self {
        let query = snapshot
            .analyzed_query
            .clone()
            .unwrap_or_else(|| snapshot.query.clone());

        let (channel, metrics, chart) = match &snapshot.channel {
            Some(record) => {
                let totals = ChannelTotals::from_record(record);
                (
                    Some(ChannelCard::from_record(record, &totals)),
                    Some(DerivedMetrics::from_totals(&totals)),
                    build_chart(&totals, options.chart_scale),
                )
            }
            None => (None, None, None),
        };

        let top_videos: Vec<VideoRow> =
            rank_videos(&snapshot.videos, RankOptions::with_cap(options.top_count))
                .iter()
                .map(VideoRow::from)
                .collect();

        let video_table = table_listing(&snapshot.videos, options.table_count)
            .iter()
            .map(VideoRow::from)
            .collect();

        Self {
            query,
            loading: snapshot.loading,
            error: snapshot.error.clone(),
            channel,
            metrics,
            chart,
            show_top_videos: !top_videos.is_empty(),
            top_videos,
            video_table,
        }
    }
}

fn as_count(value: f64) -> u64 {
    value.round() as u64
}

fn format_published(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let formatted = chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.format("%Y-%m-%d").to_string())
        })
        .unwrap_or_else(|_| raw.to_string());

    Some(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario_snapshot() -> SessionSnapshot {
        let channel: ChannelRecord = serde_json::from_value(json!({
            "title": "Scenario",
            "description": "  ",
            "thumbnail": "https://img.example.com/c.png",
            "subscribers": "1200",
            "views": 5000000,
            "videos": 50
        }))
        .unwrap();

        let view_counts = [500, 12_000, 40, 9_000, 0, 77_000, 300, 12_000, 8, 150, 99_999, 2];
        let videos = view_counts
            .iter()
            .enumerate()
            .map(|(i, views)| VideoRecord {
                video_id: format!("v{}", i),
                title: format!("Video {}", i),
                views: json!(views),
                likes: json!(views / 10),
                published_at: Some("2024-05-06T07:08:09Z".to_string()),
                ..Default::default()
            })
            .collect();

        SessionSnapshot {
            query: "scenario".to_string(),
            analyzed_query: Some("scenario".to_string()),
            channel: Some(channel),
            videos,
            loading: false,
            error: None,
            request_token: 1,
        }
    }

    #[test]
    fn test_scenario_view() {
        let view = DashboardView::from_snapshot(&scenario_snapshot(), &ViewOptions::default());

        let metrics = view.metrics.unwrap();
        assert_eq!(metrics.average_views_per_video, 100_000);
        assert_eq!(metrics.subscribers_per_video, 24);
        assert_eq!(metrics.health_score, 100);

        let card = view.channel.unwrap();
        assert_eq!(card.subscribers, 1200);
        assert!(card.description.is_none());

        let top: Vec<&str> = view.top_videos.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(top, vec!["v10", "v5", "v1"]);
        assert!(view.show_top_videos);

        assert_eq!(view.video_table.len(), 10);
        assert_eq!(view.video_table[0].video_id, "v0");
        assert_eq!(view.video_table[9].video_id, "v9");
        assert_eq!(view.video_table[0].likes, 50);
        assert_eq!(view.video_table[0].published.as_deref(), Some("2024-05-06"));

        assert_eq!(view.chart.unwrap().bars.len(), 3);
    }

    #[test]
    fn test_initial_snapshot_has_no_derived_values() {
        let view = DashboardView::from_snapshot(&SessionSnapshot::default(), &ViewOptions::default());
        assert!(view.channel.is_none());
        assert!(view.metrics.is_none());
        assert!(view.chart.is_none());
        assert!(view.top_videos.is_empty());
        assert!(!view.show_top_videos);
    }

    #[test]
    fn test_zero_totals_have_metrics_but_no_chart() {
        let snapshot = SessionSnapshot {
            channel: Some(ChannelRecord {
                title: "Empty".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        let view = DashboardView::from_snapshot(&snapshot, &ViewOptions::default());
        let metrics = view.metrics.unwrap();
        assert_eq!(metrics.health_score, 0);
        assert_eq!(metrics.earnings.low, "0.00");
        assert!(view.chart.is_none());
    }

    #[test]
    fn test_videos_without_views_hide_top_panel() {
        let snapshot = SessionSnapshot {
            videos: vec![VideoRecord {
                video_id: "zero".to_string(),
                views: json!("unknown"),
                ..Default::default()
            }],
            ..scenario_snapshot()
        };

        let view = DashboardView::from_snapshot(&snapshot, &ViewOptions::default());
        assert!(view.top_videos.is_empty());
        assert!(!view.show_top_videos);
        assert_eq!(view.video_table.len(), 1);
    }

    #[test]
    fn test_error_snapshot() {
        let snapshot = SessionSnapshot {
            query: "missing".to_string(),
            error: Some("boom".to_string()),
            request_token: 3,
            ..Default::default()
        };

        let view = DashboardView::from_snapshot(&snapshot, &ViewOptions::default());
        assert_eq!(view.error.as_deref(), Some("boom"));
        assert_eq!(view.query, "missing");
        assert!(view.channel.is_none());
    }

    #[test]
    fn test_format_published() {
        assert_eq!(
            format_published("2023-12-31T23:30:00+09:00").as_deref(),
            Some("2023-12-31")
        );
        assert_eq!(format_published("2023-01-02").as_deref(), Some("2023-01-02"));
        assert_eq!(format_published("last week").as_deref(), Some("last week"));
        assert_eq!(format_published("  "), None);
    }
}
