use crate::api::models::VideoRecord;

/// 「トップパフォーマンス」パネルの表示件数
pub const TOP_PERFORMING_COUNT: usize = 3;
/// 動画テーブルの表示件数
pub const TABLE_COUNT: usize = 10;

/// ランキング条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankOptions {
    /// 最大件数
    pub cap: usize,
    /// 再生数0の動画を除外するか
    pub positive_views_only: bool,
}

impl RankOptions {
    pub const TOP_PERFORMING: Self = Self {
        cap: TOP_PERFORMING_COUNT,
        positive_views_only: true,
    };

    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            ..Self::TOP_PERFORMING
        }
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self::TOP_PERFORMING
    }
}

/// 再生数の降順に並べて先頭`cap`件を返す
///
/// 同じ再生数の動画は入力順を保つ（安定ソート）。入力は変更しない。
pub fn rank_videos(videos: &[VideoRecord], options: RankOptions) -> Vec<VideoRecord> {
    let mut scored: Vec<(f64, &VideoRecord)> = videos
        .iter()
        .map(|video| (video.view_count(), video))
        .filter(|(views, _)| !options.positive_views_only || *views > 0.0)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(options.cap)
        .map(|(_, video)| video.clone())
        .collect()
}

/// トップパフォーマンス動画（再生数上位3件）
pub fn top_performing(videos: &[VideoRecord]) -> Vec<VideoRecord> {
    rank_videos(videos, RankOptions::TOP_PERFORMING)
}

/// テーブル表示用: バックエンドの返却順のまま先頭`cap`件
pub fn table_listing(videos: &[VideoRecord], cap: usize) -> Vec<VideoRecord> {
    videos.iter().take(cap).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn video(id: &str, views: Value) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            title: format!("Video {}", id),
            views,
            ..Default::default()
        }
    }

    fn ids(videos: &[VideoRecord]) -> Vec<&str> {
        videos.iter().map(|v| v.video_id.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_and_capped() {
        let videos = vec![
            video("a", json!(10)),
            video("b", json!(500)),
            video("c", json!("300")),
            video("d", json!(1000)),
            video("e", json!(20)),
        ];

        let top = top_performing(&videos);
        assert_eq!(ids(&top), vec!["d", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let videos = vec![
            video("first", json!(100)),
            video("big", json!(900)),
            video("second", json!(100)),
            video("third", json!("100")),
        ];

        let ranked = rank_videos(&videos, RankOptions::with_cap(10));
        assert_eq!(ids(&ranked), vec!["big", "first", "second", "third"]);
    }

    #[test]
    fn test_zero_and_invalid_views_filtered() {
        let videos = vec![
            video("zero", json!(0)),
            video("null", Value::Null),
            video("text", json!("lots")),
            video("ok", json!(5)),
        ];

        let top = top_performing(&videos);
        assert_eq!(ids(&top), vec!["ok"]);
        assert!(top.iter().all(|v| v.view_count() > 0.0));
    }

    #[test]
    fn test_without_filter_keeps_zero_views() {
        let videos = vec![video("zero", json!(0)), video("ok", json!(5))];
        let ranked = rank_videos(
            &videos,
            RankOptions {
                cap: 10,
                positive_views_only: false,
            },
        );
        assert_eq!(ids(&ranked), vec!["ok", "zero"]);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let videos = vec![video("a", json!(1)), video("b", json!(2))];
        let before = videos.clone();
        let _ = top_performing(&videos);
        assert_eq!(videos, before);
    }

    #[test]
    fn test_empty_input() {
        assert!(top_performing(&[]).is_empty());
        assert!(table_listing(&[], TABLE_COUNT).is_empty());
    }

    #[test]
    fn test_table_listing_keeps_source_order() {
        let videos: Vec<VideoRecord> = (0..12)
            .map(|i| video(&format!("v{}", i), json!(i * 10)))
            .collect();

        let table = table_listing(&videos, TABLE_COUNT);
        assert_eq!(table.len(), 10);
        assert_eq!(table[0].video_id, "v0");
        assert_eq!(table[9].video_id, "v9");
    }
}
