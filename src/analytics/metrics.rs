use crate::analytics::coercion::sanitize;
use crate::analytics::earnings::{estimate_earnings, EarningsRange};
use crate::analytics::growth::{predict_growth, GrowthRange};
use crate::api::models::ChannelRecord;
use serde::{Deserialize, Serialize};

/// ヘルススコアの上限
pub const HEALTH_SCORE_MAX: u8 = 100;

/// 数値化済みのチャンネル合計値
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelTotals {
    pub subscribers: f64,
    pub views: f64,
    pub videos: f64,
}

impl ChannelTotals {
    pub fn new(subscribers: f64, views: f64, videos: f64) -> Self {
        Self {
            subscribers: sanitize(subscribers),
            views: sanitize(views),
            videos: sanitize(videos),
        }
    }

    pub fn from_record(channel: &ChannelRecord) -> Self {
        Self::new(
            channel.subscriber_count(),
            channel.view_count(),
            channel.video_count(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers == 0.0 && self.views == 0.0 && self.videos == 0.0
    }
}

/// チャンネル合計値から導出する指標
///
/// 読み出しのたびに再計算する。保持・更新はしない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub average_views_per_video: u64,
    pub subscribers_per_video: u64,
    pub health_score: u8,
    pub earnings: EarningsRange,
    pub growth: GrowthRange,
}

impl DerivedMetrics {
    pub fn from_totals(totals: &ChannelTotals) -> Self {
        let average_views_per_video = average_views_per_video(totals.views, totals.videos);
        let subscribers_per_video = subscribers_per_video(totals.subscribers, totals.videos);

        Self {
            average_views_per_video,
            subscribers_per_video,
            health_score: health_score(
                average_views_per_video,
                subscribers_per_video,
                totals.videos,
            ),
            earnings: estimate_earnings(totals.views),
            growth: predict_growth(totals.subscribers),
        }
    }

    pub fn from_record(channel: &ChannelRecord) -> Self {
        Self::from_totals(&ChannelTotals::from_record(channel))
    }
}

/// 1本あたりの平均再生数（動画0本なら0）
pub fn average_views_per_video(views: f64, videos: f64) -> u64 {
    rounded_ratio(views, videos)
}

/// 1本あたりの登録者数（動画0本なら0）
pub fn subscribers_per_video(subscribers: f64, videos: f64) -> u64 {
    rounded_ratio(subscribers, videos)
}

/// 平均再生数・登録者比・動画本数を合成したヒューリスティックスコア
///
/// `round(avg / 1000 + subs_per_video / 50 + videos / 10)`を100で頭打ちにする。
pub fn health_score(average_views_per_video: u64, subscribers_per_video: u64, videos: f64) -> u8 {
    let raw = average_views_per_video as f64 / 1000.0
        + subscribers_per_video as f64 / 50.0
        + sanitize(videos) / 10.0;

    sanitize(raw.round()).min(HEALTH_SCORE_MAX as f64) as u8
}

fn rounded_ratio(numerator: f64, denominator: f64) -> u64 {
    let numerator = sanitize(numerator);
    let denominator = sanitize(denominator);
    if denominator > 0.0 {
        (numerator / denominator).round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_zero_videos_yields_zero_ratios() {
        assert_eq!(average_views_per_video(5_000.0, 0.0), 0);
        assert_eq!(subscribers_per_video(1_000.0, 0.0), 0);

        let metrics = DerivedMetrics::from_totals(&ChannelTotals::new(1_000.0, 5_000.0, 0.0));
        assert_eq!(metrics.average_views_per_video, 0);
        assert_eq!(metrics.subscribers_per_video, 0);
        assert_eq!(metrics.health_score, 0);
    }

    #[test]
    fn test_ratios_are_rounded() {
        assert_eq!(average_views_per_video(1_000.0, 3.0), 333);
        assert_eq!(average_views_per_video(1_000.0, 6.0), 167);
        assert_eq!(subscribers_per_video(25.0, 2.0), 13);
    }

    #[test]
    fn test_health_score_is_clamped() {
        assert_eq!(health_score(100_000, 24, 50.0), 100);
        assert_eq!(health_score(u64::MAX, u64::MAX, f64::MAX), 100);
    }

    #[test]
    fn test_health_score_small_channel() {
        // 2000/1000 + 100/50 + 12/10 = 5.2
        assert_eq!(health_score(2_000, 100, 12.0), 5);
        // 0.4 + 0.2 + 0.3 = 0.9
        assert_eq!(health_score(400, 10, 3.0), 1);
        assert_eq!(health_score(0, 0, 0.0), 0);
    }

    #[test]
    fn test_health_score_bounds_over_inputs() {
        let magnitudes = [0.0, 1.0, 49.0, 999.0, 12_345.0, 1e9, 1e15];
        for subs in magnitudes {
            for views in magnitudes {
                for videos in magnitudes {
                    let metrics =
                        DerivedMetrics::from_totals(&ChannelTotals::new(subs, views, videos));
                    assert!(metrics.health_score <= HEALTH_SCORE_MAX);
                }
            }
        }
    }

    #[test]
    fn test_scenario_channel() {
        let channel: ChannelRecord = serde_json::from_value(json!({
            "title": "Scenario",
            "subscribers": "1200",
            "views": 5000000,
            "videos": 50
        }))
        .unwrap();

        let metrics = DerivedMetrics::from_record(&channel);
        assert_eq!(metrics.average_views_per_video, 100_000);
        assert_eq!(metrics.subscribers_per_video, 24);
        assert_eq!(metrics.health_score, 100);
        assert_eq!(metrics.earnings.low, "2500.00");
        assert_eq!(metrics.earnings.high, "25000.00");
        assert_eq!(metrics.growth, GrowthRange { min: 12, max: 36 });
    }

    #[test]
    fn test_totals_sanitize_inputs() {
        let totals = ChannelTotals::new(-10.0, f64::NAN, f64::INFINITY);
        assert!(totals.is_empty());
    }
}
