//! 棒グラフ用データセットの生成

use crate::analytics::metrics::ChannelTotals;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// カテゴリラベル（登録者・再生数・動画数の順）
pub const CHART_LABELS: [&str; 3] = ["Subscribers", "Views", "Videos"];

/// 固定の3色パレット
pub const CHART_PALETTE: [&str; 3] = ["#FF0000", "#3B82F6", "#10B981"];

/// 値のスケーリング方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum ChartScale {
    /// 元の値のまま
    #[default]
    #[display("raw")]
    Raw,
    /// log10(1 + x)
    #[display("log")]
    Log,
    /// 3値の最大を100とした割合
    #[display("ratio")]
    Ratio,
}

impl FromStr for ChartScale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "log" | "log10" => Ok(Self::Log),
            "ratio" | "percent" => Ok(Self::Ratio),
            other => Err(format!(
                "unknown chart scale '{}', expected raw, log or ratio",
                other
            )),
        }
    }
}

/// 1本分の棒
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub label: String,
    /// スケーリング後の値
    pub value: f64,
    /// スケーリング前の値
    pub raw: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub scale: ChartScale,
    pub bars: Vec<ChartBar>,
}

impl ChartDataset {
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|bar| bar.value).fold(0.0, f64::max)
    }
}

/// チャンネル合計値からデータセットを生成
///
/// 3値すべてが0の場合はグラフを表示しないため`None`を返す。
pub fn build_chart(totals: &ChannelTotals, scale: ChartScale) -> Option<ChartDataset> {
    if totals.is_empty() {
        return None;
    }

    let raw_values = [totals.subscribers, totals.views, totals.videos];
    let max = raw_values.iter().copied().fold(0.0, f64::max);

    let bars = CHART_LABELS
        .iter()
        .zip(CHART_PALETTE.iter())
        .zip(raw_values.iter())
        .map(|((label, color), &raw)| ChartBar {
            label: label.to_string(),
            value: scale_value(raw, max, scale),
            raw,
            color: color.to_string(),
        })
        .collect();

    Some(ChartDataset { scale, bars })
}

fn scale_value(raw: f64, max: f64, scale: ChartScale) -> f64 {
    match scale {
        ChartScale::Raw => raw,
        ChartScale::Log => (1.0 + raw).log10(),
        ChartScale::Ratio if max > 0.0 => raw * 100.0 / max,
        ChartScale::Ratio => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(dataset: &ChartDataset) -> Vec<f64> {
        dataset.bars.iter().map(|bar| bar.value).collect()
    }

    #[test]
    fn test_all_zero_totals_omit_dataset() {
        for scale in [ChartScale::Raw, ChartScale::Log, ChartScale::Ratio] {
            assert!(build_chart(&ChannelTotals::default(), scale).is_none());
        }
    }

    #[test]
    fn test_raw_dataset_labels_and_palette() {
        let dataset =
            build_chart(&ChannelTotals::new(1200.0, 5_000_000.0, 50.0), ChartScale::Raw).unwrap();

        let labels: Vec<&str> = dataset.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, CHART_LABELS.to_vec());
        let colors: Vec<&str> = dataset.bars.iter().map(|b| b.color.as_str()).collect();
        assert_eq!(colors, CHART_PALETTE.to_vec());
        assert_eq!(values(&dataset), vec![1200.0, 5_000_000.0, 50.0]);
        assert_eq!(dataset.max_value(), 5_000_000.0);
    }

    #[test]
    fn test_log_scale() {
        let dataset = build_chart(&ChannelTotals::new(99.0, 999.0, 0.0), ChartScale::Log).unwrap();
        let scaled = values(&dataset);
        assert!((scaled[0] - 2.0).abs() < 1e-9);
        assert!((scaled[1] - 3.0).abs() < 1e-9);
        assert_eq!(scaled[2], 0.0);
        assert_eq!(dataset.bars[1].raw, 999.0);
    }

    #[test]
    fn test_ratio_scale() {
        let dataset =
            build_chart(&ChannelTotals::new(50.0, 200.0, 10.0), ChartScale::Ratio).unwrap();
        assert_eq!(values(&dataset), vec![25.0, 100.0, 5.0]);
    }

    #[test]
    fn test_single_nonzero_value_still_renders() {
        let dataset = build_chart(&ChannelTotals::new(0.0, 0.0, 3.0), ChartScale::Raw).unwrap();
        assert_eq!(values(&dataset), vec![0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_parse_chart_scale() {
        assert_eq!("raw".parse::<ChartScale>().unwrap(), ChartScale::Raw);
        assert_eq!("LOG".parse::<ChartScale>().unwrap(), ChartScale::Log);
        assert_eq!("ratio".parse::<ChartScale>().unwrap(), ChartScale::Ratio);
        assert!("cubic".parse::<ChartScale>().is_err());
        assert_eq!(ChartScale::Log.to_string(), "log");
    }
}
