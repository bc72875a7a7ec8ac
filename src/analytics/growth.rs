use crate::analytics::coercion::sanitize;
use serde::{Deserialize, Serialize};

/// 30日間の登録者増加率の下限（%）
pub const MIN_GROWTH_PERCENT: f64 = 1.0;
/// 30日間の登録者増加率の上限（%）
pub const MAX_GROWTH_PERCENT: f64 = 3.0;

/// 30日間の予測登録者増加数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GrowthRange {
    pub min: u64,
    pub max: u64,
}

/// 現在の登録者数から30日間の増加数レンジを予測
///
/// 下限を過大にしないよう四捨五入ではなく切り捨てる。
pub fn predict_growth(subscribers: f64) -> GrowthRange {
    let subscribers = sanitize(subscribers);

    GrowthRange {
        min: percent_of(subscribers, MIN_GROWTH_PERCENT),
        max: percent_of(subscribers, MAX_GROWTH_PERCENT),
    }
}

fn percent_of(value: f64, percent: f64) -> u64 {
    (value * percent / 100.0).floor() as u64
}
