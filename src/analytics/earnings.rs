use crate::analytics::coercion::sanitize;
use serde::{Deserialize, Serialize};

/// 1000再生あたりの収益下限（CPM）
pub const LOW_RATE_PER_MILLE: f64 = 0.5;
/// 1000再生あたりの収益上限（CPM）
pub const HIGH_RATE_PER_MILLE: f64 = 5.0;

/// 推定収益レンジ（小数点以下2桁の文字列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsRange {
    pub low: String,
    pub high: String,
}

/// 総再生数から推定収益レンジを算出
pub fn estimate_earnings(views: f64) -> EarningsRange {
    let mille = sanitize(views) / 1000.0;

    EarningsRange {
        low: format_cents(mille * LOW_RATE_PER_MILLE),
        high: format_cents(mille * HIGH_RATE_PER_MILLE),
    }
}

/// 小数点以下2桁に丸めて文字列化（0.5セントは切り上げ）
///
/// `{:.2}`単体だと偶数丸めになり0.125が"0.12"になる。
fn format_cents(amount: f64) -> String {
    format!("{:.2}", (amount * 100.0).round() / 100.0)
}
