//! 正規化・指標導出レイヤー
//!
//! すべて純粋関数。I/Oや共有状態を持たない。

pub mod chart;
pub mod coercion;
pub mod earnings;
pub mod growth;
pub mod metrics;
pub mod ranking;

pub use chart::{build_chart, ChartBar, ChartDataset, ChartScale};
pub use coercion::{coerce_count, coerce_optional};
pub use earnings::{estimate_earnings, EarningsRange};
pub use growth::{predict_growth, GrowthRange};
pub use metrics::{ChannelTotals, DerivedMetrics};
pub use ranking::{rank_videos, table_listing, top_performing, RankOptions};
