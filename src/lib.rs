pub mod analytics;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod report;
pub mod session;

// Re-export the main error types for convenience
pub use error::{FetchFailure, LensError, LensResult, FETCH_FAILURE_MESSAGE};

// Re-export backend client
pub use api::{AnalyticsBackend, ChannelRecord, HttpBackend, VideoRecord};

// Re-export analytics modules
pub use analytics::{ChannelTotals, ChartDataset, ChartScale, DerivedMetrics, RankOptions};

pub use dashboard::{DashboardView, ViewOptions};
pub use session::{AnalysisSession, AnalyzeOutcome, SessionPhase, SessionSnapshot};
