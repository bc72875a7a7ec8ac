//! ログ初期化

use crate::config::{project_dirs, LogConfig};
use crate::error::{LensError, LensResult};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, time::LocalTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_FILE_PREFIX: &str = "channel-lens.log";

/// ログを初期化する
///
/// `RUST_LOG`があればそれを優先し、なければ`level_override`、設定値の順で使う。
/// ファイル出力が有効な場合は返り値のガードを保持している間だけ書き込まれる。
pub fn init_logging(
    config: &LogConfig,
    level_override: Option<&str>,
) -> LensResult<Option<WorkerGuard>> {
    let level = level_override.unwrap_or(config.log_level.as_str());
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| level_filter(level))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let log_dir = if config.enable_file_logging {
        Some(resolve_log_dir(config)?)
    } else {
        None
    };

    let (file_layer, guard) = if let Some(log_dir) = &log_dir {
        std::fs::create_dir_all(log_dir)?;

        let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_timer(LocalTime::rfc_3339());
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LensError::Logging(format!("Failed to initialize tracing subscriber: {}", e)))?;

    if let Some(dir) = &log_dir {
        tracing::debug!("📁 File logging enabled: {}", dir.display());
    }

    Ok(guard)
}

/// ログレベル文字列からフィルタを生成
fn level_filter(level: &str) -> LensResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| LensError::Logging(format!("Invalid log level {:?}: {}", level, e)))
}

/// ログディレクトリを決定（未設定ならXDGデータディレクトリ配下）
pub fn resolve_log_dir(config: &LogConfig) -> LensResult<PathBuf> {
    match &config.log_dir {
        Some(dir) => Ok(dir.clone()),
        None => {
            let dirs = project_dirs().map_err(|e| LensError::config(format!("{:#}", e)))?;
            Ok(dirs.data_dir().join("logs"))
        }
    }
}
