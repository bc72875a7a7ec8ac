use anyhow::Context;
use channel_lens::{
    config::{AppConfig, ConfigManager},
    logging,
    report::{self, ReportFormat},
    AnalysisSession, AnalyzeOutcome, ChartScale, HttpBackend, ViewOptions,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// チャンネル統計ダッシュボード
#[derive(Parser, Debug)]
#[command(name = "channel-lens", version, about = "Analyze a channel's public statistics")]
struct Cli {
    /// 設定ファイルのパス（省略時はXDG設定ディレクトリ）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// ログレベル (trace/debug/info/warn/error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// チャンネルを分析して表示
    Analyze(AnalyzeArgs),
    /// 設定ファイルの操作
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// チャンネル名またはハンドル（空白のみは不可）
    #[arg(value_parser = parse_query)]
    query: String,

    /// バックエンドのベースURL
    #[arg(long)]
    base_url: Option<String>,

    /// 出力形式 (text/json)
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// グラフのスケール (raw/log/ratio)
    #[arg(long)]
    chart_scale: Option<ChartScale>,

    /// リクエストタイムアウト（ミリ秒）
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// 現在の設定を表示
    Show,
    /// 設定ファイルのパスを表示
    Path,
    /// 設定をデフォルトに戻す
    Reset,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "❌ Error occurred");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };

    let (mut config, load_error) = match manager.load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let _log_guard = logging::init_logging(&config.log, cli.log_level.as_deref())?;

    if let Some(e) = load_error {
        tracing::warn!("設定読み込みエラー、デフォルト設定を使用: {:#}", e);
    }
    config.apply_env_overrides();

    match cli.command {
        Command::Analyze(args) => analyze(config, args).await,
        Command::Config { action } => {
            run_config_action(&manager, &config, action)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn analyze(mut config: AppConfig, args: AnalyzeArgs) -> anyhow::Result<ExitCode> {
    if let Some(base_url) = args.base_url {
        config.backend.base_url = base_url;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.backend.timeout_ms = timeout_ms;
    }
    if let Some(chart_scale) = args.chart_scale {
        config.display.chart_scale = chart_scale;
    }

    tracing::info!("🎬 Analyzing channel via {}", config.backend.base_url);

    let backend = HttpBackend::new(&config.backend)?;
    let session = AnalysisSession::new(Arc::new(backend));

    let outcome = tokio::select! {
        outcome = session.analyze_query(args.query) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("🛑 終了シグナルを受信しました");
            return Ok(ExitCode::from(130));
        }
    };

    let view = session.view(&ViewOptions::from(config.display));
    let rendered = report::render(&view, args.format).context("Failed to render report")?;
    println!("{}", rendered.trim_end());

    Ok(match outcome {
        AnalyzeOutcome::Applied => ExitCode::SUCCESS,
        AnalyzeOutcome::Skipped | AnalyzeOutcome::Failed | AnalyzeOutcome::Discarded => {
            ExitCode::FAILURE
        }
    })
}

/// 空白のみのクエリは引数解析の段階で拒否する
fn parse_query(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("query must not be empty".to_string())
    } else {
        Ok(raw.to_string())
    }
}

fn run_config_action(
    manager: &ConfigManager,
    config: &AppConfig,
    action: ConfigAction,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let content =
                toml::to_string_pretty(config).context("Failed to serialize config")?;
            print!("{}", content);
        }
        ConfigAction::Path => {
            println!("{}", manager.config_path().display());
        }
        ConfigAction::Reset => {
            manager.reset_config()?;
            println!("Configuration reset: {}", manager.config_path().display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_accepts_query() {
        let cli = Cli::try_parse_from(["channel-lens", "analyze", "rustlang"]).unwrap();
        match cli.command {
            Command::Analyze(args) => assert_eq!(args.query, "rustlang"),
            _ => panic!("Expected analyze command"),
        }
    }

    #[test]
    fn test_blank_query_is_usage_error() {
        for query in ["", "   ", "\t"] {
            let error = Cli::try_parse_from(["channel-lens", "analyze", query]).unwrap_err();
            assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);
            assert_eq!(error.exit_code(), 2);
        }
    }
}
