//! ダッシュボードの出力（テキスト・JSON）

use crate::dashboard::{DashboardView, VideoRow};
use crate::error::LensResult;
use std::fmt::Write;

/// 棒グラフの最大幅（文字数）
const BAR_WIDTH: usize = 40;
const TITLE_WIDTH: usize = 48;

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum ReportFormat {
    #[default]
    #[display("text")]
    Text,
    #[display("json")]
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{}', expected text or json", other)),
        }
    }
}

pub fn render(view: &DashboardView, format: ReportFormat) -> LensResult<String> {
    match format {
        ReportFormat::Text => Ok(render_text(view)),
        ReportFormat::Json => render_json(view),
    }
}

pub fn render_json(view: &DashboardView) -> LensResult<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

pub fn render_text(view: &DashboardView) -> String {
    let mut out = String::new();

    if view.loading {
        let _ = writeln!(out, "⏳ Analyzing \"{}\"...", view.query);
        return out;
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "❌ {}", error);
        return out;
    }
    let Some(channel) = &view.channel else {
        let _ = writeln!(out, "Enter a channel name to analyze.");
        return out;
    };

    let _ = writeln!(out, "📺 {}", channel.title);
    if let Some(description) = &channel.description {
        let _ = writeln!(out, "   {}", truncate(description, 100));
    }
    if !channel.thumbnail.is_empty() {
        let _ = writeln!(out, "   {}", channel.thumbnail);
    }
    out.push('\n');

    let _ = writeln!(out, "  Subscribers  {:>16}", format_count(channel.subscribers));
    let _ = writeln!(out, "  Views        {:>16}", format_count(channel.views));
    let _ = writeln!(out, "  Videos       {:>16}", format_count(channel.videos));

    if let Some(metrics) = &view.metrics {
        out.push_str("\n📊 Insights\n");
        let _ = writeln!(
            out,
            "  Avg views / video     {}",
            format_count(metrics.average_views_per_video)
        );
        let _ = writeln!(
            out,
            "  Subscribers / video   {}",
            format_count(metrics.subscribers_per_video)
        );
        let _ = writeln!(out, "  Health score          {}/100", metrics.health_score);
        let _ = writeln!(
            out,
            "  Est. earnings         ${} - ${}",
            metrics.earnings.low, metrics.earnings.high
        );
        let _ = writeln!(
            out,
            "  30-day growth         +{} to +{} subscribers",
            format_count(metrics.growth.min),
            format_count(metrics.growth.max)
        );
    }

    if let Some(chart) = &view.chart {
        let _ = writeln!(out, "\n📈 Channel totals ({} scale)", chart.scale);
        let max = chart.max_value();
        for bar in &chart.bars {
            let length = if max > 0.0 {
                ((bar.value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let _ = writeln!(
                out,
                "  {:<12} {:<width$} {}",
                bar.label,
                "█".repeat(length),
                format_count(bar.raw.round() as u64),
                width = BAR_WIDTH
            );
        }
    }

    if view.show_top_videos {
        out.push_str("\n🏆 Top performing\n");
        for (rank, video) in view.top_videos.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {}  ({} views)",
                rank + 1,
                truncate(&video.title, TITLE_WIDTH),
                format_count(video.views)
            );
        }
    }

    if !view.video_table.is_empty() {
        out.push_str("\n🎬 Recent videos\n");
        let _ = writeln!(
            out,
            "  {:<width$} {:>12} {:>10} {:>10} {:>10}",
            "Title",
            "Views",
            "Likes",
            "Comments",
            "Published",
            width = TITLE_WIDTH
        );
        for video in &view.video_table {
            out.push_str(&table_row(video));
        }
    }

    out
}

fn table_row(video: &VideoRow) -> String {
    format!(
        "  {:<width$} {:>12} {:>10} {:>10} {:>10}\n",
        truncate(&video.title, TITLE_WIDTH),
        format_count(video.views),
        format_count(video.likes),
        format_count(video.comments),
        video.published.as_deref().unwrap_or("-"),
        width = TITLE_WIDTH
    )
}

/// 3桁区切りで整形
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}
