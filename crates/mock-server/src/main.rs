//! 開発用の分析バックエンドモック
//!
//! `/api/channel`と`/api/videos`をクエリから決定的に生成したデータで返す。
//! `missing`はチャンネル404、`broken`は動画一覧が配列ではないエラーオブジェクトになる。

use chrono::{Duration as ChronoDuration, Utc};
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::net::IpAddr;
use std::time::Duration;
use warp::http::StatusCode;
use warp::Filter;

const MISSING_QUERY: &str = "missing";
const BROKEN_QUERY: &str = "broken";

#[derive(Parser, Debug, Clone)]
#[command(name = "mock-server", about = "Fixture backend for channel-lens")]
struct Args {
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// 動画一覧の件数
    #[arg(long, default_value_t = 12)]
    videos: usize,

    /// レスポンス遅延（ミリ秒）
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

#[derive(Debug, Deserialize)]
struct QueryParams {
    #[serde(default)]
    query: String,
}

fn seeded_rng(query: &str) -> StdRng {
    let mut hasher = DefaultHasher::new();
    query.trim().to_lowercase().hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish())
}

/// チャンネルのフィクスチャ（`missing`の場合はNone）
fn channel_fixture(query: &str, video_count: usize) -> Option<Value> {
    if query.trim().eq_ignore_ascii_case(MISSING_QUERY) {
        return None;
    }

    let mut rng = seeded_rng(query);
    let subscribers: u64 = rng.gen_range(100..5_000_000);
    let views: u64 = subscribers * rng.gen_range(20..400);

    Some(json!({
        "title": format!("{} Official", query.trim()),
        "description": format!("Fixture channel generated for \"{}\"", query.trim()),
        "thumbnail": format!("https://picsum.photos/seed/{}/88", query.trim()),
        // 実バックエンド同様、登録者数は文字列で返す
        "subscribers": subscribers.to_string(),
        "views": views,
        "videos": video_count,
    }))
}

/// 動画一覧のフィクスチャ（`broken`の場合はエラーオブジェクト）
fn videos_fixture(query: &str, video_count: usize) -> Value {
    if query.trim().eq_ignore_ascii_case(BROKEN_QUERY) {
        return json!({ "error": "Video list unavailable" });
    }

    let mut rng = seeded_rng(query);
    let now = Utc::now();

    let videos: Vec<Value> = (0..video_count)
        .map(|i| {
            let views: u64 = if rng.gen_bool(0.1) {
                0
            } else {
                rng.gen_range(50..2_000_000)
            };
            let likes = views / rng.gen_range(15..60);
            let comments = likes / rng.gen_range(5..20);
            let published = now - ChronoDuration::days((i as i64) * 7 + rng.gen_range(0..7));

            json!({
                "videoId": format!("{:08x}{:03}", rng.r#gen::<u32>(), i),
                "title": format!("{} episode {}", query.trim(), video_count - i),
                "thumbnail": format!("https://picsum.photos/seed/{}-{}/320/180", query.trim(), i),
                // 一部は文字列で返して数値化処理を確認できるようにする
                "views": if i % 5 == 2 { json!(views.to_string()) } else { json!(views) },
                "likes": likes,
                "comments": comments,
                "publishedAt": published.to_rfc3339(),
            })
        })
        .collect();

    Value::Array(videos)
}

fn bad_request() -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&json!({ "error": "query parameter is required" })),
        StatusCode::BAD_REQUEST,
    )
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let video_count = args.videos;
    let delay = Duration::from_millis(args.delay_ms);

    let channel = warp::path!("api" / "channel")
        .and(warp::get())
        .and(warp::query::<QueryParams>())
        .and_then(move |params: QueryParams| async move {
            tokio::time::sleep(delay).await;
            if params.query.trim().is_empty() {
                return Ok::<_, warp::Rejection>(bad_request());
            }

            let reply = match channel_fixture(&params.query, video_count) {
                Some(channel) => {
                    log::info!("channel fixture for {:?}", params.query);
                    warp::reply::with_status(warp::reply::json(&channel), StatusCode::OK)
                }
                None => {
                    log::info!("channel {:?} not found", params.query);
                    warp::reply::with_status(
                        warp::reply::json(&json!({ "error": "Channel not found" })),
                        StatusCode::NOT_FOUND,
                    )
                }
            };
            Ok(reply)
        });

    let videos = warp::path!("api" / "videos")
        .and(warp::get())
        .and(warp::query::<QueryParams>())
        .and_then(move |params: QueryParams| async move {
            tokio::time::sleep(delay).await;
            if params.query.trim().is_empty() {
                return Ok::<_, warp::Rejection>(bad_request());
            }

            log::info!("video fixture for {:?}", params.query);
            let body = videos_fixture(&params.query, video_count);
            Ok(warp::reply::with_status(
                warp::reply::json(&body),
                StatusCode::OK,
            ))
        });

    let routes = channel.or(videos).with(warp::log("mock_server"));

    log::info!(
        "mock backend listening on http://{}:{} ({} videos per channel)",
        args.host,
        args.port,
        video_count
    );
    warp::serve(routes).run((args.host, args.port)).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_channel() {
        assert!(channel_fixture("missing", 12).is_none());
        assert!(channel_fixture("Missing ", 12).is_none());
    }

    #[test]
    fn test_channel_fixture_is_deterministic() {
        let first = channel_fixture("rustlang", 12).unwrap();
        let second = channel_fixture("rustlang", 12).unwrap();
        assert_eq!(first, second);
        assert!(first["subscribers"].is_string());
        assert_eq!(first["videos"], 12);
    }

    #[test]
    fn test_videos_fixture_length() {
        let videos = videos_fixture("rustlang", 12);
        assert_eq!(videos.as_array().map(|v| v.len()), Some(12));
        assert!(videos[2]["views"].is_string());
    }

    #[test]
    fn test_broken_videos_is_not_an_array() {
        let videos = videos_fixture("broken", 12);
        assert!(videos.is_object());
    }
}
