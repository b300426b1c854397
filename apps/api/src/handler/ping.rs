//! # 疎通確認ハンドラ
//!
//! サーバーの稼働状態を確認するためのエンドポイント。
//!
//! ## 用途
//!
//! - **ロードバランサー**: ターゲットグループヘルスチェック
//! - **開発時の動作確認**: サーバーが起動しているかの確認
//!
//! ## エンドポイント
//!
//! ```text
//! GET /ping
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! { "message": "pong" }
//! ```

use axum::Json;
use serde::Serialize;

/// 疎通確認レスポンス
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: String,
}

/// 疎通確認エンドポイント
///
/// サーバーが正常に稼働していることを確認するためのエンドポイント。
/// データベースへはアクセスしない。
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}
