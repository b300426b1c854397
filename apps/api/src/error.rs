//! # TodoAPI エラー定義
//!
//! ユースケース層のエラー分類と、HTTP レスポンスへの変換を定義する。
//!
//! ## 分類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | レスポンス本文 |
//! |-----------|----------------|----------------|
//! | `BadRequest` | 400 Bad Request | バリデーションメッセージをそのまま返す |
//! | `Internal` | 500 Internal Server Error | 操作ごとの固定メッセージ（原因はログのみ） |
//!
//! 更新・削除で対象行がない場合も `Internal`（500）として扱う。
//! リトライは行わず、永続化の失敗は一度だけ上位へ伝播する。

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todoapi_infra::InfraError;
use todoapi_shared::ErrorResponse;

/// TodoAPI で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 不正なリクエスト
    ///
    /// リクエストボディの形式不正、またはバリデーション失敗。
    /// メッセージはそのままクライアントへ返す。
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 永続化層の失敗
    ///
    /// クライアントには操作ごとの固定メッセージのみを返し、
    /// 原因（接続エラー・対象行なし・制約違反）はログに出力する。
    #[error("{message}")]
    Internal {
        /// クライアントへ返す固定メッセージ
        message: &'static str,
        #[source]
        source:  InfraError,
    },
}

impl ApiError {
    /// 永続化層の失敗を固定メッセージ付きで包む
    pub fn internal(message: &'static str, source: InfraError) -> Self {
        Self::Internal { message, source }
    }
}

// リクエストボディの JSON パース失敗を BadRequest に変換する
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal { message, source } => {
                tracing::error!(error = %source, "永続化層のエラー: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
