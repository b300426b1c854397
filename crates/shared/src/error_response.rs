//! # エラーレスポンス
//!
//! 全エンドポイント共通のエラーレスポンス形式 `{ "error": msg }` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API サービスの責務（shared に axum 依存を入れない）
//! - 500 系のメッセージは呼び出し側が固定文言を渡す（内部情報を漏らさない）

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// すべてのエンドポイントで統一されたエラーレスポンス形式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 新しい `ErrorResponse` を作成する
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
