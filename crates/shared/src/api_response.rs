//! # API レスポンスエンベロープ
//!
//! 成功レスポンスの統一形式 `{ "response": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 成功レスポンスの統一エンベロープ
///
/// すべてのエンドポイントは成功時に `{ "response": T }` 形式で
/// レスポンスを返す。この型は以下の場所で使用される:
///
/// - ハンドラ（Serialize でレスポンスを返す）
/// - ハンドラテスト（Deserialize でレスポンスを検証する）
///
/// ## 使用例
///
/// ```
/// use todoapi_shared::ApiResponse;
///
/// let response = ApiResponse::new("hello");
/// assert_eq!(response.response, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub response: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(response: T) -> Self {
        Self { response }
    }
}
