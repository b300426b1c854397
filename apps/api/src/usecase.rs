//! # ユースケース層
//!
//! トランスポート層と永続化層の間を仲介するアプリケーション操作を定義する。
//!
//! ## 設計方針
//!
//! - 各ユースケースは 1 リクエスト = 1 回の永続化呼び出しで完結する
//! - リクエストをまたぐ状態は持たない
//! - 失敗は境界ごとに一度だけ [`crate::error::ApiError`] へ変換する

pub mod todo;

pub use todo::TodoUseCaseImpl;
