//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、バリデーションとエラー分類はユースケース層に委譲

pub mod ping;
pub mod todo;

pub use ping::ping;
pub use todo::{TodoState, create_todo, delete_todo, get_all_todos, update_todo};
