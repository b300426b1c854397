//! # Todo
//!
//! タスク管理の中核となるドメインモデル。
//!
//! ## NewTodo と Todo の分離
//!
//! id は永続化層（PostgreSQL の `BIGSERIAL`）が採番するため、
//! 未永続のエンティティは id を持たない。この制約を型で表現する:
//!
//! - [`NewTodo`]: バリデーション済み・未永続。id フィールドを持たない
//! - [`Todo`]: 永続化済み。id は構築時に一度だけ与えられ、以後変更できない
//!
//! 「id はちょうど一度だけ採番される」という不変条件が、実行時チェック
//! ではなく型の構造として強制される（構造的強制）。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use todoapi_domain::todo::{NewTodo, TodoId};
//!
//! let new_todo = NewTodo::new("  Buy milk  ", false)?;
//! assert_eq!(new_todo.title().as_str(), "Buy milk");
//!
//! // 永続化層が採番した id と組み合わせて Todo になる
//! let todo = new_todo.into_todo(TodoId::from_i64(1));
//! assert_eq!(todo.id().as_i64(), 1);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// TodoId
// =========================================================================

/// Todo の一意識別子
///
/// PostgreSQL の `BIGSERIAL` が採番した値をラップする。
/// アプリケーション側で新規採番する手段は提供しない。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
    /// データベースが採番した値から ID を作成する
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// 内部の i64 値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

// =========================================================================
// TodoTitle（タイトル）
// =========================================================================

/// タイトル（値オブジェクト）
///
/// # 不変条件
///
/// - 前後の空白をトリミングした結果が空文字列ではない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "タイトルを入力してください".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// NewTodo（未永続の Todo）
// =========================================================================

/// バリデーション済み・未永続の Todo
///
/// 永続化層が id を採番する前の状態。[`NewTodo::into_todo`] で
/// 採番済みの [`Todo`] に変換する。
///
/// # 不変条件
///
/// - `title` はトリミング後に空でない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    title:     TodoTitle,
    completed: bool,
}

impl NewTodo {
    /// 新しい Todo を作成する
    ///
    /// タイトルは前後の空白をトリミングした上で検証される。
    pub fn new(title: impl Into<String>, completed: bool) -> Result<Self, DomainError> {
        let title = TodoTitle::new(title)?;

        Ok(Self { title, completed })
    }

    /// 永続化層が採番した id と組み合わせて [`Todo`] を組み立てる
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
        }
    }

    // --- ゲッター ---

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

// =========================================================================
// Todo（永続化済みエンティティ）
// =========================================================================

/// Todo エンティティ
///
/// # 不変条件
///
/// - `id` は永続化層がちょうど一度だけ採番し、以後変更されない
/// - `title` はトリミング後に空でない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:        TodoId,
    title:     TodoTitle,
    completed: bool,
}

impl Todo {
    /// データベースから Todo を復元する
    pub fn from_db(id: TodoId, title: TodoTitle, completed: bool) -> Self {
        Self {
            id,
            title,
            completed,
        }
    }

    /// タイトルと完了フラグを置き換える
    ///
    /// 新しいタイトルにも作成時と同じ検証を適用し、
    /// id を維持した新インスタンスを返す。
    pub fn update(&self, title: impl Into<String>, completed: bool) -> Result<Self, DomainError> {
        let title = TodoTitle::new(title)?;

        Ok(Self {
            id: self.id,
            title,
            completed,
        })
    }

    /// 完了済みにする
    ///
    /// `completed = true` にした新インスタンスを返す。失敗しない。
    pub fn mark_as_completed(&self) -> Self {
        Self {
            id:        self.id,
            title:     self.title.clone(),
            completed: true,
        }
    }

    // --- ゲッター ---

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}
