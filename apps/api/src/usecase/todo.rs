//! # Todo ユースケース
//!
//! バリデーション、リポジトリ呼び出し、エラー分類への変換を担う。
//!
//! ## エラーメッセージの方針
//!
//! 永続化の失敗時は操作ごとの固定メッセージのみをクライアントへ返し、
//! 生のストレージエラーは [`crate::error::ApiError`] の変換時にログへ出す。
//! バリデーション失敗時は具体的なメッセージをそのまま返す。

use std::sync::Arc;

use todoapi_domain::todo::{NewTodo, Todo, TodoId, TodoTitle};
use todoapi_infra::repository::TodoRepository;

use crate::error::ApiError;

/// Todo 作成の入力
pub struct CreateTodoInput {
    pub title:     String,
    pub completed: bool,
}

/// Todo 更新の入力
pub struct UpdateTodoInput {
    pub id:        TodoId,
    pub title:     String,
    pub completed: bool,
}

/// Todo ユースケース
///
/// 各操作は永続化呼び出しをちょうど一度だけ発行するため、
/// 複文トランザクションは使用しない。
pub struct TodoUseCaseImpl {
    repository: Arc<dyn TodoRepository>,
}

impl TodoUseCaseImpl {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Todo を作成する
    ///
    /// 1. NewTodo バリデーション（失敗は BadRequest）
    /// 2. リポジトリへ挿入し、採番された id と組み合わせた Todo を返す
    pub async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ApiError> {
        let new_todo = NewTodo::new(input.title, input.completed)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let id = self
            .repository
            .create(&new_todo)
            .await
            .map_err(|e| ApiError::internal("fail to create a todo in the repository", e))?;

        Ok(new_todo.into_todo(id))
    }

    /// Todo 一覧を取得する（id 順）
    ///
    /// テーブルが空の場合は空の Vec を返す（エラーではない）。
    pub async fn get_all_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let todos = self
            .repository
            .get_all()
            .await
            .map_err(|e| ApiError::internal("fail to get all todos in the repository", e))?;

        Ok(todos)
    }

    /// Todo を更新する
    ///
    /// 新しいタイトルには作成時と同じバリデーションを適用する。
    /// 対象行がない場合もリポジトリエラーとして Internal に分類する。
    pub async fn update_todo(&self, input: UpdateTodoInput) -> Result<String, ApiError> {
        let title =
            TodoTitle::new(input.title).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let rows_updated = self
            .repository
            .update_by_id(input.id, &title, input.completed)
            .await
            .map_err(|e| ApiError::internal("fail to update a todo in the repository", e))?;

        Ok(format!("Rows updated: {rows_updated}"))
    }

    /// Todo を削除する
    ///
    /// 対象行がない場合もリポジトリエラーとして Internal に分類する。
    pub async fn delete_todo(&self, id: TodoId) -> Result<String, ApiError> {
        let rows_deleted = self
            .repository
            .delete_by_id(id)
            .await
            .map_err(|e| ApiError::internal("fail to delete a todo in the repository", e))?;

        Ok(format!("Rows deleted: {rows_deleted}"))
    }
}
