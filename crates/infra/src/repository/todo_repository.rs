//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 永続化ポートの契約
//!
//! - すべての更新系操作は単文の SQL として実行される（原子性は
//!   PostgreSQL の行単位保証に委ねる）
//! - 各ユースケースは永続化呼び出しをちょうど一度だけ発行するため、
//!   複文トランザクションは不要
//! - UPDATE / DELETE で対象行がない場合は `rows_affected == 0` を
//!   NotFound エラーとして返す（0 件成功としては扱わない）

use async_trait::async_trait;
use sqlx::PgPool;
use todoapi_domain::todo::{NewTodo, Todo, TodoId, TodoTitle};

use crate::error::InfraError;

/// Todo リポジトリトレイト
///
/// Todo の CRUD 操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Todo を挿入し、データベースが採番した id を返す
    async fn create(&self, todo: &NewTodo) -> Result<TodoId, InfraError>;

    /// 全 Todo を id 順で取得する
    ///
    /// テーブルが空の場合は空の Vec を返す（エラーではない）。
    async fn get_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// id を指定してタイトルと完了フラグを更新する
    ///
    /// 更新された行数を返す。対象行がない場合は NotFound エラー。
    async fn update_by_id(
        &self,
        id: TodoId,
        title: &TodoTitle,
        completed: bool,
    ) -> Result<u64, InfraError>;

    /// id を指定して Todo を削除する
    ///
    /// 削除された行数を返す。対象行がない場合は NotFound エラー。
    async fn delete_by_id(&self, id: TodoId) -> Result<u64, InfraError>;
}

/// todo テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
    id:        i64,
    title:     String,
    completed: bool,
}

impl TodoRow {
    fn into_todo(self) -> Result<Todo, InfraError> {
        // DB の NOT NULL 制約と挿入時バリデーションにより title は常に有効
        let title = TodoTitle::new(self.title).map_err(|e| InfraError::unexpected(e.to_string()))?;
        Ok(Todo::from_db(TodoId::from_i64(self.id), title, self.completed))
    }
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(&self, todo: &NewTodo) -> Result<TodoId, InfraError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO todo (title, completed)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(todo.title().as_str())
        .bind(todo.completed())
        .fetch_one(&self.pool)
        .await?;

        Ok(TodoId::from_i64(id))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn get_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            r#"
            SELECT id, title, completed
            FROM todo
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TodoRow::into_todo).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_by_id(
        &self,
        id: TodoId,
        title: &TodoTitle,
        completed: bool,
    ) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE todo
            SET title = $1, completed = $2
            WHERE id = $3
            "#,
        )
        .bind(title.as_str())
        .bind(completed)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(InfraError::not_found("Todo", id.to_string()));
        }

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete_by_id(&self, id: TodoId) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todo
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(InfraError::not_found("Todo", id.to_string()));
        }

        Ok(result.rows_affected())
    }
}
