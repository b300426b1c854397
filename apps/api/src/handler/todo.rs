//! # Todo ハンドラ
//!
//! Todo CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /todos` - Todo 一覧
//! - `POST /todos` - Todo 作成
//! - `PUT /todos/{id}` - Todo 更新
//! - `DELETE /todos/{id}` - Todo 削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todoapi_domain::todo::{Todo, TodoId};
use todoapi_shared::ApiResponse;

use crate::{
    error::ApiError,
    usecase::todo::{CreateTodoInput, TodoUseCaseImpl, UpdateTodoInput},
};

/// Todo API の共有状態
pub struct TodoState {
    pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// Todo 作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title:     String,
    pub completed: bool,
}

/// Todo 更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title:     String,
    pub completed: bool,
}

/// Todo DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
    pub id:        i64,
    pub title:     String,
    pub completed: bool,
}

impl TodoDto {
    fn from_todo(todo: &Todo) -> Self {
        Self {
            id:        todo.id().as_i64(),
            title:     todo.title().as_str().to_string(),
            completed: todo.completed(),
        }
    }
}

/// 更新・削除の件数メッセージ
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageDto {
    pub message: String,
}

// --- ハンドラ ---

/// GET /todos
///
/// Todo 一覧を id 順で取得する。
///
/// ## レスポンス
///
/// - `200 OK`: Todo の配列（空のときは `[]`）
/// - `500 Internal Server Error`: 永続化層の失敗
#[tracing::instrument(skip_all)]
pub async fn get_all_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<impl IntoResponse, ApiError> {
    let todos = state.usecase.get_all_todos().await?;

    let items: Vec<TodoDto> = todos.iter().map(TodoDto::from_todo).collect();

    Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// POST /todos
///
/// Todo を作成する。
///
/// ## レスポンス
///
/// - `200 OK`: 作成された Todo（採番された id を含む）
/// - `400 Bad Request`: ボディ不正、バリデーションエラー
/// - `500 Internal Server Error`: 永続化層の失敗
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let todo = state
        .usecase
        .create_todo(CreateTodoInput {
            title:     req.title,
            completed: req.completed,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(TodoDto::from_todo(&todo))),
    ))
}

/// PUT /todos/{id}
///
/// Todo のタイトルと完了フラグを更新する。
///
/// ## レスポンス
///
/// - `200 OK`: 件数メッセージ（`"Rows updated: 1"`）
/// - `400 Bad Request`: ボディ不正、バリデーションエラー
/// - `500 Internal Server Error`: 永続化層の失敗（対象行なしを含む）
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let message = state
        .usecase
        .update_todo(UpdateTodoInput {
            id:        TodoId::from_i64(id),
            title:     req.title,
            completed: req.completed,
        })
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(MessageDto { message }))))
}

/// DELETE /todos/{id}
///
/// Todo を削除する。
///
/// ## レスポンス
///
/// - `200 OK`: 件数メッセージ（`"Rows deleted: 1"`）
/// - `500 Internal Server Error`: 永続化層の失敗（対象行なしを含む）
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state.usecase.delete_todo(TodoId::from_i64(id)).await?;

    Ok((StatusCode::OK, Json(ApiResponse::new(MessageDto { message }))))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{Router, body::Body, http::Request, routing::get};
    use pretty_assertions::assert_eq;
    use todoapi_domain::todo::{NewTodo, TodoTitle};
    use todoapi_infra::{InfraError, repository::TodoRepository};
    use todoapi_shared::{ApiResponse, ErrorResponse};
    use tower::ServiceExt;

    use super::*;

    // --- スタブ ---

    struct StubTodoRepository {
        todos:   Vec<Todo>,
        next_id: i64,
    }

    impl StubTodoRepository {
        fn empty() -> Self {
            Self {
                todos:   Vec::new(),
                next_id: 1,
            }
        }

        fn with_todos(todos: Vec<Todo>) -> Self {
            Self { todos, next_id: 1 }
        }
    }

    #[async_trait]
    impl TodoRepository for StubTodoRepository {
        async fn create(&self, _todo: &NewTodo) -> Result<TodoId, InfraError> {
            Ok(TodoId::from_i64(self.next_id))
        }

        async fn get_all(&self) -> Result<Vec<Todo>, InfraError> {
            Ok(self.todos.clone())
        }

        async fn update_by_id(
            &self,
            id: TodoId,
            _title: &TodoTitle,
            _completed: bool,
        ) -> Result<u64, InfraError> {
            if self.todos.iter().any(|t| t.id() == id) {
                Ok(1)
            } else {
                Err(InfraError::not_found("Todo", id.to_string()))
            }
        }

        async fn delete_by_id(&self, id: TodoId) -> Result<u64, InfraError> {
            if self.todos.iter().any(|t| t.id() == id) {
                Ok(1)
            } else {
                Err(InfraError::not_found("Todo", id.to_string()))
            }
        }
    }

    struct FailingTodoRepository;

    #[async_trait]
    impl TodoRepository for FailingTodoRepository {
        async fn create(&self, _todo: &NewTodo) -> Result<TodoId, InfraError> {
            Err(InfraError::unexpected("connection refused"))
        }

        async fn get_all(&self) -> Result<Vec<Todo>, InfraError> {
            Err(InfraError::unexpected("connection refused"))
        }

        async fn update_by_id(
            &self,
            _id: TodoId,
            _title: &TodoTitle,
            _completed: bool,
        ) -> Result<u64, InfraError> {
            Err(InfraError::unexpected("connection refused"))
        }

        async fn delete_by_id(&self, _id: TodoId) -> Result<u64, InfraError> {
            Err(InfraError::unexpected("connection refused"))
        }
    }

    // --- ヘルパー ---

    fn create_test_app(repo: impl TodoRepository + 'static) -> Router {
        let usecase = TodoUseCaseImpl::new(Arc::new(repo));
        let state = Arc::new(TodoState { usecase });

        Router::new()
            .route("/todos", get(get_all_todos).post(create_todo))
            .route(
                "/todos/{id}",
                axum::routing::put(update_todo).delete(delete_todo),
            )
            .with_state(state)
    }

    fn persisted_todo(id: i64, title: &str, completed: bool) -> Todo {
        NewTodo::new(title, completed)
            .unwrap()
            .into_todo(TodoId::from_i64(id))
    }

    async fn response_body<T: serde::de::DeserializeOwned>(
        response: axum::http::Response<Body>,
    ) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // --- POST /todos ---

    #[tokio::test]
    async fn test_post_有効なボディでtodoが作成され200が返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::empty());

        let request = Request::builder()
            .method(axum::http::Method::POST)
            .uri("/todos")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&serde_json::json!({
                    "title": "Test",
                    "completed": true
                }))
                .unwrap(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<TodoDto> = response_body(response).await;
        assert_eq!(body.response.id, 1);
        assert_eq!(body.response.title, "Test");
        assert!(body.response.completed);
    }

    #[tokio::test]
    async fn test_post_タイトルがトリミングされて返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::empty());

        let request = Request::builder()
            .method(axum::http::Method::POST)
            .uri("/todos")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&serde_json::json!({
                    "title": "  Buy milk  ",
                    "completed": false
                }))
                .unwrap(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<TodoDto> = response_body(response).await;
        assert_eq!(body.response.title, "Buy milk");
    }

    #[tokio::test]
    async fn test_post_空白のみのタイトルで400が返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::empty());

        let request = Request::builder()
            .method(axum::http::Method::POST)
            .uri("/todos")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&serde_json::json!({
                    "title": "  ",
                    "completed": false
                }))
                .unwrap(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response_body(response).await;
        assert!(
            body.error.contains("タイトル"),
            "エラーメッセージがフィールド名を含むこと: {}",
            body.error,
        );
    }

    #[tokio::test]
    async fn test_post_不正なjsonボディで400が返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::empty());

        let request = Request::builder()
            .method(axum::http::Method::POST)
            .uri("/todos")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_永続化失敗で500と固定メッセージが返る() {
        // Given
        let sut = create_test_app(FailingTodoRepository);

        let request = Request::builder()
            .method(axum::http::Method::POST)
            .uri("/todos")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&serde_json::json!({
                    "title": "Test",
                    "completed": false
                }))
                .unwrap(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.error, "fail to create a todo in the repository");
    }

    // --- GET /todos ---

    #[tokio::test]
    async fn test_get_空のテーブルで空配列が返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::empty());

        let request = Request::builder()
            .method(axum::http::Method::GET)
            .uri("/todos")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<Vec<TodoDto>> = response_body(response).await;
        assert!(body.response.is_empty());
    }

    #[tokio::test]
    async fn test_get_todo一覧が格納順で返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::with_todos(vec![
            persisted_todo(1, "Buy milk", false),
            persisted_todo(2, "Walk the dog", true),
        ]));

        let request = Request::builder()
            .method(axum::http::Method::GET)
            .uri("/todos")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<Vec<TodoDto>> = response_body(response).await;
        assert_eq!(body.response.len(), 2);
        assert_eq!(body.response[0].id, 1);
        assert_eq!(body.response[0].title, "Buy milk");
        assert!(!body.response[0].completed);
        assert_eq!(body.response[1].id, 2);
        assert_eq!(body.response[1].title, "Walk the dog");
        assert!(body.response[1].completed);
    }

    #[tokio::test]
    async fn test_get_永続化失敗で500と固定メッセージが返る() {
        // Given
        let sut = create_test_app(FailingTodoRepository);

        let request = Request::builder()
            .method(axum::http::Method::GET)
            .uri("/todos")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.error, "fail to get all todos in the repository");
    }

    // --- PUT /todos/{id} ---

    #[tokio::test]
    async fn test_put_既存のtodoを更新すると件数メッセージが返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::with_todos(vec![persisted_todo(
            1, "old", false,
        )]));

        let request = Request::builder()
            .method(axum::http::Method::PUT)
            .uri("/todos/1")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&serde_json::json!({
                    "title": "new",
                    "completed": true
                }))
                .unwrap(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<MessageDto> = response_body(response).await;
        assert_eq!(body.response.message, "Rows updated: 1");
    }

    #[tokio::test]
    async fn test_put_空白のみのタイトルで400が返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::with_todos(vec![persisted_todo(
            1, "old", false,
        )]));

        let request = Request::builder()
            .method(axum::http::Method::PUT)
            .uri("/todos/1")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&serde_json::json!({
                    "title": "   ",
                    "completed": false
                }))
                .unwrap(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_不正なjsonボディで400が返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::empty());

        let request = Request::builder()
            .method(axum::http::Method::PUT)
            .uri("/todos/1")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_存在しないidで500が返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::empty());

        let request = Request::builder()
            .method(axum::http::Method::PUT)
            .uri("/todos/999")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&serde_json::json!({
                    "title": "new",
                    "completed": false
                }))
                .unwrap(),
            ))
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then: 対象行なしはストレージエラーとして 500 に分類される
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.error, "fail to update a todo in the repository");
    }

    // --- DELETE /todos/{id} ---

    #[tokio::test]
    async fn test_delete_既存のtodoを削除すると件数メッセージが返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::with_todos(vec![persisted_todo(
            1, "done", true,
        )]));

        let request = Request::builder()
            .method(axum::http::Method::DELETE)
            .uri("/todos/1")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: ApiResponse<MessageDto> = response_body(response).await;
        assert_eq!(body.response.message, "Rows deleted: 1");
    }

    #[tokio::test]
    async fn test_delete_存在しないidで500が返る() {
        // Given
        let sut = create_test_app(StubTodoRepository::empty());

        let request = Request::builder()
            .method(axum::http::Method::DELETE)
            .uri("/todos/999")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then: 対象行なしはストレージエラーとして 500 に分類される
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response_body(response).await;
        assert_eq!(body.error, "fail to delete a todo in the repository");
    }
}
