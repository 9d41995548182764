//! # タスク API ハンドラ
//!
//! タスク関連エンドポイントを実装する。
//!
//! 作成・更新はエンティティ本体（採番済み ID とスラッグを含む）を返す。
//! 削除のみ ACK を返す。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use taskshop_domain::{
   task::{Priority, Task, TaskContent, TaskId, TaskTitle},
   user::UserId,
};
use taskshop_shared::ApiResponse;

use crate::{
   error::ApiError,
   handler::TransactionAck,
   usecase::{CreateTaskInput, TaskUseCaseImpl, UpdateTaskInput},
};

/// タスクハンドラーの State
pub struct TaskState {
   pub usecase: TaskUseCaseImpl,
}

/// タスク DTO
#[derive(Debug, Serialize)]
pub struct TaskDto {
   pub id:        i64,
   pub title:     String,
   pub content:   String,
   pub priority:  i32,
   pub completed: bool,
   pub slug:      String,
   pub user_id:   i64,
}

impl TaskDto {
   fn from_task(task: &Task) -> Self {
      Self {
         id:        task.id().as_i64(),
         title:     task.title().as_str().to_string(),
         content:   task.content().as_str().to_string(),
         priority:  task.priority().as_i32(),
         completed: task.completed(),
         slug:      task.slug().as_str().to_string(),
         user_id:   task.user_id().as_i64(),
      }
   }
}

/// タスク作成リクエスト
///
/// 全フィールド必須。completed は受け付けない（常に false で作成される）。
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
   pub title:    String,
   pub content:  String,
   pub priority: i32,
   pub user_id:  i64,
}

/// タスク更新リクエスト
///
/// 各フィールドは個別に省略可能。省略（または null）は
/// 「格納済みの値を保持する」を意味する。
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
   #[serde(default)]
   pub title:     Option<String>,
   #[serde(default)]
   pub content:   Option<String>,
   #[serde(default)]
   pub priority:  Option<i32>,
   #[serde(default)]
   pub completed: Option<bool>,
}

/// 全タスクを取得する
///
/// ## エンドポイント
/// GET /tasks
pub async fn list_tasks(State(state): State<Arc<TaskState>>) -> Result<Response, ApiError> {
   let tasks = state.usecase.list_tasks().await?;

   let response = ApiResponse::new(tasks.iter().map(TaskDto::from_task).collect::<Vec<_>>());
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// ID でタスクを取得する
///
/// ## エンドポイント
/// GET /tasks/{task_id}
pub async fn get_task(
   State(state): State<Arc<TaskState>>,
   Path(task_id): Path<i64>,
) -> Result<Response, ApiError> {
   let task = state.usecase.get_task(TaskId::from_i64(task_id)).await?;

   let response = ApiResponse::new(TaskDto::from_task(&task));
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// タスクを作成する
///
/// 参照先ユーザーが存在しない場合は 404 を返す。
/// 成功時は採番済み ID とスラッグを含むタスクを返す。
///
/// ## エンドポイント
/// POST /tasks/create
pub async fn create_task(
   State(state): State<Arc<TaskState>>,
   Json(payload): Json<CreateTaskRequest>,
) -> Result<Response, ApiError> {
   let input = CreateTaskInput {
      title:    TaskTitle::new(payload.title)?,
      content:  TaskContent::new(payload.content)?,
      priority: Priority::new(payload.priority)?,
      user_id:  UserId::from_i64(payload.user_id),
   };

   let task = state.usecase.create_task(input).await?;

   let response = ApiResponse::new(TaskDto::from_task(&task));
   Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// タスクを部分更新する
///
/// 成功時は更新後のタスクを返す。
///
/// ## エンドポイント
/// PUT /tasks/update/{task_id}
pub async fn update_task(
   State(state): State<Arc<TaskState>>,
   Path(task_id): Path<i64>,
   Json(payload): Json<UpdateTaskRequest>,
) -> Result<Response, ApiError> {
   let input = UpdateTaskInput {
      task_id:   TaskId::from_i64(task_id),
      title:     payload.title.map(TaskTitle::new).transpose()?,
      content:   payload.content.map(TaskContent::new).transpose()?,
      priority:  payload.priority.map(Priority::new).transpose()?,
      completed: payload.completed,
   };

   let task = state.usecase.update_task(input).await?;

   let response = ApiResponse::new(TaskDto::from_task(&task));
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// タスクを削除する
///
/// ## エンドポイント
/// DELETE /tasks/delete/{task_id}
pub async fn delete_task(
   State(state): State<Arc<TaskState>>,
   Path(task_id): Path<i64>,
) -> Result<Response, ApiError> {
   state.usecase.delete_task(TaskId::from_i64(task_id)).await?;

   let response = ApiResponse::new(TransactionAck::ok("タスクを削除しました"));
   Ok((StatusCode::OK, Json(response)).into_response())
}
