//! # ルーター組み立て
//!
//! ハンドラをルートに結線して 1 つの [`Router`] を構築する。
//! `main` と統合テストの両方から使用するため、サーバー起動とは
//! 分離している。

use std::sync::Arc;

use axum::{
   Router,
   routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handler::{
   TaskState, UserState, create_category, create_task, create_user, delete_category, delete_task,
   delete_user, get_task, get_user, health_check, list_categories, list_tasks, list_users,
   update_category, update_task, update_user, welcome,
};

/// アプリケーションのルーターを構築する
///
/// ## ルーティング
///
/// | Method | Path | ハンドラ |
/// |--------|------|---------|
/// | GET | `/` | welcome |
/// | GET | `/health` | health_check |
/// | GET | `/users` | list_users |
/// | GET | `/users/{user_id}` | get_user |
/// | POST | `/users/create` | create_user |
/// | PUT | `/users/update/{user_id}` | update_user |
/// | DELETE | `/users/delete/{user_id}` | delete_user |
/// | GET | `/tasks` | list_tasks |
/// | GET | `/tasks/{task_id}` | get_task |
/// | POST | `/tasks/create` | create_task |
/// | PUT | `/tasks/update/{task_id}` | update_task |
/// | DELETE | `/tasks/delete/{task_id}` | delete_task |
/// | GET | `/category/categories` | list_categories |
/// | POST | `/category/create` | create_category（スタブ） |
/// | PUT | `/category/update_category` | update_category（スタブ） |
/// | DELETE | `/category/delete` | delete_category（スタブ） |
pub fn build_app(user_state: Arc<UserState>, task_state: Arc<TaskState>) -> Router {
   Router::new()
      // ユーザー API
      .route("/users", get(list_users))
      .route("/users/create", post(create_user))
      .route("/users/update/{user_id}", put(update_user))
      .route("/users/delete/{user_id}", delete(delete_user))
      .route("/users/{user_id}", get(get_user))
      .with_state(user_state)
      // タスク API
      .route("/tasks", get(list_tasks))
      .route("/tasks/create", post(create_task))
      .route("/tasks/update/{task_id}", put(update_task))
      .route("/tasks/delete/{task_id}", delete(delete_task))
      .route("/tasks/{task_id}", get(get_task))
      .with_state(task_state)
      // カテゴリ API（スタブ）
      .route("/category/categories", get(list_categories))
      .route("/category/create", post(create_category))
      .route("/category/update_category", put(update_category))
      .route("/category/delete", delete(delete_category))
      // ルート・ヘルスチェック
      .route("/", get(welcome))
      .route("/health", get(health_check))
      .layer(TraceLayer::new_for_http())
}
