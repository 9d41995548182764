//! # ルーター統合テスト
//!
//! モックリポジトリを注入したルーターに対して HTTP リクエストを発行し、
//! ステータスコードとレスポンス形状をエンドツーエンドで検証する。
//!
//! - 成功レスポンスは `{ "data": T }` エンベロープ
//! - エラーレスポンスは RFC 9457 Problem Details

use std::sync::Arc;

use axum::{
   Router,
   body::Body,
   http::{Request, StatusCode, header},
};
use taskshop_api::{
   app_builder::build_app,
   handler::{TaskState, UserState},
   usecase::{TaskUseCaseImpl, UserUseCaseImpl},
};
use taskshop_domain::clock::SystemClock;
use taskshop_infra::mock::{MockTaskRepository, MockTransactionManager, MockUserRepository};
use tower::ServiceExt;

/// モックリポジトリを注入したテスト用アプリケーションを構築する
fn test_app() -> Router {
   let user_repo = Arc::new(MockUserRepository::new());
   let task_repo = Arc::new(MockTaskRepository::new());
   let tx_manager = Arc::new(MockTransactionManager::new());
   let clock = Arc::new(SystemClock);

   let user_state = Arc::new(UserState {
      usecase: UserUseCaseImpl::new(
         user_repo.clone(),
         task_repo.clone(),
         tx_manager.clone(),
         clock.clone(),
      ),
   });
   let task_state = Arc::new(TaskState {
      usecase: TaskUseCaseImpl::new(task_repo, user_repo, tx_manager, clock),
   });

   build_app(user_state, task_state)
}

fn get(uri: &str) -> Request<Body> {
   Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
   Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
   Request::builder()
      .method("DELETE")
      .uri(uri)
      .body(Body::empty())
      .unwrap()
}

/// リクエストを発行し、ステータスとボディ（JSON）を返す
///
/// ボディが空の場合は `Null` を返す。
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
   let response = app.clone().oneshot(request).await.unwrap();
   let status = response.status();
   let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   let json = if bytes.is_empty() {
      serde_json::Value::Null
   } else {
      // エクストラクタ拒否（422/400）のボディは text/plain のため、
      // JSON として解釈できない場合は Null にフォールバックする。
      serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
   };

   (status, json)
}

/// ユーザーを 1 人作成して ID を返す
async fn create_user(app: &Router, username: &str) -> i64 {
   let (status, _) = send(
      app,
      with_json(
         "POST",
         "/users/create",
         serde_json::json!({
            "username": username,
            "firstname": "太郎",
            "lastname": "山田",
            "age": 30
         }),
      ),
   )
   .await;
   assert_eq!(status, StatusCode::CREATED);

   // 作成エンドポイントはエンティティを返さないため一覧から引く
   let (_, body) = send(app, get("/users")).await;
   body["data"]
      .as_array()
      .unwrap()
      .iter()
      .find(|u| u["username"] == username)
      .unwrap()["id"]
      .as_i64()
      .unwrap()
}

// ===== ルート・ヘルスチェック =====

#[tokio::test]
async fn test_ルートはウェルカムメッセージを返す() {
   let app = test_app();

   let (status, body) = send(&app, get("/")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, serde_json::json!({ "message": "My shop" }));
}

#[tokio::test]
async fn test_ヘルスチェックは200を返す() {
   let app = test_app();

   let (status, body) = send(&app, get("/health")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["status"], "healthy");
}

// ===== ユーザー API =====

#[tokio::test]
async fn test_ユーザーが存在しない場合の一覧は空配列() {
   let app = test_app();

   let (status, body) = send(&app, get("/users")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, serde_json::json!({ "data": [] }));
}

#[tokio::test]
async fn test_作成したユーザーは送信したフィールドのまま取得できる() {
   let app = test_app();
   let id = create_user(&app, "yamada").await;

   let (status, body) = send(&app, get(&format!("/users/{id}"))).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(
      body,
      serde_json::json!({
         "data": {
            "id": id,
            "username": "yamada",
            "firstname": "太郎",
            "lastname": "山田",
            "age": 30
         }
      })
   );
}

#[tokio::test]
async fn test_ユーザー作成は201とackを返す() {
   let app = test_app();

   let (status, body) = send(
      &app,
      with_json(
         "POST",
         "/users/create",
         serde_json::json!({
            "username": "yamada",
            "firstname": "太郎",
            "lastname": "山田",
            "age": 30
         }),
      ),
   )
   .await;

   assert_eq!(status, StatusCode::CREATED);
   assert_eq!(body["data"]["status_code"], 201);
}

#[tokio::test]
async fn test_存在しないユーザーの取得は404() {
   let app = test_app();

   let (status, body) = send(&app, get("/users/999")).await;

   assert_eq!(status, StatusCode::NOT_FOUND);
   assert_eq!(body["status"], 404);
   assert_eq!(body["type"], "https://taskshop.example.com/errors/not-found");
}

#[tokio::test]
async fn test_負の年齢のユーザー作成は400() {
   let app = test_app();

   let (status, body) = send(
      &app,
      with_json(
         "POST",
         "/users/create",
         serde_json::json!({
            "username": "yamada",
            "firstname": "太郎",
            "lastname": "山田",
            "age": -1
         }),
      ),
   )
   .await;

   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(
      body["type"],
      "https://taskshop.example.com/errors/validation-error"
   );
}

#[tokio::test]
async fn test_必須フィールド欠落のユーザー作成は永続化前に拒否される() {
   let app = test_app();

   // age を欠いたペイロードは Json エクストラクタが拒否する
   let (status, _) = send(
      &app,
      with_json(
         "POST",
         "/users/create",
         serde_json::json!({
            "username": "yamada",
            "firstname": "太郎",
            "lastname": "山田"
         }),
      ),
   )
   .await;

   assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

   let (_, body) = send(&app, get("/users")).await;
   assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_ユーザーの部分更新は未指定フィールドを保持する() {
   let app = test_app();
   let id = create_user(&app, "yamada").await;

   let (status, _) = send(
      &app,
      with_json(
         "PUT",
         &format!("/users/update/{id}"),
         serde_json::json!({ "age": 31 }),
      ),
   )
   .await;
   assert_eq!(status, StatusCode::OK);

   let (_, body) = send(&app, get(&format!("/users/{id}"))).await;
   assert_eq!(body["data"]["age"], 31);
   assert_eq!(body["data"]["firstname"], "太郎");
   assert_eq!(body["data"]["lastname"], "山田");
}

#[tokio::test]
async fn test_存在しないユーザーの更新は404() {
   let app = test_app();

   let (status, _) = send(
      &app,
      with_json("PUT", "/users/update/999", serde_json::json!({ "age": 31 })),
   )
   .await;

   assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ユーザー削除は2回目に404を返す() {
   let app = test_app();
   let id = create_user(&app, "yamada").await;

   let (first, body) = send(&app, delete(&format!("/users/delete/{id}"))).await;
   assert_eq!(first, StatusCode::OK);
   assert_eq!(body["data"]["status_code"], 200);

   let (second, _) = send(&app, delete(&format!("/users/delete/{id}"))).await;
   assert_eq!(second, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_タスクを所有するユーザーの削除は409() {
   let app = test_app();
   let id = create_user(&app, "yamada").await;
   send(
      &app,
      with_json(
         "POST",
         "/tasks/create",
         serde_json::json!({
            "title": "Buy Milk",
            "content": "牛乳を2本買う",
            "priority": 1,
            "user_id": id
         }),
      ),
   )
   .await;

   let (status, body) = send(&app, delete(&format!("/users/delete/{id}"))).await;

   assert_eq!(status, StatusCode::CONFLICT);
   assert_eq!(body["type"], "https://taskshop.example.com/errors/conflict");
}

// ===== タスク API =====

#[tokio::test]
async fn test_タスク作成はスラッグ付きの本体を返す() {
   let app = test_app();
   let user_id = create_user(&app, "yamada").await;

   let (status, body) = send(
      &app,
      with_json(
         "POST",
         "/tasks/create",
         serde_json::json!({
            "title": "Buy Milk",
            "content": "牛乳を2本買う",
            "priority": 1,
            "user_id": user_id
         }),
      ),
   )
   .await;

   assert_eq!(status, StatusCode::CREATED);
   assert_eq!(body["data"]["slug"], "buy-milk");
   assert_eq!(body["data"]["completed"], false);
   assert_eq!(body["data"]["priority"], 1);
   assert_eq!(body["data"]["user_id"], user_id);
   assert!(body["data"]["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_存在しないユーザーへのタスク作成は404で挿入なし() {
   let app = test_app();

   let (status, _) = send(
      &app,
      with_json(
         "POST",
         "/tasks/create",
         serde_json::json!({
            "title": "Buy Milk",
            "content": "content",
            "priority": 0,
            "user_id": 999
         }),
      ),
   )
   .await;
   assert_eq!(status, StatusCode::NOT_FOUND);

   let (_, body) = send(&app, get("/tasks")).await;
   assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_同じスラッグになるタスクの作成は409() {
   let app = test_app();
   let user_id = create_user(&app, "yamada").await;
   let payload = serde_json::json!({
      "title": "Buy Milk",
      "content": "content",
      "priority": 0,
      "user_id": user_id
   });

   let (first, _) = send(&app, with_json("POST", "/tasks/create", payload.clone())).await;
   assert_eq!(first, StatusCode::CREATED);

   let (second, body) = send(&app, with_json("POST", "/tasks/create", payload)).await;
   assert_eq!(second, StatusCode::CONFLICT);
   assert_eq!(body["type"], "https://taskshop.example.com/errors/conflict");
}

#[tokio::test]
async fn test_completedのみの更新でpriorityは保持される() {
   let app = test_app();
   let user_id = create_user(&app, "yamada").await;
   let (_, created) = send(
      &app,
      with_json(
         "POST",
         "/tasks/create",
         serde_json::json!({
            "title": "Buy Milk",
            "content": "content",
            "priority": 1,
            "user_id": user_id
         }),
      ),
   )
   .await;
   let task_id = created["data"]["id"].as_i64().unwrap();

   let (status, body) = send(
      &app,
      with_json(
         "PUT",
         &format!("/tasks/update/{task_id}"),
         serde_json::json!({ "completed": true }),
      ),
   )
   .await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["data"]["completed"], true);
   assert_eq!(body["data"]["priority"], 1);
   assert_eq!(body["data"]["slug"], "buy-milk");
}

#[tokio::test]
async fn test_存在しないタスクの取得更新削除は404() {
   let app = test_app();

   let (get_status, _) = send(&app, get("/tasks/999")).await;
   let (update_status, _) = send(
      &app,
      with_json(
         "PUT",
         "/tasks/update/999",
         serde_json::json!({ "completed": true }),
      ),
   )
   .await;
   let (delete_status, _) = send(&app, delete("/tasks/delete/999")).await;

   assert_eq!(get_status, StatusCode::NOT_FOUND);
   assert_eq!(update_status, StatusCode::NOT_FOUND);
   assert_eq!(delete_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_タスク削除はackを返しタスクが消える() {
   let app = test_app();
   let user_id = create_user(&app, "yamada").await;
   let (_, created) = send(
      &app,
      with_json(
         "POST",
         "/tasks/create",
         serde_json::json!({
            "title": "Buy Milk",
            "content": "content",
            "priority": 0,
            "user_id": user_id
         }),
      ),
   )
   .await;
   let task_id = created["data"]["id"].as_i64().unwrap();

   let (status, body) = send(&app, delete(&format!("/tasks/delete/{task_id}"))).await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["data"]["status_code"], 200);

   let (_, tasks) = send(&app, get("/tasks")).await;
   assert_eq!(tasks["data"].as_array().unwrap().len(), 0);
}

// ===== カテゴリ API（スタブ） =====

#[tokio::test]
async fn test_カテゴリ一覧は固定メッセージを返す() {
   let app = test_app();

   let (status, body) = send(&app, get("/category/categories")).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body, serde_json::json!({ "message": "List of categories" }));
}

#[tokio::test]
async fn test_カテゴリのスタブエンドポイントは200を返す() {
   let app = test_app();

   let (create_status, _) = send(
      &app,
      Request::builder()
         .method("POST")
         .uri("/category/create")
         .body(Body::empty())
         .unwrap(),
   )
   .await;
   let (update_status, _) = send(
      &app,
      Request::builder()
         .method("PUT")
         .uri("/category/update_category")
         .body(Body::empty())
         .unwrap(),
   )
   .await;
   let (delete_status, _) = send(&app, delete("/category/delete")).await;

   assert_eq!(create_status, StatusCode::OK);
   assert_eq!(update_status, StatusCode::OK);
   assert_eq!(delete_status, StatusCode::OK);
}
