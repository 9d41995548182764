//! # ユーザー API ハンドラ
//!
//! ユーザー関連エンドポイントを実装する。
//!
//! リクエスト DTO を値オブジェクトに変換（ここで検証が走る）し、
//! ユースケースに委譲する。レスポンスは `{ "data": T }` エンベロープで包む。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use taskshop_domain::user::{Age, FirstName, LastName, User, UserId, Username};
use taskshop_shared::ApiResponse;

use crate::{
   error::ApiError,
   handler::TransactionAck,
   usecase::{CreateUserInput, UpdateUserInput, UserUseCaseImpl},
};

/// ユーザーハンドラーの State
pub struct UserState {
   pub usecase: UserUseCaseImpl,
}

/// ユーザー DTO
///
/// HTTP 境界で公開するフィールドのみを持つ
/// （`created_at` / `updated_at` は公開しない）。
#[derive(Debug, Serialize)]
pub struct UserDto {
   pub id:        i64,
   pub username:  String,
   pub firstname: String,
   pub lastname:  String,
   pub age:       i32,
}

impl UserDto {
   fn from_user(user: &User) -> Self {
      Self {
         id:        user.id().as_i64(),
         username:  user.username().as_str().to_string(),
         firstname: user.firstname().as_str().to_string(),
         lastname:  user.lastname().as_str().to_string(),
         age:       user.age().as_i32(),
      }
   }
}

/// ユーザー作成リクエスト
///
/// 全フィールド必須。型・値の検証は値オブジェクトへの変換時に行う。
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
   pub username:  String,
   pub firstname: String,
   pub lastname:  String,
   pub age:       i32,
}

/// ユーザー更新リクエスト
///
/// 各フィールドは個別に省略可能。省略（または null）は
/// 「格納済みの値を保持する」を意味する。username は変更不可。
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
   #[serde(default)]
   pub firstname: Option<String>,
   #[serde(default)]
   pub lastname:  Option<String>,
   #[serde(default)]
   pub age:       Option<i32>,
}

/// 全ユーザーを取得する
///
/// ## エンドポイント
/// GET /users
pub async fn list_users(State(state): State<Arc<UserState>>) -> Result<Response, ApiError> {
   let users = state.usecase.list_users().await?;

   let response = ApiResponse::new(users.iter().map(UserDto::from_user).collect::<Vec<_>>());
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// ID でユーザーを取得する
///
/// ## エンドポイント
/// GET /users/{user_id}
pub async fn get_user(
   State(state): State<Arc<UserState>>,
   Path(user_id): Path<i64>,
) -> Result<Response, ApiError> {
   let user = state.usecase.get_user(UserId::from_i64(user_id)).await?;

   let response = ApiResponse::new(UserDto::from_user(&user));
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// ユーザーを作成する
///
/// 作成したエンティティは返さず、ACK のみを返す。
///
/// ## エンドポイント
/// POST /users/create
pub async fn create_user(
   State(state): State<Arc<UserState>>,
   Json(payload): Json<CreateUserRequest>,
) -> Result<Response, ApiError> {
   let input = CreateUserInput {
      username:  Username::new(payload.username)?,
      firstname: FirstName::new(payload.firstname)?,
      lastname:  LastName::new(payload.lastname)?,
      age:       Age::new(payload.age)?,
   };

   state.usecase.create_user(input).await?;

   let response = ApiResponse::new(TransactionAck::created("ユーザーを作成しました"));
   Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// ユーザーを部分更新する
///
/// ## エンドポイント
/// PUT /users/update/{user_id}
pub async fn update_user(
   State(state): State<Arc<UserState>>,
   Path(user_id): Path<i64>,
   Json(payload): Json<UpdateUserRequest>,
) -> Result<Response, ApiError> {
   let input = UpdateUserInput {
      user_id:   UserId::from_i64(user_id),
      firstname: payload.firstname.map(FirstName::new).transpose()?,
      lastname:  payload.lastname.map(LastName::new).transpose()?,
      age:       payload.age.map(Age::new).transpose()?,
   };

   state.usecase.update_user(input).await?;

   let response = ApiResponse::new(TransactionAck::ok("ユーザーを更新しました"));
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// ユーザーを削除する
///
/// ## エンドポイント
/// DELETE /users/delete/{user_id}
pub async fn delete_user(
   State(state): State<Arc<UserState>>,
   Path(user_id): Path<i64>,
) -> Result<Response, ApiError> {
   state.usecase.delete_user(UserId::from_i64(user_id)).await?;

   let response = ApiResponse::new(TransactionAck::ok("ユーザーを削除しました"));
   Ok((StatusCode::OK, Json(response)).into_response())
}
