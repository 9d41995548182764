//! # カテゴリ API ハンドラ（スタブ）
//!
//! カテゴリの永続化は未実装。ルートの存在のみを保証する
//! プレースホルダで、一覧は固定メッセージを返し、
//! 作成・更新・削除は何も行わずに 200 を返す。

use axum::{Json, http::StatusCode};

use crate::handler::MessageResponse;

/// カテゴリ一覧を取得する（固定メッセージ）
///
/// ## エンドポイント
/// GET /category/categories
pub async fn list_categories() -> Json<MessageResponse> {
   Json(MessageResponse::new("List of categories"))
}

/// カテゴリを作成する（未実装スタブ）
///
/// ## エンドポイント
/// POST /category/create
pub async fn create_category() -> StatusCode {
   StatusCode::OK
}

/// カテゴリを更新する（未実装スタブ）
///
/// ## エンドポイント
/// PUT /category/update_category
pub async fn update_category() -> StatusCode {
   StatusCode::OK
}

/// カテゴリを削除する（未実装スタブ）
///
/// ## エンドポイント
/// DELETE /category/delete
pub async fn delete_category() -> StatusCode {
   StatusCode::OK
}
