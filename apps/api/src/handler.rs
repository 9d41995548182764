//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export、共通 DTO）
//! └── handler/
//!     ├── category.rs # カテゴリハンドラ（スタブ）
//!     ├── health.rs   # ヘルスチェックハンドラ
//!     ├── task.rs     # タスク CRUD ハンドラ
//!     └── user.rs     # ユーザー CRUD ハンドラ
//! ```

use axum::Json;
use serde::Serialize;

pub mod category;
pub mod health;
pub mod task;
pub mod user;

pub use category::{create_category, delete_category, list_categories, update_category};
pub use health::health_check;
pub use task::{TaskState, create_task, delete_task, get_task, list_tasks, update_task};
pub use user::{UserState, create_user, delete_user, get_user, list_users, update_user};

/// 静的メッセージレスポンス
///
/// ウェルカムメッセージとカテゴリスタブで使用する。
#[derive(Debug, Serialize)]
pub struct MessageResponse {
   pub message: String,
}

impl MessageResponse {
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         message: message.into(),
      }
   }
}

/// 処理結果の ACK ペイロード
///
/// 作成・更新・削除のうち、エンティティ本体を返さないエンドポイントが
/// `{ "data": { "status_code": ..., "transaction": ... } }` の形で返す。
#[derive(Debug, Serialize)]
pub struct TransactionAck {
   pub status_code: u16,
   pub transaction: String,
}

impl TransactionAck {
   /// 201 Created の ACK を作成する
   pub fn created(transaction: impl Into<String>) -> Self {
      Self {
         status_code: 201,
         transaction: transaction.into(),
      }
   }

   /// 200 OK の ACK を作成する
   pub fn ok(transaction: impl Into<String>) -> Self {
      Self {
         status_code: 200,
         transaction: transaction.into(),
      }
   }
}

/// ウェルカムメッセージ
///
/// ## エンドポイント
/// GET /
pub async fn welcome() -> Json<MessageResponse> {
   Json(MessageResponse::new("My shop"))
}
