//! # API エラー定義
//!
//! API 層のエラーと、HTTP レスポンス（RFC 9457 Problem Details）への
//! 変換を定義する。
//!
//! ## エラーの階層
//!
//! ```text
//! ドメイン層エラー (DomainError) ─┐
//! インフラ層エラー (InfraError) ──┼→ ApiError → IntoResponse → HTTP レスポンス
//! その他 (anyhow::Error) ────────┘
//! ```

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use taskshop_domain::DomainError;
use taskshop_infra::{InfraError, InfraErrorKind};
use taskshop_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
///
/// ハンドラから返されるエラー型。`IntoResponse` を実装しているため、
/// axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
   /// リソースが見つからない（404 Not Found）
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// バリデーションエラー（400 Bad Request）
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// 競合（409 Conflict）
   ///
   /// スラッグの重複や、タスクを所有するユーザーの削除など。
   #[error("競合が発生しました: {0}")]
   Conflict(String),

   /// データベースエラー（500 Internal Server Error）
   #[error("データベースエラー: {0}")]
   Database(InfraError),

   /// 内部エラー（500 Internal Server Error）
   #[error("内部エラー: {0}")]
   Internal(#[from] anyhow::Error),
}

impl From<DomainError> for ApiError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => ApiError::Validation(msg),
         e @ DomainError::NotFound { .. } => ApiError::NotFound(e.to_string()),
      }
   }
}

impl From<InfraError> for ApiError {
   fn from(err: InfraError) -> Self {
      // 制約違反（スラッグ重複、FK 制約）は 409 として呼び出し元に返す
      match err.kind() {
         InfraErrorKind::Conflict { .. } => ApiError::Conflict(err.to_string()),
         _ => ApiError::Database(err),
      }
   }
}

impl IntoResponse for ApiError {
   /// `ApiError` を HTTP レスポンスに変換する
   ///
   /// # マッピング
   ///
   /// | ApiError | HTTP Status |
   /// |----------|-------------|
   /// | NotFound | 404 |
   /// | Validation | 400 |
   /// | Conflict | 409 |
   /// | Database / Internal | 500（詳細はログのみ） |
   fn into_response(self) -> Response {
      let (status, body) = match self {
         ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, ErrorResponse::not_found(detail)),
         ApiError::Validation(detail) => {
            (StatusCode::BAD_REQUEST, ErrorResponse::validation_error(detail))
         }
         ApiError::Conflict(detail) => (StatusCode::CONFLICT, ErrorResponse::conflict(detail)),
         ApiError::Database(err) => {
            // 内部エラーの詳細はログにのみ出力（クライアントには返さない）
            tracing::error!(error = %err, span_trace = %err.span_trace(), "データベースエラー");
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               ErrorResponse::internal_error(),
            )
         }
         ApiError::Internal(err) => {
            tracing::error!("内部エラー: {:?}", err);
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               ErrorResponse::internal_error(),
            )
         }
      };

      (status, Json(body)).into_response()
   }
}
