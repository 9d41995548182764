//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! サービス共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - よく使うエラー種別は便利コンストラクタで提供し、URI のハードコードを排除

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://taskshop.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
///
/// `type` フィールドは URI で問題の種類を識別する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   ///
   /// サービス固有のエラー種別を作成する場合に使用する。
   /// `error_type_suffix` はベース URI に付加される（例: `"slug-conflict"`）。
   pub fn new(
      error_type_suffix: &str,
      title: impl Into<String>,
      status: u16,
      detail: impl Into<String>,
   ) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
         title: title.into(),
         status,
         detail: detail.into(),
      }
   }

   /// 400 Bad Request
   pub fn bad_request(detail: impl Into<String>) -> Self {
      Self::new("bad-request", "Bad Request", 400, detail)
   }

   /// 400 Validation Error
   pub fn validation_error(detail: impl Into<String>) -> Self {
      Self::new("validation-error", "Validation Error", 400, detail)
   }

   /// 404 Not Found
   pub fn not_found(detail: impl Into<String>) -> Self {
      Self::new("not-found", "Not Found", 404, detail)
   }

   /// 409 Conflict
   pub fn conflict(detail: impl Into<String>) -> Self {
      Self::new("conflict", "Conflict", 409, detail)
   }

   /// 500 Internal Server Error
   ///
   /// detail は固定値（内部情報を漏らさないため）。
   pub fn internal_error() -> Self {
      Self::new(
         "internal-error",
         "Internal Server Error",
         500,
         "内部エラーが発生しました",
      )
   }
}
