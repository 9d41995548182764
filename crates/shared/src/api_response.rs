//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 公開 API の統一レスポンス型
///
/// すべての公開 API エンドポイントは `{ "data": T }` 形式でレスポンスを返す。
/// ハンドラがエンティティ DTO・リスト・処理結果 ACK をこの型で包むことで、
/// クライアント側のデコードを一本化する。
///
/// ## 使用例
///
/// ```
/// use taskshop_shared::ApiResponse;
///
/// let response = ApiResponse::new(vec![1, 2, 3]);
/// assert_eq!(response.data, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
