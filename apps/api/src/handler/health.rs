//! # ヘルスチェックハンドラ
//!
//! アプリケーションの稼働状態を確認するためのエンドポイント。
//!
//! ## 用途
//!
//! - **ロードバランサー**: ターゲットグループのヘルスチェック
//! - **コンテナオーケストレーター**: liveness/readiness probe
//! - **監視システム**: 外部監視サービスからの死活監視

use axum::Json;
use taskshop_shared::HealthResponse;

/// ヘルスチェックエンドポイント
///
/// データベースや外部サービスへの接続は確認せず、アプリケーション自体の
/// 起動状態のみを返す。常に 200 OK。
///
/// ## エンドポイント
/// GET /health
///
/// # 使用例
///
/// ```text
/// $ curl http://localhost:8000/health
/// {"status":"healthy","version":"0.1.0"}
/// ```
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse {
      status:  "healthy".to_string(),
      version: env!("CARGO_PKG_VERSION").to_string(),
   })
}
