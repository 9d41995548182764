//! # TaskShop API サーバー
//!
//! ユーザー・タスク・カテゴリを HTTP で公開する CRUD バックエンド。
//!
//! ## アーキテクチャ
//!
//! ```text
//! handler（HTTP 変換） → usecase（ビジネスロジック） → repository（永続化）
//! ```
//!
//! - **handler**: リクエスト DTO の検証とレスポンスへの変換のみを行い、
//!   薄く保つ
//! - **usecase**: 存在チェック・部分更新のマージ・トランザクション境界を担当
//! - **repository**: `taskshop-infra` のトレイト経由で PostgreSQL に到達
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーター組み立て（テストからも使用）
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - ユースケース実装

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
