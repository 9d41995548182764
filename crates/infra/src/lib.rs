//! # TaskShop インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその具体的な実装を提供する。
//! 外部システムの詳細をカプセル化し、ユースケース層を
//! インフラの変更から保護する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **トランザクション管理**: 書き込みの明示的コミットを構造的に強制
//! - **リポジトリ実装**: ユーザー・タスクの永続化操作
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理とトランザクションコンテキスト
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - [`mock`] - テスト用インメモリモック（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use db::{PgTransactionManager, TransactionManager, TxContext};
pub use error::{InfraError, InfraErrorKind};
