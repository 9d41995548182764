//! # TaskShop ドメイン層
//!
//! ビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`user::User`],
//!   [`task::Task`]）
//! - **値オブジェクト**: 生成時にバリデーションを実行する不変オブジェクト
//!   （例: [`user::Username`], [`task::Slug`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//! これにより、ビジネスロジックの純粋性が保たれる。
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ（テストで固定時刻を注入可能にする）
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`task`] - タスクエンティティと関連値オブジェクト
//! - [`user`] - ユーザーエンティティと関連値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use taskshop_domain::{DomainError, user::Username};
//!
//! // 値オブジェクトの生成（バリデーション付き）
//! let name = Username::new("alice")?;
//! assert_eq!(name.as_str(), "alice");
//! # Ok::<(), DomainError>(())
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod task;
pub mod user;

pub use error::DomainError;
