//! # ユースケース層
//!
//! ハンドラから呼び出されるビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - リポジトリ・トランザクション管理・時刻はすべて `Arc<dyn Trait>` で
//!   注入する（プロセスグローバルな状態を持たない）
//! - 存在チェック → マージ → 書き込み → 明示的コミット、の順で処理する
//! - エラーは [`crate::error::ApiError`] に集約する

pub mod task;
pub mod user;

pub use task::{CreateTaskInput, TaskUseCaseImpl, UpdateTaskInput};
pub use user::{CreateUserInput, UpdateUserInput, UserUseCaseImpl};
