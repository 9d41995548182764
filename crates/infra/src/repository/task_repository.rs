//! # TaskRepository
//!
//! タスク情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **スラッグの一意性**: `tasks.slug` のユニークインデックス違反を
//!   [`InfraErrorKind::Conflict`](crate::error::InfraErrorKind) に変換する
//! - **スラッグは更新しない**: UPDATE 文の SET 句に slug を含めない
//!   （作成後不変のドメイン不変条件をクエリ側でも守る）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskshop_domain::{
   task::{NewTask, Priority, Slug, Task, TaskContent, TaskId, TaskTitle},
   user::UserId,
};

use crate::{db::TxContext, error::InfraError};

/// タスクリポジトリトレイト
#[async_trait]
pub trait TaskRepository: Send + Sync {
   /// 全タスクを ID 順で取得する
   async fn find_all(&self) -> Result<Vec<Task>, InfraError>;

   /// ID でタスクを検索する
   async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, InfraError>;

   /// 指定ユーザーに紐づくタスク数をカウントする
   ///
   /// ユーザー削除時の依存チェックで使用する。
   async fn count_by_user(&self, user_id: UserId) -> Result<i64, InfraError>;

   /// タスクを挿入し、採番済みのエンティティを返す
   ///
   /// 新規タスクは常に `completed = false` で挿入される
   /// （[`NewTask`] が completed を持たないため、ここで固定値を書く）。
   ///
   /// # エラー
   ///
   /// スラッグが既存タスクと重複する場合は `Conflict` を返す。
   async fn insert(
      &self,
      tx: &mut TxContext,
      new_task: &NewTask,
      now: DateTime<Utc>,
   ) -> Result<Task, InfraError>;

   /// タスクを更新する（部分更新のマージ後の状態を反映）
   ///
   /// slug は不変のため更新対象に含めない。
   async fn update(&self, tx: &mut TxContext, task: &Task) -> Result<(), InfraError>;

   /// タスクを削除し、削除された行数を返す
   async fn delete(&self, tx: &mut TxContext, id: TaskId) -> Result<u64, InfraError>;
}

/// tasks テーブルの行
#[derive(sqlx::FromRow)]
struct TaskRow {
   id:         i64,
   title:      String,
   content:    String,
   priority:   i32,
   completed:  bool,
   slug:       String,
   user_id:    i64,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

impl TaskRow {
   /// 行をドメインエンティティに変換する
   fn into_task(self) -> Result<Task, InfraError> {
      Ok(Task::from_db(
         TaskId::from_i64(self.id),
         TaskTitle::new(self.title).map_err(|e| InfraError::unexpected(e.to_string()))?,
         TaskContent::new(self.content).map_err(|e| InfraError::unexpected(e.to_string()))?,
         Priority::new(self.priority).map_err(|e| InfraError::unexpected(e.to_string()))?,
         self.completed,
         Slug::new(self.slug).map_err(|e| InfraError::unexpected(e.to_string()))?,
         UserId::from_i64(self.user_id),
         self.created_at,
         self.updated_at,
      ))
   }
}

const SELECT_COLUMNS: &str =
   "id, title, content, priority, completed, slug, user_id, created_at, updated_at";

/// PostgreSQL 実装の TaskRepository
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
   pool: PgPool,
}

impl PostgresTaskRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_all(&self) -> Result<Vec<Task>, InfraError> {
      let rows = sqlx::query_as::<_, TaskRow>(&format!(
         "SELECT {SELECT_COLUMNS} FROM tasks ORDER BY id"
      ))
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(TaskRow::into_task).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, InfraError> {
      let row = sqlx::query_as::<_, TaskRow>(&format!(
         "SELECT {SELECT_COLUMNS} FROM tasks WHERE id = $1"
      ))
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await?;

      row.map(TaskRow::into_task).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%user_id))]
   async fn count_by_user(&self, user_id: UserId) -> Result<i64, InfraError> {
      let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE user_id = $1")
         .bind(user_id.as_i64())
         .fetch_one(&self.pool)
         .await?;

      Ok(count)
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn insert(
      &self,
      tx: &mut TxContext,
      new_task: &NewTask,
      now: DateTime<Utc>,
   ) -> Result<Task, InfraError> {
      let row = sqlx::query_as::<_, TaskRow>(&format!(
         r#"
         INSERT INTO tasks (title, content, priority, completed, slug, user_id, created_at, updated_at)
         VALUES ($1, $2, $3, FALSE, $4, $5, $6, $6)
         RETURNING {SELECT_COLUMNS}
         "#
      ))
      .bind(new_task.title().as_str())
      .bind(new_task.content().as_str())
      .bind(new_task.priority().as_i32())
      .bind(new_task.slug().as_str())
      .bind(new_task.user_id().as_i64())
      .bind(now)
      .fetch_one(tx.conn())
      .await
      .map_err(|e| match &e {
         sqlx::Error::Database(db) if db.is_unique_violation() => InfraError::conflict(
            "Task",
            format!("slug '{}' は既に存在します", new_task.slug()),
         ),
         _ => InfraError::from(e),
      })?;

      row.into_task()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn update(&self, tx: &mut TxContext, task: &Task) -> Result<(), InfraError> {
      sqlx::query(
         r#"
         UPDATE tasks
         SET title = $2, content = $3, priority = $4, completed = $5, updated_at = $6
         WHERE id = $1
         "#,
      )
      .bind(task.id().as_i64())
      .bind(task.title().as_str())
      .bind(task.content().as_str())
      .bind(task.priority().as_i32())
      .bind(task.completed())
      .bind(task.updated_at())
      .execute(tx.conn())
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, tx: &mut TxContext, id: TaskId) -> Result<u64, InfraError> {
      let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
         .bind(id.as_i64())
         .execute(tx.conn())
         .await?;

      Ok(result.rows_affected())
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_トレイトはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresTaskRepository>();
   }
}
