//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **実行時バインドクエリ**: ビルド時に DB 接続を要求しない
//! - **行 → エンティティ変換**: 行構造体から `from_db` で復元し、
//!   DB に格納された値が検証を通らない場合は `Unexpected` とする
//! - **書き込みは TxContext 必須**: コミットは呼び出し側が明示的に行う

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use taskshop_domain::user::{Age, FirstName, LastName, NewUser, User, UserId, Username};

use crate::{db::TxContext, error::InfraError};

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// 全ユーザーを ID 順で取得する
   ///
   /// ユーザーが存在しない場合は空の Vec を返す。
   async fn find_all(&self) -> Result<Vec<User>, InfraError>;

   /// ID でユーザーを検索する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(user))`: ユーザーが見つかった場合
   /// - `Ok(None)`: ユーザーが見つからない場合
   /// - `Err(_)`: データベースエラー
   async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError>;

   /// ユーザーを挿入し、採番済みのエンティティを返す
   ///
   /// `created_at` / `updated_at` には `now` が設定される。
   async fn insert(
      &self,
      tx: &mut TxContext,
      new_user: &NewUser,
      now: DateTime<Utc>,
   ) -> Result<User, InfraError>;

   /// ユーザーを更新する（部分更新のマージ後の状態を反映）
   ///
   /// username は不変のため更新対象に含めない。
   async fn update(&self, tx: &mut TxContext, user: &User) -> Result<(), InfraError>;

   /// ユーザーを削除し、削除された行数を返す
   async fn delete(&self, tx: &mut TxContext, id: UserId) -> Result<u64, InfraError>;
}

/// users テーブルの行
#[derive(sqlx::FromRow)]
struct UserRow {
   id:         i64,
   username:   String,
   firstname:  String,
   lastname:   String,
   age:        i32,
   created_at: DateTime<Utc>,
   updated_at: DateTime<Utc>,
}

impl UserRow {
   /// 行をドメインエンティティに変換する
   ///
   /// DB に格納された値は挿入時に検証済みのため、ここでの失敗は
   /// データ破損を意味する。
   fn into_user(self) -> Result<User, InfraError> {
      Ok(User::from_db(
         UserId::from_i64(self.id),
         Username::new(self.username).map_err(|e| InfraError::unexpected(e.to_string()))?,
         FirstName::new(self.firstname).map_err(|e| InfraError::unexpected(e.to_string()))?,
         LastName::new(self.lastname).map_err(|e| InfraError::unexpected(e.to_string()))?,
         Age::new(self.age).map_err(|e| InfraError::unexpected(e.to_string()))?,
         self.created_at,
         self.updated_at,
      ))
   }
}

const SELECT_COLUMNS: &str = "id, username, firstname, lastname, age, created_at, updated_at";

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_all(&self) -> Result<Vec<User>, InfraError> {
      let rows = sqlx::query_as::<_, UserRow>(&format!(
         "SELECT {SELECT_COLUMNS} FROM users ORDER BY id"
      ))
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(UserRow::into_user).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
      let row = sqlx::query_as::<_, UserRow>(&format!(
         "SELECT {SELECT_COLUMNS} FROM users WHERE id = $1"
      ))
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await?;

      row.map(UserRow::into_user).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn insert(
      &self,
      tx: &mut TxContext,
      new_user: &NewUser,
      now: DateTime<Utc>,
   ) -> Result<User, InfraError> {
      let row = sqlx::query_as::<_, UserRow>(&format!(
         r#"
         INSERT INTO users (username, firstname, lastname, age, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)
         RETURNING {SELECT_COLUMNS}
         "#
      ))
      .bind(new_user.username().as_str())
      .bind(new_user.firstname().as_str())
      .bind(new_user.lastname().as_str())
      .bind(new_user.age().as_i32())
      .bind(now)
      .fetch_one(tx.conn())
      .await?;

      row.into_user()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn update(&self, tx: &mut TxContext, user: &User) -> Result<(), InfraError> {
      sqlx::query(
         r#"
         UPDATE users
         SET firstname = $2, lastname = $3, age = $4, updated_at = $5
         WHERE id = $1
         "#,
      )
      .bind(user.id().as_i64())
      .bind(user.firstname().as_str())
      .bind(user.lastname().as_str())
      .bind(user.age().as_i32())
      .bind(user.updated_at())
      .execute(tx.conn())
      .await?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, tx: &mut TxContext, id: UserId) -> Result<u64, InfraError> {
      let result = sqlx::query("DELETE FROM users WHERE id = $1")
         .bind(id.as_i64())
         .execute(tx.conn())
         .await
         .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
               InfraError::conflict("User", format!("ユーザー {id} はタスクから参照されています"))
            }
            _ => InfraError::from(e),
         })?;

      Ok(result.rows_affected())
   }
}
