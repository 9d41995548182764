//! # ユーザー管理ユースケース

use std::sync::Arc;

use taskshop_domain::{
   clock::Clock,
   user::{Age, FirstName, LastName, NewUser, User, UserId, Username},
};
use taskshop_infra::{
   TransactionManager,
   repository::{TaskRepository, UserRepository},
};

use crate::error::ApiError;

/// ユーザー作成の入力
pub struct CreateUserInput {
   pub username:  Username,
   pub firstname: FirstName,
   pub lastname:  LastName,
   pub age:       Age,
}

/// ユーザー更新の入力
///
/// `None` のフィールドは「未指定」を意味し、格納済みの値を保持する。
/// username は更新対象外（作成後不変）。
pub struct UpdateUserInput {
   pub user_id:   UserId,
   pub firstname: Option<FirstName>,
   pub lastname:  Option<LastName>,
   pub age:       Option<Age>,
}

/// ユーザー管理ユースケース
pub struct UserUseCaseImpl {
   user_repository: Arc<dyn UserRepository>,
   task_repository: Arc<dyn TaskRepository>,
   tx_manager: Arc<dyn TransactionManager>,
   clock: Arc<dyn Clock>,
}

impl UserUseCaseImpl {
   pub fn new(
      user_repository: Arc<dyn UserRepository>,
      task_repository: Arc<dyn TaskRepository>,
      tx_manager: Arc<dyn TransactionManager>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         user_repository,
         task_repository,
         tx_manager,
         clock,
      }
   }

   /// 全ユーザーを取得する
   ///
   /// ユーザーが存在しない場合は空のリストを返す（常に成功）。
   pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
      Ok(self.user_repository.find_all().await?)
   }

   /// ID でユーザーを取得する
   pub async fn get_user(&self, user_id: UserId) -> Result<User, ApiError> {
      self
         .user_repository
         .find_by_id(user_id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("ユーザーが見つかりません: {user_id}")))
   }

   /// ユーザーを作成する
   ///
   /// 1. User ドラフト作成（値オブジェクトは検証済み）
   /// 2. トランザクション内で挿入
   /// 3. コミット
   pub async fn create_user(&self, input: CreateUserInput) -> Result<User, ApiError> {
      let new_user = NewUser::new(input.username, input.firstname, input.lastname, input.age);
      let now = self.clock.now();

      let mut tx = self.tx_manager.begin().await?;
      let user = self.user_repository.insert(&mut tx, &new_user, now).await?;
      tx.commit().await?;

      tracing::info!(user_id = %user.id(), "ユーザーを作成しました");
      Ok(user)
   }

   /// ユーザーを部分更新する
   ///
   /// 指定されたフィールドのみを差し替え、未指定のフィールドは
   /// 格納済みの値を保持する。
   pub async fn update_user(&self, input: UpdateUserInput) -> Result<User, ApiError> {
      let mut user = self
         .user_repository
         .find_by_id(input.user_id)
         .await?
         .ok_or_else(|| {
            ApiError::NotFound(format!("ユーザーが見つかりません: {}", input.user_id))
         })?;

      let now = self.clock.now();

      if let Some(firstname) = input.firstname {
         user = user.with_firstname(firstname, now);
      }
      if let Some(lastname) = input.lastname {
         user = user.with_lastname(lastname, now);
      }
      if let Some(age) = input.age {
         user = user.with_age(age, now);
      }

      let mut tx = self.tx_manager.begin().await?;
      self.user_repository.update(&mut tx, &user).await?;
      tx.commit().await?;

      Ok(user)
   }

   /// ユーザーを削除する
   ///
   /// タスクを所有しているユーザーは削除できない（409 Conflict）。
   /// FK 制約（ON DELETE RESTRICT）と同じポリシーを先にチェックして、
   /// わかりやすいエラーメッセージで返す。
   pub async fn delete_user(&self, user_id: UserId) -> Result<(), ApiError> {
      let user = self
         .user_repository
         .find_by_id(user_id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("ユーザーが見つかりません: {user_id}")))?;

      let task_count = self.task_repository.count_by_user(user.id()).await?;
      if task_count > 0 {
         return Err(ApiError::Conflict(format!(
            "ユーザー {user_id} は {task_count} 件のタスクを所有しているため削除できません"
         )));
      }

      let mut tx = self.tx_manager.begin().await?;
      let deleted = self.user_repository.delete(&mut tx, user_id).await?;
      if deleted == 0 {
         // 存在チェック後に別リクエストが削除したケース
         return Err(ApiError::NotFound(format!(
            "ユーザーが見つかりません: {user_id}"
         )));
      }
      tx.commit().await?;

      tracing::info!(%user_id, "ユーザーを削除しました");
      Ok(())
   }
}
