//! # タスク管理ユースケース
//!
//! タスクの CRUD に関するビジネスロジックを実装する。
//! 作成時の参照先ユーザーの存在チェックと、更新時の
//! フィールド単位マージ（部分更新）がこの層の責務。

use std::sync::Arc;

use taskshop_domain::{
   clock::Clock,
   task::{NewTask, Priority, Task, TaskContent, TaskId, TaskTitle},
   user::UserId,
};
use taskshop_infra::{
   TransactionManager,
   repository::{TaskRepository, UserRepository},
};

use crate::error::ApiError;

/// タスク作成の入力
pub struct CreateTaskInput {
   pub title:    TaskTitle,
   pub content:  TaskContent,
   pub priority: Priority,
   pub user_id:  UserId,
}

/// タスク更新の入力
///
/// `None` のフィールドは「未指定」を意味し、格納済みの値を保持する。
/// スラッグは更新対象外（タイトルを変更しても再計算しない）。
pub struct UpdateTaskInput {
   pub task_id:   TaskId,
   pub title:     Option<TaskTitle>,
   pub content:   Option<TaskContent>,
   pub priority:  Option<Priority>,
   pub completed: Option<bool>,
}

/// タスク管理ユースケース
pub struct TaskUseCaseImpl {
   task_repository: Arc<dyn TaskRepository>,
   user_repository: Arc<dyn UserRepository>,
   tx_manager: Arc<dyn TransactionManager>,
   clock: Arc<dyn Clock>,
}

impl TaskUseCaseImpl {
   pub fn new(
      task_repository: Arc<dyn TaskRepository>,
      user_repository: Arc<dyn UserRepository>,
      tx_manager: Arc<dyn TransactionManager>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         task_repository,
         user_repository,
         tx_manager,
         clock,
      }
   }

   /// 全タスクを取得する
   pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
      Ok(self.task_repository.find_all().await?)
   }

   /// ID でタスクを取得する
   pub async fn get_task(&self, task_id: TaskId) -> Result<Task, ApiError> {
      self
         .task_repository
         .find_by_id(task_id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("タスクが見つかりません: {task_id}")))
   }

   /// タスクを作成する
   ///
   /// 1. 参照先ユーザーの存在チェック（存在しなければ 404）
   /// 2. タイトルからスラッグを導出したドラフトを作成
   /// 3. トランザクション内で挿入（completed は false で固定）
   /// 4. コミットし、採番済みタスクを返す
   pub async fn create_task(&self, input: CreateTaskInput) -> Result<Task, ApiError> {
      let user = self
         .user_repository
         .find_by_id(input.user_id)
         .await?
         .ok_or_else(|| {
            ApiError::NotFound(format!("ユーザーが見つかりません: {}", input.user_id))
         })?;

      let new_task = NewTask::new(input.title, input.content, input.priority, user.id())?;
      let now = self.clock.now();

      let mut tx = self.tx_manager.begin().await?;
      let task = self.task_repository.insert(&mut tx, &new_task, now).await?;
      tx.commit().await?;

      tracing::info!(task_id = %task.id(), slug = %task.slug(), "タスクを作成しました");
      Ok(task)
   }

   /// タスクを部分更新する
   ///
   /// 指定されたフィールドのみを差し替え、未指定のフィールドは
   /// 格納済みの値を保持する。
   pub async fn update_task(&self, input: UpdateTaskInput) -> Result<Task, ApiError> {
      let mut task = self
         .task_repository
         .find_by_id(input.task_id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("タスクが見つかりません: {}", input.task_id)))?;

      let now = self.clock.now();

      if let Some(title) = input.title {
         task = task.with_title(title, now);
      }
      if let Some(content) = input.content {
         task = task.with_content(content, now);
      }
      if let Some(priority) = input.priority {
         task = task.with_priority(priority, now);
      }
      if let Some(completed) = input.completed {
         task = task.with_completed(completed, now);
      }

      let mut tx = self.tx_manager.begin().await?;
      self.task_repository.update(&mut tx, &task).await?;
      tx.commit().await?;

      Ok(task)
   }

   /// タスクを削除する
   pub async fn delete_task(&self, task_id: TaskId) -> Result<(), ApiError> {
      self
         .task_repository
         .find_by_id(task_id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("タスクが見つかりません: {task_id}")))?;

      let mut tx = self.tx_manager.begin().await?;
      let deleted = self.task_repository.delete(&mut tx, task_id).await?;
      if deleted == 0 {
         // 存在チェック後に別リクエストが削除したケース
         return Err(ApiError::NotFound(format!(
            "タスクが見つかりません: {task_id}"
         )));
      }
      tx.commit().await?;

      tracing::info!(%task_id, "タスクを削除しました");
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use chrono::{DateTime, Utc};
   use pretty_assertions::assert_eq;
   use rstest::*;
   use taskshop_domain::{
      clock::FixedClock,
      user::{Age, FirstName, LastName, User, Username},
   };
   use taskshop_infra::mock::{MockTaskRepository, MockTransactionManager, MockUserRepository};

   use super::*;

   /// テスト用の固定タイムスタンプ
   #[fixture]
   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   struct Setup {
      usecase:   TaskUseCaseImpl,
      user_repo: Arc<MockUserRepository>,
   }

   /// ID 10 のユーザーを 1 人登録した状態のユースケースを構築する
   #[fixture]
   fn setup(now: DateTime<Utc>) -> Setup {
      let user_repo = Arc::new(MockUserRepository::new());
      user_repo.add_user(User::from_db(
         UserId::from_i64(10),
         Username::new("yamada").unwrap(),
         FirstName::new("太郎").unwrap(),
         LastName::new("山田").unwrap(),
         Age::new(30).unwrap(),
         now,
         now,
      ));

      let usecase = TaskUseCaseImpl::new(
         Arc::new(MockTaskRepository::new()),
         user_repo.clone(),
         Arc::new(MockTransactionManager::new()),
         Arc::new(FixedClock::at(now)),
      );
      Setup { usecase, user_repo }
   }

   fn create_input(title: &str, user_id: i64) -> CreateTaskInput {
      CreateTaskInput {
         title:    TaskTitle::new(title).unwrap(),
         content:  TaskContent::new("牛乳を2本買う").unwrap(),
         priority: Priority::new(1).unwrap(),
         user_id:  UserId::from_i64(user_id),
      }
   }

   #[rstest]
   #[tokio::test]
   async fn test_作成したタスクはスラッグと採番済みidを持つ(setup: Setup) {
      let task = setup
         .usecase
         .create_task(create_input("Buy Milk", 10))
         .await
         .unwrap();

      assert_eq!(task.slug().as_str(), "buy-milk");
      assert_eq!(task.user_id(), UserId::from_i64(10));
      assert_eq!(task.priority().as_i32(), 1);
   }

   #[rstest]
   #[tokio::test]
   async fn test_新規タスクは常に未完了で作成される(setup: Setup) {
      let task = setup
         .usecase
         .create_task(create_input("Buy Milk", 10))
         .await
         .unwrap();

      assert!(!task.completed());
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しないユーザーへのタスク作成はnot_foundで何も挿入しない(
      setup: Setup,
   ) {
      let result = setup.usecase.create_task(create_input("Buy Milk", 999)).await;

      assert!(matches!(result, Err(ApiError::NotFound(_))));
      assert_eq!(setup.usecase.list_tasks().await.unwrap().len(), 0);
   }

   #[rstest]
   #[tokio::test]
   async fn test_同じスラッグのタスク作成はconflictを返す(setup: Setup) {
      setup
         .usecase
         .create_task(create_input("Buy Milk", 10))
         .await
         .unwrap();

      // 記号の差はスラッグ化で消えるため同じスラッグに正規化される
      let result = setup.usecase.create_task(create_input("Buy Milk!", 10)).await;

      assert!(matches!(result, Err(ApiError::Conflict(_))));
   }

   #[rstest]
   #[tokio::test]
   async fn test_作成したタスクはgetとlistで取得できる(setup: Setup) {
      let created = setup
         .usecase
         .create_task(create_input("Buy Milk", 10))
         .await
         .unwrap();

      let fetched = setup.usecase.get_task(created.id()).await.unwrap();
      let all = setup.usecase.list_tasks().await.unwrap();

      assert_eq!(fetched, created);
      assert_eq!(all, vec![created]);
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しないidのgetはnot_foundを返す(setup: Setup) {
      let result = setup.usecase.get_task(TaskId::from_i64(999)).await;

      assert!(matches!(result, Err(ApiError::NotFound(_))));
   }

   #[rstest]
   #[tokio::test]
   async fn test_completedのみの部分更新でpriorityは保持される(setup: Setup) {
      let created = setup
         .usecase
         .create_task(create_input("Buy Milk", 10))
         .await
         .unwrap();

      let input = UpdateTaskInput {
         task_id:   created.id(),
         title:     None,
         content:   None,
         priority:  None,
         completed: Some(true),
      };
      let updated = setup.usecase.update_task(input).await.unwrap();

      assert!(updated.completed());
      assert_eq!(updated.priority().as_i32(), 1);
      assert_eq!(updated.title(), created.title());
   }

   #[rstest]
   #[tokio::test]
   async fn test_タイトル更新後もスラッグは変わらない(setup: Setup) {
      let created = setup
         .usecase
         .create_task(create_input("Buy Milk", 10))
         .await
         .unwrap();

      let input = UpdateTaskInput {
         task_id:   created.id(),
         title:     Some(TaskTitle::new("Buy Bread").unwrap()),
         content:   None,
         priority:  None,
         completed: None,
      };
      let updated = setup.usecase.update_task(input).await.unwrap();

      assert_eq!(updated.title().as_str(), "Buy Bread");
      assert_eq!(updated.slug().as_str(), "buy-milk");
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しないidのupdateはnot_foundを返す(setup: Setup) {
      let input = UpdateTaskInput {
         task_id:   TaskId::from_i64(999),
         title:     None,
         content:   None,
         priority:  None,
         completed: Some(true),
      };

      let result = setup.usecase.update_task(input).await;

      assert!(matches!(result, Err(ApiError::NotFound(_))));
   }

   #[rstest]
   #[tokio::test]
   async fn test_削除は2回目にnot_foundを返す(setup: Setup) {
      let created = setup
         .usecase
         .create_task(create_input("Buy Milk", 10))
         .await
         .unwrap();

      setup.usecase.delete_task(created.id()).await.unwrap();
      let second = setup.usecase.delete_task(created.id()).await;

      assert!(matches!(second, Err(ApiError::NotFound(_))));
   }

   #[rstest]
   #[tokio::test]
   async fn test_更新時に参照先ユーザーは再検証しない(setup: Setup) {
      let created = setup
         .usecase
         .create_task(create_input("Buy Milk", 10))
         .await
         .unwrap();

      // 参照先ユーザーが消えても更新は成功する（作成時のみ検証する仕様）
      let mut tx = taskshop_infra::TxContext::mock();
      setup
         .user_repo
         .delete(&mut tx, UserId::from_i64(10))
         .await
         .unwrap();

      let input = UpdateTaskInput {
         task_id:   created.id(),
         title:     None,
         content:   None,
         priority:  None,
         completed: Some(true),
      };
      let updated = setup.usecase.update_task(input).await.unwrap();

      assert!(updated.completed());
   }
}
