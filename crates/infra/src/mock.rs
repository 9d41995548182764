//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! taskshop-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! ID はインメモリのカウンタで採番し、BIGSERIAL と同様に
//! 削除後も再利用しない。

use std::sync::{
   Arc, Mutex,
   atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskshop_domain::{
   task::{NewTask, Task, TaskId},
   user::{NewUser, User, UserId},
};

use crate::{
   db::{TransactionManager, TxContext},
   error::InfraError,
   repository::{TaskRepository, UserRepository},
};

// ===== MockTransactionManager =====

/// モックのトランザクション管理
///
/// 常に Mock TxContext を返す。コミットは no-op。
#[derive(Clone, Default)]
pub struct MockTransactionManager;

impl MockTransactionManager {
   pub fn new() -> Self {
      Self
   }
}

#[async_trait]
impl TransactionManager for MockTransactionManager {
   async fn begin(&self) -> Result<TxContext, InfraError> {
      Ok(TxContext::mock())
   }
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
   users:   Arc<Mutex<Vec<User>>>,
   next_id: Arc<AtomicI64>,
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self {
         users:   Arc::new(Mutex::new(Vec::new())),
         next_id: Arc::new(AtomicI64::new(0)),
      }
   }

   /// 採番済みユーザーを直接追加する（テストのセットアップ用）
   pub fn add_user(&self, user: User) {
      self.users.lock().unwrap().push(user);
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn find_all(&self) -> Result<Vec<User>, InfraError> {
      Ok(self.users.lock().unwrap().clone())
   }

   async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.id() == id)
         .cloned())
   }

   async fn insert(
      &self,
      _tx: &mut TxContext,
      new_user: &NewUser,
      now: DateTime<Utc>,
   ) -> Result<User, InfraError> {
      let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
      let user = User::from_db(
         UserId::from_i64(id),
         new_user.username().clone(),
         new_user.firstname().clone(),
         new_user.lastname().clone(),
         new_user.age(),
         now,
         now,
      );

      self.users.lock().unwrap().push(user.clone());
      Ok(user)
   }

   async fn update(&self, _tx: &mut TxContext, user: &User) -> Result<(), InfraError> {
      let mut users = self.users.lock().unwrap();
      if let Some(pos) = users.iter().position(|u| u.id() == user.id()) {
         users[pos] = user.clone();
      }
      Ok(())
   }

   async fn delete(&self, _tx: &mut TxContext, id: UserId) -> Result<u64, InfraError> {
      let mut users = self.users.lock().unwrap();
      let before = users.len();
      users.retain(|u| u.id() != id);

      Ok((before - users.len()) as u64)
   }
}

// ===== MockTaskRepository =====

#[derive(Clone, Default)]
pub struct MockTaskRepository {
   tasks:   Arc<Mutex<Vec<Task>>>,
   next_id: Arc<AtomicI64>,
}

impl MockTaskRepository {
   pub fn new() -> Self {
      Self {
         tasks:   Arc::new(Mutex::new(Vec::new())),
         next_id: Arc::new(AtomicI64::new(0)),
      }
   }

   /// 採番済みタスクを直接追加する（テストのセットアップ用）
   pub fn add_task(&self, task: Task) {
      self.tasks.lock().unwrap().push(task);
   }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
   async fn find_all(&self) -> Result<Vec<Task>, InfraError> {
      Ok(self.tasks.lock().unwrap().clone())
   }

   async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, InfraError> {
      Ok(self
         .tasks
         .lock()
         .unwrap()
         .iter()
         .find(|t| t.id() == id)
         .cloned())
   }

   async fn count_by_user(&self, user_id: UserId) -> Result<i64, InfraError> {
      Ok(self
         .tasks
         .lock()
         .unwrap()
         .iter()
         .filter(|t| t.user_id() == user_id)
         .count() as i64)
   }

   async fn insert(
      &self,
      _tx: &mut TxContext,
      new_task: &NewTask,
      now: DateTime<Utc>,
   ) -> Result<Task, InfraError> {
      let mut tasks = self.tasks.lock().unwrap();

      // ユニークインデックス tasks_slug_key と同じ制約を再現する
      if tasks.iter().any(|t| t.slug() == new_task.slug()) {
         return Err(InfraError::conflict(
            "Task",
            format!("slug '{}' は既に存在します", new_task.slug()),
         ));
      }

      let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
      let task = Task::from_db(
         TaskId::from_i64(id),
         new_task.title().clone(),
         new_task.content().clone(),
         new_task.priority(),
         false,
         new_task.slug().clone(),
         new_task.user_id(),
         now,
         now,
      );

      tasks.push(task.clone());
      Ok(task)
   }

   async fn update(&self, _tx: &mut TxContext, task: &Task) -> Result<(), InfraError> {
      let mut tasks = self.tasks.lock().unwrap();
      if let Some(pos) = tasks.iter().position(|t| t.id() == task.id()) {
         tasks[pos] = task.clone();
      }
      Ok(())
   }

   async fn delete(&self, _tx: &mut TxContext, id: TaskId) -> Result<u64, InfraError> {
      let mut tasks = self.tasks.lock().unwrap();
      let before = tasks.len();
      tasks.retain(|t| t.id() != id);

      Ok((before - tasks.len()) as u64)
   }
}
