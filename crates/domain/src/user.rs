//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: [`UserId`] は DB 採番の整数をラップし、
//!   タスク ID との取り違えをコンパイルエラーにする
//! - **不変性**: エンティティフィールドは不変、変更は `with_*` メソッド経由
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use taskshop_domain::user::{Age, FirstName, LastName, NewUser, Username};
//!
//! let draft = NewUser::new(
//!     Username::new("yamada")?,
//!     FirstName::new("太郎")?,
//!     LastName::new("山田")?,
//!     Age::new(30)?,
//! );
//! assert_eq!(draft.username().as_str(), "yamada");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;

define_int_id! {
    /// ユーザー ID（一意識別子）
    ///
    /// データベースの BIGSERIAL で採番される。
    /// Newtype パターンで型安全性を確保。
    pub struct UserId;
}

define_validated_string! {
    /// ユーザー名（値オブジェクト）
    ///
    /// ログイン名ではなく表示用のハンドル。一意性制約は課さない。
    pub struct Username {
        label: "ユーザー名",
        max_length: 50,
    }
}

define_validated_string! {
    /// 名（値オブジェクト）
    pub struct FirstName {
        label: "名",
        max_length: 50,
        pii: true,
    }
}

define_validated_string! {
    /// 姓（値オブジェクト）
    pub struct LastName {
        label: "姓",
        max_length: 50,
        pii: true,
    }
}

/// 年齢（値オブジェクト）
///
/// 0 以上 [`Age::MAX`] 以下の整数のみを受け入れる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Age(i32);

impl Age {
    /// 受け入れる年齢の上限
    pub const MAX: i32 = 150;

    /// 年齢を作成する
    ///
    /// # エラー
    ///
    /// 負数または [`Age::MAX`] 超過の場合は `DomainError::Validation` を返す。
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::Validation(
                "年齢は 0 以上である必要があります".to_string(),
            ));
        }

        if value > Self::MAX {
            return Err(DomainError::Validation(format!(
                "年齢は {} 以下である必要があります",
                Self::MAX
            )));
        }

        Ok(Self(value))
    }

    /// 内部の整数値を取得する
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

/// ユーザー作成ドラフト
///
/// ID 採番前のユーザー。リポジトリの `insert` に渡し、
/// 採番済みの [`User`] を受け取る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username:  Username,
    firstname: FirstName,
    lastname:  LastName,
    age:       Age,
}

impl NewUser {
    /// 新しいユーザードラフトを作成する
    ///
    /// 各フィールドは値オブジェクトとして検証済みであることが前提。
    pub fn new(username: Username, firstname: FirstName, lastname: LastName, age: Age) -> Self {
        Self {
            username,
            firstname,
            lastname,
            age,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn firstname(&self) -> &FirstName {
        &self.firstname
    }

    pub fn lastname(&self) -> &LastName {
        &self.lastname
    }

    pub fn age(&self) -> Age {
        self.age
    }
}

/// ユーザーエンティティ
///
/// タスクの所有者。ユーザー 1 人に対して複数のタスクが紐づく（1—*）。
///
/// # 不変条件
///
/// - `id` はデータベース採番後に不変
/// - `username` は作成後に変更不可（更新 API は firstname / lastname / age
///   のみを受け付ける）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    firstname: FirstName,
    lastname: LastName,
    age: Age,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// 既存のデータからユーザーを復元する（データベースから取得時）
    pub fn from_db(
        id: UserId,
        username: Username,
        firstname: FirstName,
        lastname: LastName,
        age: Age,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            firstname,
            lastname,
            age,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn firstname(&self) -> &FirstName {
        &self.firstname
    }

    pub fn lastname(&self) -> &LastName {
        &self.lastname
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // 更新メソッド（部分更新のマージで使用）

    /// 名を変更した新しいインスタンスを返す
    pub fn with_firstname(self, firstname: FirstName, now: DateTime<Utc>) -> Self {
        Self {
            firstname,
            updated_at: now,
            ..self
        }
    }

    /// 姓を変更した新しいインスタンスを返す
    pub fn with_lastname(self, lastname: LastName, now: DateTime<Utc>) -> Self {
        Self {
            lastname,
            updated_at: now,
            ..self
        }
    }

    /// 年齢を変更した新しいインスタンスを返す
    pub fn with_age(self, age: Age, now: DateTime<Utc>) -> Self {
        Self {
            age,
            updated_at: now,
            ..self
        }
    }
}
