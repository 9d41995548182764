//! # タスク
//!
//! タスクエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`Task`] | タスク | 必ず既存ユーザーに紐づく |
//! | [`Slug`] | スラッグ | タイトルから導出される URL 安全な一意識別子 |
//!
//! ## 設計方針
//!
//! - **スラッグの導出**: 作成時に [`Slug::from_title`] で決定的に導出し、
//!   以後は不変（タイトルを更新しても再計算しない）
//! - **作成時の不変条件**: 新規タスクは常に `completed = false`。
//!   [`NewTask`] が completed フィールドを持たないことで構造的に強制する
//! - **部分更新**: `with_*` メソッドで指定フィールドのみ差し替えた
//!   新しいインスタンスを返す

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, user::UserId};

define_int_id! {
    /// タスク ID（一意識別子）
    ///
    /// データベースの BIGSERIAL で採番される。
    pub struct TaskId;
}

define_validated_string! {
    /// タスクタイトル（値オブジェクト）
    pub struct TaskTitle {
        label: "タイトル",
        max_length: 100,
    }
}

define_validated_string! {
    /// タスク本文（値オブジェクト）
    pub struct TaskContent {
        label: "本文",
        max_length: 2000,
    }
}

/// 優先度（値オブジェクト）
///
/// 0 以上の整数。値が小さいほど低優先度という以上の意味論は持たない。
/// `Default`（0）はストレージのカラムデフォルトと一致する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Priority(i32);

impl Priority {
    /// 優先度を作成する
    ///
    /// # エラー
    ///
    /// 負数の場合は `DomainError::Validation` を返す。
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::Validation(
                "優先度は 0 以上である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 内部の整数値を取得する
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

/// スラッグ（値オブジェクト）
///
/// URL 安全な一意識別子。小文字 ASCII 英数字とハイフンのみで構成される。
/// 一意性はストレージのユニークインデックスで保証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug(String);

impl Slug {
    /// 既存のスラッグ文字列を検証して作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 小文字 ASCII 英数字とハイフンのみ
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "スラッグは必須です".to_string(),
            ));
        }

        let valid = value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-');
        if !valid {
            return Err(DomainError::Validation(format!(
                "スラッグに使用できない文字が含まれています: {value}"
            )));
        }

        Ok(Self(value))
    }

    /// タイトルからスラッグを決定的に導出する
    ///
    /// 変換規則:
    ///
    /// 1. ASCII 英数字は小文字化して保持
    /// 2. それ以外の文字の連続は 1 つのハイフンに置換
    /// 3. 先頭・末尾のハイフンは除去
    ///
    /// 非 ASCII 文字は転写せず捨てる。
    ///
    /// # エラー
    ///
    /// タイトルが ASCII 英数字を 1 文字も含まない場合、変換結果が
    /// 空になるため `DomainError::Validation` を返す。
    ///
    /// # 例
    ///
    /// ```rust
    /// use taskshop_domain::task::{Slug, TaskTitle};
    ///
    /// let title = TaskTitle::new("Buy Milk").unwrap();
    /// let slug = Slug::from_title(&title).unwrap();
    /// assert_eq!(slug.as_str(), "buy-milk");
    /// ```
    pub fn from_title(title: &TaskTitle) -> Result<Self, DomainError> {
        let mut slug = String::with_capacity(title.as_str().len());
        let mut pending_hyphen = false;

        for ch in title.as_str().chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(ch.to_ascii_lowercase());
            } else {
                pending_hyphen = true;
            }
        }

        if slug.is_empty() {
            return Err(DomainError::Validation(format!(
                "タイトルからスラッグを導出できません: {}",
                title.as_str()
            )));
        }

        Ok(Self(slug))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// タスク作成ドラフト
///
/// ID 採番前のタスク。スラッグは生成時にタイトルから導出済み。
/// completed フィールドを持たない（新規タスクは常に未完了で挿入される）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title:    TaskTitle,
    content:  TaskContent,
    priority: Priority,
    slug:     Slug,
    user_id:  UserId,
}

impl NewTask {
    /// 新しいタスクドラフトを作成する
    ///
    /// # 不変条件
    ///
    /// - スラッグはタイトルから導出され、外部からは指定できない
    ///
    /// # エラー
    ///
    /// スラッグの導出に失敗した場合は `DomainError::Validation` を返す。
    pub fn new(
        title: TaskTitle,
        content: TaskContent,
        priority: Priority,
        user_id: UserId,
    ) -> Result<Self, DomainError> {
        let slug = Slug::from_title(&title)?;

        Ok(Self {
            title,
            content,
            priority,
            slug,
            user_id,
        })
    }

    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    pub fn content(&self) -> &TaskContent {
        &self.content
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// タスクエンティティ
///
/// # 不変条件
///
/// - `user_id` は作成時に存在するユーザーを参照する（更新時の再検証はしない）
/// - `slug` は作成後に不変（タイトル更新でも再計算しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    content: TaskContent,
    priority: Priority,
    completed: bool,
    slug: Slug,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// 既存のデータからタスクを復元する（データベースから取得時）
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: TaskId,
        title: TaskTitle,
        content: TaskContent,
        priority: Priority,
        completed: bool,
        slug: Slug,
        user_id: UserId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            priority,
            completed,
            slug,
            user_id,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    pub fn content(&self) -> &TaskContent {
        &self.content
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // 更新メソッド（部分更新のマージで使用）

    /// タイトルを変更した新しいインスタンスを返す
    ///
    /// スラッグは再計算しない。
    pub fn with_title(self, title: TaskTitle, now: DateTime<Utc>) -> Self {
        Self {
            title,
            updated_at: now,
            ..self
        }
    }

    /// 本文を変更した新しいインスタンスを返す
    pub fn with_content(self, content: TaskContent, now: DateTime<Utc>) -> Self {
        Self {
            content,
            updated_at: now,
            ..self
        }
    }

    /// 優先度を変更した新しいインスタンスを返す
    pub fn with_priority(self, priority: Priority, now: DateTime<Utc>) -> Self {
        Self {
            priority,
            updated_at: now,
            ..self
        }
    }

    /// 完了フラグを変更した新しいインスタンスを返す
    ///
    /// true / false どちらへの遷移も自由（状態遷移ルールは存在しない）。
    pub fn with_completed(self, completed: bool, now: DateTime<Utc>) -> Self {
        Self {
            completed,
            updated_at: now,
            ..self
        }
    }
}
