//! # Clock（時刻プロバイダ）
//!
//! エンティティの `created_at` / `updated_at` に入れる現在時刻を
//! ユースケース層へ注入するための抽象化。`Utc::now()` を直接呼ばないことで、
//! テストでは固定時刻を使ってエンティティ全体を等値比較できる。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返すテスト用実装
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use taskshop_domain::clock::{Clock, FixedClock};
///
/// let t = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
/// let clock = FixedClock::at(t);
/// assert_eq!(clock.now(), t);
/// ```
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
   pub fn at(now: DateTime<Utc>) -> Self {
      Self(now)
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.0
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_system_clock_は現在時刻を返す() {
      let clock = SystemClock;
      let before = Utc::now();
      let result = clock.now();
      let after = Utc::now();

      assert!(result >= before);
      assert!(result <= after);
   }

   #[test]
   fn test_fixed_clock_は渡した時刻を繰り返し返す() {
      let fixed_time = Utc::now();
      let clock = FixedClock::at(fixed_time);

      assert_eq!(clock.now(), fixed_time);
      assert_eq!(clock.now(), fixed_time);
   }
}
