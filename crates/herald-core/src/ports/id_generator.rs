//! IdGenerator port - transport が払い出す識別子の生成

use crate::domain::ids::MessageId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator はメッセージ ID と receipt handle を生成する
pub trait IdGenerator: Send + Sync {
    fn next_message_id(&self) -> MessageId;

    /// 受信 1 回ごとに払い出す不透明な文字列
    fn next_receipt_handle(&self) -> String;
}

/// ULID ベースの IdGenerator
///
/// 時刻部分は `clock` から取るので、`FixedClock` と組み合わせると
/// タイムスタンプが決定的になります（ランダム部分は毎回変わる）。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let millis = u64::try_from(self.clock.now().timestamp_millis()).unwrap_or(0);
        Ulid::from_parts(millis, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn next_message_id(&self) -> MessageId {
        MessageId::from_ulid(self.next_ulid())
    }

    fn next_receipt_handle(&self) -> String {
        self.next_ulid().to_string().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn message_ids_are_unique() {
        let ids = UlidGenerator::new(SystemClock);

        let first = ids.next_message_id();
        let second = ids.next_message_id();

        assert_ne!(first, second);
        assert!(first.to_string().starts_with("msg-"));
    }

    #[test]
    fn fixed_clock_pins_timestamp_part() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let ids = UlidGenerator::new(FixedClock::new(at));

        let first = ids.next_message_id();
        let second = ids.next_message_id();

        assert_ne!(first, second);
        assert_eq!(first.timestamp(), Some(at));
        assert_eq!(second.timestamp(), Some(at));
    }

    #[test]
    fn receipt_handles_are_not_message_ids() {
        let ids = UlidGenerator::new(SystemClock);

        let handle = ids.next_receipt_handle();

        assert_eq!(handle.len(), 26);
        assert!(handle.parse::<MessageId>().is_err());
        assert_ne!(handle, ids.next_receipt_handle());
    }
}
