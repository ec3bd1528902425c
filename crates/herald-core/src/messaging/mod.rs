//! Messaging - SNS / SQS の受信 handler と送信クライアント
//!
//! 受信側は Lambda のイベント（`SnsEvent` / `SqsEvent`）を受け取り、
//! 送信側は `ports` の transport に委譲します。

pub mod sns;
pub mod sqs;

pub use self::sns::{NotificationHandler, TopicClient};
pub use self::sqs::{EventHandler, QueueClient};
