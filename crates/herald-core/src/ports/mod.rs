//! Ports - 抽象化レイヤー
//!
//! 外部システム（SNS, SQS, 時刻, ID 生成）へのインターフェースを定義し、
//! 実装の詳細を隠蔽します。

pub mod clock;
pub mod id_generator;
pub mod transport;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::transport::{DeliveryReceipt, QueueSender, TopicPublisher};
