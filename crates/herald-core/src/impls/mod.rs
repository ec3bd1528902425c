//! Impls - ports の in-memory 実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryTopic**: SNS topic の代わり。publish された通知を `SnsEvent` として取り出せる
//! - **InMemoryQueue**: SQS queue の代わり。long polling の receive と delete を持つ
//!
//! 本番では AWS SDK のクライアントを `TopicPublisher` / `QueueSender` で包んで使います。

pub mod inmem_queue;
pub mod inmem_topic;

pub use self::inmem_queue::{InMemoryQueue, MAX_RECEIVE_BATCH};
pub use self::inmem_topic::InMemoryTopic;
