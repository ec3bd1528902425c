//! herald-core
//!
//! Typed messaging over SNS / SQS style transports, plus lazy paged collections.
//!
//! # モジュール構成
//! - **typed**: 型付きメッセージ API（Codec, MessageHandler, MessageDispatcher, MultiHandler）
//! - **messaging**: SNS / SQS の受信 handler と送信クライアント
//! - **paging**: ページングされた取得元を遅延・再開可能なシーケンスとして扱う
//! - **domain**: ID、イベントの envelope、エラー型
//! - **ports**: 外部システムの抽象化（TopicPublisher, QueueSender, Clock, IdGenerator）
//! - **impls**: ports の in-memory 実装
//! - **config**: 配送先の設定
//! - **observability**: ログ初期化と queue の件数ビュー

pub mod config;
pub mod domain;
pub mod impls;
pub mod messaging;
pub mod observability;
pub mod paging;
pub mod ports;
pub mod typed;
