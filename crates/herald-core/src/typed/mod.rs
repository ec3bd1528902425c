//! Typed - 型付きメッセージ API
//!
//! # 二層構造
//! - **表層（Typed）**: `MessageHandler<T>`, `MessageDispatcher`, `Message` trait - 型安全
//! - **内部（Dyn）**: `DynHandler` trait - object-safe, type erasure（MultiHandler 用）

pub mod codec;
pub mod dispatcher;
pub mod handler;
pub mod message;
pub mod registry;

pub use self::codec::{Codec, JsonCodec};
pub use self::dispatcher::MessageDispatcher;
pub use self::handler::{DynHandler, MessageHandler, TypedHandler};
pub use self::message::{tagged, Heartbeat, Message};
pub use self::registry::{MultiHandler, RegistryError, DEFAULT_DISCRIMINATOR};
