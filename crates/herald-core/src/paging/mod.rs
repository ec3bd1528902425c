//! Paging - ページ分割されたデータソースを遅延評価のシーケンスとして扱う
//!
//! # 構成
//! - **PageRequest**: offset ベースのカーソル
//! - **Page**: 1 ページ分の items + 次ページのリクエスト
//! - **PageableCollection / PageableIter**: 必要になった時だけ次ページを取得する iterator

pub mod collection;
pub mod page;
pub mod request;

pub use self::collection::{PageableCollection, PageableIter};
pub use self::page::Page;
pub use self::request::PageRequest;
