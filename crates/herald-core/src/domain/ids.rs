//! Domain identifiers.
//!
//! 配送先（topic / queue）が払い出すメッセージ ID は ULID を Phantom type で包んだものです。
//! 文字列表現は `msg-<ULID>` で、SNS / SQS の envelope にはこの形で入ります。
//! ULID なので送信順に並びます。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// ID の種類ごとの文字列プレフィックス
pub trait IdMarker: Send + Sync + 'static {
    const PREFIX: &'static str;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    #[error("expected prefix '{expected}' in '{input}'")]
    Prefix { expected: &'static str, input: String },

    #[error("invalid ULID in '{input}': {reason}")]
    Ulid { input: String, reason: String },
}

#[repr(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }

    /// ULID に埋め込まれた生成時刻（ミリ秒精度）
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.ulid.timestamp_ms())
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

// derive だと T にも境界が付くので手で書く
impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: IdMarker> Copy for Id<T> {}

impl<T: IdMarker> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ulid == other.ulid
    }
}

impl<T: IdMarker> Eq for Id<T> {}

impl<T: IdMarker> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: IdMarker> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ulid.cmp(&other.ulid)
    }
}

impl<T: IdMarker> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.ulid.hash(state);
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::PREFIX, self.ulid)
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T: IdMarker> FromStr for Id<T> {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(T::PREFIX).ok_or_else(|| IdParseError::Prefix {
            expected: T::PREFIX,
            input: s.to_string(),
        })?;
        let ulid = Ulid::from_string(raw).map_err(|e| IdParseError::Ulid {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_ulid(ulid))
    }
}

impl<T: IdMarker> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: IdMarker> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 配送されたメッセージ
pub enum Message {}

impl IdMarker for Message {
    const PREFIX: &'static str = "msg-";
}

/// Identifier assigned by a transport to a delivered message.
pub type MessageId = Id<Message>;
