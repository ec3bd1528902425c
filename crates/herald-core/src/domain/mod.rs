//! Domain model (errors, identifiers, transport envelopes).

pub mod errors;
pub mod events;
pub mod ids;

pub use self::errors::{CodecError, DispatchError, ErrorKind, MessagingError, TransportError};
pub use self::events::{SnsEvent, SnsMessage, SnsMessageAttribute, SnsRecord, SqsEvent, SqsMessage};
pub use self::ids::{Id, IdMarker, IdParseError, MessageId};
