//! ドメイン層
//!
//! チャットの値オブジェクト、メッセージ、履歴バッファ、および
//! Infrastructure 層が実装する trait（`ClientRegistry`, `MessageSink`）を定義します。

pub mod error;
pub mod history;
pub mod message;
pub mod protocol;
pub mod registry;
pub mod sink;
pub mod value_object;

pub use error::SinkError;
pub use history::{ChatHistory, DEFAULT_HISTORY_CAPACITY};
pub use message::ChatMessage;
pub use registry::{ClientEntry, ClientRegistry};
pub use sink::MessageSink;
pub use value_object::{ANONYMOUS_NAME, ConnectionId, ConnectionIdFactory, DisplayName, Timestamp};

#[cfg(test)]
pub use sink::MockMessageSink;
