//! MessageSink の実装
//!
//! - `stream`: 任意の `AsyncWrite`（TCP の書き込み側など）への書き込み

pub mod stream;

pub use stream::StreamSink;
