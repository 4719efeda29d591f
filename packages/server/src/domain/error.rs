//! ドメイン層のエラー型

use thiserror::Error;

/// クライアントへの書き込みエラー
#[derive(Debug, Error)]
pub enum SinkError {
    /// 書き込み中の I/O エラー（broken pipe, connection reset など）
    #[error("failed to write to client: {0}")]
    Io(#[from] std::io::Error),

    /// 既にクローズされた接続への書き込み
    #[error("connection already closed")]
    Closed,
}
