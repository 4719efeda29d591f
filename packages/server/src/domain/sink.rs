//! MessageSink trait 定義
//!
//! 1 つのクライアント接続への書き込み口を抽象化します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::SinkError;

/// クライアントへのメッセージ書き込み
///
/// 同じ接続への書き込みは実装側で直列化されること（接続ごとの FIFO）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// テキストをそのまま書き込んで flush する
    async fn send_raw(&self, text: &str) -> Result<(), SinkError>;

    /// 1 行のメッセージとして書き込む（末尾に改行を付ける）
    async fn send_line(&self, text: &str) -> Result<(), SinkError>;

    /// 接続の書き込み側を閉じる（何度呼んでもよい）
    async fn close(&self);

    /// `close` が呼ばれるまで待つ（呼ばれた後なら即座に返る）
    async fn closed(&self);
}
