//! AsyncWrite を使った MessageSink 実装
//!
//! ## 責務
//!
//! - 接続の書き込み側（`WriteHalf` など）を所有する
//! - 同じ接続への書き込みを Mutex で直列化する
//! - `close` されたことを読み込み側に知らせる
//!
//! 読み込み側はセッションが所有します。

use async_trait::async_trait;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::{Mutex, watch},
};

use crate::domain::{MessageSink, SinkError};

/// `AsyncWrite` への書き込み口
///
/// `close` 後の書き込みは `SinkError::Closed` を返す。
pub struct StreamSink<W> {
    writer: Mutex<Option<W>>,
    closed: watch::Sender<bool>,
}

impl<W> StreamSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(Some(writer)),
            closed: watch::Sender::new(false),
        }
    }

    async fn write_bytes(&self, bytes: &[u8]) -> Result<(), SinkError> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(SinkError::Closed)?;
        writer.write_all(bytes).await?;
        writer.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<W> MessageSink for StreamSink<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn send_raw(&self, text: &str) -> Result<(), SinkError> {
        self.write_bytes(text.as_bytes()).await
    }

    async fn send_line(&self, text: &str) -> Result<(), SinkError> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.write_bytes(line.as_bytes()).await
    }

    async fn close(&self) {
        self.closed.send_replace(true);
        let writer = self.writer.lock().await.take();
        if let Some(mut writer) = writer
            && let Err(e) = writer.shutdown().await
        {
            tracing::debug!("Shutdown of client writer failed: {}", e);
        }
    }

    async fn closed(&self) {
        let mut rx = self.closed.subscribe();
        // Sender は self が持っているので Err にはならない
        let _ = rx.wait_for(|closed| *closed).await.map(|_| ());
    }
}
