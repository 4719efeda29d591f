//! テスト用の MessageSink 実装
//!
//! `send_line` の内容だけを記録する（プロンプトや履歴ブロックは記録しない）。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, watch};

use crate::domain::{MessageSink, SinkError};

/// 書き込まれた内容を記録する MessageSink
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
    close_count: AtomicUsize,
    closed: watch::Sender<bool>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            lines: Mutex::default(),
            close_count: AtomicUsize::new(0),
            closed: watch::Sender::new(false),
        }
    }
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lines(&self) -> Vec<String> {
        self.lines.lock().await.clone()
    }

    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send_raw(&self, _text: &str) -> Result<(), SinkError> {
        Ok(())
    }

    async fn send_line(&self, text: &str) -> Result<(), SinkError> {
        self.lines.lock().await.push(text.to_string());
        Ok(())
    }

    async fn close(&self) {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        self.closed.send_replace(true);
    }

    async fn closed(&self) {
        let mut rx = self.closed.subscribe();
        let _ = rx.wait_for(|closed| *closed).await.map(|_| ());
    }
}
