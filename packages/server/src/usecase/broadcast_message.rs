//! UseCase: メッセージのブロードキャスト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastMessageUseCase::execute() メソッド
//! - 整形（送信者あり / なし）、履歴への追加、除外対象、書き込み失敗時の後始末
//!
//! ### なぜこのテストが必要か
//! - 一部のクライアントへの書き込み失敗が残りの配信を止めないことを保証
//! - 失敗した接続が登録簿から外れ、退出アナウンスが再帰的に流れないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：全員への配信、送信者の除外
//! - 異常系：3 人中 1 人への書き込みが失敗
//! - エッジケース：接続がいない状態でのアナウンス（履歴には残る）

use std::sync::Arc;

use chatline_shared::time::{Clock, timestamp_to_rfc3339};
use tokio::sync::Mutex;

use crate::domain::{ChatHistory, ChatMessage, ClientRegistry, ConnectionId, DisplayName, Timestamp};

/// 1 回のブロードキャストの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 書き込みに成功した接続
    pub delivered: Vec<ConnectionId>,
    /// 書き込みに失敗し、登録簿から外された接続
    pub dropped: Vec<ConnectionId>,
}

/// ブロードキャストのユースケース
pub struct BroadcastMessageUseCase {
    /// 接続中クライアントの登録簿
    registry: Arc<dyn ClientRegistry>,
    /// 直近メッセージの履歴
    history: Arc<Mutex<ChatHistory>>,
    clock: Arc<dyn Clock>,
}

impl BroadcastMessageUseCase {
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        history: Arc<Mutex<ChatHistory>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            history,
            clock,
        }
    }

    /// ブロードキャストを実行
    ///
    /// # Arguments
    ///
    /// * `body` - 本文
    /// * `sender` - 送信者。`Some` なら `"[sender]: body"`、`None` ならアナウンスとして本文をそのまま使う
    /// * `exclude` - 配信しない接続
    ///
    /// 書き込みに失敗した接続は配信ループの後で登録簿から外して閉じる（退出アナウンスなし）。
    pub async fn execute(
        &self,
        body: &str,
        sender: Option<&DisplayName>,
        exclude: Option<ConnectionId>,
    ) -> BroadcastReport {
        let message = ChatMessage::compose(
            body,
            sender.map(DisplayName::as_str),
            Timestamp::new(self.clock.now_millis()),
        );

        // 1. 履歴に追加（配信対象がいなくても追加する）
        self.history.lock().await.append(message.clone());

        // 2. スナップショットを取ってからロック外で配信
        let targets = self.registry.snapshot().await;
        let mut report = BroadcastReport::default();

        for (id, entry) in targets {
            if Some(id) == exclude {
                continue;
            }
            match entry.sink.send_line(message.text()).await {
                Ok(()) => {
                    tracing::debug!("Delivered to '{}' ({})", entry.name, id);
                    report.delivered.push(id);
                }
                Err(e) => {
                    tracing::warn!("Failed to deliver to '{}' ({}): {}", entry.name, id, e);
                    report.dropped.push(id);
                }
            }
        }

        // 3. 失敗した接続を静かに外す
        for id in &report.dropped {
            self.remove_silently(*id).await;
        }

        tracing::debug!(
            "Broadcast recorded at {}: delivered={}, dropped={}",
            timestamp_to_rfc3339(message.recorded_at().value()),
            report.delivered.len(),
            report.dropped.len()
        );

        report
    }

    /// 登録簿から外して接続を閉じる（アナウンスなし）
    pub async fn remove_silently(&self, id: ConnectionId) {
        if let Some(entry) = self.registry.unregister(id).await {
            tracing::info!("Client '{}' dropped ({})", entry.name, id);
            entry.sink.close().await;
        }
    }
}
