//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 登録、参加アナウンス、参加前の履歴の返却
//!
//! ### なぜこのテストが必要か
//! - 参加アナウンスが本人を含む全員に届くことを確認
//! - 新規参加者に返す履歴が参加アナウンスより前の内容であることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者（履歴なし）、2 人目の参加者（履歴あり）
//! - 異常系：同じ接続の二重登録

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ChatHistory, ChatMessage, ClientEntry, ClientRegistry, ConnectionId, DisplayName,
    MessageSink, protocol::joined_announcement,
};

use super::{BroadcastMessageUseCase, ConnectError};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn ClientRegistry>,
    history: Arc<Mutex<ChatHistory>>,
    broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        history: Arc<Mutex<ChatHistory>>,
        broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    ) -> Self {
        Self {
            registry,
            history,
            broadcast_message_usecase,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ChatMessage>)` - 参加アナウンスより前の履歴（古い順、空なら履歴ブロックは送らない）
    /// * `Err(ConnectError)` - 同じ接続が既に登録済み
    pub async fn execute(
        &self,
        id: ConnectionId,
        name: DisplayName,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Vec<ChatMessage>, ConnectError> {
        // 1. 登録簿に追加
        if !self
            .registry
            .register(id, ClientEntry::new(name.clone(), sink))
            .await
        {
            return Err(ConnectError::AlreadyRegistered(id));
        }
        tracing::info!("Client '{}' connected ({})", name, id);

        // 2. 参加アナウンス前の履歴を確保
        let backlog = self.history.lock().await.recent();

        // 3. 参加アナウンス（本人を含む全員）
        self.broadcast_message_usecase
            .execute(&joined_announcement(&name), None, None)
            .await;

        Ok(backlog)
    }
}
