//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 登録解除、退出アナウンス、接続のクローズ
//!
//! ### なぜこのテストが必要か
//! - 退出アナウンスが本人以外に 1 回だけ届くことを保証
//! - 既に外された接続（書き込み失敗で静かに外されたもの）で二重にアナウンスしないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：二重の切断、存在しない接続の切断

use std::sync::Arc;

use crate::domain::{ClientRegistry, ConnectionId, DisplayName, protocol::left_announcement};

use super::BroadcastMessageUseCase;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ClientRegistry>,
    broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    ) -> Self {
        Self {
            registry,
            broadcast_message_usecase,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(DisplayName)` - この呼び出しで登録を解除した（退出アナウンス済み）
    /// * `None` - 登録されていなかった（何もしない）
    pub async fn execute(&self, id: ConnectionId) -> Option<DisplayName> {
        let entry = self.registry.unregister(id).await?;
        tracing::info!("Client '{}' disconnected ({})", entry.name, id);

        self.broadcast_message_usecase
            .execute(&left_announcement(&entry.name), None, Some(id))
            .await;

        entry.sink.close().await;
        Some(entry.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatHistory, ClientEntry},
        infrastructure::registry::InMemoryClientRegistry,
        test_support::RecordingSink,
    };
    use chatline_shared::time::ManualClock;
    use tokio::sync::Mutex;

    fn create_usecase() -> (DisconnectParticipantUseCase, Arc<InMemoryClientRegistry>) {
        let registry = Arc::new(InMemoryClientRegistry::new());
        let broadcast = Arc::new(BroadcastMessageUseCase::new(
            registry.clone(),
            Arc::new(Mutex::new(ChatHistory::new())),
            Arc::new(ManualClock::starting_at(0)),
        ));
        (
            DisconnectParticipantUseCase::new(registry.clone(), broadcast),
            registry,
        )
    }

    async fn register(
        registry: &InMemoryClientRegistry,
        id: u64,
        name: &str,
    ) -> Arc<RecordingSink> {
        let sink = Arc::new(RecordingSink::new());
        registry
            .register(
                ConnectionId::new(id),
                ClientEntry::new(DisplayName::from_input(name), sink.clone()),
            )
            .await;
        sink
    }

    #[tokio::test]
    async fn test_disconnect_announces_to_others() {
        // テスト項目: 切断すると本人以外に退出アナウンスが届き、本人の接続は閉じられる
        // given (前提条件):
        let (usecase, registry) = create_usecase();
        let alice = register(&registry, 1, "Alice").await;
        let bob = register(&registry, 2, "Bob").await;

        // when (操作):
        let result = usecase.execute(ConnectionId::new(2)).await;

        // then (期待する結果):
        assert_eq!(result, Some(DisplayName::from_input("Bob")));
        assert_eq!(alice.lines().await, vec!["Bob покинул чат".to_string()]);
        assert!(bob.lines().await.is_empty());
        assert_eq!(bob.close_count(), 1);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_second_disconnect_is_noop() {
        // テスト項目: 二重の切断では 2 回目のアナウンスが流れない
        // given (前提条件):
        let (usecase, registry) = create_usecase();
        let alice = register(&registry, 1, "Alice").await;
        register(&registry, 2, "Bob").await;
        usecase.execute(ConnectionId::new(2)).await;

        // when (操作):
        let result = usecase.execute(ConnectionId::new(2)).await;

        // then (期待する結果):
        assert!(result.is_none());
        assert_eq!(alice.lines().await.len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_unknown_connection() {
        // テスト項目: 存在しない接続の切断は None を返すだけ
        // given (前提条件):
        let (usecase, registry) = create_usecase();
        let alice = register(&registry, 1, "Alice").await;

        // when (操作):
        let result = usecase.execute(ConnectionId::new(42)).await;

        // then (期待する結果):
        assert!(result.is_none());
        assert!(alice.lines().await.is_empty());
        assert_eq!(registry.len().await, 1);
    }
}
