//! ChatHub: 登録簿と履歴を所有するアプリケーションサービス
//!
//! 1 プロセスに 1 つ作成し、`Arc<ChatHub>` として全セッションに渡します。

use std::sync::Arc;

use chatline_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::{
    domain::{
        ChatHistory, ChatMessage, ClientRegistry, ConnectionId, ConnectionIdFactory, DisplayName,
        MessageSink,
    },
    infrastructure::registry::InMemoryClientRegistry,
};

use super::{
    BroadcastMessageUseCase, BroadcastReport, ConnectError, ConnectParticipantUseCase,
    DisconnectParticipantUseCase,
};

/// チャットの共有状態とユースケースの束
pub struct ChatHub {
    registry: Arc<dyn ClientRegistry>,
    history: Arc<Mutex<ChatHistory>>,
    connection_ids: ConnectionIdFactory,
    broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    connect_participant_usecase: ConnectParticipantUseCase,
    disconnect_participant_usecase: DisconnectParticipantUseCase,
}

impl ChatHub {
    /// インメモリ登録簿とシステム時計で作成
    pub fn new(history_capacity: usize) -> Self {
        Self::with_parts(
            Arc::new(InMemoryClientRegistry::new()),
            history_capacity,
            Arc::new(SystemClock),
        )
    }

    /// 登録簿と時計を指定して作成
    pub fn with_parts(
        registry: Arc<dyn ClientRegistry>,
        history_capacity: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let history = Arc::new(Mutex::new(ChatHistory::with_capacity(history_capacity)));
        let broadcast_message_usecase = Arc::new(BroadcastMessageUseCase::new(
            registry.clone(),
            history.clone(),
            clock,
        ));
        let connect_participant_usecase = ConnectParticipantUseCase::new(
            registry.clone(),
            history.clone(),
            broadcast_message_usecase.clone(),
        );
        let disconnect_participant_usecase =
            DisconnectParticipantUseCase::new(registry.clone(), broadcast_message_usecase.clone());

        Self {
            registry,
            history,
            connection_ids: ConnectionIdFactory::new(),
            broadcast_message_usecase,
            connect_participant_usecase,
            disconnect_participant_usecase,
        }
    }

    /// 新しい接続に割り当てる ID
    pub fn next_connection_id(&self) -> ConnectionId {
        self.connection_ids.generate()
    }

    /// 名前の決まったクライアントを登録し、参加をアナウンスする
    ///
    /// 参加前の履歴を返す。
    pub async fn connect(
        &self,
        id: ConnectionId,
        name: DisplayName,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Vec<ChatMessage>, ConnectError> {
        self.connect_participant_usecase
            .execute(id, name, sink)
            .await
    }

    /// 登録を解除し、この呼び出しで解除できた場合だけ退出をアナウンスする
    pub async fn disconnect(&self, id: ConnectionId) -> Option<DisplayName> {
        self.disconnect_participant_usecase.execute(id).await
    }

    /// 書き込み失敗時と同じく、アナウンスなしで登録簿から外して閉じる
    pub async fn drop_client(&self, id: ConnectionId) {
        self.broadcast_message_usecase.remove_silently(id).await;
    }

    /// ブロードキャスト
    pub async fn broadcast(
        &self,
        body: &str,
        sender: Option<&DisplayName>,
        exclude: Option<ConnectionId>,
    ) -> BroadcastReport {
        self.broadcast_message_usecase
            .execute(body, sender, exclude)
            .await
    }

    /// 直近の履歴（古い順）
    pub async fn recent_history(&self) -> Vec<ChatMessage> {
        self.history.lock().await.recent()
    }

    /// 接続中のクライアント数
    pub async fn client_count(&self) -> usize {
        self.registry.len().await
    }

    pub async fn is_connected(&self, id: ConnectionId) -> bool {
        self.registry.contains(id).await
    }

    /// 接続中クライアントの表示名（ConnectionId 順）
    pub async fn client_names(&self) -> Vec<DisplayName> {
        self.registry
            .snapshot()
            .await
            .into_iter()
            .map(|(_, entry)| entry.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::DEFAULT_HISTORY_CAPACITY, test_support::RecordingSink};

    #[tokio::test]
    async fn test_concurrent_connects_register_every_client() {
        // テスト項目: N 人が並行に参加すると登録簿にちょうど N 件・空でない名前で登録される
        // given (前提条件):
        let hub = Arc::new(ChatHub::new(DEFAULT_HISTORY_CAPACITY));
        let inputs = ["alice", "", "bob", "   ", "charlie", "dave", "", "erin"];

        // when (操作):
        let mut handles = Vec::new();
        for raw in inputs {
            let hub = hub.clone();
            handles.push(tokio::spawn(async move {
                let id = hub.next_connection_id();
                hub.connect(
                    id,
                    DisplayName::from_input(raw),
                    Arc::new(RecordingSink::new()),
                )
                .await
                .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        assert_eq!(hub.client_count().await, inputs.len());
        let names = hub.client_names().await;
        assert!(names.iter().all(|n| !n.as_str().is_empty()));
        assert_eq!(names.iter().filter(|n| n.as_str() == "Anonymous").count(), 3);
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        // テスト項目: 履歴は容量を超えず、直近のメッセージだけが残る
        // given (前提条件):
        let hub = ChatHub::new(DEFAULT_HISTORY_CAPACITY);
        let alice = DisplayName::from_input("alice");

        // when (操作):
        for i in 0..15 {
            hub.broadcast(&format!("m{}", i), Some(&alice), None).await;
        }

        // then (期待する結果):
        let history = hub.recent_history().await;
        assert_eq!(history.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(history[0].text(), "[alice]: m5");
        assert_eq!(history[9].text(), "[alice]: m14");
    }

    #[tokio::test]
    async fn test_connect_then_disconnect_round_trip() {
        // テスト項目: 参加して退出すると登録簿から消え、残りの参加者に通知される
        // given (前提条件):
        let hub = ChatHub::new(DEFAULT_HISTORY_CAPACITY);
        let alice = Arc::new(RecordingSink::new());
        let bob = Arc::new(RecordingSink::new());
        let alice_id = hub.next_connection_id();
        let bob_id = hub.next_connection_id();
        hub.connect(alice_id, DisplayName::from_input("Alice"), alice.clone())
            .await
            .unwrap();
        hub.connect(bob_id, DisplayName::from_input("Bob"), bob.clone())
            .await
            .unwrap();

        // when (操作):
        let left = hub.disconnect(bob_id).await;

        // then (期待する結果):
        assert_eq!(left, Some(DisplayName::from_input("Bob")));
        assert!(!hub.is_connected(bob_id).await);
        assert_eq!(hub.client_count().await, 1);
        assert_eq!(
            alice.lines().await.last().map(String::as_str),
            Some("Bob покинул чат")
        );
    }
}
