//! ClientRegistry trait 定義
//!
//! 接続中クライアントの登録簿へのインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use super::{ConnectionId, DisplayName, MessageSink};

/// 登録簿の 1 エントリ
///
/// 接続そのものはセッションが所有し、登録簿は書き込み口だけを参照する。
#[derive(Clone)]
pub struct ClientEntry {
    pub name: DisplayName,
    pub sink: Arc<dyn MessageSink>,
}

impl ClientEntry {
    pub fn new(name: DisplayName, sink: Arc<dyn MessageSink>) -> Self {
        Self { name, sink }
    }
}

impl fmt::Debug for ClientEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// 接続中クライアントの登録簿
///
/// 全ての変更は単一の排他ロックで直列化される。
/// `snapshot` はロックをコピーの間だけ保持し、I/O の前に解放する。
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// エントリを追加。既に登録済みの接続なら何もせず `false` を返す
    async fn register(&self, id: ConnectionId, entry: ClientEntry) -> bool;

    /// エントリを削除して返す。存在しなければ `None`
    ///
    /// 同じ接続に対して並行に呼ばれても `Some` を受け取るのは 1 回だけ。
    async fn unregister(&self, id: ConnectionId) -> Option<ClientEntry>;

    /// 現時点のコピー（ConnectionId 順）
    async fn snapshot(&self) -> Vec<(ConnectionId, ClientEntry)>;

    /// 登録されているかどうか
    async fn contains(&self, id: ConnectionId) -> bool;

    /// 登録数
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
