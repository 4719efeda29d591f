//! チャット履歴バッファ
//!
//! 直近のメッセージだけを保持する固定長 FIFO。
//! 排他制御は所有者（`ChatHub`）側で行います。

use std::collections::VecDeque;

use super::ChatMessage;

/// 履歴バッファの既定容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// 直近メッセージの履歴
#[derive(Debug, Clone)]
pub struct ChatHistory {
    capacity: usize,
    entries: VecDeque<ChatMessage>,
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 容量を指定して作成（0 は 1 に切り上げ）
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// 末尾に追加し、容量を超えた分を先頭から捨てる
    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push_back(message);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// 現在の内容のコピー（古い順）
    pub fn recent(&self) -> Vec<ChatMessage> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    fn message(i: usize) -> ChatMessage {
        ChatMessage::from_user("alice", &format!("message {}", i), Timestamp::new(i as i64))
    }

    #[test]
    fn test_append_within_capacity() {
        // テスト項目: 容量以内の追加では全件が古い順に保持される
        // given (前提条件):
        let mut history = ChatHistory::new();

        // when (操作):
        for i in 0..3 {
            history.append(message(i));
        }

        // then (期待する結果):
        let recent = history.recent();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].text(), "[alice]: message 0");
        assert_eq!(recent[2].text(), "[alice]: message 2");
    }

    #[test]
    fn test_append_evicts_oldest_beyond_capacity() {
        // テスト項目: 15 件追加すると直近 10 件だけが順序通り残る
        // given (前提条件):
        let mut history = ChatHistory::new();

        // when (操作):
        for i in 0..15 {
            history.append(message(i));
            assert!(history.len() <= DEFAULT_HISTORY_CAPACITY);
        }

        // then (期待する結果):
        let texts: Vec<String> = history.recent().iter().map(|m| m.text().to_string()).collect();
        let expected: Vec<String> = (5..15).map(|i| format!("[alice]: message {}", i)).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_zero_capacity_is_rounded_up() {
        // テスト項目: 容量 0 を指定しても最新の 1 件は保持される
        // given (前提条件):
        let mut history = ChatHistory::with_capacity(0);

        // when (操作):
        history.append(message(1));
        history.append(message(2));

        // then (期待する結果):
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.recent(), vec![message(2)]);
    }
}
