//! チャットメッセージ

use super::{Timestamp, protocol::format_user_message};

/// ブロードキャストされる整形済みメッセージ
///
/// `"[name]: body"` 形式のユーザーメッセージ、または送信者なしのシステムアナウンス。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    text: String,
    recorded_at: Timestamp,
}

impl ChatMessage {
    /// 送信者付きのユーザーメッセージ
    pub fn from_user(sender: &str, body: &str, recorded_at: Timestamp) -> Self {
        Self {
            text: format_user_message(sender, body),
            recorded_at,
        }
    }

    /// 送信者なしのシステムアナウンス（本文をそのまま使う）
    pub fn announcement(text: String, recorded_at: Timestamp) -> Self {
        Self { text, recorded_at }
    }

    /// 送信者の有無に応じて整形する
    pub fn compose(body: &str, sender: Option<&str>, recorded_at: Timestamp) -> Self {
        match sender {
            Some(sender) => Self::from_user(sender, body, recorded_at),
            None => Self::announcement(body.to_string(), recorded_at),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }
}
