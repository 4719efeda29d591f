//! ワイヤプロトコルの文言
//!
//! クライアントとの間でやり取りされる固定文言と、その組み立てを定義します。

use super::{ChatMessage, DisplayName};

/// 接続直後にクライアントへ送る名前入力プロンプト（改行なし）
pub const NAME_PROMPT: &str = "Введите ваше имя: ";

/// セッション終了のキーワード（大文字小文字を区別しない）
pub const EXIT_KEYWORD: &str = "exit";

const HISTORY_HEADER: &str = "\n--- История чата ---\n";
const HISTORY_FOOTER: &str = "\n--- Конец истории ---\n";

/// 参加アナウンス
pub fn joined_announcement(name: &DisplayName) -> String {
    format!("{} присоединился к чату", name)
}

/// 退出アナウンス
pub fn left_announcement(name: &DisplayName) -> String {
    format!("{} покинул чат", name)
}

/// ユーザーメッセージの整形 `"[name]: body"`
pub fn format_user_message(sender: &str, body: &str) -> String {
    format!("[{}]: {}", sender, body)
}

/// 入力行が終了キーワードかどうか
pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_KEYWORD)
}

/// 履歴ブロックを組み立てる
///
/// 履歴が空の場合は `None`（ブロックは送信しない）。
pub fn render_history_block(messages: &[ChatMessage]) -> Option<String> {
    if messages.is_empty() {
        return None;
    }

    let body = messages
        .iter()
        .map(ChatMessage::text)
        .collect::<Vec<_>>()
        .join("\n");

    Some(format!("{}{}{}", HISTORY_HEADER, body, HISTORY_FOOTER))
}
