//! UI utilities for the client.

use std::io::Write;

/// Prompt shown while chatting
pub const CHAT_PROMPT: &str = "> ";

/// Print text received from the server and redisplay the prompt
pub fn print_incoming(text: &str) {
    print!("\r{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    print!("{}", CHAT_PROMPT);
    std::io::stdout().flush().ok();
}
