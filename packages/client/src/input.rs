//! Keyboard input handling.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::ui::CHAT_PROMPT;

/// Read lines from the terminal on a blocking thread.
///
/// The first line is read with `first_prompt` (the server's name prompt),
/// later lines with the chat prompt. Lines are sent trimmed, including empty
/// ones. The channel closes on Ctrl+C, Ctrl+D or a readline error.
pub fn spawn_readline(first_prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let mut prompt = first_prompt;
        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                    prompt = CHAT_PROMPT.to_string();
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
