//! Client session: handshake, then concurrent read and write loops.

use chatline_server::domain::{ANONYMOUS_NAME, protocol::is_exit_command};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader},
    net::TcpStream,
};

use super::{error::ClientError, input::spawn_readline, ui::print_incoming};

/// What to do with one line typed by the user
#[derive(Debug, PartialEq, Eq)]
enum Outgoing {
    Send(String),
    Skip,
    Quit,
}

fn classify_input(line: &str) -> Outgoing {
    let line = line.trim();
    if line.is_empty() {
        Outgoing::Skip
    } else if is_exit_command(line) {
        Outgoing::Quit
    } else {
        Outgoing::Send(line.to_string())
    }
}

/// Name sent to the server; empty input becomes the anonymous name
fn normalize_name(input: &str) -> &str {
    let name = input.trim();
    if name.is_empty() { ANONYMOUS_NAME } else { name }
}

/// Read the server's greeting (the name prompt, no trailing newline)
///
/// The server sends nothing else until it has the name, so the whole
/// buffered content is the prompt.
async fn read_prompt<R>(reader: &mut R) -> Result<String, ClientError>
where
    R: AsyncBufRead + Unpin,
{
    let buffered = reader.fill_buf().await?;
    if buffered.is_empty() {
        return Err(ClientError::NoPrompt);
    }
    let prompt = String::from_utf8_lossy(buffered).into_owned();
    let n = buffered.len();
    reader.consume(n);
    Ok(prompt)
}

/// Read one complete `\n`-terminated message. `None` once the server closes.
///
/// Decoding happens per line, so a multi-byte character split across TCP
/// reads is never cut in half.
async fn read_incoming<R>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>, ClientError>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

async fn send_line<W>(writer: &mut W, line: &str) -> Result<(), ClientError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(format!("{}\n", line).as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Connect to the chat server and run until the user or the server ends the session.
pub async fn run_client(host: &str, port: u16) -> Result<(), ClientError> {
    let addr = format!("{}:{}", host, port);
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| ClientError::Connect {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Connected to chat server at {}", addr);

    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    // 1. Handshake: show the server's prompt and answer with a name
    let prompt = read_prompt(&mut reader).await?;
    let mut input_rx = spawn_readline(prompt);
    let Some(name) = input_rx.recv().await else {
        return Ok(());
    };
    send_line(&mut writer, normalize_name(&name)).await?;

    println!("\nType messages and press Enter to send. Type 'exit' or press Ctrl+C to quit.\n");

    // 2. Print everything the server sends
    let mut read_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        while let Some(text) = read_incoming(&mut reader, &mut buf).await? {
            print_incoming(&text);
        }
        tracing::info!("Server closed the connection");
        Ok::<(), ClientError>(())
    });

    // 3. Send what the user types
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            match classify_input(&line) {
                Outgoing::Send(text) => send_line(&mut writer, &text).await?,
                Outgoing::Skip => continue,
                Outgoing::Quit => break,
            }
        }
        writer.shutdown().await?;
        Ok::<(), ClientError>(())
    });

    // If any one of the tasks completes, abort the other
    let result = tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result
        }
    };

    match result {
        Ok(inner) => inner,
        Err(e) => {
            tracing::warn!("Client task failed: {}", e);
            Ok(())
        }
    }
}
