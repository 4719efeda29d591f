//! Per-connection session handler.
//!
//! A session walks `Connecting → AwaitingName → Active → Closing → Closed`.
//! Every way out of `AwaitingName` or `Active` (exit keyword, empty line, EOF,
//! I/O error, oversized line, silent drop) goes through `Closing`, so a session
//! never ends while still registered.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::{
    domain::{
        ConnectionId, DisplayName, MessageSink,
        protocol::{NAME_PROMPT, is_exit_command, render_history_block},
    },
    infrastructure::sink::StreamSink,
    usecase::ChatHub,
};

use super::{error::SessionError, framing::LineReader};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    AwaitingName,
    Active,
    Closing,
    Closed,
}

/// Why a session left `AwaitingName` / `Active`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Peer closed the stream
    PeerClosed,
    /// Client sent an empty line
    EmptyLine,
    /// Client sent the exit keyword
    ExitCommand,
    /// Connection was dropped from the registry after a failed write
    Dropped,
    /// Read, write or registration error, or an oversized line
    Error,
}

/// Summary returned when a session reaches `Closed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub id: ConnectionId,
    pub name: Option<DisplayName>,
    pub reason: EndReason,
    pub final_state: SessionState,
}

/// Handler for one accepted connection
pub struct Session<R> {
    id: ConnectionId,
    hub: Arc<ChatHub>,
    lines: LineReader<R>,
    sink: Arc<dyn MessageSink>,
    name: Option<DisplayName>,
    state: SessionState,
}

/// Run a session over any bidirectional byte stream until it is closed.
pub async fn run_session<S>(stream: S, hub: Arc<ChatHub>) -> SessionReport
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let id = hub.next_connection_id();
    let (reader, writer) = tokio::io::split(stream);
    let sink: Arc<dyn MessageSink> = Arc::new(StreamSink::new(writer));
    Session::new(id, hub, reader, sink).run().await
}

impl<R> Session<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(id: ConnectionId, hub: Arc<ChatHub>, reader: R, sink: Arc<dyn MessageSink>) -> Self {
        Self {
            id,
            hub,
            lines: LineReader::new(reader),
            sink,
            name: None,
            state: SessionState::Connecting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session to `Closed`.
    pub async fn run(mut self) -> SessionReport {
        self.transition(SessionState::AwaitingName);

        let outcome = match self.handshake().await {
            Ok(()) => {
                self.transition(SessionState::Active);
                self.relay().await
            }
            Err(e) => Err(e),
        };

        let reason = match outcome {
            Ok(reason) => reason,
            Err(e) => {
                tracing::info!("Session {} terminated: {}", self.id, e);
                EndReason::Error
            }
        };

        self.transition(SessionState::Closing);
        self.close().await;
        self.transition(SessionState::Closed);

        SessionReport {
            id: self.id,
            name: self.name,
            reason,
            final_state: self.state,
        }
    }

    async fn handshake(&mut self) -> Result<(), SessionError> {
        self.sink.send_raw(NAME_PROMPT).await?;

        let raw = self
            .lines
            .next_line()
            .await?
            .ok_or(SessionError::ClosedBeforeName)?;
        let name = DisplayName::from_input(&raw);

        let backlog = self
            .hub
            .connect(self.id, name.clone(), self.sink.clone())
            .await?;
        self.name = Some(name);

        if let Some(block) = render_history_block(&backlog) {
            self.sink.send_raw(&block).await?;
        }
        Ok(())
    }

    async fn relay(&mut self) -> Result<EndReason, SessionError> {
        loop {
            // A silent drop closes the sink; stop reading right away
            let next = tokio::select! {
                line = self.lines.next_line() => line?,
                _ = self.sink.closed() => return Ok(EndReason::Dropped),
            };
            let Some(line) = next else {
                return Ok(EndReason::PeerClosed);
            };

            let body = line.trim();
            if body.is_empty() {
                return Ok(EndReason::EmptyLine);
            }
            if is_exit_command(body) {
                return Ok(EndReason::ExitCommand);
            }
            if !self.hub.is_connected(self.id).await {
                return Ok(EndReason::Dropped);
            }

            self.hub
                .broadcast(body, self.name.as_ref(), Some(self.id))
                .await;
        }
    }

    async fn close(&mut self) {
        if self.name.is_some() {
            self.hub.disconnect(self.id).await;
        }
        self.sink.close().await;
    }

    fn transition(&mut self, next: SessionState) {
        tracing::debug!("Session {}: {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
    }
}
