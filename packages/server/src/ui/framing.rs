//! `\n`-delimited line framing with an upper bound on line length.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use super::error::SessionError;

/// Longest inbound line accepted, in bytes, without the terminator
pub const MAX_LINE_BYTES: usize = 4096;

/// Reads UTF-8 lines and rejects any line longer than `max_len` bytes.
///
/// `next_line` is cancel safe: bytes read before a cancellation stay in
/// `pending` and are picked up by the next call.
pub struct LineReader<R> {
    inner: BufReader<R>,
    pending: Vec<u8>,
    max_len: usize,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self::with_max_len(reader, MAX_LINE_BYTES)
    }

    pub fn with_max_len(reader: R, max_len: usize) -> Self {
        Self {
            inner: BufReader::new(reader),
            pending: Vec::new(),
            max_len,
        }
    }

    /// Next line without its `\n` (or `\r\n`). `None` at EOF.
    ///
    /// A final unterminated line is returned as is.
    pub async fn next_line(&mut self) -> Result<Option<String>, SessionError> {
        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return self.take_line().map(Some);
            }

            match available.iter().position(|b| *b == b'\n') {
                Some(end) => {
                    self.pending.extend_from_slice(&available[..end]);
                    self.inner.consume(end + 1);
                    if self.pending.last() == Some(&b'\r') {
                        self.pending.pop();
                    }
                    self.check_len()?;
                    return self.take_line().map(Some);
                }
                None => {
                    let n = available.len();
                    self.pending.extend_from_slice(available);
                    self.inner.consume(n);
                    self.check_len()?;
                }
            }
        }
    }

    fn check_len(&mut self) -> Result<(), SessionError> {
        if self.pending.len() > self.max_len {
            self.pending.clear();
            return Err(SessionError::LineTooLong { limit: self.max_len });
        }
        Ok(())
    }

    fn take_line(&mut self) -> Result<String, SessionError> {
        let bytes = std::mem::take(&mut self.pending);
        String::from_utf8(bytes).map_err(|e| {
            SessionError::Read(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncWriteExt, duplex};

    #[tokio::test]
    async fn test_lines_split_across_writes() {
        // テスト項目: 複数回の書き込みに分かれた行（マルチバイト文字の途中で分割）が 1 行として読める
        // given (前提条件):
        let (mut client, server) = duplex(64);
        let mut reader = LineReader::new(server);
        let bytes = "Привет\r\nexit\n".as_bytes();

        // when (操作):
        client.write_all(&bytes[..3]).await.unwrap();
        client.write_all(&bytes[3..]).await.unwrap();
        drop(client);

        // then (期待する結果):
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("Привет"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("exit"));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unterminated_last_line_is_returned() {
        // テスト項目: 改行のない最後の行も EOF 時に返される
        // given (前提条件):
        let (mut client, server) = duplex(64);
        let mut reader = LineReader::new(server);

        // when (操作):
        client.write_all(b"bye").await.unwrap();
        drop(client);

        // then (期待する結果):
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("bye"));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_line_at_limit_is_accepted() {
        // テスト項目: 上限ちょうどの長さの行は受け付けられる
        // given (前提条件):
        let (mut client, server) = duplex(64);
        let mut reader = LineReader::with_max_len(server, 8);

        // when (操作):
        client.write_all(b"12345678\n").await.unwrap();

        // then (期待する結果):
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("12345678"));
    }

    #[tokio::test]
    async fn test_line_without_newline_beyond_limit_fails() {
        // テスト項目: 改行が来ないまま上限を超えると LineTooLong エラーになる
        // given (前提条件):
        let (mut client, server) = duplex(1024);
        let mut reader = LineReader::with_max_len(server, 16);

        // when (操作): 接続は開いたまま
        client.write_all(&[b'a'; 64]).await.unwrap();
        let result = reader.next_line().await;

        // then (期待する結果):
        assert!(matches!(result, Err(SessionError::LineTooLong { limit: 16 })));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_a_read_error() {
        // テスト項目: 不正な UTF-8 の行は読み込みエラーになる
        // given (前提条件):
        let (mut client, server) = duplex(64);
        let mut reader = LineReader::new(server);

        // when (操作):
        client.write_all(&[0xff, 0xfe, b'\n']).await.unwrap();
        let result = reader.next_line().await;

        // then (期待する結果):
        assert!(matches!(result, Err(SessionError::Read(_))));
    }
}
