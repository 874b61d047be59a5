// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RESP wire protocol helpers

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use super::StoreError;

/// A single reply frame from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `+` simple string, e.g. `OK`
    Simple(String),
    /// `:` integer
    Integer(i64),
    /// `$` bulk string payload
    Bulk(String),
    /// `$-1` absent value
    Null,
}

/// Encodes a command as a RESP array of bulk strings
#[must_use]
pub fn encode_command(args: &[&str]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(format!("*{}\r\n", args.len()).as_bytes());
    for arg in args {
        buf.extend_from_slice(format!("${}\r\n", arg.len()).as_bytes());
        buf.extend_from_slice(arg.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
    buf
}

/// Reads one reply frame from the stream.
///
/// Error replies (`-`) surface as `StoreError::Command`; malformed frames
/// as `StoreError::Protocol`.
pub async fn read_reply<R>(reader: &mut R) -> Result<Reply, StoreError>
where
    R: AsyncBufRead + Unpin,
{
    let line = read_line(reader).await?;
    let Some(kind) = line.chars().next() else {
        return Err(StoreError::Protocol("empty reply line".to_string()));
    };
    let rest = &line[kind.len_utf8()..];

    match kind {
        '+' => Ok(Reply::Simple(rest.to_string())),
        '-' => Err(StoreError::Command(rest.to_string())),
        ':' => rest
            .parse()
            .map(Reply::Integer)
            .map_err(|_| StoreError::Protocol(format!("bad integer reply: {rest}"))),
        '$' => {
            let declared: i64 = rest
                .parse()
                .map_err(|_| StoreError::Protocol(format!("bad bulk length: {rest}")))?;
            let Ok(len) = usize::try_from(declared) else {
                // negative length marks an absent value
                return Ok(Reply::Null);
            };

            let mut buf = vec![0u8; len + 2];
            reader.read_exact(&mut buf).await?;
            if buf[len..] != *b"\r\n" {
                return Err(StoreError::Protocol(
                    "bulk reply missing CRLF terminator".to_string(),
                ));
            }
            buf.truncate(len);
            String::from_utf8(buf)
                .map(Reply::Bulk)
                .map_err(|_| StoreError::Protocol("bulk reply is not valid UTF-8".to_string()))
        }
        other => Err(StoreError::Protocol(format!(
            "unexpected reply prefix '{other}'"
        ))),
    }
}

async fn read_line<R>(reader: &mut R) -> Result<String, StoreError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    let read = reader.read_line(&mut line).await?;
    if read == 0 {
        return Err(StoreError::Protocol("connection closed mid-reply".to_string()));
    }
    if !line.ends_with("\r\n") {
        return Err(StoreError::Protocol(format!(
            "reply line missing CRLF: {line:?}"
        )));
    }
    line.truncate(line.len() - 2);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_single_word_command() {
        assert_eq!(encode_command(&["PING"]), b"*1\r\n$4\r\nPING\r\n".to_vec());
    }

    #[test]
    fn test_encode_get_command() {
        assert_eq!(
            encode_command(&["GET", "heart_rate"]),
            b"*2\r\n$3\r\nGET\r\n$10\r\nheart_rate\r\n".to_vec()
        );
    }

    #[test]
    fn test_encode_uses_byte_lengths() {
        // multi-byte UTF-8 payloads must be framed by byte length
        let encoded = encode_command(&["SET", "k", "héllo"]);
        assert_eq!(
            encoded,
            b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$6\r\nh\xc3\xa9llo\r\n".to_vec()
        );
    }
}
