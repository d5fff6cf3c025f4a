//! Line-delimited JSON server: one envelope per line in, one reply per line
//! out. Request failures become error replies; only EOF or an I/O failure
//! ends the loop.

use std::io;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use trellis_core::constants::TOOL_NAME;
use trellis_core::errors::ProtocolError;
use trellis_core::traits::IRetriever;

use crate::conversions::error_types::protocol_error_json;
use crate::tool::RetrievalTool;

/// Lines longer than this are answered with a protocol error and skipped.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

enum Line {
    Eof,
    Text(String),
    TooLong(usize),
}

/// Serve envelopes from `reader` until EOF. Returns the number of requests
/// answered.
pub async fn serve<R, In, Out>(tool: &RetrievalTool<R>, mut reader: In, mut writer: Out) -> io::Result<usize>
where
    R: IRetriever,
    In: AsyncBufRead + Unpin,
    Out: AsyncWrite + Unpin,
{
    info!(tool = TOOL_NAME, "tool server started");
    let mut answered = 0usize;

    loop {
        let reply = match read_line_bounded(&mut reader, MAX_LINE_BYTES).await? {
            Line::Eof => break,
            Line::TooLong(bytes) => {
                warn!(bytes, limit = MAX_LINE_BYTES, "request line too long");
                let err = ProtocolError::MalformedRequest {
                    reason: format!("request line exceeds {MAX_LINE_BYTES} bytes"),
                };
                with_null_id(protocol_error_json(&err))
            }
            Line::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    continue;
                }
                debug!(bytes = trimmed.len(), "request received");
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(envelope) if envelope.is_object() => tool.handle_envelope(envelope).await,
                    Ok(_) => with_null_id(protocol_error_json(&ProtocolError::MalformedRequest {
                        reason: "envelope must be a JSON object".to_string(),
                    })),
                    Err(e) => with_null_id(protocol_error_json(&ProtocolError::MalformedRequest {
                        reason: e.to_string(),
                    })),
                }
            }
        };

        writer.write_all(reply.to_string().as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        answered += 1;
    }

    info!(answered, "input closed, tool server stopping");
    Ok(answered)
}

fn with_null_id(mut body: Value) -> Value {
    if let Some(object) = body.as_object_mut() {
        object.insert("id".to_string(), json!(null));
    }
    body
}

/// Read through the next newline without buffering more than `max_bytes`.
/// An over-long line is drained and reported as [`Line::TooLong`].
async fn read_line_bounded<R: AsyncBufRead + Unpin>(reader: &mut R, max_bytes: usize) -> io::Result<Line> {
    let mut raw = Vec::new();
    let mut total = 0usize;
    let mut saw_any = false;

    loop {
        let (consumed, found_newline) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                break;
            }
            saw_any = true;
            let (end, found) = match available.iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (available.len(), false),
            };
            if total + end <= max_bytes {
                raw.extend_from_slice(&available[..end]);
            }
            (end, found)
        };
        reader.consume(consumed);
        total += consumed;
        if found_newline {
            break;
        }
    }

    if !saw_any {
        return Ok(Line::Eof);
    }
    if total > max_bytes {
        return Ok(Line::TooLong(total));
    }
    Ok(Line::Text(String::from_utf8_lossy(&raw).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_reader_splits_lines_and_flags_long_ones() {
        let input = format!("short\n{}\nnext", "x".repeat(32));
        let mut reader = input.as_bytes();

        match read_line_bounded(&mut reader, 16).await.unwrap() {
            Line::Text(t) => assert_eq!(t, "short\n"),
            _ => panic!("expected text"),
        }
        match read_line_bounded(&mut reader, 16).await.unwrap() {
            Line::TooLong(n) => assert_eq!(n, 33),
            _ => panic!("expected too long"),
        }
        match read_line_bounded(&mut reader, 16).await.unwrap() {
            Line::Text(t) => assert_eq!(t, "next"),
            _ => panic!("expected trailing text"),
        }
        assert!(matches!(read_line_bounded(&mut reader, 16).await.unwrap(), Line::Eof));
    }
}
