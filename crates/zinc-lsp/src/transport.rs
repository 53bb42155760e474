//! JSON-RPC transport framing for the Zinc language server.
//!
//! One message on the wire is a block of `Name: value` headers, each
//! terminated by `\r\n`, a blank line, and then exactly `Content-Length`
//! bytes of body. `Content-Length` is required; `Content-Type` and unknown
//! headers are accepted and ignored. Bodies above 10 MiB are rejected.
//!
//! A transport error terminates the current message, never the stream;
//! end-of-input before any header byte is a clean shutdown and reads as
//! `Ok(None)`.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Maximum allowed message body, in bytes (10 MiB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// The content type assumed when none is sent.
pub const DEFAULT_CONTENT_TYPE: &str = "application/vscode-jsonrpc; charset=utf-8";

/// JSON-RPC and LSP-reserved error codes.
pub mod error_codes {
    /// Invalid JSON was received.
    pub const PARSE_ERROR: i64 = -32700;
    /// The JSON sent is not a valid request object.
    pub const INVALID_REQUEST: i64 = -32600;
    /// The method does not exist or is not available.
    pub const METHOD_NOT_FOUND: i64 = -32601;
    /// Invalid method parameters.
    pub const INVALID_PARAMS: i64 = -32602;
    /// Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i64 = -32603;
    /// The request was cancelled by the client.
    pub const REQUEST_CANCELLED: i64 = -32800;
    /// The document was modified while the request was computed.
    pub const CONTENT_MODIFIED: i64 = -32801;
    /// The request was cancelled by the server.
    pub const SERVER_CANCELLED: i64 = -32802;
    /// The request failed for an application-level reason.
    pub const REQUEST_FAILED: i64 = -32803;
}

/// Errors raised by the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The `Content-Length` header was missing or malformed
    #[error("missing or malformed Content-Length header")]
    InvalidHeader,
    /// The announced body length exceeds [`MAX_CONTENT_LENGTH`]
    #[error("message body of {0} bytes exceeds the {MAX_CONTENT_LENGTH}-byte limit")]
    ContentTooLarge(usize),
    /// The underlying stream failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The message body was not valid JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// An incoming request or notification.
///
/// A message without an `id` is a notification and expects no response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Always `"2.0"`
    pub jsonrpc: String,
    /// Request id; absent on notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Method name (e.g. `textDocument/hover`)
    pub method: String,
    /// Method parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Request {
    /// True when this message is a notification.
    #[must_use]
    pub const fn is_notification(&self) -> bool { self.id.is_none() }
}

/// An outgoing response; carries exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Always `"2.0"`
    pub jsonrpc: String,
    /// The id of the request being answered; `None` only when the request
    /// id could not be read at all
    pub id: Option<String>,
    /// Success payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

impl Response {
    /// Creates a success response.
    #[must_use]
    pub fn success(id: String, result: Value) -> Self {
        Self { jsonrpc: "2.0".to_string(), id: Some(id), result: Some(result), error: None }
    }

    /// Creates a failure response.
    #[must_use]
    pub fn failure(id: Option<String>, error: ResponseError) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }
}

/// The error member of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    /// One of the [`error_codes`] constants
    pub code: i64,
    /// Short human-readable description
    pub message: String,
    /// Optional structured data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseError {
    /// Creates a new response error.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }
}

/// Reads one framed message body.
///
/// Returns `Ok(None)` on a clean end of input before any header byte.
/// End of input in the middle of a header block, a header line without a
/// colon, or a missing/malformed `Content-Length` all raise
/// [`TransportError::InvalidHeader`].
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>, TransportError> {
    let mut content_length: Option<usize> = None;
    let mut first_line = true;

    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line)?;

        if bytes_read == 0 {
            if first_line {
                return Ok(None);
            }
            return Err(TransportError::InvalidHeader);
        }
        first_line = false;

        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(TransportError::InvalidHeader);
        };

        if name.trim().eq_ignore_ascii_case("content-length") {
            let length =
                value.trim().parse::<usize>().map_err(|_| TransportError::InvalidHeader)?;
            content_length = Some(length);
        }
        // Content-Type and unknown headers are accepted and ignored.
    }

    let length = content_length.ok_or(TransportError::InvalidHeader)?;
    if length > MAX_CONTENT_LENGTH {
        return Err(TransportError::ContentTooLarge(length));
    }

    let mut body = vec![0_u8; length];
    reader.read_exact(&mut body)?;

    Ok(Some(body))
}

/// Reads and decodes one request or notification.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Option<Request>, TransportError> {
    match read_message(reader)? {
        Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
        None => Ok(None),
    }
}

/// Writes one framed message body.
pub fn write_message<W: Write>(writer: &mut W, body: &[u8]) -> Result<(), TransportError> {
    write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
    writer.write_all(body)?;
    writer.flush()?;

    Ok(())
}

/// Encodes and writes one response.
pub fn write_response<W: Write>(
    writer: &mut W,
    response: &Response,
) -> Result<(), TransportError> {
    let body = serde_json::to_vec(response)?;
    write_message(writer, &body)
}
