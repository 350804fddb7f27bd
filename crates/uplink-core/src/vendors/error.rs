use thiserror::Error;

/// Errors returned by payload decoding.
///
/// A decode either fully succeeds or fails with one of these; there are no
/// partial results. Callers should treat any error as "this payload/port
/// combination is not decodable" and drop or quarantine the message.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed hex payload: {reason}")]
    MalformedHex { reason: &'static str },
    #[error("protocol version {actual} doesn't match v{expected}")]
    ProtocolVersion { expected: u8, actual: u8 },
    #[error("no decoder registered for format '{format}'")]
    UnsupportedFormat { format: String },
    #[error("port {port} is not supported")]
    UnsupportedPort { port: u16 },
    #[error("payload prefix {prefix} does not match any known layout")]
    UnsupportedPrefix { prefix: String },
    #[error("payload length {len} is not supported")]
    UnsupportedLength { len: usize },
    #[error("unknown field id {id} (0x{id:02x})")]
    UnknownField { id: u8 },
    #[error("payload too short: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("invalid timestamp embedded in payload")]
    InvalidTimestamp,
}
