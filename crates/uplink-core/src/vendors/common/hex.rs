use crate::vendors::error::DecodeError;

/// Convert a hex string into bytes.
///
/// Fails on odd-length input and on non-hex characters; decoders only ever
/// see well-formed byte slices.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, DecodeError> {
    if hex.len() % 2 != 0 {
        return Err(DecodeError::MalformedHex {
            reason: "odd number of hex digits",
        });
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    let raw = hex.as_bytes();
    for pair in raw.chunks_exact(2) {
        let hi = nibble(pair[0])?;
        let lo = nibble(pair[1])?;
        bytes.push((hi << 4) | lo);
    }
    Ok(bytes)
}

fn nibble(c: u8) -> Result<u8, DecodeError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(DecodeError::MalformedHex {
            reason: "non-hex character",
        }),
    }
}
