//! Binary-to-text codecs used at the boundary

use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Reversible binary-to-text encoding
pub trait TextCodec {
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decode `text`, failing with [`crate::Error::Encoding`]
    fn decode(&self, text: &str) -> Result<Vec<u8>>;
}

/// Standard, padded base64 (RFC 4648 section 4)
///
/// Surrounding ASCII whitespace is ignored when decoding, so values pasted
/// from a terminal decode cleanly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl TextCodec for Base64Codec {
    fn encode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(text.trim())?)
    }
}
