//! Sigil Core Library
//!
//! A minimal Ed25519 signing utility. Keypairs are generated from an
//! injected entropy source, payloads are signed into `signature || payload`
//! envelopes, and envelopes are opened (verified and unwrapped) against a
//! public key. Text at the boundary is base64.
//!
//! ```
//! use sigil_core::{Sigil, TextCodec};
//!
//! let mut sigil = Sigil::new();
//! let keys = sigil.generate().unwrap();
//! let hello = sigil.codec().encode(b"hello");
//!
//! let envelope = sigil.sign(&hello, keys.private_key()).unwrap();
//! let opened = sigil.open(&envelope, keys.public_key()).unwrap();
//! assert_eq!(opened, hello);
//! ```

pub mod bundle;
pub mod codec;
pub mod crypto;
pub mod entropy;
pub mod sigil;
pub mod version;

pub use codec::{Base64Codec, TextCodec};
pub use crypto::{KeyPair, PrivateKey, PublicKey, SignedEnvelope};
pub use entropy::{EntropySource, OsEntropy, RngEntropy};
pub use sigil::{KeyPairText, Sigil};
pub use version::version_string;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Malformed envelope: {len} bytes, need at least {min}")]
    MalformedEnvelope { len: usize, min: usize },

    #[error("Invalid signature")]
    SignatureInvalid,

    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

impl Error {
    /// True when the input itself was unusable, as opposed to a
    /// well-formed envelope whose signature did not verify.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Error::Encoding(_) | Error::InvalidKey(_) | Error::MalformedEnvelope { .. }
        )
    }

    /// No operation can proceed after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::EntropyUnavailable(_))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::Encoding("bad".into()).is_malformed_input());
        assert!(Error::InvalidKey("short".into()).is_malformed_input());
        assert!(Error::MalformedEnvelope { len: 3, min: 64 }.is_malformed_input());
        assert!(!Error::SignatureInvalid.is_malformed_input());
        assert!(!Error::EntropyUnavailable("gone".into()).is_malformed_input());

        assert!(Error::EntropyUnavailable("gone".into()).is_fatal());
        assert!(!Error::SignatureInvalid.is_fatal());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::MalformedEnvelope { len: 10, min: 64 };
        assert_eq!(err.to_string(), "Malformed envelope: 10 bytes, need at least 64");
        assert_eq!(Error::SignatureInvalid.to_string(), "Invalid signature");
    }
}
