//! Text boundary: the three operations over base64 strings
//!
//! [`Sigil`] owns its entropy source and codec, so callers decide where
//! randomness comes from and how bytes are rendered.

use crate::codec::{Base64Codec, TextCodec};
use crate::crypto::{self, hash, KeyPair, PrivateKey, PublicKey, SignedEnvelope};
use crate::entropy::{EntropySource, OsEntropy};
use crate::Result;
use serde::Serialize;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

/// Text form of a freshly generated keypair, public key first
#[derive(Serialize)]
pub struct KeyPairText {
    public_key: String,
    private_key: String,
}

impl KeyPairText {
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl std::fmt::Debug for KeyPairText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairText")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Drop for KeyPairText {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// Signing utility with injected entropy and codec
#[derive(Debug, Clone)]
pub struct Sigil<E = OsEntropy, C = Base64Codec> {
    entropy: E,
    codec: C,
}

impl Sigil {
    /// Operating system entropy and standard base64
    pub fn new() -> Self {
        Self::with_sources(OsEntropy, Base64Codec)
    }
}

impl Default for Sigil {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntropySource, C: TextCodec> Sigil<E, C> {
    pub fn with_sources(entropy: E, codec: C) -> Self {
        Self { entropy, codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Generate a keypair and encode both halves
    pub fn generate(&mut self) -> Result<KeyPairText> {
        let keypair = KeyPair::generate(&mut self.entropy)?;
        debug!(public_key = ?keypair.public(), "Generated keypair");

        Ok(KeyPairText {
            public_key: self.codec.encode(keypair.public().as_bytes()),
            private_key: self.codec.encode(&keypair.private().to_bytes()[..]),
        })
    }

    /// Decode `payload_text` and `private_key_text`, sign, and encode the
    /// envelope
    pub fn sign(&self, payload_text: &str, private_key_text: &str) -> Result<String> {
        let payload = self.codec.decode(payload_text)?;
        let key_bytes = Zeroizing::new(self.codec.decode(private_key_text)?);
        let private_key = PrivateKey::from_bytes(&key_bytes)?;

        let envelope = crypto::sign(&payload, &private_key);
        Ok(self.codec.encode(envelope.as_bytes()))
    }

    /// Decode and open an envelope, encoding the recovered payload
    pub fn open(&self, envelope_text: &str, public_key_text: &str) -> Result<String> {
        let key_bytes = self.codec.decode(public_key_text)?;
        let envelope_bytes = self.codec.decode(envelope_text)?;

        let public_key = PublicKey::from_bytes(&key_bytes)?;
        let envelope = SignedEnvelope::from_bytes(envelope_bytes)?;
        let payload = crypto::open(&envelope, &public_key)?;

        Ok(self.codec.encode(&payload))
    }

    /// Encoded SHA-256 of `text`
    pub fn hash(&self, text: &str) -> String {
        self.codec.encode(&hash::digest(text.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::RngEntropy;
    use crate::Error;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_text_round_trip() {
        let mut sigil = Sigil::new();
        let keys = sigil.generate().unwrap();
        let payload = sigil.codec().encode(b"hello");

        let envelope = sigil.sign(&payload, keys.private_key()).unwrap();
        assert_eq!(sigil.open(&envelope, keys.public_key()).unwrap(), payload);
    }

    #[test]
    fn test_generated_text_lengths() {
        let mut sigil = Sigil::new();
        let keys = sigil.generate().unwrap();

        assert_eq!(keys.public_key().len(), 44);
        assert_eq!(keys.private_key().len(), 88);
    }

    #[test]
    fn test_injected_entropy_is_used() {
        let mut a = Sigil::with_sources(RngEntropy::new(StdRng::seed_from_u64(1)), Base64Codec);
        let mut b = Sigil::with_sources(RngEntropy::new(StdRng::seed_from_u64(1)), Base64Codec);

        assert_eq!(
            a.generate().unwrap().public_key(),
            b.generate().unwrap().public_key()
        );
    }

    #[test]
    fn test_hash_matches_known_value() {
        assert_eq!(
            Sigil::new().hash("Hello World"),
            "pZGm1Av0IEBKARczz7exkNYsZb8LzaMrV7J32a2fFG4="
        );
    }

    #[test]
    fn test_bad_base64_is_encoding_error() {
        let mut sigil = Sigil::new();
        let keys = sigil.generate().unwrap();

        let err = sigil.sign("%%%", keys.private_key()).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));

        let err = sigil.sign("aGVsbG8=", "%%%").unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));

        let err = sigil.open("%%%", keys.public_key()).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn test_private_key_in_place_of_public_key() {
        let mut sigil = Sigil::new();
        let keys = sigil.generate().unwrap();
        let envelope = sigil.sign("aGVsbG8=", keys.private_key()).unwrap();

        let err = sigil.open(&envelope, keys.private_key()).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));

        let err = sigil.sign("aGVsbG8=", keys.public_key()).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));
    }

    #[test]
    fn test_keypair_text_json() {
        let keys = Sigil::new().generate().unwrap();
        let json = serde_json::to_value(&keys).unwrap();

        assert_eq!(json["public_key"], keys.public_key());
        assert_eq!(json["private_key"], keys.private_key());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let keys = Sigil::new().generate().unwrap();
        let debug = format!("{:?}", keys);

        assert!(debug.contains(keys.public_key()));
        assert!(!debug.contains(keys.private_key()));
    }
}
