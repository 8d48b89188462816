//! Self-describing text bundles
//!
//! Two string formats where the public key travels with the data:
//!
//! - a **combined key** is `base64(public) || base64(private)`, 132 chars
//! - a **sealed message** is `base64(public) || base64(tag || stamp || text)`
//!   where `stamp` is the signing time in decimal Unix milliseconds
//!
//! [`unseal`] only proves the message was signed by the key embedded in
//! it. Whether that key is trusted is the caller's call; compare it with
//! [`Sealed::public_key`] against a known key before acting on the text.

use crate::codec::{Base64Codec, TextCodec};
use crate::crypto::{self, KeyPair, PrivateKey, PublicKey, SignedEnvelope};
use crate::{Error, Result};
use chrono::Utc;
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

/// Length of a base64-encoded public key
pub const ENCODED_PUBLIC_KEY_LENGTH: usize = 44;

/// Length of a base64-encoded private key
pub const ENCODED_PRIVATE_KEY_LENGTH: usize = 88;

/// Length of a combined key string
pub const COMBINED_KEY_LENGTH: usize = ENCODED_PUBLIC_KEY_LENGTH + ENCODED_PRIVATE_KEY_LENGTH;

/// Digits in a millisecond timestamp (holds until the year 2286)
pub const STAMP_DIGITS: usize = 13;

/// A keypair in its combined text form
#[derive(Debug, Clone)]
pub struct CombinedKey {
    keypair: KeyPair,
}

impl CombinedKey {
    /// Parse a 132-character combined key.
    ///
    /// The leading public key must be the one the private key carries.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.len() != COMBINED_KEY_LENGTH {
            return Err(Error::InvalidKey(format!(
                "combined key must be {} characters, got {}",
                COMBINED_KEY_LENGTH,
                text.len()
            )));
        }
        let (public_text, private_text) = split_public_prefix(text)?;

        let public_key = PublicKey::from_bytes(&Base64Codec.decode(public_text)?)?;
        let private_bytes = Zeroizing::new(Base64Codec.decode(private_text)?);
        let private_key = PrivateKey::from_bytes(&private_bytes)?;

        if private_key.public_key() != public_key {
            return Err(Error::InvalidKey(
                "public key does not belong to the private key".to_string(),
            ));
        }

        Ok(Self {
            keypair: KeyPair::from_private(private_key),
        })
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    pub fn public_key(&self) -> &PublicKey {
        self.keypair.public()
    }

    /// Render as `base64(public) || base64(private)`
    pub fn encode(&self) -> Zeroizing<String> {
        let mut text = Zeroizing::new(String::with_capacity(COMBINED_KEY_LENGTH));
        text.push_str(&Base64Codec.encode(self.keypair.public().as_bytes()));
        text.push_str(&Zeroizing::new(
            Base64Codec.encode(&self.keypair.private().to_bytes()[..]),
        ));
        text
    }
}

impl From<KeyPair> for CombinedKey {
    fn from(keypair: KeyPair) -> Self {
        Self { keypair }
    }
}

/// A verified sealed message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    public_key: PublicKey,
    message: String,
}

impl Sealed {
    /// The key that signed the message
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The signed text, stamp included
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Separate the stamp from the text, if the message starts with one
    pub fn stamped(&self) -> Option<StampedMessage<'_>> {
        StampedMessage::split(&self.message)
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

/// A signed message split into its timestamp and text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampedMessage<'a> {
    pub stamp_ms: i64,
    pub text: &'a str,
}

impl<'a> StampedMessage<'a> {
    /// Split a leading [`STAMP_DIGITS`]-digit timestamp off `message`
    pub fn split(message: &'a str) -> Option<Self> {
        let stamp = message.get(..STAMP_DIGITS)?;
        if !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            stamp_ms: stamp.parse().ok()?,
            text: &message[STAMP_DIGITS..],
        })
    }
}

impl fmt::Display for StampedMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}{}", self.stamp_ms, self.text, width = STAMP_DIGITS)
    }
}

/// Sign `text` prefixed with `stamp_ms` and embed the public key
pub fn seal(text: &str, key: &CombinedKey, stamp_ms: i64) -> String {
    let message = StampedMessage { stamp_ms, text }.to_string();
    let envelope = crypto::sign(message.as_bytes(), key.keypair().private());

    let mut sealed = Base64Codec.encode(key.public_key().as_bytes());
    sealed.push_str(&Base64Codec.encode(envelope.as_bytes()));
    sealed
}

/// [`seal`] stamped with the current time
pub fn seal_now(text: &str, key: &CombinedKey) -> String {
    seal(text, key, Utc::now().timestamp_millis())
}

/// Verify a sealed message against the key embedded in it
pub fn unseal(sealed: &str) -> Result<Sealed> {
    let sealed = sealed.trim();
    if sealed.len() < ENCODED_PUBLIC_KEY_LENGTH {
        return Err(Error::MalformedEnvelope {
            len: sealed.len(),
            min: ENCODED_PUBLIC_KEY_LENGTH,
        });
    }
    let (public_text, envelope_text) = split_public_prefix(sealed)?;

    let public_key = PublicKey::from_bytes(&Base64Codec.decode(public_text)?)?;
    let envelope = SignedEnvelope::from_bytes(Base64Codec.decode(envelope_text)?)?;
    let payload = crypto::open(&envelope, &public_key)?;

    let message = String::from_utf8(payload)
        .map_err(|e| Error::Encoding(format!("sealed message is not UTF-8: {}", e)))?;
    debug!(signer = ?public_key, message_len = message.len(), "Unsealed message");

    Ok(Sealed {
        public_key,
        message,
    })
}

fn split_public_prefix(text: &str) -> Result<(&str, &str)> {
    if !text.is_char_boundary(ENCODED_PUBLIC_KEY_LENGTH) {
        return Err(Error::Encoding("key prefix is not base64".to_string()));
    }
    Ok(text.split_at(ENCODED_PUBLIC_KEY_LENGTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::OsEntropy;

    const SEALED: &str = "BSY7/er4VJIu08o39NaRAiPY/MAvd7oQhlGCRDABjYU=yVpD8i7d3d4dls3YThEg1x1vSdmqeEweV4e4Ejl/8yPoVG7JR0YAKDPagQOgxXMrlCVLNNqvlNvj4xRDOYDLBjE3NTUxOTc4NDEzMTlwWkdtMUF2MElFQktBUmN6ejdleGtOWXNaYjhMemFNclY3SjMyYTJmRkc0PQ==";
    const OPENED: &str = "1755197841319pZGm1Av0IEBKARczz7exkNYsZb8LzaMrV7J32a2fFG4=";

    fn fresh_key() -> CombinedKey {
        CombinedKey::from(KeyPair::generate(&mut OsEntropy).unwrap())
    }

    #[test]
    fn test_known_sealed_message() {
        let sealed = unseal(SEALED).unwrap();
        assert_eq!(sealed.message(), OPENED);

        let stamped = sealed.stamped().unwrap();
        assert_eq!(stamped.stamp_ms, 1_755_197_841_319);
        assert_eq!(stamped.text, "pZGm1Av0IEBKARczz7exkNYsZb8LzaMrV7J32a2fFG4=");
    }

    #[test]
    fn test_combined_key_round_trip() {
        let key = fresh_key();
        let text = key.encode();
        assert_eq!(text.len(), COMBINED_KEY_LENGTH);

        let parsed = CombinedKey::parse(&text).unwrap();
        assert_eq!(parsed.public_key(), key.public_key());
    }

    #[test]
    fn test_combined_key_with_foreign_public_key() {
        let mine = fresh_key().encode();
        let theirs = fresh_key().encode();
        let spliced = format!(
            "{}{}",
            &theirs[..ENCODED_PUBLIC_KEY_LENGTH],
            &mine[ENCODED_PUBLIC_KEY_LENGTH..]
        );

        let err = CombinedKey::parse(&spliced).unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));
    }

    #[test]
    fn test_combined_key_wrong_length() {
        let err = CombinedKey::parse("short").unwrap_err();
        assert!(matches!(err, Error::InvalidKey(_)));
    }

    #[test]
    fn test_seal_unseal() {
        let key = fresh_key();
        let sealed = seal("hello", &key, 1_700_000_000_000);

        assert!(sealed.starts_with(&Base64Codec.encode(key.public_key().as_bytes())));

        let opened = unseal(&sealed).unwrap();
        assert_eq!(opened.message(), "1700000000000hello");
        assert_eq!(opened.public_key(), key.public_key());
        assert_eq!(
            opened.stamped(),
            Some(StampedMessage { stamp_ms: 1_700_000_000_000, text: "hello" })
        );
    }

    #[test]
    fn test_seal_now_stamps_current_time() {
        let before = Utc::now().timestamp_millis();
        let sealed = seal_now("x", &fresh_key());
        let after = Utc::now().timestamp_millis();

        let opened = unseal(&sealed).unwrap();
        let stamp = opened.stamped().unwrap().stamp_ms;
        assert!(before <= stamp && stamp <= after);
    }

    #[test]
    fn test_unseal_with_swapped_key() {
        let other = Base64Codec.encode(fresh_key().public_key().as_bytes());
        let forged = format!("{}{}", other, &SEALED[ENCODED_PUBLIC_KEY_LENGTH..]);

        assert_eq!(unseal(&forged), Err(Error::SignatureInvalid));
    }

    #[test]
    fn test_unseal_malformed_input() {
        assert!(matches!(unseal("abc"), Err(Error::MalformedEnvelope { .. })));

        let key_only = &SEALED[..ENCODED_PUBLIC_KEY_LENGTH];
        assert!(matches!(
            unseal(&format!("{}AAAA", key_only)),
            Err(Error::MalformedEnvelope { .. })
        ));

        assert!(matches!(
            unseal(&format!("{}!!!!", key_only)),
            Err(Error::Encoding(_))
        ));

        let non_ascii = "é".repeat(30);
        assert!(matches!(unseal(&non_ascii), Err(Error::Encoding(_))));
    }

    #[test]
    fn test_stamp_split_rejects_short_or_textual_prefix() {
        assert_eq!(StampedMessage::split("12345"), None);
        assert_eq!(StampedMessage::split("abcdefghijklmnop"), None);
    }
}
