//! Signed envelopes: `signature || payload`

use super::signing::{PrivateKey, PublicKey};
use crate::{Error, Result};
use ed25519_dalek::Signature;
use tracing::{debug, trace};

/// Signature tag length in bytes
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// A payload with its signature tag prepended.
///
/// The payload can always be read back with [`SignedEnvelope::message`];
/// whether it is authentic is only known after [`open`].
#[derive(Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    bytes: Vec<u8>,
}

impl SignedEnvelope {
    /// Wrap raw envelope bytes. Only the minimum length is checked here.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < SIGNATURE_LENGTH {
            return Err(Error::MalformedEnvelope {
                len: bytes.len(),
                min: SIGNATURE_LENGTH,
            });
        }
        Ok(Self { bytes })
    }

    pub fn tag(&self) -> &[u8] {
        &self.bytes[..SIGNATURE_LENGTH]
    }

    pub fn message(&self) -> &[u8] {
        &self.bytes[SIGNATURE_LENGTH..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    fn signature(&self) -> Result<Signature> {
        Signature::from_slice(self.tag()).map_err(|_| Error::MalformedEnvelope {
            len: self.bytes.len(),
            min: SIGNATURE_LENGTH,
        })
    }
}

impl std::fmt::Debug for SignedEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SignedEnvelope({} byte payload)", self.message().len())
    }
}

/// Sign `payload`, returning `tag || payload`
pub fn sign(payload: &[u8], private_key: &PrivateKey) -> SignedEnvelope {
    debug!(payload_len = payload.len(), "Signing payload");

    let tag = private_key.sign(payload).to_bytes();
    let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH + payload.len());
    bytes.extend_from_slice(&tag);
    bytes.extend_from_slice(payload);

    SignedEnvelope { bytes }
}

/// Verify `envelope` against `public_key` and return its payload.
///
/// Nothing of the payload is returned unless the whole envelope verifies.
pub fn open(envelope: &SignedEnvelope, public_key: &PublicKey) -> Result<Vec<u8>> {
    let signature = envelope.signature()?;
    if let Err(e) = public_key.verify(envelope.message(), &signature) {
        debug!(envelope_len = envelope.as_bytes().len(), "Envelope failed verification");
        return Err(e);
    }

    trace!(payload_len = envelope.message().len(), "Envelope verified");
    Ok(envelope.message().to_vec())
}

/// Sign with a raw 64-byte private key.
///
/// Any other key length, or a key whose halves disagree, is
/// [`Error::InvalidKey`].
pub fn sign_bytes(payload: &[u8], private_key: &[u8]) -> Result<Vec<u8>> {
    let private_key = PrivateKey::from_bytes(private_key)?;
    Ok(sign(payload, &private_key).into_bytes())
}

/// Open raw envelope bytes with a raw 32-byte public key.
///
/// The key is checked before the envelope, so a bad key is always
/// [`Error::InvalidKey`] and a short envelope [`Error::MalformedEnvelope`].
pub fn open_bytes(envelope: &[u8], public_key: &[u8]) -> Result<Vec<u8>> {
    let public_key = PublicKey::from_bytes(public_key)?;
    let envelope = SignedEnvelope::from_bytes(envelope.to_vec())?;
    open(&envelope, &public_key)
}
