//! Ed25519 key material
//!
//! Private keys use the 64-byte `seed || public key` layout shared with
//! NaCl and Go's `crypto/ed25519`, so a private key always carries the
//! public key it was derived from.

use crate::entropy::EntropySource;
use crate::{Error, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Public key length in bytes
pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

/// Seed length in bytes (the secret half of a private key)
pub const SEED_LENGTH: usize = ed25519_dalek::SECRET_KEY_LENGTH;

/// Private key length in bytes (`seed || public key`)
pub const PRIVATE_KEY_LENGTH: usize = ed25519_dalek::KEYPAIR_LENGTH;

/// Ed25519 public key
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create public key from bytes.
    ///
    /// Fails with [`Error::InvalidKey`] unless `bytes` is exactly
    /// [`PUBLIC_KEY_LENGTH`] long and encodes a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            Error::InvalidKey(format!(
                "public key must be {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        let inner = VerifyingKey::from_bytes(bytes)
            .map_err(|e| Error::InvalidKey(format!("Invalid public key: {}", e)))?;
        Ok(Self { inner })
    }

    /// Get the public key bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.inner.as_bytes()
    }

    /// Verify a detached signature over `message`.
    ///
    /// Uses strict verification: non-canonical signatures and small-order
    /// keys are rejected. Every failure is [`Error::SignatureInvalid`].
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        self.inner
            .verify_strict(message, signature)
            .map_err(|_| Error::SignatureInvalid)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(&self.as_bytes()[..8]))
    }
}

/// Ed25519 private key
///
/// The wrapped signing key is wiped when dropped.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Create private key from its 64-byte `seed || public key` form.
    ///
    /// The trailing public key must be the one derived from the seed;
    /// the comparison runs in constant time.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(Error::InvalidKey(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }

        let (seed_bytes, public_bytes) = bytes.split_at(SEED_LENGTH);
        let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
        seed.copy_from_slice(seed_bytes);

        let key = Self::from_seed(&seed);
        let derived = key.inner.verifying_key().to_bytes();
        if !bool::from(derived[..].ct_eq(public_bytes)) {
            return Err(Error::InvalidKey(
                "public half does not match the seed".to_string(),
            ));
        }

        Ok(key)
    }

    /// Derive the private key from a 32-byte seed
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self {
            inner: SigningKey::from_bytes(seed),
        }
    }

    /// Get the 64-byte `seed || public key` form
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        Zeroizing::new(self.inner.to_keypair_bytes())
    }

    /// Get the public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Sign a message. Ed25519 signing is deterministic.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.inner.sign(message)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Ed25519 keypair
#[derive(Clone)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Generate a new keypair from `entropy`.
    ///
    /// Fails with [`Error::EntropyUnavailable`] if the source cannot
    /// produce a seed; there is no fallback source.
    pub fn generate<E: EntropySource + ?Sized>(entropy: &mut E) -> Result<Self> {
        let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
        entropy.fill(&mut seed[..])?;
        Ok(Self::from_private(PrivateKey::from_seed(&seed)))
    }

    pub fn from_private(private: PrivateKey) -> Self {
        Self {
            public: private.public_key(),
            private,
        }
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub fn private(&self) -> &PrivateKey {
        &self.private
    }

    /// Split into `(public, private)`
    pub fn into_parts(self) -> (PublicKey, PrivateKey) {
        (self.public, self.private)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .field("private", &self.private)
            .finish()
    }
}
