//! Cryptographic primitives module
//!
//! This module provides:
//! - Ed25519 key generation and key material handling
//! - Signed envelopes (`signature || payload`) and opening them
//! - Content hashing (SHA-256)

pub mod envelope;
pub mod hash;
pub mod signing;

pub use envelope::{open, open_bytes, sign, sign_bytes, SignedEnvelope, SIGNATURE_LENGTH};
pub use signing::{KeyPair, PrivateKey, PublicKey, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SEED_LENGTH};
