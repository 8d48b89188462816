//! Command handlers for the CLI

use crate::Command;
use anyhow::{Context, Result};
use serde::Serialize;
use sigil_core::bundle::{self, CombinedKey, Sealed};
use sigil_core::{Error, KeyPair, OsEntropy, Sigil};
use tracing::info;

/// What a command prints on success
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    KeyPair {
        public_key: String,
        private_key: String,
    },
    CombinedKey {
        key: String,
    },
    Text {
        value: String,
    },
}

pub fn run(command: Command) -> Result<Output> {
    let mut sigil = Sigil::new();

    match command {
        Command::Gen { combined: false } => {
            let keys = sigil.generate().context("Failed to generate keypair")?;
            info!(public_key = keys.public_key(), "Generated keypair");
            Ok(Output::KeyPair {
                public_key: keys.public_key().to_string(),
                private_key: keys.private_key().to_string(),
            })
        }
        Command::Gen { combined: true } => {
            let keypair = KeyPair::generate(&mut OsEntropy).context("Failed to generate keypair")?;
            let key = CombinedKey::from(keypair).encode();
            Ok(Output::CombinedKey {
                key: key.to_string(),
            })
        }
        Command::Hash { text } => Ok(Output::Text {
            value: sigil.hash(&text),
        }),
        Command::Sign {
            payload,
            private_key,
        } => {
            let envelope = sigil
                .sign(&payload, &private_key)
                .context("Failed to sign payload")?;
            Ok(Output::Text { value: envelope })
        }
        Command::Open {
            envelope,
            public_key,
        } => {
            let payload = sigil
                .open(&envelope, &public_key)
                .context("Failed to open envelope")?;
            Ok(Output::Text { value: payload })
        }
        Command::Seal { text, combined_key } => {
            let key = CombinedKey::parse(&combined_key).context("Failed to read combined key")?;
            Ok(Output::Text {
                value: bundle::seal_now(&text, &key),
            })
        }
        Command::Unseal {
            sealed,
            strip_stamp,
        } => {
            let opened = bundle::unseal(&sealed).context("Failed to unseal message")?;
            Ok(Output::Text {
                value: unsealed_text(opened, strip_stamp),
            })
        }
        Command::Version => Ok(Output::Text {
            value: sigil_core::version_string(),
        }),
    }
}

fn unsealed_text(opened: Sealed, strip_stamp: bool) -> String {
    if strip_stamp {
        if let Some(stamped) = opened.stamped() {
            return stamped.text.to_string();
        }
    }
    opened.into_message()
}

/// Exit status for a failed command.
///
/// Malformed input and a signature that did not verify always exit
/// differently.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(e) if e.is_malformed_input() => 2,
        Some(Error::SignatureInvalid) => 3,
        Some(Error::EntropyUnavailable(_)) => 4,
        _ => 1,
    }
}
