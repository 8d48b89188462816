//! Sigil CLI - sign and open messages with Ed25519
//!
//! Usage:
//!   sigil gen
//!   sigil sign <payload-b64> <private-key-b64>
//!   sigil open <envelope-b64> <public-key-b64>
//!   sigil seal <text> <combined-key>
//!   sigil unseal <sealed>

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;
mod ui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log core operations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Generate a keypair
    Gen {
        /// Print a single combined key (public then private)
        #[arg(long)]
        combined: bool,
    },

    /// Base64 SHA-256 of a text
    Hash { text: String },

    /// Sign a base64 payload with a base64 private key
    Sign {
        payload: String,
        private_key: String,
    },

    /// Verify an envelope and print its base64 payload
    Open {
        envelope: String,
        public_key: String,
    },

    /// Sign a timestamped text with a combined key, embedding the public key
    Seal { text: String, combined_key: String },

    /// Verify a sealed message against its embedded key
    Unseal {
        sealed: String,

        /// Drop the leading millisecond timestamp from the output
        #[arg(long)]
        strip_stamp: bool,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let default_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    match commands::run(args.command) {
        Ok(output) => {
            ui::print_output(&output, args.json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            ui::print_error(&format!("{:#}", err));
            ExitCode::from(commands::exit_code(&err))
        }
    }
}
