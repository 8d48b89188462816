//! UI utilities for printing results

use crate::commands::Output;
use colored::Colorize;

pub fn print_output(output: &Output, json: bool) {
    if json {
        match serde_json::to_string_pretty(output) {
            Ok(text) => println!("{}", text),
            Err(e) => print_error(&format!("Failed to render JSON: {}", e)),
        }
        return;
    }

    match output {
        Output::KeyPair {
            public_key,
            private_key,
        } => {
            println!("{}", public_key);
            println!("{}", private_key);
        }
        Output::CombinedKey { key } => println!("{}", key),
        Output::Text { value } => println!("{}", value),
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "error:".bright_red().bold(), msg.red());
}
