//! Version information for Sigil

/// Sigil version (semver format)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Signature scheme used by every operation
pub const SCHEME: &str = "Ed25519";

/// Git commit hash (if available)
pub const GIT_HASH: Option<&str> = option_env!("GIT_HASH");

/// Build profile (debug/release)
pub const BUILD_PROFILE: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "release"
};

/// Full version string with metadata
pub fn version_string() -> String {
    let mut version = format!("Sigil v{} ({})", VERSION, SCHEME);

    if let Some(hash) = GIT_HASH {
        version.push_str(&format!(" [{}]", hash.get(..8).unwrap_or(hash)));
    }

    if BUILD_PROFILE == "debug" {
        version.push_str(" [debug]");
    }

    version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        let version_str = version_string();
        assert!(version_str.starts_with(&format!("Sigil v{}", VERSION)));
        assert!(version_str.contains("Ed25519"));
    }
}
