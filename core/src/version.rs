//! Version information for edsign

/// edsign version (semver format)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Signature scheme produced by this build
pub const SCHEME: &str = "ed25519";

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
    let mut version = format!("edsign v{} ({})", VERSION, SCHEME);

    if let Some(hash) = GIT_HASH {
        version.push_str(&format!(" [{}]", short_hash(hash)));
    }

    if BUILD_PROFILE == "debug" {
        version.push_str(" [debug]");
    }

    version
}

/// First 8 characters of a commit hash
fn short_hash(hash: &str) -> String {
    hash.chars().take(8).collect()
}
