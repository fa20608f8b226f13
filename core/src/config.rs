//! File locations used by the generate and sign operations

use std::path::PathBuf;

/// Keypair file read by `sign` and optionally written by `generate`
pub const DEFAULT_KEY_FILE: &str = "keys.json";

/// Payload signed when no file is given
pub const DEFAULT_PAYLOAD_FILE: &str = "example.html";

/// Paths, relative to the working directory unless absolute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub key_file: PathBuf,
    pub payload_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            payload_file: PathBuf::from(DEFAULT_PAYLOAD_FILE),
        }
    }
}

impl Paths {
    /// Replace whichever paths were given, keeping defaults for the rest.
    pub fn with_overrides(mut self, key_file: Option<PathBuf>, payload_file: Option<PathBuf>) -> Self {
        if let Some(key_file) = key_file {
            self.key_file = key_file;
        }
        if let Some(payload_file) = payload_file {
            self.payload_file = payload_file;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let paths = Paths::default();
        assert_eq!(paths.key_file, PathBuf::from("keys.json"));
        assert_eq!(paths.payload_file, PathBuf::from("example.html"));
    }

    #[test]
    fn test_overrides() {
        let paths = Paths::default().with_overrides(Some("alice.json".into()), None);
        assert_eq!(paths.key_file, PathBuf::from("alice.json"));
        assert_eq!(paths.payload_file, PathBuf::from(DEFAULT_PAYLOAD_FILE));
    }
}
