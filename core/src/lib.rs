//! edsign Core Library
//!
//! Detached Ed25519 signatures over files, with keypairs stored as
//! base64 strings in a small JSON document.
//!
//! The signing primitive itself lives behind [`crypto::SigningBackend`];
//! everything else here is key handling, encoding and file I/O around it.

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod keyfile;
pub mod version;

pub use crypto::{Keypair, PublicKey, SecretKey, Signature};
pub use keyfile::KeypairFile;
pub use version::version_string;

use std::path::PathBuf;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Refusing to overwrite existing file: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Malformed key: {0}")]
    MalformedKey(String),

    #[error("Malformed signature: expected 64 bytes, got {0}")]
    MalformedSignature(usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid keypair file: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Map an I/O error on `path`, turning `NotFound` into [`Error::FileNotFound`].
    pub(crate) fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(err)
        }
    }
}

/// Read a whole file into memory.
///
/// A missing file is reported as [`Error::FileNotFound`] rather than a bare
/// I/O error so callers can tell the two apart.
pub fn read_file(path: &std::path::Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::from_io(e, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.html");

        match read_file(&path) {
            Err(Error::FileNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.html");
        std::fs::write(&path, b"<html></html>").unwrap();

        assert_eq!(read_file(&path).unwrap(), b"<html></html>");
    }
}
