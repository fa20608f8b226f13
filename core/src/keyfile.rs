//! Keypair file format
//!
//! A keypair is stored as a JSON object with two standard base64 strings:
//!
//! ```json
//! {
//!   "publicKey": "...",
//!   "secretKey": "..."
//! }
//! ```
//!
//! The secret key is stored unencrypted. This is a convenience for local,
//! trusted use only and should not be mistaken for key management.

use crate::crypto::{Keypair, PublicKey, SecretKey};
use crate::{read_file, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};
use zeroize::Zeroize;

/// On-disk representation of a keypair
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypairFile {
    /// Ed25519 public key (32 bytes, base64)
    pub public_key: String,
    /// Ed25519 secret key (64 bytes, base64)
    pub secret_key: String,
}

/// Only the secret half, so signing never depends on `publicKey` being present
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SecretKeyField {
    secret_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicKeyField {
    public_key: String,
}

impl KeypairFile {
    pub fn from_keypair(keypair: &Keypair) -> Self {
        Self {
            public_key: keypair.public_key().to_base64(),
            secret_key: keypair.secret_key().to_base64(),
        }
    }

    /// Decode both keys and check that they belong together.
    pub fn to_keypair(&self) -> Result<Keypair> {
        let public = PublicKey::from_base64(&self.public_key)?;
        let secret = SecretKey::from_base64(&self.secret_key)?;
        Keypair::new(public, secret)
    }

    /// Pretty-printed JSON with 2-space indentation
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the file, creating parent directories as needed.
    ///
    /// Fails with [`Error::AlreadyExists`] if `path` exists and `overwrite`
    /// is false. On Unix the file ends up with mode 0600, including when an
    /// existing file is overwritten.
    pub fn save(&self, path: &Path, overwrite: bool) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                Error::AlreadyExists {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        // `mode` only applies on creation; tighten a pre-existing file before
        // any key material lands in it.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        let mut json = self.to_json_pretty()?;
        json.push('\n');
        let written = file.write_all(json.as_bytes());
        json.zeroize();
        written?;

        info!("Saved keypair to {}", path.display());
        Ok(())
    }

    /// Load and parse a keypair file without decoding the keys.
    pub fn load(path: &Path) -> Result<Self> {
        let data = read_file(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl Drop for KeypairFile {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

/// Load the secret key from a keypair file. `publicKey` is ignored.
pub fn load_secret_key(path: &Path) -> Result<SecretKey> {
    let mut data = read_file(path)?;
    let parsed = serde_json::from_slice::<SecretKeyField>(&data);
    data.zeroize();
    let mut field = parsed?;

    let secret = SecretKey::from_base64(&field.secret_key);
    field.secret_key.zeroize();

    debug!("Loaded secret key from {}", path.display());
    secret
}

/// Load the public key from a keypair file. `secretKey` is ignored.
pub fn load_public_key(path: &Path) -> Result<PublicKey> {
    let data = read_file(path)?;
    let field: PublicKeyField = serde_json::from_slice(&data)?;
    PublicKey::from_base64(&field.public_key)
}

/// Load both keys from a keypair file and check they are paired.
pub fn load_keypair(path: &Path) -> Result<Keypair> {
    let keypair = KeypairFile::load(path)?.to_keypair()?;
    debug!(
        "Loaded keypair {} from {}",
        keypair.public_key().fingerprint(),
        path.display()
    );
    Ok(keypair)
}
