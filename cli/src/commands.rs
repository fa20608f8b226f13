//! Command implementations
//!
//! Each command writes its result to `out` only after every fallible step
//! has succeeded, so a failed run leaves stdout empty.

use anyhow::{Context, Result};
use edsign_core::config::Paths;
use edsign_core::crypto::{self, Keypair, PublicKey, Signature};
use edsign_core::{keyfile, read_file, KeypairFile};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::ui;

/// Where `verify` takes its public key from
#[derive(Debug, Clone)]
pub enum KeySource {
    /// A keypair file; only `publicKey` is read
    File(PathBuf),
    /// A base64 public key given on the command line
    Inline(String),
}

/// Generate a keypair and print it as pretty JSON.
///
/// With `save_to`, the same JSON is written to that file first.
pub fn generate(out: &mut impl Write, save_to: Option<&Path>, force: bool) -> Result<()> {
    let keypair = Keypair::generate().context("Failed to generate keypair")?;
    let file = KeypairFile::from_keypair(&keypair);
    let json = file.to_json_pretty()?;

    if let Some(path) = save_to {
        file.save(path, force)
            .with_context(|| format!("Failed to write keypair file: {}", path.display()))?;
        ui::print_success(&format!("Saved to: {}", path.display()));
        ui::print_warning("The secret key is stored unencrypted; keep this file private");
    }

    info!("Generated keypair {}", keypair.public_key().fingerprint());
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Sign the payload file with the secret key from the keypair file and print
/// the base64 signature.
pub fn sign(out: &mut impl Write, paths: &Paths) -> Result<()> {
    let payload = read_file(&paths.payload_file)
        .with_context(|| format!("Failed to read payload: {}", paths.payload_file.display()))?;
    let secret_key = keyfile::load_secret_key(&paths.key_file)
        .with_context(|| format!("Failed to load secret key: {}", paths.key_file.display()))?;

    let signature = crypto::sign(&payload, &secret_key).context("Failed to sign payload")?;

    info!(
        "Signed {} ({} bytes)",
        paths.payload_file.display(),
        payload.len()
    );
    writeln!(out, "{}", signature.to_base64())?;
    Ok(())
}

/// Verify a base64 signature over the payload file and print `OK`.
pub fn verify(
    out: &mut impl Write,
    source: &KeySource,
    signature: &str,
    payload_file: &Path,
) -> Result<()> {
    let public_key = match source {
        KeySource::File(path) => keyfile::load_public_key(path)
            .with_context(|| format!("Failed to load public key: {}", path.display()))?,
        KeySource::Inline(encoded) => {
            PublicKey::from_base64(encoded).context("Failed to decode public key")?
        }
    };
    let signature = Signature::from_base64(signature).context("Failed to decode signature")?;
    let payload = read_file(payload_file)
        .with_context(|| format!("Failed to read payload: {}", payload_file.display()))?;

    crypto::verify(&signature, &payload, &public_key).with_context(|| {
        format!(
            "Signature does not match {} for key {}",
            payload_file.display(),
            public_key.fingerprint()
        )
    })?;

    writeln!(out, "OK")?;
    Ok(())
}
