//! Signing backends
//!
//! Call sites only ever see [`SigningBackend`]. [`Ed25519`] implements it on
//! top of `ed25519-dalek`; another audited Ed25519 library can be dropped in
//! by implementing the same three operations.

use crate::crypto::signing::{Keypair, PublicKey, SecretKey, Signature};
use crate::{Error, Result};
use ed25519_dalek::Signer;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroizing;

/// A detached-signature scheme.
pub trait SigningBackend {
    /// Generate a fresh keypair from the system's secure random source.
    fn generate_keypair(&self) -> Result<Keypair>;

    /// Derive the public key from a secret key, rejecting keys whose stored
    /// public half was not derived from the seed.
    fn derive_public_key(&self, secret_key: &SecretKey) -> Result<PublicKey>;

    /// Produce a detached signature over `message`.
    fn sign_detached(&self, message: &[u8], secret_key: &SecretKey) -> Result<Signature>;

    /// Check a detached signature. Returns [`Error::InvalidSignature`] on mismatch.
    fn verify_detached(
        &self,
        signature: &Signature,
        message: &[u8],
        public_key: &PublicKey,
    ) -> Result<()>;
}

/// Ed25519 backed by `ed25519-dalek`
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519;

impl Ed25519 {
    fn signing_key(secret_key: &SecretKey) -> Result<ed25519_dalek::SigningKey> {
        // Rejects keys whose trailing public half was not derived from the seed.
        ed25519_dalek::SigningKey::from_keypair_bytes(secret_key.as_bytes())
            .map_err(|_| Error::MalformedKey("public half does not match seed".into()))
    }
}

impl SigningBackend for Ed25519 {
    fn generate_keypair(&self) -> Result<Keypair> {
        let mut seed = Zeroizing::new([0u8; ed25519_dalek::SECRET_KEY_LENGTH]);
        OsRng
            .try_fill_bytes(&mut seed[..])
            .map_err(|e| Error::EntropyUnavailable(e.to_string()))?;

        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        let public_key = PublicKey::from_bytes(signing_key.verifying_key().as_bytes())?;
        let keypair =
            Keypair::from_parts(public_key, SecretKey::from_array(signing_key.to_keypair_bytes()));

        debug!("Generated keypair {}", keypair.public_key().fingerprint());
        Ok(keypair)
    }

    fn derive_public_key(&self, secret_key: &SecretKey) -> Result<PublicKey> {
        let signing_key = Self::signing_key(secret_key)?;
        PublicKey::from_bytes(signing_key.verifying_key().as_bytes())
    }

    fn sign_detached(&self, message: &[u8], secret_key: &SecretKey) -> Result<Signature> {
        let signing_key = Self::signing_key(secret_key)?;
        let signature = signing_key.sign(message);
        Ok(Signature(signature.to_bytes()))
    }

    fn verify_detached(
        &self,
        signature: &Signature,
        message: &[u8],
        public_key: &PublicKey,
    ) -> Result<()> {
        let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(public_key.as_bytes())
            .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);

        verifying_key
            .verify_strict(message, &sig)
            .map_err(|_| Error::InvalidSignature)
    }
}
