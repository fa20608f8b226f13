//! Cryptographic primitives module
//!
//! This module provides:
//! - Ed25519 key generation
//! - Detached signing and verification
//! - The [`SigningBackend`] seam the concrete Ed25519 library sits behind

pub mod backend;
pub mod signing;

pub use backend::{Ed25519, SigningBackend};
pub use signing::{sign, verify, Keypair, PublicKey, SecretKey, Signature};

/// Public key length in bytes
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Secret key length in bytes (`seed || public key`)
pub const SECRET_KEY_LENGTH: usize = 64;

/// Detached signature length in bytes
pub const SIGNATURE_LENGTH: usize = 64;
