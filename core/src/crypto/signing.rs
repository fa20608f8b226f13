//! Ed25519 keypairs and detached signatures

use crate::crypto::backend::{Ed25519, SigningBackend};
use crate::crypto::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::{encoding, Error, Result};
use std::fmt;
use zeroize::Zeroize;

/// Ed25519 keypair
pub struct Keypair {
    public: PublicKey,
    secret: SecretKey,
}

impl Keypair {
    /// Generate a new random keypair
    pub fn generate() -> Result<Self> {
        Ed25519.generate_keypair()
    }

    /// Build a keypair from a secret key, deriving the public key from its
    /// seed. Fails if the trailing public half does not match the seed.
    pub fn from_secret_key(secret: SecretKey) -> Result<Self> {
        let public = Ed25519.derive_public_key(&secret)?;
        Ok(Self { public, secret })
    }

    /// Caller guarantees `public` was derived from `secret`.
    pub(crate) fn from_parts(public: PublicKey, secret: SecretKey) -> Self {
        Self { public, secret }
    }

    /// Pair an existing public and secret key, checking they belong together.
    pub fn new(public: PublicKey, secret: SecretKey) -> Result<Self> {
        if Ed25519.derive_public_key(&secret)? != public {
            return Err(Error::MalformedKey(
                "public key does not match secret key".into(),
            ));
        }
        Ok(Self { public, secret })
    }

    /// Get the public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Get the secret key
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// Sign a message
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        sign(message, &self.secret)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public", &self.public)
            .field("secret", &self.secret)
            .finish()
    }
}

/// Produce a detached signature over `message`.
///
/// Signing is deterministic: the same message and key always give the same
/// signature. `message` may be empty.
pub fn sign(message: &[u8], secret_key: &SecretKey) -> Result<Signature> {
    Ed25519.sign_detached(message, secret_key)
}

/// Verify a detached signature against a public key.
pub fn verify(signature: &Signature, message: &[u8], public_key: &PublicKey) -> Result<()> {
    Ed25519.verify_detached(signature, message, public_key)
}

/// Ed25519 public key
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Create public key from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            Error::MalformedKey(format!(
                "expected {} byte public key, got {}",
                PUBLIC_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Decode from standard base64
    pub fn from_base64(text: &str) -> Result<Self> {
        Self::from_bytes(&encoding::decode(text)?)
    }

    /// Get the public key bytes
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Encode as standard base64
    pub fn to_base64(&self) -> String {
        encoding::encode(&self.0)
    }

    /// Short hex prefix, safe to log
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.0[..8])
    }

    /// Verify a signature
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        verify(signature, message, self)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", self.fingerprint())
    }
}

/// Ed25519 secret key in `seed || public key` form.
///
/// Never printed; wiped on drop.
pub struct SecretKey([u8; SECRET_KEY_LENGTH]);

impl SecretKey {
    /// Create from bytes. Anything other than exactly 64 bytes is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(Error::MalformedKey(format!(
                "expected {} byte secret key, got {}",
                SECRET_KEY_LENGTH,
                bytes.len()
            )));
        }
        let mut array = [0u8; SECRET_KEY_LENGTH];
        array.copy_from_slice(bytes);
        Ok(Self(array))
    }

    pub(crate) fn from_array(bytes: [u8; SECRET_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Decode from standard base64
    pub fn from_base64(text: &str) -> Result<Self> {
        let mut bytes = encoding::decode(text)?;
        let result = Self::from_bytes(&bytes);
        bytes.zeroize();
        result
    }

    /// Get the secret key bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Encode as standard base64
    pub fn to_base64(&self) -> String {
        encoding::encode(&self.0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Detached signature bytes (Ed25519)
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Create from bytes. Anything other than exactly 64 bytes is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| Error::MalformedSignature(bytes.len()))?;
        Ok(Self(array))
    }

    /// Decode from standard base64
    pub fn from_base64(text: &str) -> Result<Self> {
        Self::from_bytes(&encoding::decode(text)?)
    }

    /// Encode as standard base64
    pub fn to_base64(&self) -> String {
        encoding::encode(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", hex::encode(&self.0[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let keypair = Keypair::generate().unwrap();

        assert_eq!(keypair.public_key().as_bytes().len(), 32);
        assert_eq!(keypair.secret_key().as_bytes().len(), 64);
    }

    #[test]
    fn test_sign_verify() {
        let keypair = Keypair::generate().unwrap();
        let message = b"hello";

        let signature = keypair.sign(message).unwrap();

        assert!(keypair.public_key().verify(message, &signature).is_ok());
        assert!(matches!(
            keypair.public_key().verify(b"hallo", &signature),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn test_sign_empty_message() {
        let keypair = Keypair::generate().unwrap();
        let signature = sign(b"", keypair.secret_key()).unwrap();

        assert!(verify(&signature, b"", keypair.public_key()).is_ok());
    }

    #[test]
    fn test_sign_is_deterministic() {
        let keypair = Keypair::generate().unwrap();
        let message = b"same content twice";

        let sig1 = keypair.sign(message).unwrap();
        let sig2 = keypair.sign(message).unwrap();

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_invalid_signature() {
        let keypair1 = Keypair::generate().unwrap();
        let keypair2 = Keypair::generate().unwrap();
        let message = b"Test message";

        let signature = keypair1.sign(message).unwrap();

        assert!(keypair2.public_key().verify(message, &signature).is_err());
    }

    #[test]
    fn test_secret_key_one_byte_short() {
        let keypair = Keypair::generate().unwrap();
        let short = &keypair.secret_key().as_bytes()[..63];

        assert!(matches!(
            SecretKey::from_bytes(short),
            Err(Error::MalformedKey(_))
        ));
    }

    #[test]
    fn test_malformed_public_key_and_signature() {
        assert!(matches!(
            PublicKey::from_bytes(&[0u8; 31]),
            Err(Error::MalformedKey(_))
        ));
        assert!(matches!(
            Signature::from_bytes(&[0u8; 65]),
            Err(Error::MalformedSignature(65))
        ));
    }

    #[test]
    fn test_keypair_new_checks_pairing() {
        let keypair1 = Keypair::generate().unwrap();
        let keypair2 = Keypair::generate().unwrap();
        let secret = SecretKey::from_bytes(keypair1.secret_key().as_bytes()).unwrap();

        assert!(Keypair::new(*keypair1.public_key(), secret).is_ok());

        let secret = SecretKey::from_bytes(keypair1.secret_key().as_bytes()).unwrap();
        assert!(matches!(
            Keypair::new(*keypair2.public_key(), secret),
            Err(Error::MalformedKey(_))
        ));
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let keypair = Keypair::generate().unwrap();
        let rendered = format!("{:?}", keypair);

        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(&keypair.secret_key().to_base64()));
        assert!(!rendered.contains(&hex::encode(&keypair.secret_key().as_bytes()[..8])));
    }

    #[test]
    fn test_base64_accessors() {
        let keypair = Keypair::generate().unwrap();
        let signature = keypair.sign(b"hello").unwrap();

        let public = PublicKey::from_base64(&keypair.public_key().to_base64()).unwrap();
        let secret = SecretKey::from_base64(&keypair.secret_key().to_base64()).unwrap();
        let sig = Signature::from_base64(&signature.to_base64()).unwrap();

        assert_eq!(&public, keypair.public_key());
        assert_eq!(secret.as_bytes(), keypair.secret_key().as_bytes());
        assert_eq!(sig, signature);
    }

    #[test]
    fn test_from_secret_key_derives_public_key() {
        let keypair = Keypair::generate().unwrap();
        let secret = SecretKey::from_bytes(keypair.secret_key().as_bytes()).unwrap();

        let rebuilt = Keypair::from_secret_key(secret).unwrap();
        assert_eq!(rebuilt.public_key(), keypair.public_key());
    }

    #[test]
    fn test_from_secret_key_rejects_foreign_public_half() {
        let a = Keypair::generate().unwrap();
        let b = Keypair::generate().unwrap();

        // Seed of `a` followed by the public key of `b`
        let mut bytes = [0u8; SECRET_KEY_LENGTH];
        bytes[..32].copy_from_slice(&a.secret_key().as_bytes()[..32]);
        bytes[32..].copy_from_slice(b.public_key().as_bytes());
        let spliced = SecretKey::from_bytes(&bytes).unwrap();

        assert!(matches!(
            Keypair::from_secret_key(spliced),
            Err(Error::MalformedKey(_))
        ));

        let spliced = SecretKey::from_bytes(&bytes).unwrap();
        assert!(matches!(
            Keypair::new(*b.public_key(), spliced),
            Err(Error::MalformedKey(_))
        ));
    }
}
