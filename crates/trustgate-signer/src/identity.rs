use crate::canonical::SignableFields;
use crate::error::{SignerError, SignerResult};
use crate::hex::{hex_decode, hex_encode};
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use rand::RngCore;
use std::path::Path;
use zeroize::Zeroizing;

/// Length of the hex fingerprint prefix used as a key identifier.
const KEY_ID_BYTES: usize = 8;

/// A long-lived Ed25519 keypair with an explicit lifecycle.
///
/// The private key never leaves this struct; the public key and a BLAKE3
/// fingerprint (`key_id`) are exported so any holder of a signed envelope can
/// verify it, and so several key generations can coexist and be looked up by
/// id. Signing is read-only and safe from multiple threads without locking.
pub struct SigningIdentity {
    signing_key: SigningKey,
    key_id: String,
}

impl SigningIdentity {
    /// Generate a fresh keypair from the OS entropy source.
    ///
    /// The key lives only in memory; restarting the process loses it. Use
    /// [`SigningIdentity::load_or_generate`] when previously issued
    /// signatures must stay verifiable across restarts.
    pub fn generate() -> Self {
        let mut secret = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(&mut *secret);
        Self::from_secret_bytes(&secret)
    }

    /// Build an identity from raw secret bytes.
    pub fn from_secret_bytes(secret: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(secret);
        let key_id = fingerprint(signing_key.verifying_key().as_bytes());
        Self {
            signing_key,
            key_id,
        }
    }

    /// Load the persisted secret from `path`, or generate a keypair and
    /// persist it on first run.
    ///
    /// The secret is stored hex-encoded with owner-only permissions. Loading
    /// the same file always yields the same keypair and `key_id`, so
    /// envelopes signed before a restart remain verifiable after it.
    pub fn load_or_generate(path: &Path) -> SignerResult<Self> {
        if path.exists() {
            let contents = Zeroizing::new(std::fs::read_to_string(path)?);
            let decoded = Zeroizing::new(hex_decode(contents.trim()).map_err(|()| {
                SignerError::KeyMaterial(format!("key file {} is not valid hex", path.display()))
            })?);
            let secret: &[u8; 32] = decoded.as_slice().try_into().map_err(|_| {
                SignerError::KeyMaterial(format!(
                    "key file {} holds {} bytes, expected 32",
                    path.display(),
                    decoded.len()
                ))
            })?;
            return Ok(Self::from_secret_bytes(secret));
        }

        let identity = Self::generate();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let encoded = Zeroizing::new(hex_encode(&identity.signing_key.to_bytes()));
        std::fs::write(path, encoded.as_bytes())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(identity)
    }

    /// Fingerprint of the current key generation.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Hex-encoded public key for out-of-band distribution to verifiers.
    pub fn public_key_hex(&self) -> String {
        hex_encode(self.signing_key.verifying_key().as_bytes())
    }

    /// Sign the canonical bytes of the given fields.
    ///
    /// Ed25519 is deterministic: signing identical fields with the same key
    /// yields a byte-identical hex signature.
    pub fn sign(&self, fields: &SignableFields<'_>) -> SignerResult<String> {
        let message = fields.canonical_bytes()?;
        let signature = self.signing_key.sign(&message);
        Ok(hex_encode(&signature.to_bytes()))
    }
}

impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("key_id", &self.key_id)
            .finish()
    }
}

fn fingerprint(public_key: &[u8]) -> String {
    let hash = blake3::hash(public_key);
    hex_encode(&hash.as_bytes()[..KEY_ID_BYTES])
}
