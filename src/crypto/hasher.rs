//! Secret hashing strategies
//!
//! Credentials are compared through a [`SecretHasher`]. Production stores use
//! Argon2id; the checksum transform reproduces what early data files were
//! written with and is not a security primitive.
//!
//! Stored values are checked by their own format, not by the configured
//! hasher, so a store can hold a mix of Argon2 hashes, checksums and
//! plaintext secrets left by older versions. See [`verify_stored`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::error::{JournalError, JournalResult};

/// Prefix of every Argon2 PHC string
const ARGON2_PREFIX: &str = "$argon2";

/// Transforms secrets before storage and checks candidates against them
pub trait SecretHasher: Send + Sync {
    /// Produce the stored form of a secret
    fn hash(&self, secret: &str) -> JournalResult<String>;

    /// Check a candidate secret against a stored form
    ///
    /// The default compares the deterministic transform for exact equality.
    fn verify(&self, secret: &str, stored: &str) -> JournalResult<bool> {
        Ok(self.hash(secret)? == stored)
    }

    /// Whether a stored value should be replaced after a successful login
    fn needs_rehash(&self, secret: &str, stored: &str) -> bool {
        self.hash(secret).map(|hash| hash != stored).unwrap_or(false)
    }
}

/// Check a secret against a stored value of any supported format
///
/// `$argon2` strings are verified with Argon2. Anything else is a legacy
/// value: either the checksum of the secret or the secret itself.
pub fn verify_stored(secret: &str, stored: &str) -> JournalResult<bool> {
    if stored.starts_with(ARGON2_PREFIX) {
        return Argon2Hasher.verify(secret, stored);
    }

    let checksum_matches = ChecksumHasher
        .hash(secret)
        .map(|hash| hash == stored)
        .unwrap_or(false);
    Ok(checksum_matches || secret == stored)
}

/// Argon2id with the crate's default parameters, stored in PHC format
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl SecretHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> JournalResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| JournalError::Hash(format!("Failed to hash secret: {}", e)))
    }

    /// A stored value that is not a valid PHC string never matches
    fn verify(&self, secret: &str, stored: &str) -> JournalResult<bool> {
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "stored secret is not a valid Argon2 hash");
                return Ok(false);
            }
        };

        Ok(Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok())
    }

    fn needs_rehash(&self, _secret: &str, stored: &str) -> bool {
        !stored.starts_with(ARGON2_PREFIX)
    }
}

/// Legacy 32-bit checksum over UTF-16 code units
///
/// Even positions add, odd positions multiply, and the total is finally
/// multiplied by the first unit. All arithmetic wraps.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChecksumHasher;

impl SecretHasher for ChecksumHasher {
    fn hash(&self, secret: &str) -> JournalResult<String> {
        let units: Vec<u16> = secret.encode_utf16().collect();
        let first = *units
            .first()
            .ok_or_else(|| JournalError::Hash("Cannot checksum an empty secret".into()))?;

        let mut acc: i32 = 0;
        for (i, unit) in units.iter().enumerate() {
            let unit = *unit as i32;
            if i % 2 == 0 {
                acc = acc.wrapping_add(unit);
            } else {
                acc = acc.wrapping_mul(unit);
            }
        }
        acc = acc.wrapping_mul(first as i32);

        Ok(acc.to_string())
    }
}

/// Selects a hasher from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    #[default]
    Argon2,
    Checksum,
}

impl HasherKind {
    /// Build the configured hasher
    pub fn build(self) -> Box<dyn SecretHasher> {
        match self {
            HasherKind::Argon2 => Box::new(Argon2Hasher),
            HasherKind::Checksum => Box::new(ChecksumHasher),
        }
    }
}

impl FromStr for HasherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "argon2" => Ok(Self::Argon2),
            "checksum" => Ok(Self::Checksum),
            other => Err(format!("unknown secret hasher '{}'", other)),
        }
    }
}
