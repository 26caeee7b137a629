//! Secret handling for the mood journal
//!
//! Provides pluggable secret hashing (Argon2id by default) and a
//! self-wiping string type for secrets read from the terminal.

pub mod hasher;
pub mod secure_memory;

pub use hasher::{verify_stored, Argon2Hasher, ChecksumHasher, HasherKind, SecretHasher};
pub use secure_memory::SecretString;
