//! Cryptographic functions for repo-save
//!
//! Provides the AES-128-CBC container codec with PBKDF2-HMAC-SHA1 key
//! derivation used by the game's save files.

pub mod codec;
pub mod key_derivation;

pub use codec::{decode, decode_string, encode, encode_string, BLOCK_SIZE, MIN_CONTAINER_SIZE};
pub use key_derivation::{derive_key, DerivedKey, KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};

/// Password shared by every save container the game writes
///
/// This is a static shared secret embedded in the game, not a user credential.
pub const DEFAULT_PASSWORD: &str = "Why would you want to cheat?... :o It's no fun. :') :'D";
