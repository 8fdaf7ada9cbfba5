//! Key derivation using PBKDF2-HMAC-SHA1
//!
//! The container format fixes every parameter: the 16-byte container salt,
//! 100 iterations and a 16-byte output for AES-128. None of these are
//! configurable, or existing saves become unreadable.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use zeroize::Zeroize;

/// Size of the derived AES-128 key in bytes
pub const KEY_SIZE: usize = 16;

/// Size of the salt (which is also the CBC IV) in bytes
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count used by the container format
pub const PBKDF2_ITERATIONS: u32 = 100;

/// A derived encryption key
pub struct DerivedKey {
    /// The 16-byte key for AES-128
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Derive the container key from a password and the container salt
pub fn derive_key(password: &str, salt: &[u8; SALT_SIZE]) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_sha1(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    DerivedKey { key }
}

fn pbkdf2_sha1(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    pbkdf2_hmac::<Sha1>(password, salt, rounds, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_rfc6070_vector() {
        // RFC 6070, P = "password", S = "salt", c = 2, truncated to 16 bytes
        let mut out = [0u8; 16];
        pbkdf2_sha1(b"password", b"salt", 2, &mut out);
        assert_eq!(hex(&out), "ea6c014dc72d6f8ccd1ed92ace1d41f0");
    }

    #[test]
    fn test_container_key_vector() {
        let salt: [u8; SALT_SIZE] = core::array::from_fn(|i| i as u8);
        let key = derive_key(crate::crypto::DEFAULT_PASSWORD, &salt);
        assert_eq!(hex(key.as_bytes()), "ec1e4a3705a87ac0c793c25051e38966");
    }

    #[test]
    fn test_same_password_same_key() {
        let salt = [7u8; SALT_SIZE];
        let key1 = derive_key("test_password", &salt);
        let key2 = derive_key("test_password", &salt);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let key1 = derive_key("same_password", &[1u8; SALT_SIZE]);
        let key2 = derive_key("same_password", &[2u8; SALT_SIZE]);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }
}
