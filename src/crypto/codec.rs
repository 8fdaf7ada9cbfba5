//! AES-128-CBC save container codec
//!
//! Container layout:
//!
//! ```text
//! offset 0..16   : salt / IV
//! offset 16..end : AES-128-CBC ciphertext, PKCS#7 padded
//! ```
//!
//! The salt is used both for PBKDF2 and directly as the CBC IV. There is no
//! authentication tag, so padding validation is the only integrity check.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};

use crate::error::{SaveError, SaveResult};

use super::key_derivation::{derive_key, SALT_SIZE};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// AES block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Smallest well-formed container: salt plus one ciphertext block
pub const MIN_CONTAINER_SIZE: usize = SALT_SIZE + BLOCK_SIZE;

/// Encrypt plaintext into a container
///
/// Generates a fresh random salt on every call, so encoding the same
/// plaintext twice yields different bytes.
pub fn encode(plaintext: &[u8], password: &str) -> Vec<u8> {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    encode_with_salt(plaintext, password, &salt)
}

pub(crate) fn encode_with_salt(plaintext: &[u8], password: &str, salt: &[u8; SALT_SIZE]) -> Vec<u8> {
    let key = derive_key(password, salt);
    let ciphertext = Aes128CbcEnc::new(key.as_bytes().into(), salt.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    tracing::debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "encoded save container"
    );

    let mut container = Vec::with_capacity(SALT_SIZE + ciphertext.len());
    container.extend_from_slice(salt);
    container.extend_from_slice(&ciphertext);
    container
}

/// Decrypt a container back to its plaintext bytes
pub fn decode(container: &[u8], password: &str) -> SaveResult<Vec<u8>> {
    if container.len() < SALT_SIZE {
        return Err(SaveError::MalformedContainer(format!(
            "expected at least {} bytes, got {}",
            MIN_CONTAINER_SIZE,
            container.len()
        )));
    }

    let (salt_bytes, ciphertext) = container.split_at(SALT_SIZE);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(SaveError::MalformedContainer(format!(
            "ciphertext length {} is not a positive multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(salt_bytes);

    let key = derive_key(password, &salt);
    let plaintext = Aes128CbcDec::new(key.as_bytes().into(), (&salt).into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| SaveError::Decode("invalid padding after decryption".to_string()))?;

    tracing::debug!(
        container_len = container.len(),
        plaintext_len = plaintext.len(),
        "decoded save container"
    );

    Ok(plaintext)
}

/// Encrypt a string
pub fn encode_string(plaintext: &str, password: &str) -> Vec<u8> {
    encode(plaintext.as_bytes(), password)
}

/// Decrypt to a string
pub fn decode_string(container: &[u8], password: &str) -> SaveResult<String> {
    let plaintext = decode(container, password)?;
    String::from_utf8(plaintext)
        .map_err(|e| SaveError::Encoding(format!("Invalid UTF-8 in decrypted data: {}", e)))
}
