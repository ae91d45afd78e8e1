use aes_siv::{KeyInit, siv::Aes128Siv};
use thiserror::Error;

const KEY_LEN: usize = 32;

// Fixed associated data. Together with the missing nonce this makes the
// scheme deterministic: the same PAN always produces the same ciphertext,
// which is what lets uniqueness be enforced by comparing ciphertexts.
const ASSOCIATED_DATA: &[u8] = b"bankcards.pan";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Encryption key is empty or unusable")]
    InvalidKey,

    #[error("Failed to encrypt card number")]
    Encrypt,

    #[error("Malformed ciphertext")]
    Decrypt,
}

/// Reversible, deterministic encryption of card numbers (AES-SIV).
///
/// Deterministic by design: no nonce is involved, so equal plaintexts give
/// equal ciphertexts. Do not swap in a randomized scheme without moving the
/// uniqueness check to a separate keyed hash.
#[derive(Clone)]
pub struct CardCipher {
    key: [u8; KEY_LEN],
}

impl CardCipher {
    /// Derives the cipher key from the configured secret by copying its
    /// UTF-8 bytes into a zero-padded 32-byte key, truncating if longer.
    pub fn new(secret: &str) -> Result<Self, CodecError> {
        if secret.is_empty() {
            return Err(CodecError::InvalidKey);
        }

        let mut key = [0u8; KEY_LEN];
        let bytes = secret.as_bytes();
        let n = bytes.len().min(KEY_LEN);
        key[..n].copy_from_slice(&bytes[..n]);

        Ok(Self { key })
    }

    pub fn encrypt(&self, card_number: &str) -> Result<String, CodecError> {
        let mut cipher = Aes128Siv::new_from_slice(&self.key).map_err(|_| CodecError::InvalidKey)?;
        let ciphertext = cipher
            .encrypt([ASSOCIATED_DATA], card_number.as_bytes())
            .map_err(|_| CodecError::Encrypt)?;
        Ok(hex::encode(ciphertext))
    }

    pub fn decrypt(&self, encrypted: &str) -> Result<String, CodecError> {
        let ciphertext = hex::decode(encrypted).map_err(|_| CodecError::Decrypt)?;
        let mut cipher = Aes128Siv::new_from_slice(&self.key).map_err(|_| CodecError::InvalidKey)?;
        let plaintext = cipher
            .decrypt([ASSOCIATED_DATA], ciphertext.as_slice())
            .map_err(|_| CodecError::Decrypt)?;
        String::from_utf8(plaintext).map_err(|_| CodecError::Decrypt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::mask_card_number;

    fn cipher() -> CardCipher {
        CardCipher::new("MySecretKey12345").unwrap()
    }

    #[test]
    fn round_trip_recovers_pan() {
        let c = cipher();
        let pan = "1234567890123456";
        let encrypted = c.encrypt(pan).unwrap();
        assert_ne!(encrypted, pan);
        assert_eq!(c.decrypt(&encrypted).unwrap(), pan);
    }

    #[test]
    fn encryption_is_deterministic() {
        let c = cipher();
        assert_eq!(
            c.encrypt("1234567890123456").unwrap(),
            c.encrypt("1234567890123456").unwrap()
        );
    }

    #[test]
    fn distinct_pans_give_distinct_ciphertexts() {
        let c = cipher();
        assert_ne!(
            c.encrypt("1234567890123456").unwrap(),
            c.encrypt("1234567890123457").unwrap()
        );
    }

    #[test]
    fn malformed_ciphertext_is_rejected() {
        let c = cipher();
        assert!(matches!(c.decrypt("not-hex"), Err(CodecError::Decrypt)));
        assert!(matches!(c.decrypt("deadbeef"), Err(CodecError::Decrypt)));
    }

    #[test]
    fn different_key_cannot_decrypt() {
        let encrypted = cipher().encrypt("1234567890123456").unwrap();
        let other = CardCipher::new("AnotherSecretKey").unwrap();
        assert!(matches!(other.decrypt(&encrypted), Err(CodecError::Decrypt)));
    }

    #[test]
    fn empty_key_is_rejected() {
        assert!(matches!(CardCipher::new(""), Err(CodecError::InvalidKey)));
    }

    #[test]
    fn decrypt_then_mask_hides_all_but_last_four() {
        let c = cipher();
        let encrypted = c.encrypt("1234567890123456").unwrap();
        let masked = mask_card_number(&c.decrypt(&encrypted).unwrap());
        assert_eq!(masked, "**** **** **** 3456");
    }
}
