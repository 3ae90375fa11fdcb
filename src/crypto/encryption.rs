//! AES-256-CBC envelope encryption/decryption
//!
//! Each call draws a fresh salt and IV, derives its own key, and discards it
//! afterwards. The ciphertext field carries the PKCS#7-padded CBC output
//! followed by an HMAC-SHA256 tag over salt ‖ IV ‖ ciphertext, so tampering
//! with any field is caught before the cipher runs.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::digest::{generic_array::GenericArray, FixedOutput, InvalidLength};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::config::MasterMaterial;
use crate::error::{SealError, SealResult};

use super::envelope::{self, Envelope};
use super::key_derivation::{derive_key, DerivedKey, SALT_LEN};
use super::secure_memory::SecretString;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Size of the CBC initialization vector in bytes (one AES block)
pub const IV_LEN: usize = 16;

/// AES block size in bytes
pub const BLOCK_LEN: usize = 16;

/// Size of the authentication tag appended to the ciphertext
pub const TAG_LEN: usize = 32;

/// Domain label for deriving the MAC key from the derived key
pub const MAC_LABEL: &[u8] = b"sealed-keys/mac/v1";

/// Encrypt a secret into an envelope
///
/// Never deterministic: two calls with the same input produce different
/// envelopes.
pub fn encrypt(plaintext: &str, master: &MasterMaterial) -> SealResult<Envelope> {
    if plaintext.is_empty() {
        return Err(SealError::EmptyInput);
    }

    let mut salt = Zeroizing::new([0u8; SALT_LEN]);
    let mut iv = Zeroizing::new([0u8; IV_LEN]);
    OsRng.fill_bytes(&mut salt[..]);
    OsRng.fill_bytes(&mut iv[..]);

    let key = derive_key(master, &salt[..])?;

    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv[..])
        .map_err(|e| SealError::encryption("Failed to create cipher", e))?;
    let mut sealed = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let tag = authenticator(&key, &salt[..], &iv[..], &sealed)
        .map_err(|e| SealError::encryption("Failed to create authenticator", e))?
        .finalize()
        .into_bytes();
    sealed.extend_from_slice(&tag);

    Ok(Envelope::from_parts(&salt[..], &iv[..], &sealed))
}

/// Decrypt an envelope back into the secret
///
/// Any failure after the envelope has been parsed (wrong master material,
/// corrupted salt, IV or ciphertext, bad padding, invalid UTF-8) is reported
/// as [`SealError::Decryption`] and nothing else.
pub fn decrypt(envelope: &str, master: &MasterMaterial) -> SealResult<SecretString> {
    let parts = envelope::parse(envelope)?;
    parts.check_lengths()?;

    let key = derive_key(master, &parts.salt)?;

    let Some(split) = parts.ciphertext.len().checked_sub(TAG_LEN) else {
        return Err(SealError::Decryption);
    };
    let (sealed, tag) = parts.ciphertext.split_at(split);
    if sealed.is_empty() || sealed.len() % BLOCK_LEN != 0 {
        return Err(SealError::Decryption);
    }

    authenticator(&key, &parts.salt, &parts.iv, sealed)
        .map_err(|_| SealError::Decryption)?
        .verify_slice(tag)
        .map_err(|_| SealError::Decryption)?;

    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), &parts.iv)
        .map_err(|_| SealError::Decryption)?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(sealed)
        .map_err(|_| SealError::Decryption)?;

    SecretString::from_utf8(plaintext).ok_or(SealError::Decryption)
}

/// Decrypt a parsed envelope
pub fn decrypt_envelope(envelope: &Envelope, master: &MasterMaterial) -> SealResult<SecretString> {
    decrypt(envelope.as_str(), master)
}

fn authenticator(
    key: &DerivedKey,
    salt: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<HmacSha256, InvalidLength> {
    let mut mac_key = Zeroizing::new([0u8; TAG_LEN]);
    let mut kdf = HmacSha256::new_from_slice(key.as_bytes())?;
    kdf.update(MAC_LABEL);
    FixedOutput::finalize_into(kdf, GenericArray::from_mut_slice(&mut mac_key[..]));

    let mut mac = HmacSha256::new_from_slice(&mac_key[..])?;
    mac.update(salt);
    mac.update(iv);
    mac.update(ciphertext);
    Ok(mac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master() -> MasterMaterial {
        MasterMaterial::new("pepper1", "secret2", "envsalt3").unwrap()
    }

    /// Replace the hex digit at `index` with a different hex digit
    fn flip_hex(s: &str, index: usize) -> String {
        let mut chars: Vec<char> = s.chars().collect();
        chars[index] = if chars[index] == '0' { '1' } else { '0' };
        chars.into_iter().collect()
    }

    #[test]
    fn test_encrypt_decrypt() {
        let envelope = encrypt("ghp_exampletoken123", &master()).unwrap();
        let decrypted = decrypt(envelope.as_str(), &master()).unwrap();
        assert_eq!(decrypted.expose(), "ghp_exampletoken123");
    }

    #[test]
    fn test_wrong_env_salt_fails() {
        let envelope = encrypt("ghp_exampletoken123", &master()).unwrap();
        let wrong = MasterMaterial::new("pepper1", "secret2", "WRONGSALT").unwrap();
        let err = decrypt(envelope.as_str(), &wrong).unwrap_err();
        assert!(err.is_decryption());
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = encrypt("service_abc", &master()).unwrap();
        let fields: Vec<&str> = envelope.as_str().split(':').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].len(), SALT_LEN * 2);
        assert_eq!(fields[1].len(), IV_LEN * 2);
        // one padded block plus the tag
        assert_eq!(fields[2].len(), (BLOCK_LEN + TAG_LEN) * 2);
        assert!(envelope
            .as_str()
            .chars()
            .all(|c| c == ':' || c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_block_aligned_plaintext_gets_full_padding_block() {
        let plaintext = "0123456789abcdef";
        let envelope = encrypt(plaintext, &master()).unwrap();
        assert_eq!(envelope.ciphertext_len(), 2 * BLOCK_LEN + TAG_LEN);
        assert_eq!(decrypt(envelope.as_str(), &master()).unwrap().expose(), plaintext);
    }

    #[test]
    fn test_different_salts_and_ivs() {
        let envelope1 = encrypt("same", &master()).unwrap();
        let envelope2 = encrypt("same", &master()).unwrap();
        assert_ne!(envelope1, envelope2);

        let p1 = envelope1.parts().unwrap();
        let p2 = envelope2.parts().unwrap();
        assert_ne!(p1.salt, p2.salt);
        assert_ne!(p1.iv, p2.iv);
    }

    #[test]
    fn test_empty_plaintext_rejected() {
        let err = encrypt("", &master()).unwrap_err();
        assert!(matches!(err, SealError::EmptyInput));
    }

    #[test]
    fn test_unicode_plaintext() {
        let plaintext = "clé secrète 🔑";
        let envelope = encrypt(plaintext, &master()).unwrap();
        assert_eq!(decrypt(envelope.as_str(), &master()).unwrap().expose(), plaintext);
    }

    #[test]
    fn test_large_plaintext() {
        let plaintext = "x".repeat(10_000);
        let envelope = encrypt(&plaintext, &master()).unwrap();
        assert_eq!(decrypt(envelope.as_str(), &master()).unwrap().expose(), plaintext);
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let envelope = encrypt("ghp_exampletoken123", &master()).unwrap();
        let s = envelope.as_str();
        let ciphertext_start = s.rfind(':').unwrap() + 1;

        for index in ciphertext_start..s.len() {
            let tampered = flip_hex(s, index);
            let err = decrypt(&tampered, &master()).unwrap_err();
            assert!(err.is_decryption(), "index {index}: {err}");
        }
    }

    #[test]
    fn test_tampered_iv_and_salt_fail() {
        let envelope = encrypt("ghp_exampletoken123", &master()).unwrap();
        let s = envelope.as_str();

        // first character of the salt, first character of the IV
        for index in [0, SALT_LEN * 2 + 1] {
            let err = decrypt(&flip_hex(s, index), &master()).unwrap_err();
            assert!(err.is_decryption());
        }
    }

    #[test]
    fn test_truncated_ciphertext_fails() {
        let envelope = encrypt("ghp_exampletoken123", &master()).unwrap();
        let s = envelope.as_str();

        let err = decrypt(&s[..s.len() - 2], &master()).unwrap_err();
        assert!(err.is_decryption());

        let short = format!("{}:{}", &s[..s.rfind(':').unwrap()], "00".repeat(TAG_LEN));
        assert!(decrypt(&short, &master()).unwrap_err().is_decryption());
    }

    #[test]
    fn test_malformed_envelopes() {
        for input in ["not-a-valid-envelope", "a:b", "00:11:22:33"] {
            let err = decrypt(input, &master()).unwrap_err();
            assert!(matches!(err, SealError::MalformedEnvelope(_)), "{input}");
        }
    }

    #[test]
    fn test_wrong_iv_length_is_malformed() {
        let envelope = encrypt("value", &master()).unwrap();
        let parts = envelope.parts().unwrap();
        let reshaped = envelope::format(&parts.salt, &parts.iv[..8], &parts.ciphertext);
        assert!(matches!(
            decrypt(&reshaped, &master()).unwrap_err(),
            SealError::MalformedEnvelope(_)
        ));
    }

    #[test]
    fn test_short_salt_is_malformed() {
        let envelope = encrypt("value", &master()).unwrap();
        let parts = envelope.parts().unwrap();
        let reshaped = envelope::format(&parts.salt[..4], &parts.iv, &parts.ciphertext);
        assert!(matches!(
            decrypt(&reshaped, &master()).unwrap_err(),
            SealError::MalformedEnvelope(_)
        ));
    }

    #[test]
    fn test_uppercase_envelope_still_decrypts() {
        let envelope = encrypt("value", &master()).unwrap();
        let upper = envelope.as_str().to_uppercase();
        assert_eq!(decrypt(&upper, &master()).unwrap().expose(), "value");
    }

    #[test]
    fn test_decrypt_envelope() {
        let envelope = encrypt("template_xyz", &master()).unwrap();
        assert_eq!(
            decrypt_envelope(&envelope, &master()).unwrap().expose(),
            "template_xyz"
        );
    }

    #[test]
    fn test_tag_uses_label_derived_mac_key() {
        let envelope = encrypt("public_ghi", &master()).unwrap();
        let parts = envelope.parts().unwrap();
        let key = derive_key(&master(), &parts.salt).unwrap();
        let (sealed, tag) = parts.ciphertext.split_at(parts.ciphertext.len() - TAG_LEN);

        let mut kdf = HmacSha256::new_from_slice(key.as_bytes()).unwrap();
        kdf.update(MAC_LABEL);
        let mac_key = kdf.finalize().into_bytes();
        let mut mac = HmacSha256::new_from_slice(&mac_key).unwrap();
        mac.update(&parts.salt);
        mac.update(&parts.iv);
        mac.update(sealed);
        assert_eq!(mac.finalize().into_bytes().as_slice(), tag);

        let computed = authenticator(&key, &parts.salt, &parts.iv, sealed)
            .unwrap()
            .finalize()
            .into_bytes();
        assert_eq!(computed.as_slice(), tag);
    }
}
