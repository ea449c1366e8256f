//! Caesar cipher: constant-shift front-end over the [`ShiftCodec`].

use crate::alphabet::{Alphabet, AlphabetTag};
use crate::error::{CipherError, Result};
use crate::schedule::KeyParams;
use crate::shift_codec::ShiftCodec;

/// Constant-shift cipher over one alphabet.
///
/// # Examples
///
/// ```
/// use classicrypt::CaesarCipher;
///
/// let caesar = CaesarCipher::default();
/// assert_eq!(caesar.cipher("HELLO", 5).unwrap(), "MJQQT");
/// assert_eq!(caesar.decipher("MJQQT", 5).unwrap(), "HELLO");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CaesarCipher {
    codec: ShiftCodec<'static>,
}

impl Default for CaesarCipher {
    fn default() -> Self {
        Self::new(AlphabetTag::En)
    }
}

impl CaesarCipher {
    /// Creates a Caesar cipher over the built-in alphabet `tag`.
    pub fn new(tag: AlphabetTag) -> Self {
        CaesarCipher {
            codec: ShiftCodec::new(tag.alphabet()),
        }
    }

    /// The alphabet in use.
    pub fn alphabet(&self) -> &'static Alphabet {
        self.codec.alphabet()
    }

    /// Returns `true` if `0 <= key < n`.
    pub fn validate_key(&self, key: i64) -> bool {
        KeyParams::Constant { key }.is_valid(self.alphabet())
    }

    /// Encrypts `text` with `key`.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidParameter`] if `key` is out of range.
    pub fn cipher(&self, text: &str, key: i64) -> Result<String> {
        if !self.validate_key(key) {
            return Err(CipherError::invalid(format!(
                "key {} must be in [0, {})",
                key,
                self.alphabet().len()
            )));
        }
        self.codec.encode(text, &KeyParams::Constant { key })
    }

    /// Decrypts `text` with `key`.
    ///
    /// Shifting back is well defined for any integer, so the key is not
    /// range-checked here.
    pub fn decipher(&self, text: &str, key: i64) -> Result<String> {
        self.codec.decode(text, &KeyParams::Constant { key })
    }
}
