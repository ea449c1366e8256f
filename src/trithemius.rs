//! Trithemius cipher: polyalphabetic front-end over the [`ShiftCodec`].
//!
//! Supports the linear, quadratic and passphrase key schedules. The
//! constant schedule is the Caesar cipher and is rejected here.

use crate::alphabet::{Alphabet, AlphabetTag};
use crate::error::{CipherError, Result};
use crate::schedule::{KeyParams, Mode};
use crate::shift_codec::ShiftCodec;
use crate::validator::{self, RawKeyParams};

/// Polyalphabetic cipher over one alphabet.
///
/// # Examples
///
/// ```
/// use classicrypt::{AlphabetTag, KeyParams, TrithemiusCipher};
///
/// let cipher = TrithemiusCipher::new(AlphabetTag::En);
/// let key = KeyParams::Linear { a: 2, b: 3 };
/// let encrypted = cipher.cipher("HELLO", &key).unwrap();
/// assert_eq!(cipher.decipher(&encrypted, &key).unwrap(), "HELLO");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrithemiusCipher {
    codec: ShiftCodec<'static>,
}

impl TrithemiusCipher {
    /// Creates a Trithemius cipher over the built-in alphabet `tag`.
    pub fn new(tag: AlphabetTag) -> Self {
        TrithemiusCipher {
            codec: ShiftCodec::new(tag.alphabet()),
        }
    }

    /// The alphabet in use.
    pub fn alphabet(&self) -> &'static Alphabet {
        self.codec.alphabet()
    }

    /// Returns `true` if `mode` is a Trithemius mode and `raw` satisfies it.
    pub fn validate_key(&self, mode: Mode, raw: &RawKeyParams) -> bool {
        mode != Mode::Constant && validator::validate(mode, raw, self.alphabet())
    }

    /// Validates `raw` for `mode` and returns typed parameters.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidParameter`] for the constant mode or a
    /// bag that fails validation.
    pub fn key(&self, mode: Mode, raw: &RawKeyParams) -> Result<KeyParams> {
        if mode == Mode::Constant {
            return Err(CipherError::invalid(
                "constant mode is not a Trithemius schedule",
            ));
        }
        KeyParams::from_raw(mode, raw, self.alphabet())
    }

    /// Encrypts `text` with validated parameters.
    pub fn cipher(&self, text: &str, key: &KeyParams) -> Result<String> {
        self.codec.encode(text, key)
    }

    /// Decrypts `text` with validated parameters.
    pub fn decipher(&self, text: &str, key: &KeyParams) -> Result<String> {
        self.codec.decode(text, key)
    }
}
