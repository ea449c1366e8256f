//! Classical substitution ciphers over fixed alphabets.
//!
//! classicrypt implements three pre-modern ciphers: a constant-shift
//! (Caesar) cipher, a polyalphabetic (Trithemius) cipher with linear,
//! quadratic and passphrase key schedules, and a positional verse (book)
//! cipher that encodes characters as coordinates into a table built from a
//! reference text.
//!
//! These ciphers are pedagogical. They give correct, reversible transforms
//! and no confidentiality whatsoever.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (ordered characters, O(1) index lookup both ways)
//!     ↓
//! KeySchedule  (position → raw shift: constant, linear, quadratic, passphrase)
//!     ↓ validated by validator::validate
//! ShiftCodec   (per-character shift, non-members pass through)
//!     ↓
//! CaesarCipher / TrithemiusCipher
//!
//! VerseKeyTable (word/char index of a verse) → VerseCipher ("row/col" tokens)
//! ```
//!
//! # Examples
//!
//! Caesar cipher over the Latin alphabet:
//!
//! ```
//! use classicrypt::CaesarCipher;
//!
//! let caesar = CaesarCipher::default();
//! let encrypted = caesar.cipher("HELLO, WORLD!", 5).unwrap();
//! assert_eq!(encrypted, "MJQQT, bTWQI!");
//! assert_eq!(caesar.decipher(&encrypted, 5).unwrap(), "HELLO, WORLD!");
//! ```
//!
//! Trithemius cipher with a caller-supplied parameter bag:
//!
//! ```
//! use classicrypt::{AlphabetTag, Mode, RawKeyParams, TrithemiusCipher};
//!
//! let cipher = TrithemiusCipher::new(AlphabetTag::En);
//! let key = cipher.key(Mode::Passphrase, &RawKeyParams::passphrase("test")).unwrap();
//! let encrypted = cipher.cipher("HELLO", &key).unwrap();
//! assert_eq!(cipher.decipher(&encrypted, &key).unwrap(), "HELLO");
//! ```
//!
//! Verse cipher:
//!
//! ```
//! use classicrypt::verse::{VerseCipher, VerseKeyTable};
//!
//! let cipher = VerseCipher::new(VerseKeyTable::new("Your chosen verse here"));
//! assert_eq!(cipher.encrypt("Y"), "1/1");
//! assert_eq!(cipher.decrypt("1/1").unwrap(), "Y");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod schedule;
pub mod validator;
pub mod verse;

mod caesar;
mod shift_codec;
mod trithemius;

pub use alphabet::{Alphabet, AlphabetTag};
pub use caesar::CaesarCipher;
pub use error::{CipherError, Result};
pub use schedule::{KeyParams, KeySchedule, Mode, Shift};
pub use shift_codec::ShiftCodec;
pub use trithemius::TrithemiusCipher;
pub use validator::{validate, RawKeyParams};
