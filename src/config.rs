//! Cipher job configuration.
//!
//! A [`CipherConfig`] names a cipher and carries everything needed to run
//! it. It is what the command-line shell fills from a JSON file and flags,
//! and it is the only place that validates parameters before handing them
//! to a cipher.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::alphabet::AlphabetTag;
use crate::caesar::CaesarCipher;
use crate::error::{CipherError, Result};
use crate::schedule::Mode;
use crate::trithemius::TrithemiusCipher;
use crate::validator::RawKeyParams;
use crate::verse::{VerseCipher, VerseKeyTable, DEFAULT_SIZE};

/// Errors raised while loading or checking a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration names parameters no cipher accepts.
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// Which cipher a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherKind {
    /// Constant shift.
    #[default]
    Caesar,
    /// Polyalphabetic shift.
    Trithemius,
    /// Verse (book) cipher.
    Verse,
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CipherKind::Caesar => "caesar",
            CipherKind::Trithemius => "trithemius",
            CipherKind::Verse => "verse",
        })
    }
}

impl FromStr for CipherKind {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caesar" => Ok(CipherKind::Caesar),
            "trithemius" => Ok(CipherKind::Trithemius),
            "verse" | "book" => Ok(CipherKind::Verse),
            other => Err(CipherError::invalid(format!("unknown cipher '{}'", other))),
        }
    }
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

/// Reference text and bounds for the verse cipher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerseConfig {
    /// Reference text the key table is built from.
    pub text: String,
    /// Number of words indexed.
    #[serde(default = "default_size")]
    pub max_rows: usize,
    /// Number of characters indexed per word.
    #[serde(default = "default_size")]
    pub max_cols: usize,
}

impl VerseConfig {
    /// Verse with default bounds.
    pub fn new(text: impl Into<String>) -> Self {
        VerseConfig {
            text: text.into(),
            max_rows: DEFAULT_SIZE,
            max_cols: DEFAULT_SIZE,
        }
    }
}

/// A complete cipher job description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CipherConfig {
    /// Cipher to run.
    pub cipher: CipherKind,
    /// Alphabet for the shift ciphers.
    pub alphabet: AlphabetTag,
    /// Trithemius key schedule.
    pub mode: Option<Mode>,
    /// Key parameters for the shift ciphers.
    pub params: RawKeyParams,
    /// Verse cipher settings.
    pub verse: Option<VerseConfig>,
}

/// Either direction of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl CipherConfig {
    /// Reads a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Reads a JSON configuration file and checks that it describes a
    /// runnable job.
    ///
    /// # Errors
    /// Returns [`ConfigError::Cipher`] when the job would be rejected by
    /// [`encrypt`](Self::encrypt), besides the [`load`](Self::load) errors.
    pub fn load_checked(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.check()?;
        Ok(config)
    }

    /// Checks the job parameters without running a cipher.
    pub fn check(&self) -> Result<()> {
        self.run("", Direction::Encrypt).map(drop)
    }

    /// Validates the job and encrypts `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classicrypt::config::CipherConfig;
    ///
    /// let config: CipherConfig =
    ///     serde_json::from_str(r#"{"cipher": "caesar", "params": {"key": 5}}"#).unwrap();
    /// assert_eq!(config.encrypt("HELLO").unwrap(), "MJQQT");
    /// ```
    pub fn encrypt(&self, text: &str) -> Result<String> {
        self.run(text, Direction::Encrypt)
    }

    /// Validates the job and decrypts `text`.
    pub fn decrypt(&self, text: &str) -> Result<String> {
        self.run(text, Direction::Decrypt)
    }

    fn run(&self, text: &str, direction: Direction) -> Result<String> {
        match self.cipher {
            CipherKind::Caesar => {
                let caesar = CaesarCipher::new(self.alphabet);
                let key = self
                    .params
                    .key
                    .ok_or_else(|| CipherError::invalid("caesar cipher requires a key"))?;
                if !caesar.validate_key(key) {
                    return Err(CipherError::invalid(format!(
                        "key {} must be in [0, {})",
                        key,
                        caesar.alphabet().len()
                    )));
                }
                match direction {
                    Direction::Encrypt => caesar.cipher(text, key),
                    Direction::Decrypt => caesar.decipher(text, key),
                }
            }
            CipherKind::Trithemius => {
                let trithemius = TrithemiusCipher::new(self.alphabet);
                let mode = self
                    .mode
                    .ok_or_else(|| CipherError::invalid("trithemius cipher requires a mode"))?;
                let key = trithemius.key(mode, &self.params)?;
                match direction {
                    Direction::Encrypt => trithemius.cipher(text, &key),
                    Direction::Decrypt => trithemius.decipher(text, &key),
                }
            }
            CipherKind::Verse => {
                let verse = self
                    .verse
                    .as_ref()
                    .ok_or_else(|| CipherError::invalid("verse cipher requires a verse"))?;
                let cipher = VerseCipher::new(VerseKeyTable::build(
                    &verse.text,
                    verse.max_rows,
                    verse.max_cols,
                ));
                match direction {
                    Direction::Encrypt => Ok(cipher.encrypt(text)),
                    Direction::Decrypt => cipher.decrypt(text),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(json: &str) -> CipherConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("{}");
        assert_eq!(config.cipher, CipherKind::Caesar);
        assert_eq!(config.alphabet, AlphabetTag::En);
        assert_eq!(config.mode, None);
        assert_eq!(config.verse, None);
    }

    #[test]
    fn test_caesar_job() {
        let config = parse(r#"{"cipher": "caesar", "params": {"key": 5}}"#);
        assert_eq!(config.encrypt("HELLO, WORLD!").unwrap(), "MJQQT, bTWQI!");
        assert_eq!(config.decrypt("MJQQT, bTWQI!").unwrap(), "HELLO, WORLD!");
    }

    #[test]
    fn test_caesar_requires_valid_key() {
        assert!(matches!(
            parse(r#"{"cipher": "caesar"}"#).encrypt("x"),
            Err(CipherError::InvalidParameter(_))
        ));
        assert!(matches!(
            parse(r#"{"cipher": "caesar", "params": {"key": 52}}"#).decrypt("x"),
            Err(CipherError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_trithemius_job() {
        let config = parse(
            r#"{"cipher": "trithemius", "mode": "non_linear", "params": {"a": 2, "b": 3, "c": 4}}"#,
        );
        assert_eq!(config.encrypt("HELLO").unwrap(), "PPZci");
        assert_eq!(config.decrypt("PPZci").unwrap(), "HELLO");
    }

    #[test]
    fn test_trithemius_requires_mode() {
        let config = parse(r#"{"cipher": "trithemius", "params": {"a": 2, "b": 3}}"#);
        assert!(matches!(
            config.encrypt("HELLO"),
            Err(CipherError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_trithemius_missing_parameter() {
        let config = parse(r#"{"cipher": "trithemius", "mode": "linear", "params": {"a": 2}}"#);
        assert_eq!(
            config.encrypt("HELLO"),
            Err(CipherError::InvalidParameter(
                "parameter B is required".to_string()
            ))
        );
    }

    #[test]
    fn test_verse_job() {
        let config = parse(r#"{"cipher": "verse", "verse": {"text": "Your chosen verse here"}}"#);
        assert_eq!(config.encrypt("Y").unwrap(), "1/1");
        assert_eq!(config.decrypt("1/1").unwrap(), "Y");
    }

    #[test]
    fn test_verse_bounds() {
        let config = CipherConfig {
            cipher: CipherKind::Verse,
            verse: Some(VerseConfig {
                text: "Your chosen verse here".to_string(),
                max_rows: 1,
                max_cols: 2,
            }),
            ..Default::default()
        };
        assert_eq!(config.encrypt("You").unwrap(), "1/1, 1/2, u");
    }

    #[test]
    fn test_verse_requires_text() {
        assert!(matches!(
            parse(r#"{"cipher": "verse"}"#).encrypt("Y"),
            Err(CipherError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<CipherConfig>(r#"{"cypher": "caesar"}"#).is_err());
    }

    #[test]
    fn test_cipher_kind_parse() {
        assert_eq!("Caesar".parse::<CipherKind>().unwrap(), CipherKind::Caesar);
        assert_eq!("book".parse::<CipherKind>().unwrap(), CipherKind::Verse);
        assert!("enigma".parse::<CipherKind>().is_err());
        assert_eq!(CipherKind::Trithemius.to_string(), "trithemius");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"cipher": "trithemius", "alphabet": "en", "mode": "passphrase", "params": {{"passphrase": "test"}}}}"#
        )
        .unwrap();
        let config = CipherConfig::load(file.path()).unwrap();
        assert_eq!(config.mode, Some(Mode::Passphrase));
        assert_eq!(config.encrypt("HELLO").unwrap(), "AiDEH");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CipherConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            CipherConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_check() {
        assert!(parse(r#"{"params": {"key": 51}}"#).check().is_ok());
        assert_eq!(
            parse(r#"{"cipher": "verse"}"#).check(),
            Err(CipherError::InvalidParameter(
                "verse cipher requires a verse".to_string()
            ))
        );
    }

    #[test]
    fn test_load_checked() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cipher": "caesar", "params": {{"key": 52}}}}"#).unwrap();
        assert!(CipherConfig::load(file.path()).is_ok());
        let err = CipherConfig::load_checked(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Cipher(CipherError::InvalidParameter(_))
        ));
        assert_eq!(err.to_string(), "Invalid parameter: key 52 must be in [0, 52)");
    }

    #[test]
    fn test_cipher_error_converts() {
        let err: ConfigError = CipherError::MalformedToken("9/9".to_string()).into();
        assert_eq!(err.to_string(), "Malformed token: '9/9'");
    }
}
