//! Key validation.
//!
//! The outer shell collects parameters as a loose [`RawKeyParams`] bag.
//! [`validate`] checks the bag against a [`Mode`] without side effects, and
//! [`KeyParams::from_raw`] turns an approved bag into typed parameters.
//! The engine itself never re-validates.

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::{CipherError, Result};
use crate::schedule::{KeyParams, Mode};

/// Untyped key parameters as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawKeyParams {
    /// Constant shift.
    pub key: Option<i64>,
    /// First coefficient.
    pub a: Option<i64>,
    /// Second coefficient.
    pub b: Option<i64>,
    /// Third coefficient.
    pub c: Option<i64>,
    /// Passphrase.
    pub passphrase: Option<String>,
}

impl RawKeyParams {
    /// Bag with only `key` set.
    pub fn constant(key: i64) -> Self {
        RawKeyParams {
            key: Some(key),
            ..Default::default()
        }
    }

    /// Bag with only `passphrase` set.
    pub fn passphrase(passphrase: impl Into<String>) -> Self {
        RawKeyParams {
            passphrase: Some(passphrase.into()),
            ..Default::default()
        }
    }
}

/// Returns `true` if `raw` carries everything `mode` requires.
///
/// - CONSTANT: `key` present and `0 <= key < alphabet.len()`.
/// - LINEAR: `a` and `b` present.
/// - NON_LINEAR: `a`, `b` and `c` present.
/// - PASSPHRASE: non-empty `passphrase`.
///
/// # Examples
///
/// ```
/// use classicrypt::{validate, AlphabetTag, Mode, RawKeyParams};
///
/// let en = AlphabetTag::En.alphabet();
/// assert!(validate(Mode::Constant, &RawKeyParams::constant(0), en));
/// assert!(!validate(Mode::Constant, &RawKeyParams::constant(52), en));
/// ```
pub fn validate(mode: Mode, raw: &RawKeyParams, alphabet: &Alphabet) -> bool {
    check(mode, raw, alphabet).is_ok()
}

fn check(mode: Mode, raw: &RawKeyParams, alphabet: &Alphabet) -> Result<KeyParams> {
    let params = match mode {
        Mode::Constant => KeyParams::Constant {
            key: require(raw.key, "key")?,
        },
        Mode::Linear => KeyParams::Linear {
            a: require(raw.a, "A")?,
            b: require(raw.b, "B")?,
        },
        Mode::NonLinear => KeyParams::NonLinear {
            a: require(raw.a, "A")?,
            b: require(raw.b, "B")?,
            c: require(raw.c, "C")?,
        },
        Mode::Passphrase => KeyParams::Passphrase {
            passphrase: raw
                .passphrase
                .clone()
                .ok_or_else(|| CipherError::invalid("passphrase is required"))?,
        },
    };
    params.check(alphabet)?;
    Ok(params)
}

fn require(value: Option<i64>, name: &str) -> Result<i64> {
    value.ok_or_else(|| CipherError::invalid(format!("parameter {} is required", name)))
}

impl KeyParams {
    /// Builds typed parameters from a raw bag, validating it first.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidParameter`] when [`validate`] would
    /// return `false`.
    pub fn from_raw(mode: Mode, raw: &RawKeyParams, alphabet: &Alphabet) -> Result<Self> {
        check(mode, raw, alphabet)
    }

    /// Returns `true` if these typed parameters satisfy their mode's contract.
    pub fn is_valid(&self, alphabet: &Alphabet) -> bool {
        self.check(alphabet).is_ok()
    }

    fn check(&self, alphabet: &Alphabet) -> Result<()> {
        match self {
            KeyParams::Constant { key } => {
                let n = alphabet.len() as i64;
                if (0..n).contains(key) {
                    Ok(())
                } else {
                    Err(CipherError::invalid(format!(
                        "key {} must be in [0, {})",
                        key, n
                    )))
                }
            }
            // Any integer is schedule-legal; shifts are reduced modulo n.
            KeyParams::Linear { .. } | KeyParams::NonLinear { .. } => Ok(()),
            KeyParams::Passphrase { passphrase } => {
                if passphrase.is_empty() {
                    Err(CipherError::invalid("passphrase must not be empty"))
                } else {
                    Ok(())
                }
            }
        }
    }
}
