//! Key schedules.
//!
//! A key schedule maps a text position to an integer shift. Shifts are raw
//! values: they may be negative or exceed the alphabet size, and are only
//! reduced modulo the alphabet size by the [`ShiftCodec`](crate::ShiftCodec).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::error::{CipherError, Result};

/// Raw shift produced by a schedule.
///
/// Wide enough that `A² + B*p + C` never overflows for realistic text
/// lengths; arithmetic wraps rather than panics at the extremes.
pub type Shift = i128;

/// Trait for anything that can drive the shift cipher engine.
///
/// Implementations must be pure: the same position and alphabet always
/// yield the same shift, otherwise decoding cannot undo encoding.
pub trait KeySchedule {
    /// Returns the shift applied to the character at `position`.
    ///
    /// `position` counts every character of the text, including those that
    /// pass through unchanged.
    fn shift_at(&self, position: usize, alphabet: &Alphabet) -> Result<Shift>;

    /// Returns an equivalent schedule that is cheaper to evaluate at every
    /// position of one text, or `None` to evaluate `self` directly.
    ///
    /// The engine calls this once per transform.
    fn prepare(&self) -> Option<Box<dyn KeySchedule + '_>> {
        None
    }
}

/// Key-schedule mode tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Fixed shift `key`.
    Constant,
    /// `A*p + B`.
    Linear,
    /// `A² + B*p + C`.
    NonLinear,
    /// Index of `passphrase[p mod len]`.
    Passphrase,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Mode; 4] = [Mode::Constant, Mode::Linear, Mode::NonLinear, Mode::Passphrase];

    /// Lowercase name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Constant => "constant",
            Mode::Linear => "linear",
            Mode::NonLinear => "non_linear",
            Mode::Passphrase => "passphrase",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "constant" => Ok(Mode::Constant),
            "linear" => Ok(Mode::Linear),
            "non_linear" | "nonlinear" => Ok(Mode::NonLinear),
            "passphrase" => Ok(Mode::Passphrase),
            other => Err(CipherError::invalid(format!("unknown mode '{}'", other))),
        }
    }
}

/// Typed key parameters, one variant per [`Mode`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyParams {
    /// Constant shift.
    Constant {
        /// Shift, expected in `[0, n)`.
        key: i64,
    },
    /// Linear schedule `a*p + b`.
    Linear {
        /// Position coefficient.
        a: i64,
        /// Offset.
        b: i64,
    },
    /// Quadratic schedule `a² + b*p + c`.
    NonLinear {
        /// Squared term.
        a: i64,
        /// Position coefficient.
        b: i64,
        /// Offset.
        c: i64,
    },
    /// Passphrase schedule.
    Passphrase {
        /// Non-empty passphrase over the active alphabet.
        passphrase: String,
    },
}

impl KeyParams {
    /// Mode tag of these parameters.
    pub fn mode(&self) -> Mode {
        match self {
            KeyParams::Constant { .. } => Mode::Constant,
            KeyParams::Linear { .. } => Mode::Linear,
            KeyParams::NonLinear { .. } => Mode::NonLinear,
            KeyParams::Passphrase { .. } => Mode::Passphrase,
        }
    }
}

impl KeySchedule for KeyParams {
    fn shift_at(&self, position: usize, alphabet: &Alphabet) -> Result<Shift> {
        let p = position as Shift;
        match self {
            KeyParams::Constant { key } => Ok(*key as Shift),
            KeyParams::Linear { a, b } => Ok((*a as Shift).wrapping_mul(p).wrapping_add(*b as Shift)),
            KeyParams::NonLinear { a, b, c } => {
                let a = *a as Shift;
                Ok(a.wrapping_mul(a)
                    .wrapping_add((*b as Shift).wrapping_mul(p))
                    .wrapping_add(*c as Shift))
            }
            KeyParams::Passphrase { passphrase } => {
                let len = passphrase.chars().count();
                let character = passphrase
                    .chars()
                    .nth(position % len.max(1))
                    .ok_or_else(empty_passphrase)?;
                passphrase_shift(character, position, alphabet)
            }
        }
    }

    fn prepare(&self) -> Option<Box<dyn KeySchedule + '_>> {
        match self {
            KeyParams::Passphrase { passphrase } => Some(Box::new(PassphraseCycle {
                chars: passphrase.chars().collect(),
            })),
            _ => None,
        }
    }
}

/// Passphrase schedule with the characters decoded once.
struct PassphraseCycle {
    chars: Vec<char>,
}

impl KeySchedule for PassphraseCycle {
    fn shift_at(&self, position: usize, alphabet: &Alphabet) -> Result<Shift> {
        let character = self
            .chars
            .get(position % self.chars.len().max(1))
            .copied()
            .ok_or_else(empty_passphrase)?;
        passphrase_shift(character, position, alphabet)
    }
}

fn empty_passphrase() -> CipherError {
    CipherError::invalid("passphrase must not be empty")
}

fn passphrase_shift(character: char, position: usize, alphabet: &Alphabet) -> Result<Shift> {
    alphabet
        .index_of(character)
        .map(|i| i as Shift)
        .ok_or(CipherError::UndefinedSchedule {
            character,
            position,
        })
}
