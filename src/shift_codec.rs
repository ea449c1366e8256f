//! ShiftCodec: character-by-character shift engine.
//!
//! Shared by the Caesar and Trithemius ciphers. Each character of the text
//! that belongs to the alphabet is moved `k` places, where `k` comes from a
//! [`KeySchedule`] evaluated at the character's position. Every other
//! character passes through unchanged but still advances the position.

use tracing::{debug, warn};

use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::schedule::{KeySchedule, Shift};

/// Direction of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encode,
    Decode,
}

/// Shift engine bound to one alphabet.
#[derive(Debug, Clone, Copy)]
pub struct ShiftCodec<'a> {
    alphabet: &'a Alphabet,
}

impl<'a> ShiftCodec<'a> {
    /// Creates an engine over `alphabet`.
    pub fn new(alphabet: &'a Alphabet) -> Self {
        ShiftCodec { alphabet }
    }

    /// The alphabet this engine works over.
    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    /// Encodes `text`, emitting `alphabet[(x + k) mod n]` for each member `x`.
    ///
    /// # Errors
    /// Propagates the first schedule error; no partial output is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use classicrypt::{AlphabetTag, KeyParams, ShiftCodec};
    ///
    /// let codec = ShiftCodec::new(AlphabetTag::En.alphabet());
    /// let key = KeyParams::Constant { key: 5 };
    /// assert_eq!(codec.encode("HELLO", &key).unwrap(), "MJQQT");
    /// ```
    pub fn encode<S: KeySchedule + ?Sized>(&self, text: &str, schedule: &S) -> Result<String> {
        self.transform(text, schedule, Direction::Encode)
    }

    /// Decodes `text`, the exact inverse of [`encode`](Self::encode) for the
    /// same schedule.
    ///
    /// # Errors
    /// Propagates the first schedule error; no partial output is returned.
    pub fn decode<S: KeySchedule + ?Sized>(&self, text: &str, schedule: &S) -> Result<String> {
        self.transform(text, schedule, Direction::Decode)
    }

    fn transform<S: KeySchedule + ?Sized>(
        &self,
        text: &str,
        schedule: &S,
        direction: Direction,
    ) -> Result<String> {
        debug!(
            alphabet = ?self.alphabet.tag(),
            size = self.alphabet.len(),
            ?direction,
            chars = text.chars().count(),
            "shift transform"
        );
        match schedule.prepare() {
            Some(prepared) => self.walk(text, prepared.as_ref(), direction),
            None => self.walk(text, schedule, direction),
        }
    }

    fn walk<S: KeySchedule + ?Sized>(
        &self,
        text: &str,
        schedule: &S,
        direction: Direction,
    ) -> Result<String> {
        let n = self.alphabet.len() as Shift;
        let mut out = String::with_capacity(text.len());
        for (position, c) in text.chars().enumerate() {
            let Some(x) = self.alphabet.index_of(c) else {
                out.push(c);
                continue;
            };
            let k = match schedule.shift_at(position, self.alphabet) {
                Ok(k) => k.rem_euclid(n),
                Err(e) => {
                    warn!(position, error = %e, "shift transform aborted");
                    return Err(e);
                }
            };
            let x = x as Shift;
            let y = match direction {
                Direction::Encode => (x + k) % n,
                Direction::Decode => (x + n - k) % n,
            };
            out.push(self.alphabet.symbol(y as usize));
        }
        Ok(out)
    }
}
