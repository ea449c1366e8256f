//! Alphabet registry.
//!
//! An [`Alphabet`] is an ordered set of unique characters; the position of a
//! character is its canonical index. The built-in alphabets selected by
//! [`AlphabetTag`] are process-wide immutable data, initialized once on first
//! use and never torn down.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CipherError, Result};

/// Latin letters, uppercase then lowercase.
const EN_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Ukrainian letters, uppercase then lowercase.
const UK_CHARS: &str = "АБВГҐДЕЄЖЗИЙКЛМНОПРСТУФХЦЧШЩЬЮЯабвгґдеєжзийклмнопрстуфхцчшщьюя";

/// Selector for a built-in alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetTag {
    /// Latin alphabet (52 characters).
    #[default]
    En,
    /// Ukrainian alphabet (62 characters).
    Uk,
}

impl AlphabetTag {
    /// Every built-in alphabet, in registry order.
    pub const ALL: [AlphabetTag; 2] = [AlphabetTag::En, AlphabetTag::Uk];

    /// Short lowercase name used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            AlphabetTag::En => "en",
            AlphabetTag::Uk => "uk",
        }
    }

    /// Returns the shared alphabet for this tag, building it on first use.
    pub fn alphabet(self) -> &'static Alphabet {
        static EN: OnceLock<Alphabet> = OnceLock::new();
        static UK: OnceLock<Alphabet> = OnceLock::new();
        match self {
            AlphabetTag::En => EN.get_or_init(|| Alphabet::builtin(self, EN_CHARS)),
            AlphabetTag::Uk => UK.get_or_init(|| Alphabet::builtin(self, UK_CHARS)),
        }
    }
}

impl fmt::Display for AlphabetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlphabetTag {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(AlphabetTag::En),
            "uk" => Ok(AlphabetTag::Uk),
            other => Err(CipherError::invalid(format!("unknown alphabet '{}'", other))),
        }
    }
}

/// Ordered set of unique characters with O(1) lookup in both directions.
#[derive(Debug, Clone)]
pub struct Alphabet {
    tag: Option<AlphabetTag>,
    chars: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// Creates a custom alphabet from the characters of `chars`, in order.
    ///
    /// # Errors
    /// Returns [`CipherError::InvalidParameter`] if `chars` is empty or
    /// contains the same character twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use classicrypt::Alphabet;
    ///
    /// let digits = Alphabet::new("0123456789").unwrap();
    /// assert_eq!(digits.index_of('7'), Some(7));
    /// assert!(Alphabet::new("aba").is_err());
    /// ```
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(CipherError::invalid("alphabet must not be empty"));
        }
        let mut index = HashMap::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if index.insert(c, i).is_some() {
                return Err(CipherError::invalid(format!(
                    "alphabet contains '{}' more than once",
                    c
                )));
            }
        }
        Ok(Alphabet {
            tag: None,
            chars,
            index,
        })
    }

    fn builtin(tag: AlphabetTag, chars: &str) -> Self {
        let chars: Vec<char> = chars.chars().collect();
        let index = chars.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet {
            tag: Some(tag),
            chars,
            index,
        }
    }

    /// Tag of a built-in alphabet, `None` for custom ones.
    pub fn tag(&self) -> Option<AlphabetTag> {
        self.tag
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`: construction rejects empty alphabets.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Index of `c`, or `None` if `c` is not a member.
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.index.get(&c).copied()
    }

    /// Character at `index`, or `None` if out of range.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Character at `index`, for indices already reduced modulo `len()`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub(crate) fn symbol(&self, index: usize) -> char {
        self.chars[index]
    }

    /// Returns `true` if `c` is a member.
    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    /// Iterates over the characters in index order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
