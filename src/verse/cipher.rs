//! VerseCipher: coordinate encoding against a [`VerseKeyTable`].

use std::sync::Arc;

use tracing::{debug, warn};

use super::key_table::{Position, VerseKeyTable};
use crate::error::{CipherError, Result};

/// Separator placed between ciphertext tokens.
pub const TOKEN_SEPARATOR: &str = ", ";

/// Verse cipher bound to one key table.
///
/// The table is read-only after construction, so a cipher can be cloned
/// and shared across threads freely.
///
/// # Examples
///
/// ```
/// use classicrypt::verse::{VerseCipher, VerseKeyTable};
///
/// let cipher = VerseCipher::new(VerseKeyTable::new("Your chosen verse here"));
/// let encrypted = cipher.encrypt("You here");
/// assert_eq!(encrypted, "1/1, 1/2, 1/3,  , 2/2, 2/5, 1/4, 2/5");
/// assert_eq!(cipher.decrypt(&encrypted).unwrap(), "You here");
/// ```
#[derive(Debug, Clone)]
pub struct VerseCipher {
    table: Arc<VerseKeyTable>,
}

impl VerseCipher {
    /// Creates a cipher over `table`; accepts an owned table or an `Arc`.
    pub fn new(table: impl Into<Arc<VerseKeyTable>>) -> Self {
        VerseCipher {
            table: table.into(),
        }
    }

    /// The key table in use.
    pub fn table(&self) -> &VerseKeyTable {
        &self.table
    }

    /// Encrypts `message`.
    ///
    /// Each character becomes the `row/col` of its earliest occurrence in the
    /// table; characters absent from the table are emitted literally.
    pub fn encrypt(&self, message: &str) -> String {
        debug!(chars = message.chars().count(), "verse encrypt");
        let tokens: Vec<String> = message
            .chars()
            .map(|ch| match self.table.first_position(ch) {
                Some(pos) => pos.to_string(),
                None => ch.to_string(),
            })
            .collect();
        tokens.join(TOKEN_SEPARATOR)
    }

    /// Decrypts `cipher_text`.
    ///
    /// # Errors
    /// Returns [`CipherError::MalformedToken`] for a coordinate token that
    /// does not parse or names an empty cell. No partial output is returned.
    pub fn decrypt(&self, cipher_text: &str) -> Result<String> {
        debug!(bytes = cipher_text.len(), "verse decrypt");
        let mut out = String::with_capacity(cipher_text.len() / 3);
        for token in cipher_text.split(TOKEN_SEPARATOR) {
            if !token.contains('/') {
                out.push_str(token);
                continue;
            }
            let resolved = token
                .parse::<Position>()
                .ok()
                .and_then(|pos| self.table.char_at(pos.row, pos.col));
            match resolved {
                Some(ch) => out.push(ch),
                None => {
                    warn!(token, "verse decrypt aborted");
                    return Err(CipherError::MalformedToken(token.to_string()));
                }
            }
        }
        Ok(out)
    }
}
