//! Verse (book) cipher.
//!
//! A [`VerseKeyTable`] indexes the first words of a reference text by
//! `(row, col)`, and a [`VerseCipher`] encodes each message character as the
//! coordinates of its earliest occurrence in that table.
//!
//! # Token format
//!
//! Ciphertext is a list of tokens joined by [`TOKEN_SEPARATOR`]. A token is
//! either `row/col` (1-indexed) or a single literal character that was not
//! found in the table. A literal `/`, or a `", "` sequence in the message,
//! cannot be told apart from the framing; messages containing them do not
//! round-trip.

pub(crate) mod cipher;
pub(crate) mod key_table;

pub use cipher::{VerseCipher, TOKEN_SEPARATOR};
pub use key_table::{Position, VerseKeyTable, DEFAULT_SIZE};
