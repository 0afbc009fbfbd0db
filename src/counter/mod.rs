//! Custom-base counter used to enumerate screenshot codes
//!
//! Codes are non-negative integers written in an arbitrary base whose digits
//! are the symbols of an [`Alphabet`]. A [`CustomNumber`] keeps its digits as a
//! growable sequence so values are never limited by a machine word.
//!
//! # Example
//!
//! ```
//! use scrapmon::counter::{Alphabet, CustomNumber};
//!
//! let alphabet = Alphabet::new("0123456789".chars()).unwrap();
//! let mut number = CustomNumber::from_string(&alphabet, "19").unwrap();
//! number.increment();
//! assert_eq!(number.render_padded(4), "0020");
//! ```

mod alphabet;
mod number;

pub use alphabet::{Alphabet, DEFAULT_ALPHABET};
pub use number::CustomNumber;

use thiserror::Error;

/// Errors raised while building an alphabet or parsing a code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterError {
    #[error("Alphabet must contain at least 2 symbols, got {0}")]
    AlphabetTooShort(usize),

    #[error("Alphabet contains duplicate symbol '{0}'")]
    DuplicateSymbol(char),

    #[error("Alphabet symbol '{0}' is not an ASCII letter or digit")]
    InvalidSymbol(char),

    #[error("Invalid digit '{digit}' at position {position} of '{text}'")]
    InvalidDigit {
        text: String,
        digit: char,
        position: usize,
    },

    #[error("Cannot parse a number from an empty string")]
    Empty,
}

/// Result type alias for counter operations
pub type CounterResult<T> = std::result::Result<T, CounterError>;
