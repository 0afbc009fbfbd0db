use crate::counter::{Alphabet, CounterError, CounterResult};
use std::fmt;

/// A non-negative integer written in the base of an [`Alphabet`]
///
/// Digits are stored most significant first as weights into the alphabet.
/// Leading zero digits are stripped on construction so that `"005"` and `"5"`
/// are the same value; [`CustomNumber::render_padded`] restores the fixed
/// width used for codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomNumber<'a> {
    alphabet: &'a Alphabet,
    digits: Vec<usize>,
}

impl<'a> CustomNumber<'a> {
    /// The zero value
    pub fn zero(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            digits: vec![0],
        }
    }

    /// Parses `text` against the alphabet
    ///
    /// Fails with [`CounterError::InvalidDigit`] on the first character that
    /// is not part of the alphabet.
    pub fn from_string(alphabet: &'a Alphabet, text: &str) -> CounterResult<Self> {
        if text.is_empty() {
            return Err(CounterError::Empty);
        }

        let digits = text
            .chars()
            .enumerate()
            .map(|(position, digit)| {
                alphabet
                    .weight_of(digit)
                    .ok_or_else(|| CounterError::InvalidDigit {
                        text: text.to_string(),
                        digit,
                        position,
                    })
            })
            .collect::<CounterResult<Vec<_>>>()?;

        let mut number = Self { alphabet, digits };
        number.strip_leading_zeros();
        Ok(number)
    }

    /// Returns true if the value is zero
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|d| *d == 0)
    }

    /// Number of significant digits
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always false: even zero has one digit
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Adds one using long-addition carry
    ///
    /// When the carry runs past the most significant digit a new leading
    /// digit of one is prepended.
    pub fn increment(&mut self) {
        let base = self.alphabet.base();

        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < base {
                return;
            }
            *digit = 0;
        }

        self.digits.insert(0, 1);
    }

    /// Renders the significant digits, most significant first
    pub fn render(&self) -> String {
        self.digits
            .iter()
            .map(|d| self.alphabet.symbol_at(*d))
            .collect()
    }

    /// Renders left-padded with the zero symbol to at least `min_width` characters
    ///
    /// Values wider than `min_width` are rendered in full.
    pub fn render_padded(&self, min_width: usize) -> String {
        let padding = min_width.saturating_sub(self.digits.len());
        std::iter::repeat(self.alphabet.zero_symbol())
            .take(padding)
            .chain(self.digits.iter().map(|d| self.alphabet.symbol_at(*d)))
            .collect()
    }

    fn strip_leading_zeros(&mut self) {
        let first_significant = self
            .digits
            .iter()
            .position(|d| *d != 0)
            .unwrap_or(self.digits.len() - 1);
        self.digits.drain(..first_significant);
    }
}

impl fmt::Display for CustomNumber<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
