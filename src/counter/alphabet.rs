use crate::counter::{CounterError, CounterResult};
use std::collections::HashMap;

/// Digits, lowercase then uppercase letters: the 62 symbols screenshot codes use
pub const DEFAULT_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Ordered set of unique symbols defining a number base
///
/// A symbol's position is its numeric weight, so the first symbol is zero and
/// the last one is `base - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    weights: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet, rejecting duplicates and bases below 2
    ///
    /// Codes double as file names and URL path segments, so only ASCII
    /// letters and digits are accepted as symbols.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> CounterResult<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.len() < 2 {
            return Err(CounterError::AlphabetTooShort(symbols.len()));
        }

        let mut weights = HashMap::with_capacity(symbols.len());
        for (weight, symbol) in symbols.iter().enumerate() {
            if !symbol.is_ascii_alphanumeric() {
                return Err(CounterError::InvalidSymbol(*symbol));
            }
            if weights.insert(*symbol, weight).is_some() {
                return Err(CounterError::DuplicateSymbol(*symbol));
            }
        }

        Ok(Self { symbols, weights })
    }

    /// Parses an alphabet from a string, one symbol per character
    pub fn parse(text: &str) -> CounterResult<Self> {
        Self::new(text.chars())
    }

    /// Number of symbols, i.e. the base
    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    /// The symbol with weight zero
    pub fn zero_symbol(&self) -> char {
        self.symbols[0]
    }

    /// The symbol with the highest weight
    pub fn max_symbol(&self) -> char {
        self.symbols[self.symbols.len() - 1]
    }

    /// Weight of a symbol, if it belongs to the alphabet
    pub fn weight_of(&self, symbol: char) -> Option<usize> {
        self.weights.get(&symbol).copied()
    }

    /// Symbol for a weight; `weight` must be below the base
    pub fn symbol_at(&self, weight: usize) -> char {
        self.symbols[weight]
    }

    /// The largest code of the given width: the highest symbol repeated
    pub fn max_code(&self, width: usize) -> String {
        std::iter::repeat(self.max_symbol()).take(width).collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = DEFAULT_ALPHABET.chars().collect();
        let weights = symbols.iter().enumerate().map(|(w, s)| (*s, w)).collect();
        Self { symbols, weights }
    }
}
