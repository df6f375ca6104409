//! Ordered symbol alphabets.
//!
//! An [`Alphabet`] maps the characters a puzzle is written in to bit
//! positions of a [`SymbolSet`]. The position of a character in the
//! alphabet is its bit index, so the alphabet also fixes the order in which
//! the search enumerates candidates.
//!
//! # Examples
//!
//! ```
//! use gridsolve_core::{Alphabet, SymbolSet};
//!
//! let alphabet: Alphabet = "1234".parse()?;
//! assert_eq!(alphabet.parse_set("31"), SymbolSet::from_indices([0, 2]));
//!
//! // Characters outside the alphabet are ignored.
//! assert_eq!(alphabet.parse_set("9x"), SymbolSet::EMPTY);
//!
//! assert_eq!(alphabet.render(SymbolSet::from_indices([1, 3])), "24");
//! # Ok::<(), gridsolve_core::CoreError>(())
//! ```

use std::{fmt, str::FromStr};

use crate::{CoreError, SymbolSet};

/// Symbols available to [`Alphabet::standard`], in bit order.
const STANDARD_SYMBOLS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz@#";

/// An ordered list of at most [`SymbolSet::CAPACITY`] distinct characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Creates an alphabet from the characters of `symbols`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlphabetTooLarge`] if there are more than
    /// [`SymbolSet::CAPACITY`] characters, and [`CoreError::DuplicateSymbol`]
    /// if a character appears twice.
    pub fn new(symbols: &str) -> Result<Self, CoreError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() > SymbolSet::CAPACITY {
            return Err(CoreError::AlphabetTooLarge { len: symbols.len() });
        }
        for (i, &symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(&symbol) {
                return Err(CoreError::DuplicateSymbol { symbol });
            }
        }
        Ok(Self { symbols })
    }

    /// Returns the default alphabet for puzzles with `len` symbols.
    ///
    /// Up to nine symbols use the digits starting at `1`; larger alphabets
    /// start at `0` and continue with letters.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlphabetTooLarge`] if `len` exceeds
    /// [`SymbolSet::CAPACITY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gridsolve_core::Alphabet;
    ///
    /// assert_eq!(Alphabet::standard(9)?.to_string(), "123456789");
    /// assert_eq!(Alphabet::standard(16)?.to_string(), "0123456789ABCDEF");
    /// # Ok::<(), gridsolve_core::CoreError>(())
    /// ```
    pub fn standard(len: usize) -> Result<Self, CoreError> {
        if len > SymbolSet::CAPACITY {
            return Err(CoreError::AlphabetTooLarge { len });
        }
        let skip = usize::from(len <= 9);
        Ok(Self {
            symbols: STANDARD_SYMBOLS.chars().skip(skip).take(len).collect(),
        })
    }

    /// Returns the number of symbols.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the alphabet has no symbols.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbols in bit order.
    #[must_use]
    #[inline]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Returns the bit index of `symbol`, if it belongs to the alphabet.
    #[must_use]
    #[inline]
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&c| c == symbol)
    }

    /// Returns the symbol at bit index `index`.
    #[must_use]
    #[inline]
    pub fn symbol_at(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Returns the set of every symbol in the alphabet.
    #[must_use]
    #[inline]
    pub fn full_set(&self) -> SymbolSet {
        SymbolSet::full(self.symbols.len())
    }

    /// Returns the singleton set for `symbol`, or the empty set if the
    /// symbol is not part of the alphabet.
    #[must_use]
    pub fn symbol(&self, symbol: char) -> SymbolSet {
        self.index_of(symbol).map_or(SymbolSet::EMPTY, SymbolSet::single)
    }

    /// Returns the set of every alphabet symbol occurring in `text`.
    ///
    /// Characters outside the alphabet are silently dropped.
    #[must_use]
    pub fn parse_set(&self, text: &str) -> SymbolSet {
        text.chars()
            .fold(SymbolSet::EMPTY, |set, c| set | self.symbol(c))
    }

    /// Renders the members of `set` as symbols, in bit order.
    ///
    /// Bits beyond the end of the alphabet are skipped.
    #[must_use]
    pub fn render(&self, set: SymbolSet) -> String {
        set.iter().filter_map(|i| self.symbol_at(i)).collect()
    }
}

impl FromStr for Alphabet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
