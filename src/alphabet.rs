use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::Show;

/// A symbol of an alphabet, which is also the type of the symbols in a word.
pub trait Symbol: PartialEq + Eq + Debug + Copy + Ord + PartialOrd + Hash + Show {}
impl<S: PartialEq + Eq + Debug + Copy + Ord + PartialOrd + Hash + Show> Symbol for S {}

/// An alphabet is a finite, totally ordered collection of [`Symbol`]s. Every symbol has a
/// stable position in the alphabet, which is what the incremental builder uses to index the
/// successor vectors of its states.
pub trait Alphabet: Clone + Debug {
    /// The type of symbols in this alphabet.
    type Symbol: Symbol;

    /// Type for an iterator over all symbols in the alphabet, in the order of their indices.
    type Universe<'this>: Iterator<Item = Self::Symbol>
    where
        Self: 'this;

    /// Returns an iterator over all symbols in the alphabet, ordered by their index.
    fn universe(&self) -> Self::Universe<'_>;

    /// Returns the number of symbols in the alphabet.
    fn size(&self) -> usize;

    /// Returns the position of `symbol` in the alphabet, or `None` if it is not part of it.
    fn index_of(&self, symbol: Self::Symbol) -> Option<usize>;

    /// Returns the symbol at position `index`, if it exists.
    fn symbol_at(&self, index: usize) -> Option<Self::Symbol>;

    /// Returns true if the given symbol is present in the alphabet.
    fn contains(&self, symbol: Self::Symbol) -> bool {
        self.index_of(symbol).is_some()
    }

    /// Returns true if the alphabet has no symbols.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<A: Alphabet> Alphabet for &A {
    type Symbol = A::Symbol;
    type Universe<'this> = A::Universe<'this> where Self: 'this;

    fn universe(&self) -> Self::Universe<'_> {
        A::universe(self)
    }
    fn size(&self) -> usize {
        A::size(self)
    }
    fn index_of(&self, symbol: Self::Symbol) -> Option<usize> {
        A::index_of(self, symbol)
    }
    fn symbol_at(&self, index: usize) -> Option<Self::Symbol> {
        A::symbol_at(self, index)
    }
}

/// Represents an alphabet where a [`Symbol`] is just a single `char`. The index of a symbol
/// is its position in the underlying vector.
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct CharAlphabet(Vec<char>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] alphabet from an iterator over the symbols. The order
    /// in which the symbols are given determines their index, duplicates are dropped.
    pub fn new<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self(symbols.into_iter().unique().collect())
    }

    /// Creates a new [`CharAlphabet`] alphabet of the given size. The symbols are just the first `size` letters
    /// of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Helper macro for creating a [`CharAlphabet`] alphabet. Is called simply with a list of symbols
/// that are separated by commata.
///
/// # Examples
/// ```
/// use automata_incremental::prelude::*;
/// let alphabet = alphabet!(simple 'a', 'b', 'c');
/// assert_eq!(alphabet.size(), 3);
/// ```
#[macro_export]
macro_rules! alphabet {
    (simple $($c:literal),*) => {
        $crate::prelude::CharAlphabet::new(vec![$($c),*])
    };
}

impl From<Vec<char>> for CharAlphabet {
    fn from(value: Vec<char>) -> Self {
        Self::new(value)
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().unique().sorted().collect())
    }
}

impl Alphabet for CharAlphabet {
    type Symbol = char;

    type Universe<'this> = std::iter::Cloned<std::slice::Iter<'this, char>>
        where
            Self: 'this;

    fn universe(&self) -> Self::Universe<'_> {
        self.0.iter().cloned()
    }

    fn size(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    fn index_of(&self, symbol: Self::Symbol) -> Option<usize> {
        self.0.iter().position(|c| *c == symbol)
    }

    fn symbol_at(&self, index: usize) -> Option<Self::Symbol> {
        self.0.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{Alphabet, CharAlphabet};

    #[test]
    fn char_alphabet_indices() {
        let alphabet = alphabet!(simple 'c', 'a', 'b', 'a');
        assert_eq!(alphabet.size(), 3);
        assert_eq!(alphabet.index_of('c'), Some(0));
        assert_eq!(alphabet.index_of('b'), Some(2));
        assert_eq!(alphabet.index_of('x'), None);
        assert_eq!(alphabet.symbol_at(1), Some('a'));
        assert_eq!(alphabet.symbol_at(3), None);
        assert!(!alphabet.contains('d'));
        assert_eq!(alphabet[0], 'c');

        let sorted = CharAlphabet::from_iter("cabba".chars());
        assert_eq!(sorted.universe().collect::<String>(), "abc");
        assert_eq!(CharAlphabet::of_size(2), alphabet!(simple 'a', 'b'));
    }
}
