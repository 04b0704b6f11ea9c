use itertools::Itertools;

use crate::{alphabet::Symbol, Show};

/// A finite sequence of symbols. This is the input type of every operation of the
/// incremental builder, and it is implemented for string slices (where the symbols are
/// `char`s), for slices, arrays and vectors of symbols and for references to all of these.
///
/// # Example
/// ```
/// use automata_incremental::prelude::*;
/// assert_eq!("abc".len(), 3);
/// assert_eq!(['a', 'b'].as_string(), "ab");
/// assert_eq!("".as_string(), "ε");
/// ```
pub trait FiniteWord {
    /// The type of the symbols making up the word.
    type Symbol: Symbol;

    /// Type for an iterator over the symbols making up the word.
    type Symbols<'this>: Iterator<Item = Self::Symbol>
    where
        Self: 'this;

    /// Returns an iterator over the symbols of the word.
    fn symbols(&self) -> Self::Symbols<'_>;

    /// Gives the length of the word, i.e. the number of symbols.
    fn len(&self) -> usize {
        self.symbols().count()
    }

    /// Returns `true` if the word is empty, i.e. has no symbols.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects the symbols making up `self` into a vector.
    fn collect_vec(&self) -> Vec<Self::Symbol> {
        self.symbols().collect()
    }

    /// Converts the word to a string, the empty word is displayed as `ε`.
    fn as_string(&self) -> String {
        let out = self.symbols().map(|a| a.show()).join("");
        if out.is_empty() {
            "ε".into()
        } else {
            out
        }
    }
}

impl FiniteWord for str {
    type Symbol = char;
    type Symbols<'this> = std::str::Chars<'this>;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.chars()
    }

    fn len(&self) -> usize {
        self.chars().count()
    }
}

impl FiniteWord for String {
    type Symbol = char;
    type Symbols<'this> = std::str::Chars<'this>;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.chars()
    }
}

impl<S: Symbol> FiniteWord for [S] {
    type Symbol = S;
    type Symbols<'this> = std::iter::Copied<std::slice::Iter<'this, S>>
    where
        Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().copied()
    }

    fn len(&self) -> usize {
        <[S]>::len(self)
    }
}

impl<S: Symbol> FiniteWord for Vec<S> {
    type Symbol = S;
    type Symbols<'this> = std::iter::Copied<std::slice::Iter<'this, S>>
    where
        Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().copied()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<S: Symbol, const N: usize> FiniteWord for [S; N] {
    type Symbol = S;
    type Symbols<'this> = std::iter::Copied<std::slice::Iter<'this, S>>
    where
        Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        self.iter().copied()
    }

    fn len(&self) -> usize {
        N
    }
}

impl<W: FiniteWord + ?Sized> FiniteWord for &W {
    type Symbol = W::Symbol;
    type Symbols<'this> = W::Symbols<'this> where Self: 'this;

    fn symbols(&self) -> Self::Symbols<'_> {
        (**self).symbols()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

#[cfg(test)]
mod tests {
    use super::FiniteWord;

    #[test]
    fn finite_word_impls() {
        assert_eq!("abc".collect_vec(), vec!['a', 'b', 'c']);
        assert_eq!(String::from("ab").len(), 2);
        assert!(Vec::<char>::new().is_empty());
        assert_eq!(vec![1usize, 2].as_string(), "12");
        assert_eq!([0u32; 0].as_string(), "ε");
        assert_eq!((&&"ba").symbols().next(), Some('b'));
    }
}
