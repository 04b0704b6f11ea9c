//! Library for incrementally building canonical deterministic finite automata from
//! classified words.
//!
//! The central structure is the [`PrefixClosedDagBuilder`], which maintains a minimal,
//! maximally shared acyclic automaton while words are inserted one at a time together with a
//! classification (accepted or rejected). Prefix-closedness is assumed: once a word is
//! rejected, every extension of it is rejected as well, which is represented by redirecting
//! the word into a single absorbing sink state. Every state of the automaton carries a
//! tri-state [`Acceptance`], so the builder can distinguish between words it knows to be
//! accepted, words it knows to be rejected and words about which it has no information yet.
//!
//! Canonicity is maintained by a hash-consing register, which maps the *signature* of a state
//! (its acceptance together with its successor on every symbol) to the unique live state with
//! that signature. Insertions mutate the shared graph in place wherever a state is reachable
//! along a single path only; states that are reachable along several paths (confluence states)
//! are cloned instead, so that other words passing through them keep their classification.
//!
//! Around the builder, the crate provides the small amount of automata infrastructure that is
//! necessary to feed words into it and to inspect its result
//! - [`Alphabet`] with the concrete [`CharAlphabet`] and the [`alphabet!`] macro,
//! - [`FiniteWord`], implemented for strings, slices, arrays and vectors of symbols,
//! - [`TransitionSystem`] and [`Pointed`] which abstract over deterministic transition systems,
//!   implemented by the views of the builder as well as by the explicit [`DFA`],
//! - [`Dottable`] for exporting transition systems in the graphviz DOT format.
//!
//! # Example
//! ```
//! use automata_incremental::prelude::*;
//!
//! let mut builder = PrefixClosedDagBuilder::new(alphabet!(simple 'a', 'b'));
//! builder.insert("ab", true).unwrap();
//! builder.insert("b", false).unwrap();
//!
//! assert_eq!(builder.lookup("ab"), Acceptance::Accept);
//! assert_eq!(builder.lookup("ba"), Acceptance::Reject);
//! assert_eq!(builder.lookup("aa"), Acceptance::Unknown);
//! assert!(builder.insert("bab", true).is_err());
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_incremental::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet,
        alphabet::{Alphabet, CharAlphabet, Symbol},
        automaton::DFA,
        incremental::{
            Acceptance, ConflictError, GraphView, PrefixClosedDagBuilder, Signature, StateId,
            TransitionSystemView,
        },
        math,
        transition_system::{
            dot::{DotStateAttribute, DotTransitionAttribute, Dottable},
            Color, IdType, Pointed, StateColor, StateIndex, SymbolOf, TSBuilder,
            TransitionSystem,
        },
        word::FiniteWord,
        Show,
    };
}

/// Type aliases for the collections that are used throughout the crate.
pub mod math {
    /// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
    pub type Set<S> = fxhash::FxHashSet<S>;
    /// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
    pub type Map<K, V> = fxhash::FxHashMap<K, V>;
}

/// Module that contains definitions for dealing with alphabets.
#[macro_use]
pub mod alphabet;
pub use alphabet::{Alphabet, CharAlphabet};

/// Module that contains definitions for dealing with finite words.
pub mod word;
pub use word::FiniteWord;

/// This module defines transition systems and successor functions and such.
pub mod transition_system;
pub use transition_system::{dot::Dottable, Pointed, TransitionSystem};

/// Defines explicitly stored automata.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::DFA;

/// The incremental construction of canonical prefix-closed automata.
pub mod incremental;
pub use incremental::{Acceptance, ConflictError, PrefixClosedDagBuilder};

/// Implements the generation of random words and samples.
#[cfg(feature = "random")]
pub mod random;

mod show;
pub use show::Show;
