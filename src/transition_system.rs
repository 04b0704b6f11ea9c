use std::{collections::VecDeque, fmt::Debug, hash::Hash};

use bit_set::BitSet;
use itertools::Itertools;

use crate::{alphabet::Alphabet, word::FiniteWord, Show};

/// Contains the [`dot::Dottable`] trait and the attributes used in the DOT output.
pub mod dot;

mod builder;
pub use builder::TSBuilder;

/// A color is simply a type that can be used to color states.
pub trait Color: Clone + Eq + Ord + Hash + Debug + Show {}
impl<T: Clone + Eq + Ord + Hash + Debug + Show> Color for T {}

/// Type that can be used to identify states of a transition system. It must be cheap to
/// copy and map injectively onto `usize`, which allows visited sets to be kept in a
/// [`BitSet`].
pub trait IdType: Copy + Hash + Debug + Eq + Ord + Show {
    /// Returns the position of the index, used for dense bookkeeping.
    fn as_usize(self) -> usize;
}

impl IdType for u32 {
    fn as_usize(self) -> usize {
        self as usize
    }
}

impl IdType for usize {
    fn as_usize(self) -> usize {
        self
    }
}

/// Type alias for extracting the symbol type of a transition system.
pub type SymbolOf<T> = <<T as TransitionSystem>::Alphabet as Alphabet>::Symbol;
/// Type alias for extracting the state index type of a transition system.
pub type StateIndex<T> = <T as TransitionSystem>::StateIndex;
/// Type alias for extracting the state color type of a transition system.
pub type StateColor<T> = <T as TransitionSystem>::StateColor;

/// A deterministic transition system over some [`Alphabet`]: every state has at most one
/// successor for each symbol and carries precisely one color.
pub trait TransitionSystem: Sized {
    /// The type of the underlying [`Alphabet`].
    type Alphabet: Alphabet;
    /// The type of the indices of the states of the transition system.
    type StateIndex: IdType;
    /// The type of the colors of the states of the transition system.
    type StateColor: Color;

    /// Returns a reference to the alphabet of `self`.
    fn alphabet(&self) -> &Self::Alphabet;

    /// Returns an iterator over the indices of the states in `self`.
    fn state_indices(&self) -> impl Iterator<Item = Self::StateIndex> + '_;

    /// Returns the color of the given `state`, if the state exists.
    fn state_color(&self, state: Self::StateIndex) -> Option<Self::StateColor>;

    /// Returns the successor of `state` on `symbol`, or `None` if there is no such transition.
    fn successor_index(
        &self,
        state: Self::StateIndex,
        symbol: SymbolOf<Self>,
    ) -> Option<Self::StateIndex>;

    /// Returns an iterator over the outgoing transitions of `state`, as pairs of the symbol
    /// and the target. The transitions are ordered by the position of the symbol in the alphabet.
    fn edges_from(
        &self,
        state: Self::StateIndex,
    ) -> impl Iterator<Item = (SymbolOf<Self>, Self::StateIndex)> + '_ {
        self.alphabet().universe().filter_map(move |symbol| {
            self.successor_index(state, symbol)
                .map(|target| (symbol, target))
        })
    }

    /// Returns true if the given `index` identifies a state of `self`.
    fn contains_state_index(&self, index: Self::StateIndex) -> bool {
        self.state_indices().contains(&index)
    }

    /// Returns the number of states.
    fn size(&self) -> usize {
        self.state_indices().count()
    }

    /// Returns true if the transition system has no states.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Runs `word` from the state `from` and returns the index of the reached state. If the
    /// run is unsuccessful because some transition is missing, `None` is returned.
    fn reached_state_index_from<W: FiniteWord<Symbol = SymbolOf<Self>>>(
        &self,
        from: Self::StateIndex,
        word: W,
    ) -> Option<Self::StateIndex> {
        word.symbols()
            .try_fold(from, |state, symbol| self.successor_index(state, symbol))
    }

    /// Returns the color of the state that is reached when running `word` from the state `from`.
    fn reached_state_color_from<W: FiniteWord<Symbol = SymbolOf<Self>>>(
        &self,
        from: Self::StateIndex,
        word: W,
    ) -> Option<Self::StateColor> {
        self.reached_state_index_from(from, word)
            .and_then(|state| self.state_color(state))
    }

    /// Returns a string representation of the transition table of the transition system.
    fn build_transition_table<SD>(&self, state_decorator: SD) -> String
    where
        SD: Fn(Self::StateIndex, Self::StateColor) -> String,
    {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet().universe().map(|s| s.show())),
        );
        for id in self.state_indices().sorted() {
            let mut row = vec![state_decorator(
                id,
                self.state_color(id)
                    .expect("Every state should be colored!"),
            )];
            for sym in self.alphabet().universe() {
                row.push(
                    self.successor_index(id, sym)
                        .map(|target| target.show())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

/// A transition system with a designated initial state.
pub trait Pointed: TransitionSystem {
    /// Returns the index of the initial state.
    fn initial(&self) -> Self::StateIndex;

    /// Runs `word` from the initial state and returns the index of the reached state.
    fn reached_state_index<W: FiniteWord<Symbol = SymbolOf<Self>>>(
        &self,
        word: W,
    ) -> Option<Self::StateIndex> {
        self.reached_state_index_from(self.initial(), word)
    }

    /// Runs `word` from the initial state and returns the color of the reached state.
    fn reached_state_color<W: FiniteWord<Symbol = SymbolOf<Self>>>(
        &self,
        word: W,
    ) -> Option<Self::StateColor> {
        self.reached_state_color_from(self.initial(), word)
    }

    /// Returns the indices of all states that are reachable from the initial state, in the
    /// order in which a breadth-first search discovers them.
    fn reachable_state_indices(&self) -> Vec<Self::StateIndex> {
        let initial = self.initial();
        let mut seen = BitSet::new();
        seen.insert(initial.as_usize());
        let mut queue = VecDeque::from([initial]);
        let mut out = Vec::new();

        while let Some(state) = queue.pop_front() {
            out.push(state);
            for (_, target) in self.edges_from(state) {
                if seen.insert(target.as_usize()) {
                    queue.push_back(target);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn runs_and_reachability() {
        let dfa = TSBuilder::default()
            .with_state_colors([false, true, false, true])
            .with_edges([(0, 'a', 1), (1, 'b', 0), (1, 'a', 1), (3, 'a', 3)])
            .into_dfa(0);

        assert_eq!(dfa.reached_state_index("aab"), Some(0));
        assert_eq!(dfa.reached_state_color("aba"), Some(true));
        assert_eq!(dfa.reached_state_index("b"), None);
        assert_eq!(dfa.reachable_state_indices(), vec![0, 1]);
        assert_eq!(dfa.edges_from(1).collect::<Vec<_>>(), vec![('a', 1), ('b', 0)]);
        assert_eq!(dfa.size(), 4);
        assert!(dfa.contains_state_index(3));
        assert!(!dfa.contains_state_index(4));
    }

    #[test]
    fn transition_table() {
        let dfa = TSBuilder::default()
            .with_state_colors([false, true])
            .with_edges([(0, 'a', 1), (1, 'b', 0)])
            .into_dfa(0);
        let table = dfa.build_transition_table(|q, c| format!("{}|{}", q.show(), c.show()));
        assert!(table.contains("0|-"));
        assert!(table.contains("1|+"));
        assert!(table.lines().next().is_some_and(|l| !l.contains("State")));
        assert!(table.contains("State"));
    }
}
