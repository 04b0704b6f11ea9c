use std::fmt::Debug;

use itertools::Itertools;

use crate::{
    alphabet::{Alphabet, CharAlphabet},
    transition_system::{
        dot::{DotStateAttribute, Dottable},
        Pointed, SymbolOf, TransitionSystem,
    },
    word::FiniteWord,
    Show,
};

/// A deterministic finite automaton (DFA) with an explicitly stored, possibly partial
/// transition function. It accepts a finite word if the run on it exists and ends in an
/// accepting state.
///
/// States are identified by `u32` indices that are handed out consecutively by
/// [`DFA::add_state`]. A DFA is usually built with a [`crate::prelude::TSBuilder`].
#[derive(Clone, PartialEq, Eq)]
pub struct DFA<A: Alphabet = CharAlphabet> {
    alphabet: A,
    initial: u32,
    colors: Vec<bool>,
    transitions: Vec<Option<u32>>,
}

impl<A: Alphabet> DFA<A> {
    /// Creates a new DFA over `alphabet` without any states. A state must be added and, if it
    /// is not the first one, designated initial with [`DFA::set_initial`].
    pub fn new(alphabet: A) -> Self {
        Self {
            alphabet,
            initial: 0,
            colors: vec![],
            transitions: vec![],
        }
    }

    /// Adds a new state with the given `color` and returns its index.
    pub fn add_state(&mut self, color: bool) -> u32 {
        let id = self.colors.len() as u32;
        self.colors.push(color);
        self.transitions
            .extend(std::iter::repeat(None).take(self.alphabet.size()));
        id
    }

    /// Adds a transition from `source` on `symbol` to `target` and returns the previous target
    /// of that transition, if there was one.
    ///
    /// # Panics
    /// If one of the states does not exist or `symbol` is not part of the alphabet.
    pub fn add_edge(&mut self, source: u32, symbol: SymbolOf<Self>, target: u32) -> Option<u32> {
        assert!(
            (target as usize) < self.colors.len(),
            "target state {} does not exist",
            target.show()
        );
        let position = self.position(source, symbol);
        self.transitions[position].replace(target)
    }

    /// Removes the transition from `source` on `symbol` and returns its target.
    pub fn remove_edge(&mut self, source: u32, symbol: SymbolOf<Self>) -> Option<u32> {
        let position = self.position(source, symbol);
        self.transitions[position].take()
    }

    /// Designates `initial` as the initial state.
    pub fn set_initial(&mut self, initial: u32) {
        assert!(
            (initial as usize) < self.colors.len(),
            "initial state {} does not exist",
            initial.show()
        );
        self.initial = initial;
    }

    /// Returns true if the run of `self` on `word` exists and ends in an accepting state.
    pub fn accepts<W: FiniteWord<Symbol = SymbolOf<Self>>>(&self, word: W) -> bool {
        self.reached_state_color(word).unwrap_or(false)
    }

    /// Returns the indices of all states that are accepting.
    pub fn accepting_states(&self) -> impl Iterator<Item = u32> + '_ {
        self.state_indices().filter(|q| self.colors[*q as usize])
    }

    /// Returns the indices of all states that are rejecting.
    pub fn rejecting_states(&self) -> impl Iterator<Item = u32> + '_ {
        self.state_indices().filter(|q| !self.colors[*q as usize])
    }

    fn position(&self, source: u32, symbol: SymbolOf<Self>) -> usize {
        assert!(
            (source as usize) < self.colors.len(),
            "source state {} does not exist",
            source.show()
        );
        let index = self
            .alphabet
            .index_of(symbol)
            .unwrap_or_else(|| panic!("symbol {} does not exist", symbol.show()));
        source as usize * self.alphabet.size() + index
    }
}

impl<A: Alphabet> TransitionSystem for DFA<A> {
    type Alphabet = A;
    type StateIndex = u32;
    type StateColor = bool;

    fn alphabet(&self) -> &Self::Alphabet {
        &self.alphabet
    }

    fn state_indices(&self) -> impl Iterator<Item = Self::StateIndex> + '_ {
        0..self.colors.len() as u32
    }

    fn state_color(&self, state: Self::StateIndex) -> Option<Self::StateColor> {
        self.colors.get(state as usize).copied()
    }

    fn successor_index(
        &self,
        state: Self::StateIndex,
        symbol: SymbolOf<Self>,
    ) -> Option<Self::StateIndex> {
        if state as usize >= self.colors.len() {
            return None;
        }
        let index = self.alphabet.index_of(symbol)?;
        self.transitions[state as usize * self.alphabet.size() + index]
    }

    fn size(&self) -> usize {
        self.colors.len()
    }
}

impl<A: Alphabet> Pointed for DFA<A> {
    fn initial(&self) -> Self::StateIndex {
        self.initial
    }
}

impl<A: Alphabet> Dottable for DFA<A> {
    fn dot_name(&self) -> Option<String> {
        Some("DFA".into())
    }

    fn dot_initial(&self) -> Option<Self::StateIndex> {
        Some(self.initial)
    }

    fn dot_state_ident(&self, idx: Self::StateIndex) -> String {
        format!("q{}", idx.show())
    }

    fn dot_state_attributes(
        &self,
        idx: Self::StateIndex,
    ) -> impl IntoIterator<Item = DotStateAttribute> {
        let shape = if self.state_color(idx).unwrap_or(false) {
            "doublecircle"
        } else {
            "circle"
        };
        vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(self.dot_state_ident(idx)),
        ]
    }
}

impl<A: Alphabet> Debug for DFA<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA with initial state {} and accepting states {}",
            self.initial.show(),
            self.accepting_states().map(|q| q.show()).join(", ")
        )?;
        write!(
            f,
            "{}",
            self.build_transition_table(|q, c| format!("{}|{}", q.show(), c.show()))
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn dfa_acceptance() {
        let mut dfa = TSBuilder::default()
            .with_state_colors([false, true, false])
            .with_edges([(0, 'a', 1), (1, 'b', 2), (2, 'a', 1)])
            .into_dfa(0);

        assert!(dfa.accepts("a"));
        assert!(dfa.accepts("aba"));
        assert!(!dfa.accepts("ab"));
        assert!(!dfa.accepts("b"));
        assert!(!dfa.accepts(""));
        assert_eq!(dfa.accepting_states().collect::<Vec<_>>(), vec![1]);
        assert_eq!(dfa.rejecting_states().collect::<Vec<_>>(), vec![0, 2]);

        assert_eq!(dfa.add_edge(1, 'b', 0), Some(2));
        assert!(dfa.accepts("aba"));
        assert_eq!(dfa.remove_edge(0, 'a'), Some(1));
        assert!(!dfa.accepts("a"));

        let q = dfa.add_state(true);
        assert_eq!(q, 3);
        dfa.set_initial(q);
        assert!(dfa.accepts(""));
        assert_eq!(dfa.successor_index(3, 'a'), None);
    }

    #[test]
    fn dfa_dot_marks_accepting_states() {
        let dfa = TSBuilder::default()
            .with_state_colors([false, true])
            .with_edges([(0, 'a', 1), (1, 'a', 0)])
            .into_dfa(0);
        let dot = dfa.dot_representation();
        assert!(dot.starts_with("digraph DFA {"));
        assert!(dot.contains("q1 [shape=\"doublecircle\", label=\"q1\"]"));
        assert!(dot.contains("q0 [shape=\"circle\", label=\"q0\"]"));
        assert!(dot.contains("q0 -> q1 [label=\"a\"]"));
        assert!(dot.contains("init -> q0"));
    }
}
