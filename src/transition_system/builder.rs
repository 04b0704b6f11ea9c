use itertools::Itertools;

use crate::{
    alphabet::CharAlphabet,
    automaton::DFA,
    math::Set,
    transition_system::Color,
    Show,
};

/// Helper struct for the construction of explicit automata over a [`CharAlphabet`]. It stores a
/// list of edges, a list of colors and a default color.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']`. We want to add the following transitions:
/// - From state 0 to state 0 on symbol 'a'
/// - From state 0 to state 1 on symbol 'b'
/// - From state 1 to state 1 on symbol 'a'
/// - From state 1 to state 0 on symbol 'b'
///
/// Further, state 0 should be initial and colored `true` and state 1 should be colored `false`. This can be done as follows
/// ```
/// use automata_incremental::prelude::*;
///
/// let dfa = TSBuilder::default()
///     .with_state_colors([true, false]) // colors given in the order of the states
///     .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .into_dfa(0); // 0 is the initial state
/// assert!(dfa.accepts("abb"));
/// ```
#[derive(Debug, Clone)]
pub struct TSBuilder<Q = bool> {
    symbols: Set<char>,
    edges: Vec<(u32, char, u32)>,
    default: Option<Q>,
    colors: Vec<(u32, Q)>,
}

impl<Q> Default for TSBuilder<Q> {
    fn default() -> Self {
        Self {
            symbols: Set::default(),
            edges: vec![],
            default: None,
            colors: vec![],
        }
    }
}

impl<Q: Color> TSBuilder<Q> {
    /// Sets the default color for states that have no color specified.
    pub fn default_color(mut self, color: Q) -> Self {
        self.default = Some(color);
        self
    }

    /// By default, the only alphabet symbols in the automaton that is built are the ones that
    /// appear on at least one edge. This method can be used to force additional alphabet
    /// symbols to appear.
    pub fn with_alphabet_symbols<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.symbols.extend(symbols);
        self
    }

    /// Adds a list of colors to `self`. The colors are assigned to the states in the order in which they are given.
    /// This means if we give the colors `[true, false]` and then add a transition from state `0` to state `1`, then state
    /// `0` will have color `true` and state `1` will have color `false`.
    pub fn with_state_colors<I: IntoIterator<Item = Q>>(self, iter: I) -> Self {
        iter.into_iter()
            .enumerate()
            .fold(self, |acc, (i, x)| acc.color(i as u32, x))
    }

    /// Assigns the given `color` to the state with the given index `idx`.
    pub fn color(mut self, idx: u32, color: Q) -> Self {
        assert!(self.colors.iter().all(|(q, _c)| q != &idx));
        self.colors.push((idx, color));
        self
    }

    /// Adds a list of edges to `self`. The edges are added in the order in which they are given,
    /// a later edge for the same state and symbol replaces an earlier one.
    pub fn with_edges<I: IntoIterator<Item = (u32, char, u32)>>(mut self, iter: I) -> Self {
        self.edges.extend(iter);
        self
    }

    fn num_states(&self) -> usize {
        self.edges
            .iter()
            .flat_map(|(q, _, p)| [*q, *p])
            .chain(self.colors.iter().map(|(q, _)| *q))
            .max()
            .map_or(0, |max| max as usize + 1)
    }

    fn alphabet(&self) -> CharAlphabet {
        CharAlphabet::from_iter(
            self.edges
                .iter()
                .map(|(_, c, _)| *c)
                .chain(self.symbols.iter().copied()),
        )
    }

    fn state_colors(&self) -> Vec<Q> {
        (0..self.num_states() as u32)
            .map(|i| {
                self.colors
                    .iter()
                    .find_map(|(q, c)| if *q == i { Some(c.clone()) } else { None })
                    .or_else(|| self.default.clone())
                    .unwrap_or_else(|| {
                        panic!(
                            "Default is needed as some states (specifically {}) have no color",
                            i.show()
                        )
                    })
            })
            .collect_vec()
    }
}

impl TSBuilder<bool> {
    /// Builds a [`DFA`] from `self`, with the state indexed by `initial` as initial state.
    pub fn into_dfa(self, initial: u32) -> DFA<CharAlphabet> {
        let mut dfa = DFA::new(self.alphabet());
        for color in self.state_colors() {
            dfa.add_state(color);
        }
        for (q, a, p) in self.edges {
            dfa.add_edge(q, a, p);
        }
        dfa.set_initial(initial);
        dfa
    }
}
