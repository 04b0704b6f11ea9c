use std::{collections::VecDeque, hash::Hash};

use tracing::trace;

use crate::{
    alphabet::Alphabet,
    math::Map,
    transition_system::{Pointed, TransitionSystem},
    Show,
};

use super::{PrefixClosedDagBuilder, StateId};

/// A node of the product that is explored when searching for a separating word. Missing
/// transitions of the target lead into `Undefined`, which loops on every symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Node<Q> {
    Own(StateId),
    Target(Q),
    Undefined,
}

/// Disjoint sets over the nodes of both automata, nodes are added on first use.
#[derive(Debug)]
struct UnionFind<Q> {
    ids: Map<Node<Q>, usize>,
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl<Q: Copy + Eq + Hash> UnionFind<Q> {
    fn new() -> Self {
        Self {
            ids: Map::default(),
            parent: vec![],
            rank: vec![],
        }
    }

    fn id(&mut self, node: Node<Q>) -> usize {
        let next = self.parent.len();
        let id = *self.ids.entry(node).or_insert(next);
        if id == next {
            self.parent.push(id);
            self.rank.push(0);
        }
        id
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        true
    }
}

struct Record<Q, S> {
    own: StateId,
    target: Option<Q>,
    reached: Option<(usize, S)>,
}

impl<A: Alphabet> PrefixClosedDagBuilder<A> {
    /// Searches for a word on which `self` and the deterministic automaton `target` disagree,
    /// i.e. a word that `self` definitively classifies differently from `target`. Words that
    /// `self` classifies as unknown never separate. If `omit_undefined` is set, words on
    /// which `target` has no run are not considered, otherwise a missing transition leads
    /// into an implicit rejecting state.
    ///
    /// The product of both automata is explored in breadth-first order while equivalent
    /// pairs are merged in a union-find structure, so a shortest separating word is found
    /// for most inputs but minimality is not guaranteed. Returns `None` if the automata agree
    /// on every word that is definitively classified by `self`.
    ///
    /// # Example
    /// ```
    /// use automata_incremental::prelude::*;
    ///
    /// let mut builder = PrefixClosedDagBuilder::new(alphabet!(simple 'a', 'b'));
    /// builder.insert("ab", true).unwrap();
    ///
    /// let target = TSBuilder::default()
    ///     .with_state_colors([false, true])
    ///     .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 1)])
    ///     .into_dfa(0);
    /// assert_eq!(builder.find_separating_word(&target, false), None);
    ///
    /// builder.insert("aa", true).unwrap();
    /// assert_eq!(builder.find_separating_word(&target, false), Some(vec!['a', 'a']));
    /// ```
    pub fn find_separating_word<T>(
        &self,
        target: &T,
        omit_undefined: bool,
    ) -> Option<Vec<A::Symbol>>
    where
        T: Pointed<StateColor = bool>,
        T::Alphabet: Alphabet<Symbol = A::Symbol>,
    {
        let accepts = |state: Option<T::StateIndex>| {
            state
                .and_then(|q| target.state_color(q))
                .unwrap_or(false)
        };

        let initial = target.initial();
        if self
            .signature(self.initial())
            .acceptance()
            .conflicts(accepts(Some(initial)))
        {
            return Some(vec![]);
        }

        let mut classes = UnionFind::new();
        let own = classes.id(Node::Own(self.initial()));
        let other = classes.id(Node::Target(initial));
        classes.union(own, other);

        let mut records = vec![Record {
            own: self.initial(),
            target: Some(initial),
            reached: None,
        }];
        let mut queue = VecDeque::from([0]);

        while let Some(current) = queue.pop_front() {
            let (state, target_state) = (records[current].own, records[current].target);
            for (index, symbol) in self.alphabet().universe().enumerate() {
                let target_successor = target_state.and_then(|q| target.successor_index(q, symbol));
                if target_successor.is_none() && omit_undefined {
                    continue;
                }
                let successor = if state.is_sink() {
                    StateId::SINK
                } else {
                    match self.signature(state).successor(index) {
                        Some(successor) => successor,
                        None => continue,
                    }
                };

                let own = classes.id(Node::Own(successor));
                let other = classes.id(target_successor.map_or(Node::Undefined, Node::Target));
                if classes.find(own) == classes.find(other) {
                    continue;
                }

                let separates = if successor.is_sink() {
                    if target_successor.is_none() {
                        continue;
                    }
                    accepts(target_successor)
                } else {
                    self.signature(successor)
                        .acceptance()
                        .conflicts(accepts(target_successor))
                };
                if separates {
                    let mut word = vec![symbol];
                    let mut position = current;
                    while let Some((previous, symbol)) = records[position].reached {
                        word.push(symbol);
                        position = previous;
                    }
                    word.reverse();
                    trace!("found separating word {}", word.show());
                    return Some(word);
                }

                classes.union(own, other);
                records.push(Record {
                    own: successor,
                    target: target_successor,
                    reached: Some((current, symbol)),
                });
                queue.push_back(records.len() - 1);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn sample() -> PrefixClosedDagBuilder {
        let mut builder = PrefixClosedDagBuilder::new(alphabet!(simple 'a', 'b'));
        builder.insert("a", true).unwrap();
        builder.insert("b", false).unwrap();
        builder
    }

    #[test_log::test]
    fn consistent_target_is_not_separated() {
        let target = TSBuilder::default()
            .with_state_colors([false, true, false])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 2),
                (1, 'a', 1),
                (1, 'b', 1),
                (2, 'a', 2),
                (2, 'b', 2),
            ])
            .into_dfa(0);
        assert_eq!(sample().find_separating_word(&target, false), None);
        assert_eq!(sample().find_separating_word(&target, true), None);
    }

    #[test_log::test]
    fn separating_words() {
        let builder = sample();

        let wrong_leaf = TSBuilder::default()
            .with_state_colors([false, false])
            .with_edges([(0, 'a', 1), (0, 'b', 1), (1, 'a', 1), (1, 'b', 1)])
            .into_dfa(0);
        assert_eq!(builder.find_separating_word(&wrong_leaf, false), Some(vec!['a']));

        // accepting "ba" contradicts the rejection of "b"
        let below_sink = TSBuilder::default()
            .with_state_colors([false, true, false])
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 2),
                (1, 'a', 1),
                (1, 'b', 1),
                (2, 'a', 1),
                (2, 'b', 2),
            ])
            .into_dfa(0);
        assert_eq!(
            builder.find_separating_word(&below_sink, false),
            Some(vec!['b', 'a'])
        );

        let mut builder = builder;
        builder.insert("", true).unwrap();
        assert_eq!(builder.find_separating_word(&wrong_leaf, true), Some(vec![]));
    }

    #[test]
    fn undefined_transitions() {
        let mut builder = PrefixClosedDagBuilder::new(alphabet!(simple 'a', 'b'));
        builder.insert("a", true).unwrap();
        builder.insert("b", true).unwrap();
        builder.insert("bb", false).unwrap();

        let partial = TSBuilder::default()
            .with_state_colors([false, true])
            .with_edges([(0, 'a', 1)])
            .with_alphabet_symbols(['b'])
            .into_dfa(0);
        assert_eq!(builder.find_separating_word(&partial, true), None);
        assert_eq!(builder.find_separating_word(&partial, false), Some(vec!['b']));

        // the sink agrees with undefined transitions
        let mut builder = PrefixClosedDagBuilder::new(alphabet!(simple 'a', 'b'));
        builder.insert("a", true).unwrap();
        builder.insert("b", false).unwrap();
        assert_eq!(builder.find_separating_word(&partial, false), None);
    }

    #[test]
    fn separating_word_is_classified_differently() {
        let mut builder = PrefixClosedDagBuilder::new(alphabet!(simple 'a', 'b'));
        for (word, accepting) in [("aab", true), ("ab", false), ("ba", true), ("bbb", true)] {
            builder.insert(word, accepting).unwrap();
        }
        // accepts words with an even number of 'a'
        let target = TSBuilder::default()
            .with_state_colors([true, false])
            .with_edges([(0, 'a', 1), (0, 'b', 0), (1, 'a', 0), (1, 'b', 1)])
            .into_dfa(0);

        let word = builder
            .find_separating_word(&target, false)
            .expect("automata disagree on \"ba\"");
        let expected = builder.lookup(&word);
        assert!(expected.conflicts(target.accepts(&word)));
    }
}
