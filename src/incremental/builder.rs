use std::fmt::Debug;

use itertools::Itertools;
use owo_colors::OwoColorize;
use tracing::{debug, trace};

use crate::{
    alphabet::{Alphabet, CharAlphabet},
    transition_system::TransitionSystem,
    word::FiniteWord,
    Show,
};

use super::{
    register::Register, Acceptance, ConflictError, GraphView, Signature, StateId,
    TransitionSystemView,
};

/// Incrementally builds the canonical acyclic automaton of a prefix-closed set of classified
/// words. Words are added with [`PrefixClosedDagBuilder::insert`] and classified with
/// [`PrefixClosedDagBuilder::lookup`], which yields
/// - [`Acceptance::Accept`] for words that were inserted as accepted,
/// - [`Acceptance::Reject`] for words that have a prefix (possibly the word itself) that was
///   inserted as rejected,
/// - [`Acceptance::Unknown`] for all other words.
///
/// Rejected words lead into a single absorbing sink. An accepted word can therefore never be
/// inserted below a rejected one, and a word can not be rejected once one of its extensions
/// is accepted. Both situations are reported as a [`ConflictError`].
///
/// # Example
/// ```
/// use automata_incremental::prelude::*;
///
/// let mut builder = PrefixClosedDagBuilder::new(alphabet!(simple 'a', 'b'));
/// builder.insert("a", true).unwrap();
/// assert_eq!(builder.lookup("a"), Acceptance::Accept);
/// assert_eq!(builder.lookup(""), Acceptance::Unknown);
///
/// builder.insert("b", false).unwrap();
/// assert_eq!(builder.lookup("bab"), Acceptance::Reject);
/// assert_eq!(
///     builder.insert("a", false),
///     Err(ConflictError::Incompatible {
///         existing: Acceptance::Accept,
///         inserted: Acceptance::Reject
///     })
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PrefixClosedDagBuilder<A: Alphabet = CharAlphabet> {
    alphabet: A,
    register: Register,
    init: StateId,
}

/// How the state at the end of the walked path is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    /// The word ends in an unknown state that becomes accepting.
    Accept,
    /// The word ends in an unknown state that is replaced by the sink.
    Reject,
    /// The word leaves the automaton and the missing suffix has to be built.
    Extend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    Successor(usize, StateId),
    Acceptance(Acceptance),
}

impl<A: Alphabet> PrefixClosedDagBuilder<A> {
    /// Creates a builder over `alphabet` that does not know anything yet, it consists of a
    /// single unknown initial state.
    pub fn new(alphabet: A) -> Self {
        let size = alphabet.size();
        let mut register = Register::new(size);
        let init = register.intern(Signature::new(size, Acceptance::Unknown));
        register.acquire(init);
        Self {
            alphabet,
            register,
            init,
        }
    }

    /// Returns a reference to the alphabet.
    pub fn alphabet(&self) -> &A {
        &self.alphabet
    }

    /// Returns the current initial state.
    pub fn initial(&self) -> StateId {
        self.init
    }

    /// The number of states of the automaton, the sink is counted once some word leads
    /// into it.
    pub fn size(&self) -> usize {
        self.states().count()
    }

    /// The number of states that are held in the hash-consing register, i.e. all states
    /// except for the sink.
    pub fn register_len(&self) -> usize {
        self.register.len()
    }

    /// Returns a read-only view of the automaton as a graph, intended for rendering.
    pub fn as_graph(&self) -> GraphView<'_, A> {
        GraphView::new(self)
    }

    /// Returns a read-only view of the automaton as a transition system, in which the sink
    /// loops on every symbol.
    pub fn as_transition_system(&self) -> TransitionSystemView<'_, A> {
        TransitionSystemView::new(self)
    }

    /// Classifies `word` according to the information inserted so far.
    ///
    /// # Panics
    /// If the word contains a symbol that is not part of the alphabet.
    pub fn lookup<W: FiniteWord<Symbol = A::Symbol>>(&self, word: W) -> Acceptance {
        let mut state = self.init;
        for symbol in word.symbols() {
            if state.is_sink() {
                return Acceptance::Reject;
            }
            match self.signature(state).successor(self.symbol_index(symbol)) {
                Some(successor) => state = successor,
                None => return Acceptance::Unknown,
            }
        }
        self.signature(state).acceptance()
    }

    /// Returns true if `word` is known to be accepted or known to be rejected.
    pub fn has_definitive_information<W: FiniteWord<Symbol = A::Symbol>>(&self, word: W) -> bool {
        self.lookup(word).is_definitive()
    }

    /// Inserts `word` as an accepted word, see [`PrefixClosedDagBuilder::insert`].
    pub fn insert_accepted<W: FiniteWord<Symbol = A::Symbol>>(
        &mut self,
        word: W,
    ) -> Result<(), ConflictError> {
        self.insert(word, true)
    }

    /// Records that `word` is accepted (if `accepting` holds) or rejected. Rejecting a word
    /// rejects all its extensions as well. Inserting information that is already known
    /// leaves the automaton unchanged.
    ///
    /// Fails without modifying anything if
    /// - the word is already classified differently,
    /// - the word is accepted but one of its prefixes is rejected,
    /// - the word is rejected but one of its extensions is accepted.
    ///
    /// # Panics
    /// If the word contains a symbol that is not part of the alphabet.
    pub fn insert<W: FiniteWord<Symbol = A::Symbol>>(
        &mut self,
        word: W,
        accepting: bool,
    ) -> Result<(), ConflictError> {
        let word = word
            .symbols()
            .map(|symbol| self.symbol_index(symbol))
            .collect_vec();
        let path = self.walk(&word);
        let prefix_len = path.len() - 1;
        let curr = path[prefix_len];
        let acceptance = Acceptance::from(accepting);

        if curr.is_sink() {
            if !accepting {
                trace!("word is already rejected by its prefix of length {prefix_len}");
                return Ok(());
            }
            let error = if prefix_len == word.len() {
                ConflictError::Incompatible {
                    existing: Acceptance::Reject,
                    inserted: acceptance,
                }
            } else {
                ConflictError::RejectedPrefix { length: prefix_len }
            };
            return Err(conflict(error));
        }

        let resolution = if prefix_len < word.len() {
            Resolution::Extend
        } else {
            let slot = self.register.slot(curr);
            let existing = slot.acceptance();
            if existing == acceptance {
                trace!("word is already classified as {}", existing.show());
                return Ok(());
            }
            if existing.is_definitive() {
                return Err(conflict(ConflictError::Incompatible {
                    existing,
                    inserted: acceptance,
                }));
            }
            if !accepting && slot.reaches_accept {
                return Err(conflict(ConflictError::AcceptedExtension));
            }
            if accepting {
                Resolution::Accept
            } else {
                Resolution::Reject
            }
        };
        self.splice(&word, &path, resolution, accepting);
        Ok(())
    }

    /// Follows `word` from the initial state until a transition is missing or the sink is
    /// reached. The returned path starts with the initial state and ends in the last state
    /// that was reached.
    fn walk(&self, word: &[usize]) -> Vec<StateId> {
        let mut path = Vec::with_capacity(word.len() + 1);
        let mut state = self.init;
        path.push(state);
        for &index in word {
            if state.is_sink() {
                break;
            }
            match self.signature(state).successor(index) {
                Some(successor) => {
                    state = successor;
                    path.push(state);
                }
                None => break,
            }
        }
        path
    }

    fn splice(
        &mut self,
        word: &[usize],
        path: &[StateId],
        resolution: Resolution,
        accepting: bool,
    ) {
        let prefix_len = path.len() - 1;
        let curr = path[prefix_len];

        // states in front of the first confluence state are changed in place, the remaining
        // ones are cloned
        let conf_index = path
            .iter()
            .position(|&state| self.register.slot(state).is_confluence());
        let in_place = conf_index.unwrap_or(path.len());
        debug!(
            "splicing {:?} after {prefix_len} matched symbols, confluence at {conf_index:?}",
            resolution
        );

        // the states that are about to change must not be found by the register while the
        // new suffix is interned
        for &state in &path[..in_place] {
            self.register.unregister(state);
        }

        let mut child = match resolution {
            Resolution::Reject => StateId::SINK,
            Resolution::Accept => self.rewrite(
                curr,
                prefix_len < in_place,
                Change::Acceptance(Acceptance::Accept),
            ),
            Resolution::Extend => {
                let head = self.build_suffix(&word[prefix_len + 1..], accepting);
                self.rewrite(
                    curr,
                    prefix_len < in_place,
                    Change::Successor(word[prefix_len], head),
                )
            }
        };

        for position in (0..prefix_len).rev() {
            if child == path[position + 1] {
                trace!("stopping propagation at depth {position}");
                self.settle(&path[..=position], accepting);
                return;
            }
            child = self.rewrite(
                path[position],
                position < in_place,
                Change::Successor(word[position], child),
            );
        }

        if child != self.init {
            self.register.acquire(child);
            let previous = std::mem::replace(&mut self.init, child);
            self.register.release(previous);
            trace!("initial state is now {}", child.show());
        }
    }

    /// Builds the chain of states for `suffix` from the back. The chain ends in a fresh
    /// accepting leaf or in the sink, all states in between are unknown.
    fn build_suffix(&mut self, suffix: &[usize], accepting: bool) -> StateId {
        let size = self.alphabet.size();
        let mut last = if accepting {
            self.register
                .intern(Signature::new(size, Acceptance::Accept))
        } else {
            StateId::SINK
        };
        for &index in suffix.iter().rev() {
            last = self
                .register
                .intern(Signature::new(size, Acceptance::Unknown).with_successor(index, last));
        }
        last
    }

    /// Applies `change` to `state`. In place, the state is modified and re-registered, which
    /// may yield an equivalent state that already exists. Otherwise a clone carrying the
    /// changed signature is interned and `state` is left as it is.
    fn rewrite(&mut self, state: StateId, in_place: bool, change: Change) -> StateId {
        if in_place {
            match change {
                Change::Successor(index, successor) => {
                    self.register.set_successor(state, index, successor)
                }
                Change::Acceptance(acceptance) => self.register.set_acceptance(state, acceptance),
            }
            let canonical = self.register.register(state);
            if canonical != state {
                trace!("merged {} into {}", state.show(), canonical.show());
            }
            canonical
        } else {
            let signature = self.signature(state);
            let signature = match change {
                Change::Successor(index, successor) => signature.with_successor(index, successor),
                Change::Acceptance(acceptance) => signature.with_acceptance(acceptance),
            };
            let clone = self.register.intern(signature);
            trace!("replaced confluent {} by {}", state.show(), clone.show());
            clone
        }
    }

    /// Puts the unchanged prefix of the path back into the register.
    fn settle(&mut self, unchanged: &[StateId], accepting: bool) {
        for &state in unchanged {
            let canonical = self.register.register(state);
            debug_assert_eq!(canonical, state, "unchanged state collided with a new one");
            if accepting {
                self.register.mark_reaches_accept(state);
            }
        }
    }

    pub(crate) fn signature(&self, state: StateId) -> &Signature {
        &self.register.slot(state).signature
    }

    pub(crate) fn successor(&self, state: StateId, symbol: A::Symbol) -> Option<StateId> {
        if !self.register.contains(state) {
            return None;
        }
        let index = self.alphabet.index_of(symbol)?;
        self.signature(state).successor(index)
    }

    pub(crate) fn contains_state(&self, state: StateId) -> bool {
        self.register.contains(state) && (!state.is_sink() || self.register.slot(state).incoming > 0)
    }

    pub(crate) fn is_confluence(&self, state: StateId) -> bool {
        !state.is_sink() && self.register.slot(state).is_confluence()
    }

    /// All live states, the sink is only included while it is referenced.
    pub(crate) fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.register
            .live_states()
            .filter(|state| !state.is_sink() || self.register.slot(*state).incoming > 0)
    }

    pub(crate) fn symbol_index(&self, symbol: A::Symbol) -> usize {
        self.alphabet
            .index_of(symbol)
            .unwrap_or_else(|| panic!("symbol {} does not exist", symbol.show()))
    }
}

fn conflict(error: ConflictError) -> ConflictError {
    debug!("rejected insertion: {error}");
    error
}

impl<A: Alphabet> Debug for PrefixClosedDagBuilder<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "PrefixClosedDagBuilder with {} states, initial state {}",
            self.size(),
            self.init.show()
        )?;
        write!(
            f,
            "{}",
            self.as_transition_system()
                .build_transition_table(|q, c| {
                    let label = format!("{}|{}", q.show(), c.show());
                    if q == self.init {
                        label.bold().to_string()
                    } else if self.is_confluence(q) {
                        label.italic().to_string()
                    } else {
                        label
                    }
                })
        )
    }
}
