use crate::Show;

use super::{Acceptance, StateId};

/// The identity of a state for the purpose of canonicalization: its acceptance together
/// with its successor on every symbol, indexed by the position of the symbol in the
/// alphabet. Two states of a canonical automaton are equal precisely if their signatures are.
///
/// Signatures are immutable, modifications produce a new signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    acceptance: Acceptance,
    successors: Box<[Option<StateId>]>,
}

impl Signature {
    /// Creates a signature with the given acceptance and no successors.
    pub fn new(alphabet_size: usize, acceptance: Acceptance) -> Self {
        Self {
            acceptance,
            successors: vec![None; alphabet_size].into_boxed_slice(),
        }
    }

    /// The signature of the sink, which rejects and loops on every symbol.
    pub(crate) fn sink(alphabet_size: usize) -> Self {
        Self {
            acceptance: Acceptance::Reject,
            successors: vec![Some(StateId::SINK); alphabet_size].into_boxed_slice(),
        }
    }

    /// The acceptance of the state.
    pub fn acceptance(&self) -> Acceptance {
        self.acceptance
    }

    /// The successor on the symbol with position `index`.
    pub fn successor(&self, index: usize) -> Option<StateId> {
        self.successors.get(index).copied().flatten()
    }

    /// Iterates over all present successors, ordered by symbol position. A state that is
    /// reached on several symbols appears several times.
    pub fn successors(&self) -> impl Iterator<Item = StateId> + '_ {
        self.successors.iter().flatten().copied()
    }

    /// The number of symbol slots, i.e. the size of the alphabet.
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    /// Returns true if the signature has no symbol slots, which is only the case for an
    /// empty alphabet.
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// Returns true if there is no successor on any symbol.
    pub fn is_leaf(&self) -> bool {
        self.successors.iter().all(Option::is_none)
    }

    /// Returns a copy of `self` with the acceptance replaced.
    pub fn with_acceptance(&self, acceptance: Acceptance) -> Self {
        Self {
            acceptance,
            successors: self.successors.clone(),
        }
    }

    /// Returns a copy of `self` where the successor on position `index` is `successor`.
    pub fn with_successor(&self, index: usize, successor: StateId) -> Self {
        let mut successors = self.successors.clone();
        successors[index] = Some(successor);
        Self {
            acceptance: self.acceptance,
            successors,
        }
    }
}

impl Show for Signature {
    fn show(&self) -> String {
        format!(
            "[{} | {}]",
            self.acceptance.show(),
            itertools::Itertools::join(
                &mut self
                    .successors
                    .iter()
                    .map(|s| s.map_or("-".to_string(), |s| s.show())),
                ", "
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::{incremental::StateId, prelude::*};

    #[test]
    fn signature_updates_return_copies() {
        let sig = Signature::new(2, Acceptance::Unknown);
        assert!(sig.is_leaf());
        let accepting = sig.with_acceptance(Acceptance::Accept);
        let extended = sig.with_successor(1, StateId::SINK);

        assert_eq!(sig.acceptance(), Acceptance::Unknown);
        assert_eq!(sig.successor(1), None);
        assert_eq!(accepting.acceptance(), Acceptance::Accept);
        assert_eq!(extended.successor(1), Some(StateId::SINK));
        assert_eq!(extended.successors().collect::<Vec<_>>(), vec![StateId::SINK]);
        assert_ne!(sig, extended);
        assert_eq!(sig, Signature::new(2, Acceptance::Unknown));
        assert_eq!(extended.show(), "[? | -, sink]");
        assert_eq!(
            Signature::sink(2).successors().collect::<Vec<_>>(),
            vec![StateId::SINK; 2]
        );
    }
}
