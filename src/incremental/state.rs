use crate::{transition_system::IdType, Show};

use super::{Acceptance, Signature};

/// Identifies a state of a [`super::PrefixClosedDagBuilder`]. Identifiers of purged states
/// are reused, so a `StateId` is only meaningful until the next insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    /// The absorbing rejecting sink, which occupies the first slot of every builder.
    pub const SINK: StateId = StateId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// The position of the state in the arena of the builder.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if `self` identifies the sink.
    pub fn is_sink(self) -> bool {
        self == Self::SINK
    }
}

impl IdType for StateId {
    fn as_usize(self) -> usize {
        self.index()
    }
}

impl Show for StateId {
    fn show(&self) -> String {
        if self.is_sink() {
            "sink".to_string()
        } else {
            format!("q{}", self.0)
        }
    }
}

/// A live state: its signature, the number of references to it (from signatures of other
/// states and from the initial pointer) and whether an accepting state is reachable from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StateSlot {
    pub(crate) signature: Signature,
    pub(crate) incoming: usize,
    pub(crate) reaches_accept: bool,
}

impl StateSlot {
    pub(crate) fn acceptance(&self) -> Acceptance {
        self.signature.acceptance()
    }

    /// A confluence state is reachable along more than one path.
    pub(crate) fn is_confluence(&self) -> bool {
        self.incoming > 1
    }
}
