use crate::Show;

/// Tri-state classification of a word or state. The variants are ordered by how much
/// information they carry: [`Acceptance::Unknown`] is the least informative value, the two
/// definitive values come after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Acceptance {
    /// Nothing is known about the word.
    #[default]
    Unknown,
    /// The word is known to be rejected.
    Reject,
    /// The word is known to be accepted.
    Accept,
}

impl Acceptance {
    /// Returns `true` if `self` is [`Acceptance::Accept`] or [`Acceptance::Reject`].
    pub fn is_definitive(self) -> bool {
        self != Acceptance::Unknown
    }

    /// Returns `true` if `self` is definitive and disagrees with `accepting`. An unknown
    /// classification never conflicts.
    ///
    /// # Example
    /// ```
    /// use automata_incremental::prelude::*;
    /// assert!(Acceptance::Reject.conflicts(true));
    /// assert!(!Acceptance::Accept.conflicts(true));
    /// assert!(!Acceptance::Unknown.conflicts(false));
    /// ```
    pub fn conflicts(self, accepting: bool) -> bool {
        match self {
            Acceptance::Unknown => false,
            Acceptance::Accept => !accepting,
            Acceptance::Reject => accepting,
        }
    }

    /// Converts a definitive classification into a boolean, [`Acceptance::Unknown`] gives `None`.
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Acceptance::Unknown => None,
            Acceptance::Accept => Some(true),
            Acceptance::Reject => Some(false),
        }
    }
}

impl From<bool> for Acceptance {
    fn from(accepting: bool) -> Self {
        if accepting {
            Acceptance::Accept
        } else {
            Acceptance::Reject
        }
    }
}

impl Show for Acceptance {
    fn show(&self) -> String {
        match self {
            Acceptance::Unknown => "?",
            Acceptance::Reject => "-",
            Acceptance::Accept => "+",
        }
        .to_string()
    }
}
