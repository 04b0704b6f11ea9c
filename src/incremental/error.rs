use thiserror::Error;

use super::Acceptance;

/// Returned by [`super::PrefixClosedDagBuilder::insert`] when the inserted classification
/// contradicts what is already known. The builder is left untouched in that case.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConflictError {
    /// The word itself already carries a different definitive classification.
    #[error("word is classified as {existing:?} and cannot be inserted as {inserted:?}")]
    Incompatible {
        /// The classification that is already known.
        existing: Acceptance,
        /// The classification that was inserted.
        inserted: Acceptance,
    },
    /// A prefix of an accepted word is rejected, which by prefix-closedness rejects the word.
    #[error("the prefix of length {length} is rejected, so no extension of it can be accepted")]
    RejectedPrefix {
        /// The length of the shortest rejected prefix.
        length: usize,
    },
    /// A rejected word has an accepted extension.
    #[error("the word has an accepted extension and can therefore not be rejected")]
    AcceptedExtension,
}
