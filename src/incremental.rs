//! The incremental construction of a canonical automaton for a prefix-closed set of
//! classified words.
//!
//! A [`PrefixClosedDagBuilder`] stores its states in an arena that is owned by a hash-consing
//! register. Each state is described by its [`Signature`], and at most one live state exists
//! for every signature, which makes the automaton minimal at all times. Apart from the
//! rejecting sink, the states form a directed acyclic graph rooted in the initial state.
//!
//! When a word is inserted, the builder follows it as far as possible, builds the missing
//! suffix from the back through the register and then splices the new suffix into the walked
//! path. A state on that path that can be reached along several paths (a confluence state) is
//! never changed in place. Instead it is cloned together with everything between it and the
//! end of the walk, and only the states in front of it are updated in place. Updating stops as
//! soon as a state turns out to be unchanged.

mod acceptance;
pub use acceptance::Acceptance;

mod error;
pub use error::ConflictError;

mod signature;
pub use signature::Signature;

mod state;
pub use state::StateId;

mod register;

mod builder;
pub use builder::PrefixClosedDagBuilder;
#[cfg(test)]
pub(crate) use builder::tests as builder_tests;

mod separating;

mod view;
pub use view::{GraphView, TransitionSystemView};
