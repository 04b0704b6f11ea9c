use tracing::trace;

use crate::{math::Map, Show};

use super::{state::StateSlot, Acceptance, Signature, StateId};

/// Arena of states together with the hash-consing table that maps every registered
/// [`Signature`] to the unique live state carrying it.
///
/// The register is the only place where states come into existence ([`Register::intern`])
/// and where they are destroyed ([`Register::purge`]). Every live state owns one reference to
/// each of its successors, and the initial pointer of the builder owns one reference to the
/// initial state. A state whose reference count drops to zero is purged, which may cascade
/// into its successors. The sink occupies slot zero, its references are counted but it is
/// never purged and never registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Register {
    slots: Vec<Option<StateSlot>>,
    free: Vec<usize>,
    table: Map<Signature, StateId>,
}

impl Register {
    pub(crate) fn new(alphabet_size: usize) -> Self {
        Self {
            slots: vec![Some(StateSlot {
                signature: Signature::sink(alphabet_size),
                incoming: 0,
                reaches_accept: false,
            })],
            free: vec![],
            table: Map::default(),
        }
    }

    pub(crate) fn slot(&self, id: StateId) -> &StateSlot {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .expect("state id must refer to a live state")
    }

    fn slot_mut(&mut self, id: StateId) -> &mut StateSlot {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .expect("state id must refer to a live state")
    }

    pub(crate) fn contains(&self, id: StateId) -> bool {
        matches!(self.slots.get(id.index()), Some(Some(_)))
    }

    /// Looks up the registered state with the given signature.
    pub(crate) fn get(&self, signature: &Signature) -> Option<StateId> {
        self.table.get(signature).copied()
    }

    /// Returns the registered state with the given signature. If there is none, a new state
    /// is created and registered, it starts without incoming references and owns a reference
    /// to each of its successors.
    pub(crate) fn intern(&mut self, signature: Signature) -> StateId {
        if let Some(&id) = self.table.get(&signature) {
            return id;
        }
        let id = self.allocate(signature.clone());
        trace!("created state {} with signature {}", id.show(), signature.show());
        self.table.insert(signature, id);
        id
    }

    fn allocate(&mut self, signature: Signature) -> StateId {
        for successor in signature.successors() {
            self.acquire(successor);
        }
        let reaches_accept = self.reaches_accept(&signature);
        let slot = StateSlot {
            signature,
            incoming: 0,
            reaches_accept,
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                StateId::new(index)
            }
            None => {
                self.slots.push(Some(slot));
                StateId::new(self.slots.len() - 1)
            }
        }
    }

    /// Removes the entry for `signature` from the table and returns whether there was one.
    /// The state itself is left alive.
    pub(crate) fn remove(&mut self, signature: &Signature) -> bool {
        self.table.remove(signature).is_some()
    }

    /// Takes `id` out of the table, provided the table entry for its signature points to it.
    pub(crate) fn unregister(&mut self, id: StateId) -> bool {
        let slot = self.slots[id.index()]
            .as_ref()
            .expect("state id must refer to a live state");
        if self.table.get(&slot.signature) == Some(&id) {
            self.table.remove(&slot.signature);
            true
        } else {
            false
        }
    }

    /// Puts the unregistered state `id` back into the table. If a different state with an
    /// equal signature is registered already, that state is returned and `id` stays out
    /// of the table.
    pub(crate) fn register(&mut self, id: StateId) -> StateId {
        let slot = self.slots[id.index()]
            .as_ref()
            .expect("state id must refer to a live state");
        if let Some(&existing) = self.table.get(&slot.signature) {
            return existing;
        }
        self.table.insert(slot.signature.clone(), id);
        id
    }

    /// Replaces the successor of the unregistered state `id` on position `index`.
    pub(crate) fn set_successor(&mut self, id: StateId, index: usize, successor: StateId) {
        self.acquire(successor);
        let slot = self.slot_mut(id);
        let previous = slot.signature.successor(index);
        slot.signature = slot.signature.with_successor(index, successor);
        if let Some(previous) = previous {
            self.release(previous);
        }
        self.refresh_reaches_accept(id);
    }

    /// Replaces the acceptance of the unregistered state `id`.
    pub(crate) fn set_acceptance(&mut self, id: StateId, acceptance: Acceptance) {
        let slot = self.slot_mut(id);
        slot.signature = slot.signature.with_acceptance(acceptance);
        self.refresh_reaches_accept(id);
    }

    pub(crate) fn mark_reaches_accept(&mut self, id: StateId) {
        self.slot_mut(id).reaches_accept = true;
    }

    fn refresh_reaches_accept(&mut self, id: StateId) {
        let reaches_accept = self.reaches_accept(&self.slot(id).signature);
        self.slot_mut(id).reaches_accept = reaches_accept;
    }

    fn reaches_accept(&self, signature: &Signature) -> bool {
        signature.acceptance() == Acceptance::Accept
            || signature
                .successors()
                .any(|successor| self.slot(successor).reaches_accept)
    }

    pub(crate) fn acquire(&mut self, id: StateId) {
        self.slot_mut(id).incoming += 1;
    }

    /// Drops one reference to `id` and purges it once it is unreferenced.
    pub(crate) fn release(&mut self, id: StateId) {
        let slot = self.slot_mut(id);
        debug_assert!(slot.incoming > 0, "released unreferenced state");
        slot.incoming -= 1;
        if slot.incoming == 0 && !id.is_sink() {
            self.purge(id);
        }
    }

    /// Destroys the unreferenced state `id`: it is removed from the table (if registered),
    /// its slot is freed and the references it owns are dropped, purging every successor
    /// that thereby becomes unreferenced. The sink is never purged.
    pub(crate) fn purge(&mut self, id: StateId) {
        let mut worklist = vec![id];
        while let Some(id) = worklist.pop() {
            if id.is_sink() {
                continue;
            }
            let Some(slot) = self.slots[id.index()].take() else {
                continue;
            };
            debug_assert_eq!(slot.incoming, 0, "purged referenced state");
            trace!("purging state {}", id.show());
            if self.table.get(&slot.signature) == Some(&id) {
                self.table.remove(&slot.signature);
            }
            self.free.push(id.index());

            for successor in slot.signature.successors() {
                let target = self.slot_mut(successor);
                target.incoming -= 1;
                if target.incoming == 0 && !successor.is_sink() {
                    worklist.push(successor);
                }
            }
        }
    }

    /// Iterates over all live states, including the sink.
    pub(crate) fn live_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|_| StateId::new(index)))
    }

    /// Iterates over the table entries.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&Signature, StateId)> + '_ {
        self.table.iter().map(|(signature, id)| (signature, *id))
    }

    /// The number of registered signatures.
    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Register;
    use crate::incremental::{Acceptance, Signature, StateId};

    #[test]
    fn intern_deduplicates_and_counts_references() {
        let mut register = Register::new(2);
        let leaf = register.intern(Signature::new(2, Acceptance::Accept));
        assert_eq!(register.intern(Signature::new(2, Acceptance::Accept)), leaf);
        assert_eq!(register.slot(leaf).incoming, 0);
        assert!(register.slot(leaf).reaches_accept);

        let parent = register.intern(Signature::new(2, Acceptance::Unknown).with_successor(0, leaf));
        let other = register.intern(Signature::new(2, Acceptance::Reject).with_successor(1, leaf));
        assert_eq!(register.slot(leaf).incoming, 2);
        assert!(register.slot(leaf).is_confluence());
        assert!(register.slot(parent).reaches_accept);
        assert_eq!(register.len(), 3);

        register.acquire(parent);
        register.release(parent);
        assert!(!register.contains(parent));
        assert_eq!(register.slot(leaf).incoming, 1);
        assert_eq!(register.len(), 2);

        register.acquire(other);
        register.release(other);
        assert!(!register.contains(leaf));
        assert_eq!(register.len(), 0);
        assert_eq!(register.live_states().collect::<Vec<_>>(), vec![StateId::SINK]);

        let reused = register.intern(Signature::new(2, Acceptance::Unknown));
        assert!(reused.index() <= 3);
        assert!(!reused.is_sink());
    }

    #[test]
    fn unregister_only_removes_own_entry() {
        let mut register = Register::new(1);
        let a = register.intern(Signature::new(1, Acceptance::Unknown).with_successor(0, StateId::SINK));
        register.acquire(a);
        assert_eq!(register.slot(StateId::SINK).incoming, 1);

        let b = register.intern(Signature::new(1, Acceptance::Accept));
        register.acquire(b);
        assert!(register.unregister(b));
        register.set_acceptance(b, Acceptance::Unknown);
        register.set_successor(b, 0, StateId::SINK);
        assert!(!register.slot(b).reaches_accept);

        // b now has the signature of a
        assert_eq!(register.register(b), a);
        assert!(!register.unregister(b));
        assert_eq!(register.get(&register.slot(a).signature.clone()), Some(a));

        register.release(b);
        assert!(!register.contains(b));
        assert!(register.contains(a));
        assert_eq!(register.slot(StateId::SINK).incoming, 1);
        assert!(register.remove(&Signature::new(1, Acceptance::Unknown).with_successor(0, StateId::SINK)));
        assert_eq!(register.entries().count(), 0);
    }
}
