use crate::{
    alphabet::Alphabet,
    transition_system::{
        dot::{DotStateAttribute, Dottable},
        Pointed, SymbolOf, TransitionSystem,
    },
    Show,
};

use super::{Acceptance, PrefixClosedDagBuilder, StateId};

/// Read-only view of a [`PrefixClosedDagBuilder`] as a graph, used for rendering. The nodes
/// are the live states, the sink is included once some word leads into it, but its loops are
/// omitted. The view borrows the builder and therefore always shows its current structure.
///
/// When rendered, accepting states are drawn with a double border, unknown states are dashed
/// and confluence states are octagons.
pub struct GraphView<'a, A: Alphabet> {
    builder: &'a PrefixClosedDagBuilder<A>,
}

impl<'a, A: Alphabet> GraphView<'a, A> {
    pub(crate) fn new(builder: &'a PrefixClosedDagBuilder<A>) -> Self {
        Self { builder }
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = StateId> + 'a {
        self.builder.states()
    }

    /// The initial node.
    pub fn initial_node(&self) -> StateId {
        self.builder.initial()
    }

    /// The acceptance of `node`.
    pub fn acceptance(&self, node: StateId) -> Acceptance {
        self.builder.signature(node).acceptance()
    }

    /// Returns true if `node` is reachable along more than one path.
    pub fn is_confluence(&self, node: StateId) -> bool {
        self.builder.is_confluence(node)
    }

    /// The outgoing edges of `node`, labelled with their symbol.
    pub fn outgoing_edges(&self, node: StateId) -> impl Iterator<Item = (A::Symbol, StateId)> + 'a {
        let builder = self.builder;
        let edges = (!node.is_sink()).then(|| {
            builder
                .alphabet()
                .universe()
                .enumerate()
                .filter_map(move |(index, symbol)| {
                    builder
                        .signature(node)
                        .successor(index)
                        .map(|target| (symbol, target))
                })
        });
        edges.into_iter().flatten()
    }
}

impl<A: Alphabet> TransitionSystem for GraphView<'_, A> {
    type Alphabet = A;
    type StateIndex = StateId;
    type StateColor = Acceptance;

    fn alphabet(&self) -> &Self::Alphabet {
        self.builder.alphabet()
    }

    fn state_indices(&self) -> impl Iterator<Item = Self::StateIndex> + '_ {
        self.builder.states()
    }

    fn state_color(&self, state: Self::StateIndex) -> Option<Self::StateColor> {
        self.builder
            .contains_state(state)
            .then(|| self.acceptance(state))
    }

    fn successor_index(
        &self,
        state: Self::StateIndex,
        symbol: SymbolOf<Self>,
    ) -> Option<Self::StateIndex> {
        if state.is_sink() {
            return None;
        }
        self.builder.successor(state, symbol)
    }
}

impl<A: Alphabet> Pointed for GraphView<'_, A> {
    fn initial(&self) -> Self::StateIndex {
        self.builder.initial()
    }
}

impl<A: Alphabet> Dottable for GraphView<'_, A> {
    fn dot_name(&self) -> Option<String> {
        Some("DAG".into())
    }

    fn dot_header_statements(&self) -> impl IntoIterator<Item = String> {
        ["rankdir=LR".to_string()]
    }

    fn dot_initial(&self) -> Option<Self::StateIndex> {
        Some(self.builder.initial())
    }

    fn dot_state_ident(&self, idx: Self::StateIndex) -> String {
        idx.show()
    }

    fn dot_state_attributes(
        &self,
        idx: Self::StateIndex,
    ) -> impl IntoIterator<Item = DotStateAttribute> {
        let acceptance = self.acceptance(idx);
        let shape = match (self.is_confluence(idx), acceptance == Acceptance::Accept) {
            (true, true) => "doubleoctagon",
            (true, false) => "octagon",
            (false, true) => "doublecircle",
            (false, false) => "circle",
        };
        let mut attributes = vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(idx.show()),
        ];
        if acceptance == Acceptance::Unknown {
            attributes.push(DotStateAttribute::Style("dashed".into()));
        }
        attributes
    }
}

/// Read-only view of a [`PrefixClosedDagBuilder`] as a transition system, in which the sink
/// loops on every symbol and every state is colored with its [`Acceptance`]. Running a word
/// on this view yields the same classification as [`PrefixClosedDagBuilder::lookup`],
/// provided the run exists.
pub struct TransitionSystemView<'a, A: Alphabet> {
    builder: &'a PrefixClosedDagBuilder<A>,
}

impl<'a, A: Alphabet> TransitionSystemView<'a, A> {
    pub(crate) fn new(builder: &'a PrefixClosedDagBuilder<A>) -> Self {
        Self { builder }
    }
}

impl<A: Alphabet> TransitionSystem for TransitionSystemView<'_, A> {
    type Alphabet = A;
    type StateIndex = StateId;
    type StateColor = Acceptance;

    fn alphabet(&self) -> &Self::Alphabet {
        self.builder.alphabet()
    }

    fn state_indices(&self) -> impl Iterator<Item = Self::StateIndex> + '_ {
        self.builder.states()
    }

    fn state_color(&self, state: Self::StateIndex) -> Option<Self::StateColor> {
        self.builder
            .contains_state(state)
            .then(|| self.builder.signature(state).acceptance())
    }

    fn successor_index(
        &self,
        state: Self::StateIndex,
        symbol: SymbolOf<Self>,
    ) -> Option<Self::StateIndex> {
        self.builder.successor(state, symbol)
    }
}

impl<A: Alphabet> Pointed for TransitionSystemView<'_, A> {
    fn initial(&self) -> Self::StateIndex {
        self.builder.initial()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn sample() -> PrefixClosedDagBuilder {
        let mut builder = PrefixClosedDagBuilder::new(alphabet!(simple 'a', 'b'));
        builder.insert("a", true).unwrap();
        builder.insert("b", true).unwrap();
        builder.insert("aa", false).unwrap();
        builder
    }

    #[test_log::test]
    fn graph_view_reflects_structure() {
        let builder = sample();
        let graph = builder.as_graph();
        let root = graph.initial_node();

        let edges = graph.outgoing_edges(root).collect::<Vec<_>>();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].0, 'a');
        assert_eq!(edges[1].0, 'b');
        assert_ne!(edges[0].1, edges[1].1);
        assert_eq!(graph.acceptance(root), Acceptance::Unknown);
        assert_eq!(graph.acceptance(edges[0].1), Acceptance::Accept);

        // the sink is part of the graph but has no drawn loops
        assert!(graph.nodes().any(|q| q.is_sink()));
        assert_eq!(graph.outgoing_edges(StateId::SINK).count(), 0);
        assert_eq!(graph.size(), 4);
        assert_eq!(builder.size(), 4);

        let mut builder = builder;
        builder.insert("ba", false).unwrap();
        let graph = builder.as_graph();
        let (_, shared) = graph.outgoing_edges(graph.initial_node()).next().unwrap();
        assert!(graph.is_confluence(shared));
        assert_eq!(graph.size(), 3);
    }

    #[test]
    fn graph_view_dot_output() {
        let mut builder = sample();
        builder.insert("ba", false).unwrap();
        let dot = builder.as_graph().dot_representation();
        let root = builder.initial().show();

        assert!(dot.starts_with("digraph DAG {\nrankdir=LR"));
        assert!(dot.contains(&format!("init -> {root}")));
        assert!(dot.contains(&format!(
            "{root} [shape=\"circle\", label=\"{root}\", style=\"dashed\"]"
        )));
        assert!(dot.contains("shape=\"doubleoctagon\""));
        assert!(dot.contains("sink [shape=\"circle\", label=\"sink\"]"));
        assert!(dot.contains("-> sink [label=\"a\"]"));
        assert!(!dot.contains("sink -> sink"));
    }

    #[test]
    fn transition_system_view_agrees_with_lookup() {
        let builder = sample();
        let ts = builder.as_transition_system();

        for word in ["", "a", "b", "aa", "aab", "ab", "ba", "bb", "aaaa"] {
            let reached = ts.reached_state_color(word);
            let expected = builder.lookup(word);
            match reached {
                Some(color) => assert_eq!(color, expected, "mismatch on {word}"),
                None => assert_eq!(expected, Acceptance::Unknown, "mismatch on {word}"),
            }
        }
        assert_eq!(ts.successor_index(StateId::SINK, 'b'), Some(StateId::SINK));
        assert_eq!(ts.successor_index(ts.initial(), 'c'), None);
        assert_eq!(ts.reachable_state_indices().len(), 4);
        assert_eq!(ts.state_color(StateId::SINK), Some(Acceptance::Reject));
    }
}
