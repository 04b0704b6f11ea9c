use std::fmt::Display;

use itertools::Itertools;

use crate::{transition_system::SymbolOf, Show, TransitionSystem};

fn sanitize_dot_ident(name: &str) -> String {
    name.chars()
        .filter_map(|chr| match chr {
            c if c.is_alphanumeric() => Some(c),
            '|' | ':' | ',' | '_' => Some('_'),
            '(' | ')' | '[' | ']' => None,
            w if w.is_whitespace() => None,
            _ => Some('_'),
        })
        .join("")
}

/// Implemented by transition systems that can be exported in the DOT format of graphviz.
pub trait Dottable: TransitionSystem {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String {
        let header = std::iter::once(format!(
            "digraph {} {{",
            self.dot_name().unwrap_or("A".to_string())
        ))
        .chain(self.dot_header_statements());

        let initial = self.dot_initial().into_iter().flat_map(|q| {
            [
                "init [label=\"\", shape=none]".to_string(),
                format!("init -> {}", sanitize_dot_ident(&self.dot_state_ident(q))),
            ]
        });

        let states = self.state_indices().map(|q| {
            format!(
                "{} [{}]",
                sanitize_dot_ident(&self.dot_state_ident(q)),
                self.dot_state_attributes(q)
                    .into_iter()
                    .map(|attr| attr.to_string())
                    .join(", ")
            )
        });

        let transitions = self.state_indices().flat_map(|q| {
            self.edges_from(q).map(move |(symbol, target)| {
                format!(
                    "{} -> {} [{}]",
                    sanitize_dot_ident(&self.dot_state_ident(q)),
                    sanitize_dot_ident(&self.dot_state_ident(target)),
                    self.dot_transition_attributes(q, symbol, target)
                        .into_iter()
                        .map(|attr| attr.to_string())
                        .join(", ")
                )
            })
        });

        let mut lines = header
            .chain(initial)
            .chain(states)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()));
        lines.join("\n")
    }

    /// Additional statements that are placed right after the opening line of the graph.
    fn dot_header_statements(&self) -> impl IntoIterator<Item = String> {
        []
    }

    /// The state that an invisible `init` node points to, if any.
    fn dot_initial(&self) -> Option<Self::StateIndex> {
        None
    }

    /// The name of the graph.
    fn dot_name(&self) -> Option<String>;

    /// The identifier of a state, it is sanitized before it is emitted.
    fn dot_state_ident(&self, idx: Self::StateIndex) -> String;

    /// Attributes of the node that represents the state `idx`.
    fn dot_state_attributes(
        &self,
        _idx: Self::StateIndex,
    ) -> impl IntoIterator<Item = DotStateAttribute> {
        []
    }

    /// Attributes of the edge from `source` to `target` on `symbol`, by default this is just
    /// the symbol as label.
    fn dot_transition_attributes(
        &self,
        _source: Self::StateIndex,
        symbol: SymbolOf<Self>,
        _target: Self::StateIndex,
    ) -> impl IntoIterator<Item = DotTransitionAttribute> {
        [DotTransitionAttribute::Label(symbol.show())]
    }

    /// Renders the object visually (as PNG) and returns a vec of bytes/u8s encoding
    /// the rendered image. This method is only available on the `graphviz` crate feature
    /// and requires the `dot` executable to be installed.
    #[cfg(feature = "graphviz")]
    fn render(&self) -> Result<Vec<u8>, std::io::Error> {
        use std::io::{Read, Write};

        use tracing::trace;
        let dot = self.dot_representation();
        trace!("writing dot representation\n{}", dot);

        let mut child = std::process::Command::new("dot")
            .arg("-Tpng")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let mut output = Vec::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout.read_to_end(&mut output)?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(std::io::Error::other(format!(
                "dot process exited with status: {}",
                status
            )));
        }

        Ok(output)
    }

    /// Attempts to render the object to a PNG file with the given filename. This method
    /// is only available on the `graphviz` crate feature and makes use of temporary files.
    #[cfg(feature = "graphviz")]
    fn render_to_file_name(&self, filename: &str) -> Result<(), std::io::Error> {
        use std::io::Write;
        use tracing::trace;

        trace!("Outputting dot and rendering to png");
        let dot = self.dot_representation();
        let mut tempfile = tempfile::NamedTempFile::new()?;

        tempfile.write_all(dot.as_bytes())?;
        let tempfile_name = tempfile.path();

        let output = std::process::Command::new("dot")
            .arg("-Tpng")
            .arg("-o")
            .arg(filename)
            .arg(tempfile_name)
            .output()?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            tracing::error!("Could not render, dot reported\n{}", &stderr);
            Err(std::io::Error::other(stderr))
        }
    }
}

/// Enum that abstracts attributes of nodes in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
    /// The color of a node
    Color(String),
    /// The style of a node, e.g. `dashed`
    Style(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{}\"", s),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{}\"", s),
            DotStateAttribute::Color(c) => write!(f, "color=\"{}\"", c),
            DotStateAttribute::Style(s) => write!(f, "style=\"{}\"", s),
        }
    }
}

/// Enum that abstracts attributes of edges in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{lbl}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_dot_ident, DotStateAttribute, DotTransitionAttribute};

    #[test]
    fn attributes_and_identifiers() {
        assert_eq!(sanitize_dot_ident("q(1, 2)"), "q1_2");
        assert_eq!(sanitize_dot_ident("a|b:c"), "a_b_c");
        assert_eq!(sanitize_dot_ident("s-1"), "s_1");
        assert_eq!(
            DotStateAttribute::Style("dashed".into()).to_string(),
            "style=\"dashed\""
        );
        assert_eq!(
            DotTransitionAttribute::Label("a".into()).to_string(),
            "label=\"a\""
        );
    }

    #[test]
    #[ignore]
    #[cfg(feature = "graphviz")]
    fn render_dfa() {
        use crate::prelude::*;

        let dfa = TSBuilder::default()
            .with_state_colors([false, true])
            .with_edges([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
            .into_dfa(0);
        let png = dfa.render().unwrap();
        assert!(!png.is_empty());
    }
}
