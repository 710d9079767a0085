/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Synchronous label propagation for community detection.
//!
//! Each node starts with its own identifier as label, and repeatedly adopts
//! the most frequent label among those it receives from its neighbors. Ties
//! are broken in favor of the smallest label, so results depend only on
//! the graph, never on scheduling.
//!
//! Synchronous label propagation might oscillate (e.g., on bipartite
//! graphs), so it is advisable to set
//! [`Config::max_supersteps`](crate::pregel::Config::max_supersteps).

use crate::error::PregelError;
use crate::messages::Messages;
use crate::pregel::{Config, Context, Pregel, PregelResult, VertexProgram};
use crate::traits::{Direction, GraphView};
use dsi_progress_logger::ProgressLog;
use std::collections::HashMap;

/// The label-propagation vertex program.
///
/// A node that changes label forwards it to its neighbors and stays
/// active; a node whose label does not change votes to halt. Label
/// frequencies need every message, so this program
/// [rejects combiners](VertexProgram::accepts_combined_messages).
#[derive(Debug, Clone, Copy)]
pub struct LabelPropagation {
    direction: Direction,
}

impl Default for LabelPropagation {
    fn default() -> Self {
        Self {
            direction: Direction::Both,
        }
    }
}

impl LabelPropagation {
    /// Propagates labels along `direction` instead of
    /// [`Direction::Both`].
    pub fn with_direction(direction: Direction) -> Self {
        Self { direction }
    }
}

/// Returns the most frequent label, or the smallest among the most
/// frequent ones.
fn most_frequent(labels: impl Iterator<Item = usize>) -> Option<usize> {
    let mut map = HashMap::<usize, usize>::new();
    for label in labels {
        map.entry(label)
            .and_modify(|counter| *counter += 1)
            .or_insert(1);
    }
    map.into_iter()
        .max_by(|(l0, c0), (l1, c1)| c0.cmp(c1).then(l1.cmp(l0)))
        .map(|(label, _)| label)
}

impl VertexProgram for LabelPropagation {
    type Value = usize;
    type Message = usize;

    fn direction(&self) -> Direction {
        self.direction
    }

    fn accepts_combined_messages(&self) -> bool {
        false
    }

    fn init<G: GraphView>(&self, ctx: &mut Context<'_, G, usize, usize>) -> anyhow::Result<()> {
        let node = ctx.node_id();
        ctx.set_value(node);
        Ok(())
    }

    fn compute<G: GraphView>(
        &self,
        ctx: &mut Context<'_, G, usize, usize>,
        messages: Messages<usize>,
    ) -> anyhow::Result<()> {
        if ctx.is_initial_superstep() {
            let label = *ctx.value();
            ctx.send_to_neighbors(label);
            return Ok(());
        }

        match most_frequent(messages) {
            Some(label) if label != *ctx.value() => {
                ctx.set_value(label);
                ctx.send_to_neighbors(label);
            }
            _ => ctx.vote_to_halt(),
        }
        Ok(())
    }
}

/// Runs label propagation on `graph` along [`Direction::Both`].
pub fn run(
    graph: impl GraphView,
    config: Config,
    pl: &mut impl ProgressLog,
) -> Result<PregelResult<usize>, PregelError> {
    Pregel::new(graph, LabelPropagation::default())
        .config(config)
        .build()?
        .run((), pl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::graphs::CsrGraph;
    use crate::messages::CombinerKind;
    use dsi_progress_logger::prelude::*;

    #[test]
    fn test_most_frequent() {
        assert_eq!(most_frequent([3, 1, 3, 1, 2].into_iter()), Some(1));
        assert_eq!(most_frequent([5, 4, 5].into_iter()), Some(5));
        assert_eq!(most_frequent([7].into_iter()), Some(7));
        assert_eq!(most_frequent(std::iter::empty()), None);
    }

    #[test]
    fn test_clique() -> anyhow::Result<()> {
        let mut arcs = vec![];
        for i in 0..4 {
            for j in i + 1..4 {
                arcs.push((i, j));
            }
        }
        let graph = CsrGraph::from_arcs(arcs);
        let result = run(&graph, Config::default(), no_logging![])?;
        assert_eq!(&*result.values, &[0; 4]);
        assert!(result.did_converge);
        Ok(())
    }

    #[test]
    fn test_rejects_combiner() {
        let graph = CsrGraph::from_arcs([(0, 1)]);
        let err = Pregel::new(&graph, LabelPropagation::default())
            .combiner(CombinerKind::Min)
            .build()
            .err();
        assert!(matches!(
            err,
            Some(ConfigError::CombinedMessagesRejected(CombinerKind::Min))
        ));
    }
}
