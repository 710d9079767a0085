/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Connected components by minimum-label propagation.
//!
//! Every node ends up labelled with the smallest node in its component.
//! Messages travel in both directions, so on a directed graph the
//! components are the weakly connected ones; this requires a graph
//! [supporting](crate::traits::GraphView::supports) [`Direction::Both`].
//!
//! ```
//! use dsi_progress_logger::prelude::*;
//! use webgraph_pregel::prelude::*;
//! use webgraph_pregel::algo::wcc;
//!
//! let graph = CsrGraph::from_arcs([(0, 1), (2, 1), (3, 4)]);
//! let result = wcc::run(&graph, Config::default(), no_logging![])?;
//! assert_eq!(&*result.values, &[0, 0, 0, 3, 3]);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::error::PregelError;
use crate::messages::{CombinerKind, Messages};
use crate::pregel::{Config, Context, Pregel, PregelResult, VertexProgram};
use crate::traits::{Direction, GraphView};
use dsi_progress_logger::ProgressLog;

/// The connected-components vertex program.
///
/// In superstep 0 each node takes the minimum among its own identifier and
/// those of its neighbors, and sends it to all neighbors. Later, a node
/// adopts and forwards a smaller label only if it receives one. All nodes
/// vote to halt after each computation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wcc;

impl VertexProgram for Wcc {
    type Value = usize;
    type Message = usize;

    fn direction(&self) -> Direction {
        Direction::Both
    }

    fn combiner(&self) -> Option<CombinerKind> {
        Some(CombinerKind::Min)
    }

    fn init<G: GraphView>(&self, ctx: &mut Context<'_, G, usize, usize>) -> anyhow::Result<()> {
        let mut min = ctx.node_id();
        ctx.for_each_neighbor(Direction::Both, |neighbor| min = min.min(neighbor));
        ctx.set_value(min);
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
        } else if let Some(min) = messages.min() {
            if min < *ctx.value() {
                ctx.set_value(min);
                ctx.send_to_neighbors(min);
            }
        }
        ctx.vote_to_halt();
        Ok(())
    }
}

/// Computes the connected components of `graph`.
pub fn run(
    graph: impl GraphView,
    config: Config,
    pl: &mut impl ProgressLog,
) -> Result<PregelResult<usize>, PregelError> {
    Pregel::new(graph, Wcc).config(config).build()?.run((), pl)
}
