/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Unweighted single-source shortest paths.

use crate::error::PregelError;
use crate::messages::{CombinerKind, Messages};
use crate::pregel::{Config, Context, Pregel, PregelResult, VertexProgram};
use crate::traits::GraphView;
use dsi_progress_logger::ProgressLog;

/// The distance of nodes that cannot be reached from the source.
pub const UNREACHABLE: u64 = u64::MAX;

/// A vertex program computing the number of arcs on a shortest path from
/// a source to every node, following successors.
///
/// Nodes that cannot be reached have distance [`UNREACHABLE`]. If the
/// source is not a node of the graph, no node is reachable. The run takes
/// one or two supersteps more than the eccentricity of the source.
#[derive(Debug, Clone, Copy)]
pub struct Sssp {
    source: usize,
}

impl Sssp {
    pub fn new(source: usize) -> Self {
        Self { source }
    }
}

impl VertexProgram for Sssp {
    type Value = u64;
    type Message = u64;

    fn combiner(&self) -> Option<CombinerKind> {
        Some(CombinerKind::Min)
    }

    fn init<G: GraphView>(&self, ctx: &mut Context<'_, G, u64, u64>) -> anyhow::Result<()> {
        ctx.set_value(if ctx.node_id() == self.source {
            0
        } else {
            UNREACHABLE
        });
        Ok(())
    }

    fn compute<G: GraphView>(
        &self,
        ctx: &mut Context<'_, G, u64, u64>,
        messages: Messages<u64>,
    ) -> anyhow::Result<()> {
        if ctx.is_initial_superstep() {
            if ctx.node_id() == self.source {
                ctx.send_to_neighbors(1);
            }
        } else if let Some(dist) = messages.min() {
            if dist < *ctx.value() {
                ctx.set_value(dist);
                ctx.send_to_neighbors(dist.saturating_add(1));
            }
        }
        ctx.vote_to_halt();
        Ok(())
    }
}

/// Computes the distances from `source` in `graph`.
pub fn run(
    graph: impl GraphView,
    source: usize,
    config: Config,
    pl: &mut impl ProgressLog,
) -> Result<PregelResult<u64>, PregelError> {
    Pregel::new(graph, Sssp::new(source))
        .config(config)
        .build()?
        .run((), pl)
}
