/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! PageRank by the power method.
//!
//! Ranks start uniform, and at each superstep every node sends its rank,
//! divided by its outdegree, to its successors. The new rank of a node is
//! `(1 - α) / n + α s`, where `α` is the damping factor and `s` is the sum
//! of the received contributions. The rank of dangling nodes (nodes
//! without successors) is not redistributed, so ranks sum to one only on
//! graphs without dangling nodes.
//!
//! The run stops when no rank changes by more than the tolerance in a
//! superstep, or when the maximum number of supersteps is reached.
//!
//! Contributions are added by a [`Sum`](CombinerKind::Sum) combiner in the
//! order in which they arrive, and floating-point addition is not
//! associative: ranks computed by different runs, or with a different
//! number of threads, may differ in the last bits.

use crate::error::PregelError;
use crate::messages::{CombinerKind, Messages};
use crate::pregel::{Config, Context, MasterContext, Pregel, PregelResult, VertexProgram};
use crate::traits::GraphView;
use dsi_progress_logger::ProgressLog;

/// The rank of a node, and how much it changed in the last superstep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rank {
    pub rank: f64,
    pub delta: f64,
}

/// The PageRank vertex program.
#[derive(Debug, Clone, Copy)]
pub struct PageRank {
    alpha: f64,
    tolerance: f64,
}

impl Default for PageRank {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

impl PageRank {
    pub const DEFAULT_ALPHA: f64 = 0.85;
    pub const DEFAULT_TOLERANCE: f64 = 1E-7;

    /// Creates a PageRank program with damping factor `alpha` and stopping
    /// tolerance `tolerance`.
    ///
    /// # Panics
    ///
    /// If `alpha` is not in the interval [0 . . 1) or `tolerance` is negative.
    pub fn new(alpha: f64, tolerance: f64) -> Self {
        assert!(
            (0.0..1.0).contains(&alpha),
            "The damping factor must be in [0 . . 1), got {alpha}"
        );
        assert!(
            tolerance >= 0.0,
            "The tolerance must be nonnegative, got {tolerance}"
        );
        Self { alpha, tolerance }
    }

    fn send_share<G: GraphView>(ctx: &mut Context<'_, G, Rank, f64>) {
        let outdegree = ctx.degree();
        if outdegree > 0 {
            let share = ctx.value().rank / outdegree as f64;
            ctx.send_to_neighbors(share);
        }
    }
}

impl VertexProgram for PageRank {
    type Value = Rank;
    type Message = f64;

    fn combiner(&self) -> Option<CombinerKind> {
        Some(CombinerKind::Sum)
    }

    fn init<G: GraphView>(&self, ctx: &mut Context<'_, G, Rank, f64>) -> anyhow::Result<()> {
        let rank = 1.0 / ctx.num_nodes() as f64;
        ctx.set_value(Rank { rank, delta: 0.0 });
        Ok(())
    }

    fn compute<G: GraphView>(
        &self,
        ctx: &mut Context<'_, G, Rank, f64>,
        messages: Messages<f64>,
    ) -> anyhow::Result<()> {
        if !ctx.is_initial_superstep() {
            let sum = messages.sum::<f64>();
            let rank = (1.0 - self.alpha) / ctx.num_nodes() as f64 + self.alpha * sum;
            let value = ctx.value_mut();
            value.delta = (rank - value.rank).abs();
            value.rank = rank;
        }
        // Nodes never halt: every rank is recomputed at every superstep
        Self::send_share(ctx);
        Ok(())
    }

    fn master_compute(&self, ctx: &MasterContext<'_, Rank>) -> bool {
        if ctx.superstep() == 0 {
            return false;
        }
        let max_delta = ctx
            .values()
            .iter()
            .map(|value| value.delta)
            .fold(0.0, f64::max);
        log::debug!(
            "Superstep {}: maximum rank change {}",
            ctx.superstep(),
            max_delta
        );
        max_delta <= self.tolerance
    }
}

/// Computes PageRank on `graph` with the default damping factor and
/// tolerance.
pub fn run(
    graph: impl GraphView,
    config: Config,
    pl: &mut impl ProgressLog,
) -> Result<PregelResult<Rank>, PregelError> {
    Pregel::new(graph, PageRank::default())
        .config(config)
        .build()?
        .run((), pl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::CsrGraph;
    use dsi_progress_logger::prelude::*;

    #[test]
    fn test_cycle_is_stationary() -> anyhow::Result<()> {
        let graph = CsrGraph::from_arcs([(0, 1), (1, 2), (2, 3), (3, 0)]);
        let result = run(&graph, Config::default(), no_logging![])?;
        assert!(result.did_converge);
        assert_eq!(result.ran_supersteps, 2);
        for value in result.values.iter() {
            assert!((value.rank - 0.25).abs() < 1E-12);
        }
        Ok(())
    }

    #[test]
    #[should_panic]
    fn test_invalid_alpha() {
        PageRank::new(1.5, 0.0);
    }
}
