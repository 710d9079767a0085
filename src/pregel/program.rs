/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::context::{Context, MasterContext};
use crate::messages::{Combine, CombinerKind, Messages};
use crate::traits::{Direction, GraphView};

/// A vertex-centric computation.
///
/// A vertex program is run by a [`Pregel`](super::Pregel) executor as a
/// sequence of supersteps. In superstep 0 every node is initialized by
/// [`init`](VertexProgram::init) and then computed by
/// [`compute`](VertexProgram::compute) with no messages. In each later
/// superstep, [`compute`](VertexProgram::compute) is called on every node
/// that either did not [vote to halt](Context::vote_to_halt) in its last
/// computation or received messages sent during the previous superstep.
///
/// The run stops when no node is active and no message is pending, when
/// [`master_compute`](VertexProgram::master_compute) says so, when the
/// maximum number of supersteps has been reached, or when it is cancelled.
///
/// Node computations in the same superstep can run concurrently and in any
/// order, so a program may depend only on the node's own value and on its
/// messages. Programs that cannot be written this way should not
/// [accept combined messages](VertexProgram::accepts_combined_messages) if
/// they need to see every message.
///
/// Errors returned by [`init`](VertexProgram::init) or
/// [`compute`](VertexProgram::compute), as well as panics, abort the run.
pub trait VertexProgram: Sync {
    /// The per-node value.
    type Value: Default + Send;
    /// The type of the messages exchanged between nodes.
    type Message: Combine + Clone + Send;

    /// The direction along which
    /// [`send_to_neighbors`](Context::send_to_neighbors) sends messages.
    ///
    /// The default is [`Direction::Out`].
    fn direction(&self) -> Direction {
        Direction::Out
    }

    /// The combiner this program works best with, if any.
    ///
    /// It can be overridden by [`Config::combiner`](super::Config::combiner).
    fn combiner(&self) -> Option<CombinerKind> {
        None
    }

    /// Whether this program is correct when messages are combined.
    ///
    /// Programs returning `false` make the executor reject any combiner.
    fn accepts_combined_messages(&self) -> bool {
        true
    }

    /// Initializes the value of a node in superstep 0.
    ///
    /// The value is [`Default::default()`] when this method is called. Messages
    /// sent here are delivered in superstep 1.
    fn init<G: GraphView>(
        &self,
        ctx: &mut Context<'_, G, Self::Value, Self::Message>,
    ) -> anyhow::Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Computes on a node, given the messages sent to it in the previous
    /// superstep.
    fn compute<G: GraphView>(
        &self,
        ctx: &mut Context<'_, G, Self::Value, Self::Message>,
        messages: Messages<Self::Message>,
    ) -> anyhow::Result<()>;

    /// Runs once at the end of each superstep, after all node computations
    /// of the superstep have completed.
    ///
    /// Returning `true` stops the run, which is reported as converged.
    fn master_compute(&self, ctx: &MasterContext<'_, Self::Value>) -> bool {
        let _ = ctx;
        false
    }
}
