/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::progress::SuperstepReport;
use crate::error::OutOfRange;
use crate::messages::MessageStore;
use crate::traits::{Direction, GraphView};

/// The view of the run that a vertex program has while computing on a node.
///
/// A context gives access to the node's own value, to graph metadata, and
/// to the message store for sending messages that will be delivered in the
/// next superstep. It is created by the executor for a single invocation of
/// [`init`](super::VertexProgram::init) or
/// [`compute`](super::VertexProgram::compute).
pub struct Context<'a, G, V, M> {
    graph: &'a G,
    store: &'a MessageStore<M>,
    node: usize,
    superstep: usize,
    direction: Direction,
    value: &'a mut V,
    halted: bool,
    /// The first failed send, if any.
    error: Option<OutOfRange>,
}

impl<'a, G: GraphView, V, M: Clone + Send> Context<'a, G, V, M> {
    pub(crate) fn new(
        graph: &'a G,
        store: &'a MessageStore<M>,
        node: usize,
        superstep: usize,
        direction: Direction,
        value: &'a mut V,
    ) -> Self {
        Self {
            graph,
            store,
            node,
            superstep,
            direction,
            value,
            halted: false,
            error: None,
        }
    }

    /// Returns the node being computed.
    #[inline(always)]
    pub fn node_id(&self) -> usize {
        self.node
    }

    /// Returns the current superstep.
    #[inline(always)]
    pub fn superstep(&self) -> usize {
        self.superstep
    }

    /// Returns whether this is superstep 0.
    #[inline(always)]
    pub fn is_initial_superstep(&self) -> bool {
        self.superstep == 0
    }

    /// Returns the number of nodes of the graph.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    /// Returns the number of arcs of the graph.
    #[inline(always)]
    pub fn num_arcs(&self) -> u64 {
        self.graph.num_arcs()
    }

    /// Returns the message direction of the vertex program.
    #[inline(always)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the degree of the node along the message direction of the
    /// vertex program.
    #[inline(always)]
    pub fn degree(&self) -> usize {
        self.graph.degree(self.node, self.direction)
    }

    /// Returns the degree of the node along `direction`.
    #[inline(always)]
    pub fn degree_in(&self, direction: Direction) -> usize {
        self.graph.degree(self.node, direction)
    }

    /// Returns the value of the node.
    #[inline(always)]
    pub fn value(&self) -> &V {
        self.value
    }

    /// Returns a mutable reference to the value of the node.
    #[inline(always)]
    pub fn value_mut(&mut self) -> &mut V {
        self.value
    }

    /// Sets the value of the node.
    #[inline(always)]
    pub fn set_value(&mut self, value: V) {
        *self.value = value;
    }

    /// Calls `visitor` on each neighbor of the node along `direction`.
    ///
    /// Both directions are available to any vertex program, provided the
    /// graph supports them.
    pub fn for_each_neighbor(&self, direction: Direction, visitor: impl FnMut(usize)) {
        self.graph.for_each_neighbor(self.node, direction, visitor)
    }

    /// Returns the neighbors of the node along `direction`.
    pub fn neighbors(&self, direction: Direction) -> Vec<usize> {
        self.graph.neighbors(self.node, direction)
    }

    /// Sends `message` to `target`, which will receive it in the next
    /// superstep.
    ///
    /// An out-of-range target makes the whole run fail, even if the error
    /// returned by this method is ignored.
    pub fn send_to(&mut self, target: usize, message: M) -> Result<(), OutOfRange> {
        let result = self.store.send(target, message);
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
        result
    }

    /// Sends `message` to all neighbors along the message direction of the
    /// vertex program.
    pub fn send_to_neighbors(&mut self, message: M) {
        self.send_to_neighbors_in(self.direction, message)
    }

    /// Sends `message` to all neighbors along `direction`.
    pub fn send_to_neighbors_in(&mut self, direction: Direction, message: M) {
        let store = self.store;
        let mut error = None;
        self.graph
            .for_each_neighbor(self.node, direction, |neighbor| {
                if let Err(err) = store.send(neighbor, message.clone()) {
                    error.get_or_insert(err);
                }
            });
        if let Some(err) = error {
            self.error.get_or_insert(err);
        }
    }

    /// Declares that the node does not need to compute in the next superstep
    /// unless it receives a message.
    #[inline(always)]
    pub fn vote_to_halt(&mut self) {
        self.halted = true;
    }

    /// Returns the halting vote and the first failed send.
    pub(crate) fn finish(self) -> (bool, Option<OutOfRange>) {
        (self.halted, self.error)
    }
}

/// The view of the run that a vertex program has at the end of each
/// superstep, in [`master_compute`](super::VertexProgram::master_compute).
pub struct MasterContext<'a, V> {
    pub(crate) values: &'a [V],
    pub(crate) report: &'a SuperstepReport,
}

impl<V> MasterContext<'_, V> {
    /// Returns the superstep that has just been completed.
    pub fn superstep(&self) -> usize {
        self.report.superstep
    }

    /// Returns the number of nodes of the graph.
    pub fn num_nodes(&self) -> usize {
        self.values.len()
    }

    /// Returns the values of all nodes at the end of the superstep.
    pub fn values(&self) -> &[V] {
        self.values
    }

    /// Returns the statistics of the superstep.
    pub fn report(&self) -> &SuperstepReport {
        self.report
    }
}
