/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Read-only access to the graph a vertex program runs on.

The engine needs very little from a graph: the number of nodes, the degree
of a node and the possibility of enumerating its neighbors along a
[`Direction`]. Nodes are identified by integers in `[0..num_nodes())`, which
must be stable for the whole run.

*/

/// The direction along which neighbors are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Successors, i.e., targets of outgoing arcs.
    #[default]
    Out,
    /// Predecessors, i.e., sources of incoming arcs.
    In,
    /// Successors followed by predecessors.
    ///
    /// A pair of opposite arcs will make the same neighbor appear twice.
    Both,
}

/// A graph with random access to the neighbors of each node.
///
/// Implementations must be [`Sync`], as neighbors are enumerated
/// concurrently by all the workers of a superstep.
pub trait GraphView: Sync {
    /// Returns the number of nodes.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs.
    fn num_arcs(&self) -> u64;

    /// Returns whether neighbors can be enumerated along `direction`.
    ///
    /// The default implementation returns `true`.
    fn supports(&self, _direction: Direction) -> bool {
        true
    }

    /// Returns the number of neighbors of `node` along `direction`.
    fn degree(&self, node: usize, direction: Direction) -> usize;

    /// Calls `visitor` on each neighbor of `node` along `direction`.
    fn for_each_neighbor(&self, node: usize, direction: Direction, visitor: impl FnMut(usize));

    /// Returns the neighbors of `node` along `direction` as a vector.
    fn neighbors(&self, node: usize, direction: Direction) -> Vec<usize> {
        let mut neighbors = Vec::with_capacity(self.degree(node, direction));
        self.for_each_neighbor(node, direction, |n| neighbors.push(n));
        neighbors
    }
}

impl<G: GraphView> GraphView for &G {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        (**self).num_arcs()
    }

    #[inline(always)]
    fn supports(&self, direction: Direction) -> bool {
        (**self).supports(direction)
    }

    #[inline(always)]
    fn degree(&self, node: usize, direction: Direction) -> usize {
        (**self).degree(node, direction)
    }

    #[inline(always)]
    fn for_each_neighbor(&self, node: usize, direction: Direction, visitor: impl FnMut(usize)) {
        (**self).for_each_neighbor(node, direction, visitor)
    }
}
