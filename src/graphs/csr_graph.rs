/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;

/// Compressed sparse-row adjacency in one direction.
///
/// `dcf` is the degree-cumulative function: the neighbors of node `x` are
/// `neighbors[dcf[x]..dcf[x + 1]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Csr {
    dcf: Box<[usize]>,
    neighbors: Box<[usize]>,
}

impl Csr {
    /// Builds the adjacency from arcs sorted by source, then target.
    fn from_sorted_arcs(num_nodes: usize, arcs: &[(usize, usize)]) -> Self {
        let mut dcf = vec![0; num_nodes + 1];
        for &(src, _) in arcs {
            dcf[src + 1] += 1;
        }
        for i in 0..num_nodes {
            dcf[i + 1] += dcf[i];
        }
        let neighbors = arcs.iter().map(|&(_, dst)| dst).collect::<Vec<_>>();
        Self {
            dcf: dcf.into_boxed_slice(),
            neighbors: neighbors.into_boxed_slice(),
        }
    }

    #[inline(always)]
    fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[self.dcf[node]..self.dcf[node + 1]]
    }
}

/// An immutable in-memory graph storing both its adjacency and the
/// adjacency of its transpose.
///
/// Since both directions are available, a [`CsrGraph`] supports every
/// [`Direction`]. Neighbors are returned in increasing order; parallel arcs
/// are kept.
///
/// # Examples
///
/// ```
/// use webgraph_pregel::graphs::CsrGraph;
/// use webgraph_pregel::traits::*;
///
/// let graph = CsrGraph::from_arcs([(0, 1), (1, 2), (0, 2)]);
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.neighbors(2, Direction::In), vec![0, 1]);
/// assert_eq!(graph.degree(0, Direction::Both), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    num_nodes: usize,
    forward: Csr,
    backward: Csr,
}

impl core::default::Default for CsrGraph {
    fn default() -> Self {
        Self::from_arcs_with_num_nodes(0, [])
    }
}

impl CsrGraph {
    /// Creates a graph from a list of arcs.
    ///
    /// The number of nodes is one plus the largest node appearing in an arc.
    pub fn from_arcs(arcs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let arcs = arcs.into_iter().collect::<Vec<_>>();
        let num_nodes = arcs
            .iter()
            .map(|&(src, dst)| src.max(dst) + 1)
            .max()
            .unwrap_or(0);
        Self::build(num_nodes, arcs)
    }

    /// Creates a graph with the given number of nodes from a list of arcs.
    ///
    /// Nodes that do not appear in any arc are isolated.
    ///
    /// # Panics
    ///
    /// If an arc has an endpoint larger than or equal to `num_nodes`.
    pub fn from_arcs_with_num_nodes(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let arcs = arcs.into_iter().collect::<Vec<_>>();
        for &(src, dst) in &arcs {
            assert!(
                src < num_nodes && dst < num_nodes,
                "Arc ({src}, {dst}) has an endpoint out of range [0..{num_nodes})"
            );
        }
        Self::build(num_nodes, arcs)
    }

    fn build(num_nodes: usize, mut arcs: Vec<(usize, usize)>) -> Self {
        arcs.sort_unstable();
        let forward = Csr::from_sorted_arcs(num_nodes, &arcs);
        arcs.iter_mut().for_each(|arc| *arc = (arc.1, arc.0));
        arcs.sort_unstable();
        let backward = Csr::from_sorted_arcs(num_nodes, &arcs);
        Self {
            num_nodes,
            forward,
            backward,
        }
    }

    /// Returns the successors of `node`.
    pub fn successors(&self, node: usize) -> &[usize] {
        self.forward.neighbors(node)
    }

    /// Returns the predecessors of `node`.
    pub fn predecessors(&self, node: usize) -> &[usize] {
        self.backward.neighbors(node)
    }

    /// Returns the transpose of this graph.
    pub fn transpose(&self) -> Self {
        Self {
            num_nodes: self.num_nodes,
            forward: self.backward.clone(),
            backward: self.forward.clone(),
        }
    }
}

impl GraphView for CsrGraph {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        self.forward.neighbors.len() as u64
    }

    #[inline(always)]
    fn degree(&self, node: usize, direction: Direction) -> usize {
        match direction {
            Direction::Out => self.successors(node).len(),
            Direction::In => self.predecessors(node).len(),
            Direction::Both => self.successors(node).len() + self.predecessors(node).len(),
        }
    }

    fn for_each_neighbor(&self, node: usize, direction: Direction, mut visitor: impl FnMut(usize)) {
        if direction != Direction::In {
            self.successors(node).iter().for_each(|&n| visitor(n));
        }
        if direction != Direction::Out {
            self.predecessors(node).iter().for_each(|&n| visitor(n));
        }
    }
}
