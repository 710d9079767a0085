/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{Direction, GraphView};
use webgraph::traits::{RandomAccessGraph, RandomAccessLabeling, SequentialLabeling};

/// A [`GraphView`] over a [WebGraph](webgraph) random-access graph and,
/// optionally, its transpose.
///
/// Without a transpose only [`Direction::Out`] is supported: predecessors
/// are not available in a WebGraph graph. Running a vertex program that
/// needs them fails with
/// [`ConfigError::UnsupportedDirection`](crate::error::ConfigError::UnsupportedDirection)
/// before the first superstep.
///
/// # Examples
///
/// ```
/// use webgraph::graphs::vec_graph::VecGraph;
/// use webgraph_pregel::graphs::WebGraphView;
/// use webgraph_pregel::traits::*;
///
/// let graph = VecGraph::from_arcs([(0, 1), (1, 2)]);
/// let transpose = VecGraph::from_arcs([(1, 0), (2, 1)]);
/// let view = WebGraphView::with_transpose(&graph, &transpose);
/// assert_eq!(view.neighbors(1, Direction::Both), vec![2, 0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WebGraphView<G, T = G> {
    graph: G,
    transpose: Option<T>,
}

impl<G: RandomAccessGraph + Sync> WebGraphView<G, G> {
    /// Wraps a graph whose predecessors are not available.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            transpose: None,
        }
    }
}

impl<G: RandomAccessGraph + Sync, T: RandomAccessGraph + Sync> WebGraphView<G, T> {
    /// Wraps a graph and its transpose.
    ///
    /// # Panics
    ///
    /// If the two graphs have a different number of nodes or arcs.
    pub fn with_transpose(graph: G, transpose: T) -> Self {
        assert_eq!(
            SequentialLabeling::num_nodes(&graph),
            SequentialLabeling::num_nodes(&transpose),
            "the transpose should have the same number of nodes of the graph"
        );
        assert_eq!(
            RandomAccessLabeling::num_arcs(&graph),
            RandomAccessLabeling::num_arcs(&transpose),
            "the transpose should have the same number of arcs of the graph"
        );
        Self {
            graph,
            transpose: Some(transpose),
        }
    }

    /// Returns the wrapped graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Returns the wrapped transpose, if any.
    pub fn transpose(&self) -> Option<&T> {
        self.transpose.as_ref()
    }

    #[inline(always)]
    fn predecessors_of(&self) -> &T {
        self.transpose
            .as_ref()
            .expect("predecessors are not available without a transpose")
    }
}

impl<G: RandomAccessGraph + Sync, T: RandomAccessGraph + Sync> GraphView for WebGraphView<G, T> {
    #[inline(always)]
    fn num_nodes(&self) -> usize {
        SequentialLabeling::num_nodes(&self.graph)
    }

    #[inline(always)]
    fn num_arcs(&self) -> u64 {
        RandomAccessLabeling::num_arcs(&self.graph)
    }

    fn supports(&self, direction: Direction) -> bool {
        direction == Direction::Out || self.transpose.is_some()
    }

    fn degree(&self, node: usize, direction: Direction) -> usize {
        match direction {
            Direction::Out => RandomAccessLabeling::outdegree(&self.graph, node),
            Direction::In => RandomAccessLabeling::outdegree(self.predecessors_of(), node),
            Direction::Both => {
                RandomAccessLabeling::outdegree(&self.graph, node)
                    + RandomAccessLabeling::outdegree(self.predecessors_of(), node)
            }
        }
    }

    fn for_each_neighbor(&self, node: usize, direction: Direction, mut visitor: impl FnMut(usize)) {
        if direction != Direction::In {
            for succ in RandomAccessGraph::successors(&self.graph, node) {
                visitor(succ);
            }
        }
        if direction != Direction::Out {
            for pred in RandomAccessGraph::successors(self.predecessors_of(), node) {
                visitor(pred);
            }
        }
    }
}
