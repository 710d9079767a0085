/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of [`GraphView`](crate::traits::GraphView).
//!
//! [`CsrGraph`] is an in-memory graph with both directions available;
//! [`WebGraphView`] adapts any [WebGraph](webgraph) random-access graph,
//! possibly together with its transpose.

mod csr_graph;
pub use csr_graph::CsrGraph;

mod webgraph_view;
pub use webgraph_view::WebGraphView;
