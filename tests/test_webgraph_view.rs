/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::prelude::*;
use webgraph::graphs::vec_graph::VecGraph;
use webgraph_pregel::algo::{sssp, wcc};
use webgraph_pregel::prelude::*;

const ARCS: [(usize, usize); 5] = [(0, 1), (1, 2), (2, 0), (3, 4), (5, 4)];

fn transpose_arcs() -> Vec<(usize, usize)> {
    ARCS.iter().map(|&(src, dst)| (dst, src)).collect()
}

#[test]
fn test_same_as_csr() -> Result<()> {
    let graph = VecGraph::from_arcs(ARCS);
    let transpose = VecGraph::from_arcs(transpose_arcs());
    let view = WebGraphView::with_transpose(&graph, &transpose);
    let csr = CsrGraph::from_arcs(ARCS);

    assert_eq!(view.num_nodes(), csr.num_nodes());
    assert_eq!(view.num_arcs(), csr.num_arcs());
    for node in 0..csr.num_nodes() {
        for direction in [Direction::Out, Direction::In, Direction::Both] {
            assert_eq!(view.degree(node, direction), csr.degree(node, direction));
            let mut a = view.neighbors(node, direction);
            let mut b = csr.neighbors(node, direction);
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }

    let result = wcc::run(&view, Config::default(), no_logging![])?;
    assert_eq!(&*result.values, &[0, 0, 0, 3, 3, 3]);
    Ok(())
}

#[test]
fn test_successors_only() -> Result<()> {
    let graph = VecGraph::from_arcs(ARCS);
    let view = WebGraphView::new(&graph);
    assert!(view.supports(Direction::Out));
    assert!(!view.supports(Direction::In));

    // Shortest paths follow successors, so no transpose is needed
    let result = sssp::run(&view, 0, Config::default(), no_logging![])?;
    assert_eq!(
        &*result.values,
        &[0, 1, 2, sssp::UNREACHABLE, sssp::UNREACHABLE, sssp::UNREACHABLE]
    );

    // Components need predecessors
    let err = Pregel::new(&view, wcc::Wcc).build().err();
    assert!(matches!(
        err,
        Some(ConfigError::UnsupportedDirection(Direction::Both))
    ));
    Ok(())
}
