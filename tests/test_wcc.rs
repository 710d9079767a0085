/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use webgraph_pregel::algo::wcc;
use webgraph_pregel::prelude::*;

/// Labels each node with the smallest node of its weakly connected
/// component by sequential union-find.
fn components(num_nodes: usize, arcs: &[(usize, usize)]) -> Vec<usize> {
    fn find(parent: &mut [usize], mut x: usize) -> usize {
        while parent[x] != x {
            parent[x] = parent[parent[x]];
            x = parent[x];
        }
        x
    }
    let mut parent = (0..num_nodes).collect::<Vec<_>>();
    for &(u, v) in arcs {
        let (ru, rv) = (find(&mut parent, u), find(&mut parent, v));
        // The smallest node is always the root
        parent[ru.max(rv)] = ru.min(rv);
    }
    (0..num_nodes).map(|x| find(&mut parent, x)).collect()
}

#[test]
fn test_two_triangles_and_isolated_nodes() -> Result<()> {
    let graph =
        CsrGraph::from_arcs_with_num_nodes(10, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
    let result = wcc::run(&graph, Config::default(), no_logging![])?;
    assert_eq!(&*result.values, &[0, 0, 0, 3, 3, 3, 6, 7, 8, 9]);
    assert!(result.did_converge);
    // Labels are final after initialization
    assert_eq!(result.ran_supersteps, 2);
    Ok(())
}

#[test]
fn test_chain() -> Result<()> {
    let graph = CsrGraph::from_arcs([(0, 1), (1, 2), (2, 3)]);

    // After three supersteps all nodes are labelled 0
    let result = Pregel::new(&graph, wcc::Wcc)
        .max_supersteps(3)
        .build()?
        .run((), no_logging![])?;
    assert_eq!(&*result.values, &[0; 4]);

    // One more superstep is necessary to detect convergence
    let result = wcc::run(&graph, Config::default(), no_logging![])?;
    assert_eq!(&*result.values, &[0; 4]);
    assert!(result.did_converge);
    assert_eq!(result.ran_supersteps, 4);
    Ok(())
}

#[test]
fn test_random() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    let num_nodes = 1000;
    let arcs = (0..800)
        .map(|_| {
            (
                rng.random_range(0..num_nodes),
                rng.random_range(0..num_nodes),
            )
        })
        .collect::<Vec<_>>();
    let graph = CsrGraph::from_arcs_with_num_nodes(num_nodes, arcs.iter().copied());
    let expected = components(num_nodes, &arcs);

    for concurrency in [1, 2, 4, 7] {
        for partitioning in [PartitionPolicy::Uniform, PartitionPolicy::DegreeBalanced] {
            let config = Config {
                concurrency,
                partitioning,
                ..Config::default()
            };
            let result = wcc::run(&graph, config, no_logging![])?;
            assert_eq!(&*result.values, expected.as_slice());
            assert!(result.did_converge);
        }
    }
    Ok(())
}
