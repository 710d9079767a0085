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
use webgraph_pregel::algo::label_propagation::{self, LabelPropagation};
use webgraph_pregel::prelude::*;

fn random_graph(seed: u64, num_nodes: usize, num_arcs: usize) -> CsrGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    CsrGraph::from_arcs_with_num_nodes(
        num_nodes,
        (0..num_arcs)
            .map(|_| {
                (
                    rng.random_range(0..num_nodes),
                    rng.random_range(0..num_nodes),
                )
            })
            .collect::<Vec<_>>(),
    )
}

#[test]
fn test_determinism() -> Result<()> {
    let graph = random_graph(0, 500, 2000);
    let config = Config {
        concurrency: 4,
        max_supersteps: 30,
        ..Config::default()
    };
    let first = label_propagation::run(&graph, config, no_logging![])?;
    let second = label_propagation::run(&graph, config, no_logging![])?;
    assert_eq!(first, second);

    // Supersteps make the result independent of scheduling altogether
    for concurrency in [1, 3, 8] {
        let other = label_propagation::run(
            &graph,
            Config {
                concurrency,
                ..config
            },
            no_logging![],
        )?;
        assert_eq!(first.values, other.values);
        assert_eq!(first.ran_supersteps, other.ran_supersteps);
    }
    Ok(())
}

#[test]
fn test_labels_come_from_neighborhood() -> Result<()> {
    let graph = random_graph(1, 200, 600);
    let config = Config {
        max_supersteps: 20,
        ..Config::default()
    };
    let result = label_propagation::run(&graph, config, no_logging![])?;
    for node in 0..graph.num_nodes() {
        let label = result.values[node];
        // A node keeps its own label, or takes one from a neighbor
        assert!(label == node || graph.degree(node, Direction::Both) > 0);
        assert!(label < graph.num_nodes());
    }
    Ok(())
}

#[test]
fn test_star_tie_breaking() -> Result<()> {
    // Every leaf of a star receives the label of the center, and the
    // center receives the labels of all leaves, each exactly once
    let graph = CsrGraph::from_arcs([(5, 1), (5, 2), (5, 3), (5, 4), (5, 0)]);
    let result = Pregel::new(&graph, LabelPropagation::default())
        .max_supersteps(2)
        .build()?
        .run((), no_logging![])?;
    assert_eq!(&*result.values, &[5, 5, 5, 5, 5, 0]);
    Ok(())
}

#[test]
fn test_directed_propagation() -> Result<()> {
    // Along successors only, the labels of a cycle just rotate
    let graph = CsrGraph::from_arcs([(0, 1), (1, 2), (2, 0)]);
    let result = Pregel::new(&graph, LabelPropagation::with_direction(Direction::Out))
        .max_supersteps(4)
        .build()?
        .run((), no_logging![])?;
    assert_eq!(&*result.values, &[0, 1, 2]);
    assert!(!result.did_converge);
    Ok(())
}
