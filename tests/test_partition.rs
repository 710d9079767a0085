/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use webgraph_pregel::prelude::*;

fn check_tiling(partitions: &[Partition], num_nodes: usize) {
    let mut next = 0;
    for partition in partitions {
        assert!(partition.num_nodes > 0);
        assert_eq!(partition.start, next);
        next = partition.end();
    }
    assert_eq!(next, num_nodes);
}

#[test]
fn test_degree_balanced_bound() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(0);
    let num_nodes = 10_000;
    let degrees = (0..num_nodes)
        .map(|_| {
            // A few hubs among many low-degree nodes
            if rng.random_range(0..100) == 0 {
                rng.random_range(100..1000)
            } else {
                rng.random_range(0..10)
            }
        })
        .collect::<Vec<usize>>();
    let max_degree = *degrees.iter().max().unwrap() as u64;
    let total_degree = degrees.iter().sum::<usize>() as u64;

    for num_workers in [1, 2, 7, 64] {
        let partitions = degree_balanced(num_nodes, num_workers, |node| degrees[node])?;
        check_tiling(&partitions, num_nodes);
        let target = total_degree.div_ceil(num_workers as u64);
        for partition in &partitions {
            assert!(partition.total_degree < target + max_degree);
            let sum = partition.range().map(|node| degrees[node] as u64).sum::<u64>();
            assert_eq!(partition.total_degree, sum);
        }
        assert_eq!(
            partitions.iter().map(|p| p.total_degree).sum::<u64>(),
            total_degree
        );
    }
    Ok(())
}

#[test]
fn test_policies() -> Result<()> {
    // A star: node 0 has all the arcs
    let graph = CsrGraph::from_arcs((1..100).map(|node| (0, node)));

    let partitions = PartitionPolicy::Uniform.partitions(&graph, Direction::Out, 4)?;
    check_tiling(&partitions, 100);
    assert_eq!(partitions.len(), 4);
    assert_eq!(partitions[0].total_degree, 99);

    let partitions = PartitionPolicy::DegreeBalanced.partitions(&graph, Direction::Out, 4)?;
    check_tiling(&partitions, 100);
    assert_eq!(partitions[0].range(), 0..1);

    // With a single worker there is a single partition
    let partitions = PartitionPolicy::Auto.partitions(&graph, Direction::Out, 1)?;
    assert_eq!(partitions.len(), 1);
    assert_eq!(partitions[0].range(), 0..100);

    // In-degrees are all one but for the center
    let partitions = PartitionPolicy::DegreeBalanced.partitions(&graph, Direction::In, 3)?;
    check_tiling(&partitions, 100);
    assert_eq!(partitions.len(), 3);
    Ok(())
}

#[test]
fn test_executor_partitions() -> Result<()> {
    let graph = CsrGraph::from_arcs((1..100).map(|node| (0, node)));
    let pregel = Pregel::new(&graph, webgraph_pregel::algo::sssp::Sssp::new(0))
        .concurrency(4)
        .partitioning(PartitionPolicy::Uniform)
        .build()?;
    check_tiling(pregel.partitions(), 100);
    assert_eq!(pregel.partitions().len(), 4);
    assert!(pregel.is_combining());
    Ok(())
}
