/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::ConfigError;
use crate::traits::{Direction, GraphView};
use std::ops::Range;

/// A contiguous range of nodes processed as a single unit of work.
///
/// The partitions returned by [`uniform`] and [`degree_balanced`] are
/// nonempty, ascending and abutting, and cover all nodes exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// The first node of the partition.
    pub start: usize,
    /// The number of nodes in the partition.
    pub num_nodes: usize,
    /// The sum of the degrees of the nodes in the partition.
    pub total_degree: u64,
}

impl Partition {
    /// Returns the node following the last node of the partition.
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.start + self.num_nodes
    }

    /// Returns the range of nodes of the partition.
    #[inline(always)]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// How to split the nodes of a graph among workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionPolicy {
    /// The same number of nodes per partition; see [`uniform`].
    Uniform,
    /// A similar sum of degrees per partition; see [`degree_balanced`].
    DegreeBalanced,
    /// [`DegreeBalanced`](Self::DegreeBalanced) if there is more than one
    /// worker and the graph has arcs, [`Uniform`](Self::Uniform) otherwise.
    #[default]
    Auto,
}

impl PartitionPolicy {
    /// Partitions the nodes of `graph` for `num_workers` workers, using
    /// degrees along `direction`.
    pub fn partitions(
        &self,
        graph: &impl GraphView,
        direction: Direction,
        num_workers: usize,
    ) -> Result<Vec<Partition>, ConfigError> {
        let num_nodes = graph.num_nodes();
        let degree = |node| graph.degree(node, direction);
        match self {
            Self::Uniform => uniform(num_nodes, num_workers, degree),
            Self::DegreeBalanced => degree_balanced(num_nodes, num_workers, degree),
            Self::Auto if num_workers > 1 && graph.num_arcs() > 0 => {
                degree_balanced(num_nodes, num_workers, degree)
            }
            Self::Auto => uniform(num_nodes, num_workers, degree),
        }
    }
}

/// Splits `[0..num_nodes)` into at most `num_workers` partitions with the
/// same number of nodes; the last partition absorbs the remainder.
///
/// If there are fewer nodes than workers, each node gets its own partition.
/// `degree` is used only to fill in [`Partition::total_degree`].
pub fn uniform(
    num_nodes: usize,
    num_workers: usize,
    degree: impl Fn(usize) -> usize,
) -> Result<Vec<Partition>, ConfigError> {
    if num_workers == 0 {
        return Err(ConfigError::ZeroWorkers);
    }
    if num_nodes == 0 {
        return Ok(vec![]);
    }
    let num_partitions = num_workers.min(num_nodes);
    let partition_size = num_nodes / num_partitions;

    Ok((0..num_partitions)
        .map(|i| {
            let start = i * partition_size;
            let end = if i == num_partitions - 1 {
                num_nodes
            } else {
                start + partition_size
            };
            Partition {
                start,
                num_nodes: end - start,
                total_degree: (start..end).map(|node| degree(node) as u64).sum(),
            }
        })
        .collect())
}

/// Splits `[0..num_nodes)` into partitions with a similar sum of degrees.
///
/// The target degree of a partition is the total degree divided by
/// `num_workers`, rounded up. Nodes are accumulated into the current
/// partition, which is closed as soon as it reaches the target. A node that
/// would bring a nonempty partition to twice the target or more closes it
/// first, so a very high-degree node starts a partition of its own. Thus,
/// no partition exceeds the target by more than the maximum degree, and no
/// partition is empty, but the number of partitions might differ from
/// `num_workers`.
///
/// If all degrees are zero, this function falls back to [`uniform`].
pub fn degree_balanced(
    num_nodes: usize,
    num_workers: usize,
    degree: impl Fn(usize) -> usize,
) -> Result<Vec<Partition>, ConfigError> {
    if num_workers == 0 {
        return Err(ConfigError::ZeroWorkers);
    }
    if num_nodes == 0 {
        return Ok(vec![]);
    }

    let total_degree: u64 = (0..num_nodes).map(|node| degree(node) as u64).sum();
    if total_degree == 0 {
        return uniform(num_nodes, num_workers, degree);
    }
    let target = total_degree.div_ceil(num_workers as u64).max(1);

    let mut partitions = Vec::with_capacity(num_workers);
    let mut current = Partition {
        start: 0,
        num_nodes: 0,
        total_degree: 0,
    };

    for node in 0..num_nodes {
        let d = degree(node) as u64;
        if current.num_nodes > 0 && current.total_degree + d >= 2 * target {
            partitions.push(current);
            current = Partition {
                start: node,
                num_nodes: 0,
                total_degree: 0,
            };
        }
        current.num_nodes += 1;
        current.total_degree += d;
        if current.total_degree >= target {
            partitions.push(current);
            current = Partition {
                start: node + 1,
                num_nodes: 0,
                total_degree: 0,
            };
        }
    }
    if current.num_nodes > 0 {
        partitions.push(current);
    }

    Ok(partitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_tiling(partitions: &[Partition], num_nodes: usize) {
        let mut next = 0;
        for p in partitions {
            assert!(p.num_nodes > 0);
            assert_eq!(p.start, next);
            next = p.end();
        }
        assert_eq!(next, num_nodes);
    }

    #[test]
    fn test_uniform_remainder() -> anyhow::Result<()> {
        let partitions = uniform(10, 3, |_| 1)?;
        check_tiling(&partitions, 10);
        assert_eq!(
            partitions.iter().map(|p| p.num_nodes).collect::<Vec<_>>(),
            vec![3, 3, 4]
        );
        assert_eq!(partitions[2].total_degree, 4);
        Ok(())
    }

    #[test]
    fn test_fewer_nodes_than_workers() -> anyhow::Result<()> {
        let partitions = uniform(3, 8, |_| 0)?;
        assert_eq!(partitions.len(), 3);
        check_tiling(&partitions, 3);
        Ok(())
    }

    #[test]
    fn test_zero_workers() {
        assert!(matches!(uniform(10, 0, |_| 0), Err(ConfigError::ZeroWorkers)));
        assert!(matches!(
            degree_balanced(10, 0, |_| 0),
            Err(ConfigError::ZeroWorkers)
        ));
    }

    #[test]
    fn test_no_nodes() -> anyhow::Result<()> {
        assert!(uniform(0, 4, |_| 0)?.is_empty());
        assert!(degree_balanced(0, 4, |_| 0)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_hub_gets_own_partition() -> anyhow::Result<()> {
        // Node 5 has degree 100, all other nodes degree 1
        let degree = |node| if node == 5 { 100 } else { 1 };
        let partitions = degree_balanced(20, 4, degree)?;
        check_tiling(&partitions, 20);
        let hub = partitions.iter().find(|p| p.range().contains(&5)).unwrap();
        assert_eq!(hub.start, 5);
        assert_eq!(hub.num_nodes, 1);
        Ok(())
    }

    #[test]
    fn test_zero_degrees_fall_back_to_uniform() -> anyhow::Result<()> {
        let partitions = degree_balanced(9, 3, |_| 0)?;
        assert_eq!(partitions, uniform(9, 3, |_| 0)?);
        Ok(())
    }
}
