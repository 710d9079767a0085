/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Errors raised by the engine.
//!
//! Invalid parameters are detected before the first superstep and reported
//! as a [`ConfigError`]; failures during a run are reported as a
//! [`PregelError`], which always identifies the superstep and the range of
//! nodes of the failing partition. Cancellation is not an error: see
//! [`Termination::Cancelled`](crate::pregel::Termination::Cancelled).

use crate::messages::CombinerKind;
use crate::traits::Direction;
use std::ops::Range;
use thiserror::Error;

/// Invalid run parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Zero workers (threads or partitions) were requested.
    #[error("The number of workers must be positive")]
    ZeroWorkers,

    /// The maximum number of supersteps is zero.
    #[error("The maximum number of supersteps must be positive")]
    ZeroSupersteps,

    /// The message type cannot be reduced by the requested combiner.
    #[error("Messages of type {message_type} cannot be combined with {kind:?}")]
    UnsupportedCombiner {
        kind: CombinerKind,
        message_type: &'static str,
    },

    /// The vertex program needs all messages, but a combiner was configured.
    #[error("The vertex program needs uncombined messages, but combiner {0:?} was configured")]
    CombinedMessagesRejected(CombinerKind),

    /// The graph cannot enumerate neighbors in the requested direction.
    #[error("The graph does not support direction {0:?}; a transpose is probably missing")]
    UnsupportedDirection(Direction),

    /// The thread pool could not be created.
    #[error("Could not build the thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// A message was addressed to a node outside `[0..num_nodes)`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Target node {target} is out of range [0..{num_nodes})")]
pub struct OutOfRange {
    pub target: usize,
    pub num_nodes: usize,
}

/// The error returned by a failed run.
#[derive(Error, Debug)]
pub enum PregelError {
    /// The run was not started because of invalid parameters.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A vertex program sent a message to a nonexistent node.
    #[error("Superstep {superstep}, partition {nodes:?}: node {node} sent a message to node {} ({} nodes)", .source.target, .source.num_nodes)]
    OutOfRange {
        superstep: usize,
        nodes: Range<usize>,
        node: usize,
        #[source]
        source: OutOfRange,
    },

    /// A vertex program returned an error or panicked.
    #[error("Superstep {superstep}, partition {nodes:?}: vertex program failed on node {node}")]
    Computation {
        superstep: usize,
        nodes: Range<usize>,
        node: usize,
        #[source]
        source: anyhow::Error,
    },
}

impl PregelError {
    /// Returns the superstep during which the run failed, if it was started.
    pub fn superstep(&self) -> Option<usize> {
        match self {
            Self::Configuration(_) => None,
            Self::OutOfRange { superstep, .. } | Self::Computation { superstep, .. } => {
                Some(*superstep)
            }
        }
    }

    /// Returns the node range of the failing partition, if the run was started.
    pub fn nodes(&self) -> Option<Range<usize>> {
        match self {
            Self::Configuration(_) => None,
            Self::OutOfRange { nodes, .. } | Self::Computation { nodes, .. } => Some(nodes.clone()),
        }
    }

    /// Wraps an error returned by a vertex program, recognizing
    /// out-of-range sends that the program propagated with `?`.
    pub(crate) fn from_vertex_program(
        err: anyhow::Error,
        superstep: usize,
        nodes: Range<usize>,
        node: usize,
    ) -> Self {
        match err.downcast::<OutOfRange>() {
            Ok(source) => Self::OutOfRange {
                superstep,
                nodes,
                node,
                source,
            },
            Err(source) => Self::Computation {
                superstep,
                nodes,
                node,
                source,
            },
        }
    }
}
