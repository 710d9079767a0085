/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The bulk-synchronous executor.
//!
//! A [`Pregel`] instance runs a [`VertexProgram`] on a [graph](GraphView) as
//! a sequence of supersteps separated by barriers. Nodes are split into
//! [partitions](crate::utils::Partition) that are computed in parallel on a
//! [Rayon](rayon) thread pool; messages sent in a superstep are delivered
//! only in the next one.
//!
//! ```
//! use dsi_progress_logger::prelude::*;
//! use webgraph_pregel::prelude::*;
//!
//! /// Each node learns the largest identifier among its predecessors.
//! struct MaxPredecessor;
//!
//! impl VertexProgram for MaxPredecessor {
//!     type Value = Option<usize>;
//!     type Message = usize;
//!
//!     fn compute<G: GraphView>(
//!         &self,
//!         ctx: &mut Context<'_, G, Self::Value, Self::Message>,
//!         messages: Messages<usize>,
//!     ) -> anyhow::Result<()> {
//!         if ctx.is_initial_superstep() {
//!             ctx.send_to_neighbors(ctx.node_id());
//!         } else {
//!             ctx.set_value(messages.max());
//!         }
//!         ctx.vote_to_halt();
//!         Ok(())
//!     }
//! }
//!
//! let graph = CsrGraph::from_arcs([(0, 2), (1, 2), (2, 0)]);
//! let result = Pregel::new(&graph, MaxPredecessor)
//!     .concurrency(2)
//!     .build()?
//!     .run((), no_logging![])?;
//!
//! assert_eq!(&*result.values, &[Some(2), None, Some(1)]);
//! assert!(result.did_converge);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod context;
pub use context::*;

mod program;
pub use program::*;

mod progress;
pub use progress::*;

use crate::error::{ConfigError, PregelError};
use crate::messages::{Combine, CombineFn, CombinerKind, MessageStore};
use crate::traits::GraphView;
use crate::utils::{Partition, PartitionPolicy};
use dsi_progress_logger::ProgressLog;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::any::Any;
use std::cell::Cell;
use std::ops::Deref;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};

/// Parameters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The number of worker threads, and the number of partitions requested
    /// from the [partitioning policy](Config::partitioning).
    ///
    /// Ignored if an external [thread pool](PregelBuilder::thread_pool) is
    /// provided, in which case the number of threads of the pool is used.
    pub concurrency: usize,
    /// The maximum number of supersteps to run.
    pub max_supersteps: usize,
    /// A combiner overriding the one [preferred](VertexProgram::combiner)
    /// by the vertex program.
    pub combiner: Option<CombinerKind>,
    /// How to split nodes among workers.
    pub partitioning: PartitionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get(),
            max_supersteps: usize::MAX,
            combiner: None,
            partitioning: PartitionPolicy::Auto,
        }
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// No node was active and no message was pending, or the
    /// [master computation](VertexProgram::master_compute) stopped the run.
    Converged,
    /// The maximum number of supersteps was reached first.
    MaxSuperstepsReached,
    /// The run was cancelled at a barrier.
    Cancelled,
}

/// The outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct PregelResult<V> {
    /// The final value of each node, indexed by node.
    pub values: Box<[V]>,
    /// The number of completed supersteps.
    pub ran_supersteps: usize,
    /// Whether the run [converged](Termination::Converged).
    pub did_converge: bool,
    pub termination: Termination,
}

enum Pool<'a> {
    Owned(ThreadPool),
    Borrowed(&'a ThreadPool),
}

impl Deref for Pool<'_> {
    type Target = ThreadPool;

    fn deref(&self) -> &ThreadPool {
        match self {
            Pool::Owned(pool) => pool,
            Pool::Borrowed(pool) => pool,
        }
    }
}

/// A builder for [`Pregel`].
///
/// After creating a builder with [`Pregel::new`] you can configure it using
/// its setters, and then call [`PregelBuilder::build`] to validate the
/// configuration and create a [`Pregel`] instance.
pub struct PregelBuilder<'a, G, P> {
    graph: G,
    program: P,
    config: Config,
    thread_pool: Option<&'a ThreadPool>,
}

impl<'a, G: GraphView, P: VertexProgram> PregelBuilder<'a, G, P> {
    /// Replaces all parameters with `config`.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the number of workers.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency;
        self
    }

    /// Sets the maximum number of supersteps.
    pub fn max_supersteps(mut self, max_supersteps: usize) -> Self {
        self.config.max_supersteps = max_supersteps;
        self
    }

    /// Sets the combiner, overriding the one preferred by the vertex
    /// program.
    pub fn combiner(mut self, combiner: CombinerKind) -> Self {
        self.config.combiner = Some(combiner);
        self
    }

    /// Sets the partitioning policy.
    pub fn partitioning(mut self, partitioning: PartitionPolicy) -> Self {
        self.config.partitioning = partitioning;
        self
    }

    /// Runs on an existing thread pool instead of creating a new one.
    pub fn thread_pool(mut self, thread_pool: &'a ThreadPool) -> Self {
        self.thread_pool = Some(thread_pool);
        self
    }

    /// Validates the configuration, partitions the graph and creates the
    /// thread pool.
    pub fn build(self) -> Result<Pregel<'a, G, P>, ConfigError> {
        let mut config = self.config;
        if let Some(pool) = self.thread_pool {
            config.concurrency = pool.current_num_threads();
        }
        if config.concurrency == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if config.max_supersteps == 0 {
            return Err(ConfigError::ZeroSupersteps);
        }

        let direction = self.program.direction();
        if !self.graph.supports(direction) {
            return Err(ConfigError::UnsupportedDirection(direction));
        }

        let combine = match config.combiner.or_else(|| self.program.combiner()) {
            None => None,
            Some(kind) if !self.program.accepts_combined_messages() => {
                return Err(ConfigError::CombinedMessagesRejected(kind));
            }
            Some(kind) => Some(<P::Message as Combine>::combine_fn(kind).ok_or(
                ConfigError::UnsupportedCombiner {
                    kind,
                    message_type: std::any::type_name::<P::Message>(),
                },
            )?),
        };

        let partitions =
            config
                .partitioning
                .partitions(&self.graph, direction, config.concurrency)?;

        let pool = match self.thread_pool {
            Some(pool) => Pool::Borrowed(pool),
            None => Pool::Owned(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.concurrency)
                    .build()?,
            ),
        };

        Ok(Pregel {
            graph: self.graph,
            program: self.program,
            config,
            combine,
            partitions,
            pool,
        })
    }
}

/// Per-partition counters, summed at the barrier.
#[derive(Debug, Default, Clone, Copy)]
struct PartitionStats {
    computed: usize,
    active: usize,
}

/// A bulk-synchronous executor for a [`VertexProgram`].
///
/// Instances are created with [`Pregel::new`], which returns a
/// [builder](PregelBuilder), and consumed by [`Pregel::run`].
pub struct Pregel<'a, G, P: VertexProgram> {
    graph: G,
    program: P,
    config: Config,
    combine: Option<CombineFn<P::Message>>,
    partitions: Vec<Partition>,
    pool: Pool<'a>,
}

impl<'a, G: GraphView, P: VertexProgram> Pregel<'a, G, P> {
    /// Starts building an executor for `program` on `graph`.
    ///
    /// `graph` can be a reference, as [`GraphView`] is implemented for
    /// references.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(graph: G, program: P) -> PregelBuilder<'a, G, P> {
        PregelBuilder {
            graph,
            program,
            config: Config::default(),
            thread_pool: None,
        }
    }

    /// Returns the (validated) parameters of the run.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the partitions in which the nodes are split.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Returns whether messages are combined.
    pub fn is_combining(&self) -> bool {
        self.combine.is_some()
    }

    /// Runs the vertex program until it converges, the maximum number of
    /// supersteps is reached, or `reporter` cancels the run.
    ///
    /// `reporter` is notified at each barrier and polled for cancellation
    /// afterwards; pass `()` if you do not need it, or a mutable reference
    /// to keep ownership of a stateful reporter. `pl` logs one update per
    /// superstep.
    ///
    /// On success, the values are those at the end of the last completed
    /// superstep. If a node computation fails, the run is aborted and the
    /// error of the lowest failing partition is returned; no values are
    /// returned in this case.
    pub fn run(
        self,
        mut reporter: impl Reporter,
        pl: &mut impl ProgressLog,
    ) -> Result<PregelResult<P::Value>, PregelError> {
        let num_nodes = self.graph.num_nodes();
        let mut values = (0..num_nodes)
            .map(|_| P::Value::default())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        if num_nodes == 0 {
            log::info!("Empty graph: nothing to compute");
            return Ok(PregelResult {
                values,
                ran_supersteps: 0,
                did_converge: true,
                termination: Termination::Converged,
            });
        }

        let mut active = vec![true; num_nodes].into_boxed_slice();
        let mut store = MessageStore::new(num_nodes, self.combine);

        pl.item_name("superstep");
        pl.expected_updates(if self.config.max_supersteps == usize::MAX {
            None
        } else {
            Some(self.config.max_supersteps)
        });
        pl.start(format!(
            "Running vertex program on {} nodes with {} partitions and {} threads...",
            num_nodes,
            self.partitions.len(),
            self.pool.current_num_threads()
        ));

        let mut superstep = 0;
        let termination = loop {
            if superstep > 0 {
                self.pool.install(|| store.begin_superstep());
            }
            let stats = self.superstep(superstep, &mut values, &mut active, &store)?;

            let report = SuperstepReport {
                superstep,
                active_nodes: stats.active,
                computed_nodes: stats.computed,
                messages_sent: store.pending(),
                pending_messages: store.has_any_pending(),
            };
            pl.update_and_display();
            log::debug!("{:?}", report);
            reporter.superstep_completed(&report);

            if report.active_nodes == 0 && !report.pending_messages {
                pl.info(format_args!(
                    "Terminating after {} superstep(s) by quiescence",
                    superstep + 1
                ));
                break Termination::Converged;
            }
            if self.program.master_compute(&MasterContext {
                values: &values,
                report: &report,
            }) {
                pl.info(format_args!(
                    "Terminating after {} superstep(s) by master computation",
                    superstep + 1
                ));
                break Termination::Converged;
            }
            if superstep + 1 >= self.config.max_supersteps {
                pl.info(format_args!(
                    "Terminating after {} superstep(s) without convergence",
                    superstep + 1
                ));
                break Termination::MaxSuperstepsReached;
            }
            if reporter.is_cancelled() {
                pl.info(format_args!(
                    "Cancelled after {} superstep(s)",
                    superstep + 1
                ));
                break Termination::Cancelled;
            }
            superstep += 1;
        };

        pl.done();

        Ok(PregelResult {
            values,
            ran_supersteps: superstep + 1,
            did_converge: termination == Termination::Converged,
            termination,
        })
    }

    /// Runs a superstep on all partitions in parallel.
    fn superstep(
        &self,
        superstep: usize,
        values: &mut [P::Value],
        active: &mut [bool],
        store: &MessageStore<P::Message>,
    ) -> Result<PartitionStats, PregelError> {
        let abort = AtomicBool::new(false);

        // Each partition gets its own disjoint slices of the state
        let mut tasks = Vec::with_capacity(self.partitions.len());
        let (mut values, mut active) = (values, active);
        for partition in &self.partitions {
            let (partition_values, rest) =
                std::mem::take(&mut values).split_at_mut(partition.num_nodes);
            values = rest;
            let (partition_active, rest) =
                std::mem::take(&mut active).split_at_mut(partition.num_nodes);
            active = rest;
            tasks.push((partition, partition_values, partition_active));
        }

        let results = self.pool.install(|| {
            tasks
                .into_par_iter()
                .map(|(partition, values, active)| {
                    self.run_partition(superstep, partition, values, active, store, &abort)
                })
                .collect::<Vec<_>>()
        });

        let mut stats = PartitionStats::default();
        for result in results {
            let partition_stats = result?;
            stats.computed += partition_stats.computed;
            stats.active += partition_stats.active;
        }
        Ok(stats)
    }

    /// Computes the eligible nodes of a partition, stopping early if another
    /// partition has failed.
    fn run_partition(
        &self,
        superstep: usize,
        partition: &Partition,
        values: &mut [P::Value],
        active: &mut [bool],
        store: &MessageStore<P::Message>,
        abort: &AtomicBool,
    ) -> Result<PartitionStats, PregelError> {
        let current = Cell::new(partition.start);
        let direction = self.program.direction();

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            let mut stats = PartitionStats::default();
            for (i, (value, active)) in values.iter_mut().zip(active.iter_mut()).enumerate() {
                if abort.load(Ordering::Relaxed) {
                    break;
                }
                let node = partition.start + i;
                current.set(node);

                let messages = store.messages_for(node);
                if superstep > 0 && !*active && messages.is_empty() {
                    continue;
                }

                let mut ctx = Context::new(&self.graph, store, node, superstep, direction, value);
                let outcome = if superstep == 0 {
                    self.program
                        .init(&mut ctx)
                        .and_then(|()| self.program.compute(&mut ctx, messages))
                } else {
                    self.program.compute(&mut ctx, messages)
                };
                let (halted, out_of_range) = ctx.finish();

                if let Err(err) = outcome {
                    abort.store(true, Ordering::Relaxed);
                    return Err(PregelError::from_vertex_program(
                        err,
                        superstep,
                        partition.range(),
                        node,
                    ));
                }
                if let Some(source) = out_of_range {
                    abort.store(true, Ordering::Relaxed);
                    return Err(PregelError::OutOfRange {
                        superstep,
                        nodes: partition.range(),
                        node,
                        source,
                    });
                }

                *active = !halted;
                stats.computed += 1;
                stats.active += usize::from(*active);
            }
            Ok(stats)
        }));

        result.unwrap_or_else(|payload| {
            abort.store(true, Ordering::Relaxed);
            Err(PregelError::Computation {
                superstep,
                nodes: partition.range(),
                node: current.get(),
                source: anyhow::anyhow!("Vertex program panicked: {}", panic_message(&*payload)),
            })
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
