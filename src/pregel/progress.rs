/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Statistics about a completed superstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuperstepReport {
    /// The index of the superstep, starting from zero.
    pub superstep: usize,
    /// The number of nodes that did not vote to halt.
    pub active_nodes: usize,
    /// The number of nodes computed in the superstep.
    pub computed_nodes: usize,
    /// The number of messages sent in the superstep.
    pub messages_sent: usize,
    /// Whether some message will be delivered in the next superstep.
    pub pending_messages: bool,
}

/// An observer of a run, notified at each superstep barrier.
///
/// [`is_cancelled`](Reporter::is_cancelled) is polled only at barriers, after
/// [`superstep_completed`](Reporter::superstep_completed), so a cancelled run
/// always ends in the state left by a complete superstep.
pub trait Reporter {
    fn superstep_completed(&mut self, report: &SuperstepReport) {
        let _ = report;
    }

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// No reporting and no cancellation.
impl Reporter for () {}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn superstep_completed(&mut self, report: &SuperstepReport) {
        (**self).superstep_completed(report)
    }

    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// A cancellation flag that can be shared across threads.
///
/// Clones share the same flag, so a clone can be handed to the executor
/// while the original is used to cancel the run from elsewhere.
///
/// ```
/// use webgraph_pregel::prelude::*;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// assert!(!handle.is_cancelled());
/// token.cancel();
/// assert!(handle.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the run stops at the next barrier.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Reporter for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}

/// A reporter logging each superstep at the `info` level, optionally
/// cancellable.
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    token: Option<CancellationToken>,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the reporter cancellable through `token`.
    pub fn with_token(token: CancellationToken) -> Self {
        Self { token: Some(token) }
    }
}

impl Reporter for LogReporter {
    fn superstep_completed(&mut self, report: &SuperstepReport) {
        log::info!(
            "Superstep {}: {} nodes computed, {} still active, {} messages sent",
            report.superstep,
            report.computed_nodes,
            report.active_nodes,
            report.messages_sent
        );
    }

    fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(|t| t.is_cancelled())
    }
}
