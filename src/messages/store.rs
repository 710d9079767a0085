/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::combiner::CombineFn;
use crate::error::OutOfRange;
use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

const RAYON_MIN_LEN: usize = 100000;

/// The messages received by a node in a superstep.
///
/// This is a finite, single-pass iterator over the messages sent to the node
/// during the previous superstep. If a combiner is in use, it returns at
/// most one message.
#[derive(Debug, Clone)]
pub struct Messages<M>(std::vec::IntoIter<M>);

impl<M> Messages<M> {
    /// Returns an empty set of messages.
    pub fn empty() -> Self {
        Self(Vec::new().into_iter())
    }

    /// Returns whether there are no (more) messages.
    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }
}

impl<M> Default for Messages<M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<M> From<Vec<M>> for Messages<M> {
    fn from(messages: Vec<M>) -> Self {
        Self(messages.into_iter())
    }
}

impl<M> Iterator for Messages<M> {
    type Item = M;

    #[inline(always)]
    fn next(&mut self) -> Option<M> {
        self.0.next()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<M> ExactSizeIterator for Messages<M> {}

/// A double-buffered store of per-node messages.
///
/// Messages [sent](MessageStore::send) during a superstep go into the
/// _write_ buffer, and become available through
/// [`messages_for`](MessageStore::messages_for) only after the next call to
/// [`begin_superstep`](MessageStore::begin_superstep), which turns the write
/// buffer into the _read_ buffer. Thus, a message is never visible in the
/// superstep in which it was sent.
///
/// Each node has its own bucket, protected by its own lock, so concurrent
/// senders contend only when they target the same node. With a combiner,
/// a bucket never holds more than one message.
pub struct MessageStore<M> {
    num_nodes: usize,
    combine: Option<CombineFn<M>>,
    read: Box<[Mutex<Vec<M>>]>,
    write: Box<[Mutex<Vec<M>>]>,
    /// The number of sends into the write buffer.
    sent: CachePadded<AtomicUsize>,
}

impl<M: Send> MessageStore<M> {
    /// Creates an empty store for `num_nodes` nodes, optionally combining
    /// messages sent to the same node with `combine`.
    pub fn new(num_nodes: usize, combine: Option<CombineFn<M>>) -> Self {
        let buckets = || {
            (0..num_nodes)
                .map(|_| Mutex::new(Vec::new()))
                .collect::<Vec<_>>()
                .into_boxed_slice()
        };
        Self {
            num_nodes,
            combine,
            read: buckets(),
            write: buckets(),
            sent: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns whether messages are combined.
    pub fn is_combining(&self) -> bool {
        self.combine.is_some()
    }

    /// Sends `message` to `target`; it will be delivered in the next
    /// superstep.
    ///
    /// This method can be called concurrently from any thread.
    pub fn send(&self, target: usize, message: M) -> Result<(), OutOfRange> {
        let bucket = self.write.get(target).ok_or(OutOfRange {
            target,
            num_nodes: self.num_nodes,
        })?;
        {
            let mut bucket = bucket.lock();
            match (self.combine, bucket.first_mut()) {
                (Some(combine), Some(acc)) => combine(acc, message),
                _ => bucket.push(message),
            }
        }
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Takes the messages delivered to `node` in this superstep.
    ///
    /// A second call for the same node in the same superstep returns no
    /// messages.
    ///
    /// # Panics
    ///
    /// If `node` is out of range.
    pub fn messages_for(&self, node: usize) -> Messages<M> {
        std::mem::take(&mut *self.read[node].lock()).into()
    }

    /// Returns whether any message was sent since the last call to
    /// [`begin_superstep`](MessageStore::begin_superstep).
    pub fn has_any_pending(&self) -> bool {
        self.pending() > 0
    }

    /// Returns the number of messages sent since the last call to
    /// [`begin_superstep`](MessageStore::begin_superstep).
    ///
    /// Combined messages are counted once per send.
    pub fn pending(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }

    /// Makes the messages sent so far visible, and starts collecting new
    /// messages in an empty buffer.
    ///
    /// Messages of the previous read buffer that were not taken are dropped.
    pub fn begin_superstep(&mut self) {
        std::mem::swap(&mut self.read, &mut self.write);
        self.write
            .par_iter_mut()
            .with_min_len(RAYON_MIN_LEN)
            .for_each(|bucket| bucket.get_mut().clear());
        self.sent.store(0, Ordering::Relaxed);
    }
}

impl<M> std::fmt::Debug for MessageStore<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("num_nodes", &self.num_nodes)
            .field("combining", &self.combine.is_some())
            .field("pending", &self.sent.load(Ordering::Relaxed))
            .finish()
    }
}
