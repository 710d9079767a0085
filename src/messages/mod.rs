/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Message passing between supersteps.
//!
//! There is a single message representation: a per-node bucket that either
//! accumulates all messages or, if a [combiner](CombinerKind) is in use,
//! reduces them to one as they arrive.

mod combiner;
pub use combiner::*;

mod store;
pub use store::*;
