/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Built-in vertex programs.
//!
//! Each module provides a [`VertexProgram`](crate::pregel::VertexProgram)
//! implementation and a `run` function executing it with a given
//! [`Config`](crate::pregel::Config).

pub mod label_propagation;
pub mod pagerank;
pub mod sssp;
pub mod wcc;
