/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]
#![allow(clippy::type_complexity)]

pub mod algo;
pub mod error;
pub mod graphs;
pub mod messages;
pub mod pregel;
pub mod traits;

#[macro_use]
pub mod utils;

pub mod prelude {
    pub use crate::error::*;
    pub use crate::graphs::*;
    pub use crate::messages::*;
    pub use crate::pregel::*;
    pub use crate::traits::*;
    pub use crate::utils::*;
}
