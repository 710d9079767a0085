/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/// The reductions that can be applied to messages sent to the same node.
///
/// On integers all reductions are commutative and associative, so the
/// result does not depend on the order in which concurrent senders reach a
/// node. Floating-point addition is not associative: a
/// [`Sum`](CombinerKind::Sum) of floating-point messages may differ in the
/// last bits from run to run, or when the number of threads changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinerKind {
    /// Keep the smallest message.
    Min,
    /// Keep the largest message.
    Max,
    /// Keep the sum of the messages (saturating for unsigned integers,
    /// wrapping for signed integers).
    Sum,
}

/// A function folding a new message into the one already stored.
pub type CombineFn<M> = fn(&mut M, M);

/// Message types that can be reduced by a [`CombinerKind`].
///
/// The reduction depends only on the message type, never on the superstep
/// or on the sender. The trait is implemented for all primitive numeric
/// types; other message types can opt out of combining with an empty
/// implementation:
///
/// ```
/// use webgraph_pregel::messages::{Combine, CombinerKind};
///
/// #[derive(Clone)]
/// struct Visit { from: usize, hops: u32 }
///
/// impl Combine for Visit {}
///
/// assert!(Visit::combine_fn(CombinerKind::Min).is_none());
/// assert!(u32::combine_fn(CombinerKind::Min).is_some());
/// ```
pub trait Combine: Sized {
    /// Returns the function implementing `kind` for this type, or [`None`]
    /// if the type cannot be combined that way.
    fn combine_fn(kind: CombinerKind) -> Option<CombineFn<Self>> {
        let _ = kind;
        None
    }
}

#[inline(always)]
fn min<M: PartialOrd>(acc: &mut M, message: M) {
    if message < *acc {
        *acc = message;
    }
}

#[inline(always)]
fn max<M: PartialOrd>(acc: &mut M, message: M) {
    if message > *acc {
        *acc = message;
    }
}

macro_rules! impl_combine_int {
    ($sum:ident; $($ty:ty),*) => {$(
        impl Combine for $ty {
            fn combine_fn(kind: CombinerKind) -> Option<CombineFn<Self>> {
                let combine: CombineFn<Self> = match kind {
                    CombinerKind::Min => min::<$ty>,
                    CombinerKind::Max => max::<$ty>,
                    CombinerKind::Sum => |acc, message| *acc = acc.$sum(message),
                };
                Some(combine)
            }
        }
    )*};
}

macro_rules! impl_combine_float {
    ($($ty:ty),*) => {$(
        impl Combine for $ty {
            fn combine_fn(kind: CombinerKind) -> Option<CombineFn<Self>> {
                let combine: CombineFn<Self> = match kind {
                    CombinerKind::Min => min::<$ty>,
                    CombinerKind::Max => max::<$ty>,
                    CombinerKind::Sum => |acc, message| *acc += message,
                };
                Some(combine)
            }
        }
    )*};
}

// Saturating addition is associative only on unsigned types
impl_combine_int!(saturating_add; u8, u16, u32, u64, u128, usize);
impl_combine_int!(wrapping_add; i8, i16, i32, i64, i128, isize);
impl_combine_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn fold<M: Combine + Copy>(kind: CombinerKind, messages: &[M]) -> M {
        let f = M::combine_fn(kind).unwrap();
        let mut acc = messages[0];
        for &m in &messages[1..] {
            f(&mut acc, m);
        }
        acc
    }

    #[test]
    fn test_integer_combiners() {
        let messages = [7_u64, 3, 9, 3];
        assert_eq!(fold(CombinerKind::Min, &messages), 3);
        assert_eq!(fold(CombinerKind::Max, &messages), 9);
        assert_eq!(fold(CombinerKind::Sum, &messages), 22);
        assert_eq!(fold(CombinerKind::Sum, &[u64::MAX, 1]), u64::MAX);
    }

    #[test]
    fn test_float_combiners() {
        let messages = [0.5_f64, -1.0, 2.25];
        assert_eq!(fold(CombinerKind::Min, &messages), -1.0);
        assert_eq!(fold(CombinerKind::Max, &messages), 2.25);
        assert_eq!(fold(CombinerKind::Sum, &messages), 1.75);
    }

    #[test]
    fn test_integer_sum_is_order_independent() {
        // Saturating at an intermediate step would give 126 or 127
        assert_eq!(fold(CombinerKind::Sum, &[127_i8, 1, -1]), 127);
        assert_eq!(fold(CombinerKind::Sum, &[127_i8, -1, 1]), 127);
        assert_eq!(fold(CombinerKind::Sum, &[-1_i8, 1, 127]), 127);
        assert_eq!(fold(CombinerKind::Sum, &[1_i8, 127, -1]), 127);
        assert_eq!(fold(CombinerKind::Sum, &[i64::MIN, -1, 1]), i64::MIN);
        assert_eq!(fold(CombinerKind::Sum, &[-1, i64::MIN, 1]), i64::MIN);

        for messages in [[200_u8, 100, 3], [3, 100, 200], [100, 3, 200]] {
            assert_eq!(fold(CombinerKind::Sum, &messages), u8::MAX);
        }
    }

    #[test]
    fn test_float_sum_depends_on_order() {
        let forward = fold(CombinerKind::Sum, &[1E16_f64, 1.0, 1.0]);
        let backward = fold(CombinerKind::Sum, &[1.0_f64, 1.0, 1E16]);
        assert_ne!(forward, backward);
        assert!((forward - backward).abs() <= 2.0);
    }
}
