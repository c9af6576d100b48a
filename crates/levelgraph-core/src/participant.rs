//! The identity contract for values stored in a [`LevelGraph`](crate::graph::LevelGraph).

use std::fmt::Debug;
use std::hash::Hash;

/// An opaque identity acting as a graph vertex key.
///
/// Equality and hashing decide whether two insertions refer to the same node.
/// [`Participant::id`] gives a total order used to sort participants that
/// share a level, which keeps equality checks and level listings
/// deterministic.
pub trait Participant: Clone + Eq + Hash + Debug {
    /// Orderable identifier.
    type Id: Ord;

    /// Returns the sort key of this participant.
    fn id(&self) -> Self::Id;
}

impl Participant for String {
    type Id = String;

    fn id(&self) -> String {
        self.clone()
    }
}

impl<'a> Participant for &'a str {
    type Id = &'a str;

    fn id(&self) -> &'a str {
        *self
    }
}

impl Participant for char {
    type Id = char;

    fn id(&self) -> char {
        *self
    }
}

macro_rules! integer_participant {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Participant for $ty {
                type Id = $ty;

                fn id(&self) -> $ty {
                    *self
                }
            }
        )*
    };
}

integer_participant!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
