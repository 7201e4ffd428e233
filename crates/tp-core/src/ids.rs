//! Index newtypes for graph and search entities.
//!
//! Each id wraps a `u32` slot number into a dense `Vec` owned by the graph
//! (vertices, edges) or by one search (states).  `u32::MAX` is reserved as
//! the `INVALID` sentinel, which is also the `Default`, so a forgotten
//! initialisation shows up as an invalid id instead of index 0.

use std::fmt;

macro_rules! typed_id {
    ($($(#[$attr:meta])* $name:ident;)+) => {$(
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Reserved slot; never refers to a real entity.
            pub const INVALID: $name = $name(u32::MAX);

            /// Slot number as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        /// Fails for indices that do not fit in `u32`.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    )+};
}

typed_id! {
    /// Street-graph vertex, numbered in insertion order.
    VertexId;

    /// Directed street-graph edge, numbered in insertion order.
    EdgeId;

    /// Search state inside one search's arena.  Meaningless outside the
    /// search that allocated it.
    StateId;
}
