//! Index newtypes for the two graph levels.
//!
//! A value of one of these types is a position in the parallel arrays of a
//! single request's graphs, nothing more: ids are not stable across
//! requests and never leave the process, so they carry no serialization or
//! integer-conversion surface.  The newtypes exist purely to stop a
//! street-level index from being used on the condensed graph (and vice
//! versa) at compile time.
//!
//! Each type prints with a short prefix so ids of different levels stay
//! readable when they meet in a log line ("n812", "j4").

use std::fmt;

macro_rules! index_type {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        pub struct $name(pub u32);

        impl $name {
            /// Marker for "points at nothing yet".  Predecessor arrays are
            /// filled with this before a search reaches their nodes.
            pub const INVALID: $name = $name(u32::MAX);

            /// The position this id names in its parallel arrays.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

index_type! {
    /// A raw node of the street-level network.
    NodeId, "n"
}

index_type! {
    /// A directed edge of the street-level network.
    EdgeId, "e"
}

index_type! {
    /// A signed junction of the condensed graph.
    JunctionId, "j"
}

index_type! {
    /// An undirected corridor of the condensed graph.
    JunctionEdgeId, "c"
}
