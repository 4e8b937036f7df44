//! This module is the missing-aware vectorized layer collaborators call.
//!
//! Functions take borrowed slices (`&[W]`), write into caller-supplied
//! destinations (`&mut [W]`) or return new vectors (`Vec<W>`). All lengths are
//! validated before anything is written.

pub mod arithmetic;
pub mod compare;


pub use arithmetic::*;
pub use compare::*;
