//! Declaration-side nodes: everything a caller writes to describe a class.

mod behavior;
mod class;
mod enumeration;
mod field;
mod func;
mod index;
mod prop;
mod relation;
mod type_ref;

pub use behavior::*;
pub use class::*;
pub use enumeration::*;
pub use field::*;
pub use func::*;
pub use index::*;
pub use prop::*;
pub use relation::*;
pub use type_ref::*;
