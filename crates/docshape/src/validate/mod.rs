//! Declaration-boundary checks shared by the node and build layers.

pub mod naming;
