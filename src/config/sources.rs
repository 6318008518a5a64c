//! Configuration file sources, in precedence order.

pub mod explicit_file;
pub mod global_file;
