//! Route handlers.

pub mod map;
pub mod spatial;
