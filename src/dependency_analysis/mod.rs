//! Dependency analysis domain: pure types and algorithms with no I/O.

pub mod domain;
pub mod policies;
pub mod services;
