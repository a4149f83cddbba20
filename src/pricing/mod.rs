//! Grid pricing engine
//!
//! Parameter resolution and 20x20 call/put grid construction.

pub mod engine;

pub use engine::*;
