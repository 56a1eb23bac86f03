//! Check execution engine
//!
//! Runs checks sequentially; each check awaits its request before the next
//! one starts.

mod runner;

pub use runner::CheckRunner;
