//! N-gram generation and counting
//!
//! [`NgramEngine`] owns the word set and the n-gram table for a whole session.
//! It runs in the single consumer task, so neither structure needs locking.

mod engine;
mod table;

pub use engine::NgramEngine;
pub use table::{CountMode, NgramTable};
