//! Filesystem utilities for promptamp.
//!
//! Prompt documents and generated scripts are written atomically so that a
//! crash mid-write never leaves a truncated document in the library.

pub mod atomic;

pub use atomic::atomic_write_file;
