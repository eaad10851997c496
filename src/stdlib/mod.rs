//! Standard library for the minecart machine.
//!
//! Provides the closed set of built-in operations and the substitution
//! table they consult.

pub mod builtins;
pub mod furnace;

pub use builtins::{Builtin, ChunkPolicy, store_get, store_put, smelt, permute, run_lengths};
pub use furnace::SubstitutionTable;
