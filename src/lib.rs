//! Wavefront: the objective search engine behind a computer strategy player.
//!
//! Exposes grid and map representations, the breadth-first objective and
//! destination searches, path marking and direction choice, continent
//! scanning, and unexplored-terrain inference for use by the query binary
//! and integration tests.

pub mod board;
pub mod config;
pub mod engine;
pub mod inference;
pub mod protocol;
pub mod region;
pub mod search;
