//! Common utilities for the Sprig selector engine.
//!
//! This crate provides shared infrastructure used by the tree and selector crates:
//! - **Warning System** - colored, de-duplicated stderr diagnostics for input
//!   the engine accepts but cannot make sense of

pub mod warning;
