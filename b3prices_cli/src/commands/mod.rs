//! CLI subcommand implementations.

pub mod fetch;
pub mod ranges;
pub mod symbols;
