//! Diagnostics tooling for the autocomplete engine: input adapters that turn
//! text files into weighted unit sequences, and the `actool` subcommands.

pub mod adapters;
pub mod commands;
