//! Command line interface for the `xiphos` binary.

pub mod args;
pub mod commands;
pub mod output;
