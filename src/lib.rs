#![forbid(unsafe_code)]
//! vread — flatten a directory tree into a single text snapshot of its
//! structure and file contents.

pub mod cli;
pub mod config;
pub mod dump;
pub mod snapshot;
pub mod tree;
