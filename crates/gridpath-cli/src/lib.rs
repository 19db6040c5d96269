//! gridpath CLI library.
//!
//! This crate provides the terminal front end for the gridpath demonstrator:
//! subcommand handlers, grid rendering, terminal styling and logging setup.

pub mod commands;
pub mod logging;
pub mod output;
pub mod terminal;
