//! Library side of the `magicparse` command-line tool.

pub mod commands;
pub mod logging;
pub mod output;
