//! CLI module for Dropwatch
//!
//! Each subcommand lives in its own module with an `*Args` struct and a
//! `run` entry point. Output helpers and operator-facing errors are shared.

pub mod error;
pub mod output;

pub mod inspect;
pub mod run;
pub mod select;
pub mod watch;
