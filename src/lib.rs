//! `cdr-rates` library crate.
//!
//! The binary (`rates`) is a thin wrapper around this library so that:
//!
//! - the crawl pipeline is testable without spawning processes
//! - modules are reusable (e.g., future scheduler/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod rates;
pub mod report;
