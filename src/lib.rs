//! `fred-infographic` library crate.
//!
//! The binary (`infographic`) is a thin wrapper around this library so that:
//!
//! - the build pipeline is testable without network access or spawning processes
//! - the data source can be swapped for an in-memory one in tests

pub mod app;
pub mod archive;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod io;
pub mod render;
