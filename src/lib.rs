// src/lib.rs

#[macro_use]
pub mod macros;

pub mod browser;
pub mod config;
pub mod core;
pub mod csv;
pub mod dates;
pub mod error;
pub mod file;
pub mod job;
pub mod log;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
