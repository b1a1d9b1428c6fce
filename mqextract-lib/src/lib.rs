//! Split a stylesheet into base, per-breakpoint and keyframes files for
//! mobile-first loading.

pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod output;
pub mod parser;
pub mod style;

pub use error::{Error, Result};
