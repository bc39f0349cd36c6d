//! Command handlers for erweapons CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod check;
pub mod compile;
pub mod configure;
pub mod inspect;
