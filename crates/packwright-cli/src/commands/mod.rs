//! Command implementations for the Packwright CLI.
//!
//! - [`build`] - assemble and emit the pipeline configuration as JSON
//! - [`check`] - validate declarations without emitting anything
//! - [`resolve`] - resolve one module specifier
//! - [`init`] - write a starter `packwright.toml`
//!
//! Each command lives in its own module and exposes an `execute` function
//! taking its parsed arguments.

pub mod build;
pub mod check;
pub mod init;
pub mod resolve;
pub mod utils;

pub use build::execute as build_execute;
pub use check::execute as check_execute;
pub use init::execute as init_execute;
pub use resolve::execute as resolve_execute;
