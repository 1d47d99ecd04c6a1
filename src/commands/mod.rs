//! # CLI Command Implementations
//!
//! One module per `partner-access` subcommand. Each defines a clap `Args`
//! struct and an `execute` function that calls into the `partner_access`
//! library and prints the result.
//!
//! `table_args` holds the flags shared by every command that works on the
//! membership/permission file pair.

pub mod add;
pub mod check;
pub mod completions;
pub mod members;
pub mod remove;
pub mod table_args;
