//! A line-oriented console over the shortener and redirector services.
//!
//! Each input line is one [`Command`]; each command produces exactly one line
//! of JSON on the output.

pub mod command;
pub mod console;

pub use command::{Command, CommandError};
pub use console::Console;
