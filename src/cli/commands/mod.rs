//! One module per subcommand.

pub mod add;
pub mod clear;
pub mod completions;
pub mod drop;
pub mod extract;
pub mod init;
pub mod list;
pub mod recover;
pub mod remove;
