pub mod command;
pub mod run;

pub use command::Cli;
pub use run::{log_filter, run_app};
