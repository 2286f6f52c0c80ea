pub mod commands;
pub mod output;

pub use commands::{CliArgs, ClassifyArgs, Commands, PlanArgs};
pub use output::{OutputFormat, OutputFormatter};
