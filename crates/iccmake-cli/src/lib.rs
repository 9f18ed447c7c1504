pub mod commands;
pub mod synthesize;
pub mod templates;

pub use commands::{Args, Subcommands};

type Result<T> = anyhow::Result<T>;
