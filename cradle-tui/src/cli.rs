use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cradle-tui")]
#[command(about = "Terminal UI for the cradle baby log")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against a real cradle record service
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print config path and create default file if missing
    ConfigPath,
}
