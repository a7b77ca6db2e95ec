pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wikitree")]
#[command(about = "Rename and move pages in a wiki page tree")]
pub struct Args {
    /// Path to the wikitree config directory (defaults to ~/.wikitree)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
