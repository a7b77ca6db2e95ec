mod args;
mod logging;
mod op;
mod ops;
mod state;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Add, Cat, Init, Ls, Mv, Rename, Version};
use state::{AppConfig, AppState};

command_enum! {
    (Init, Init),
    (Add, Add),
    (Cat, Cat),
    (Ls, Ls),
    (Rename, Rename),
    (Mv, Mv),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logging follows the stored config when there is one
    let config = AppState::load(args.config_path.clone())
        .map(|state| state.config)
        .unwrap_or_else(|_| AppConfig::default());
    let guards = logging::init_logging(config.tracing_level(), config.log_dir.as_deref());

    let ctx = op::OpContext::new(args.config_path);

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            // exit skips destructors; flush pending log lines first
            drop(guards);
            std::process::exit(1);
        }
    }
}
