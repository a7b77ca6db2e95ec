use std::path::PathBuf;

use clap::Args;

use crate::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Directory for the page tree (default: <config path>/pages)
    #[arg(long)]
    pub pages_dir: Option<PathBuf>,

    /// Name of the reserved front page
    #[arg(long, default_value = common::wiki::DEFAULT_FRONT_PAGE)]
    pub front_page: String,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Also write logs to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] crate::state::StateError),
}

#[async_trait::async_trait]
impl crate::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            pages_dir: self.pages_dir.clone(),
            front_page: self.front_page.clone(),
            log_level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let output = format!(
            "Initialized wikitree directory at: {}\n\
             - Pages: {}\n\
             - Config: {}\n\
             - Front page: {}\n\
             - Log level: {}",
            state.wikitree_dir.display(),
            state.pages_path.display(),
            state.config_path.display(),
            state.config.front_page,
            state.config.log_level,
        );

        Ok(output)
    }
}
