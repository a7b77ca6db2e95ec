use clap::Args;

use common::prelude::{PagePath, WikiError};

use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Page to list under (default: the root)
    #[arg(default_value = ".")]
    pub path: PagePath,

    /// List every descendant, not just the children
    #[arg(long)]
    pub deep: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("ls failed: {0}")]
    Wiki(#[from] WikiError),
}

#[async_trait::async_trait]
impl crate::op::Op for Ls {
    type Error = LsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let wiki = ctx.wiki()?;
        let pages = if self.deep {
            wiki.ls_deep(&self.path)?
        } else {
            wiki.ls(&self.path)?
        };

        if pages.is_empty() {
            Ok("No pages found".to_string())
        } else {
            Ok(pages
                .iter()
                .map(|page| page.render())
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
