use clap::Args;

use common::prelude::{PagePath, WikiError};

use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Rename {
    /// Qualified path of the page to rename
    pub path: PagePath,

    /// New simple name, e.g. UserManual
    pub new_name: String,

    /// Rewrite references to the old name across the wiki
    #[arg(long)]
    pub refactor_references: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("rename failed: {0}")]
    Wiki(WikiError),
    #[error("rename failed partway, inspect the page tree: {0}")]
    Partial(WikiError),
}

impl From<WikiError> for RenameError {
    fn from(err: WikiError) -> Self {
        if super::needs_inspection(&err) {
            RenameError::Partial(err)
        } else {
            RenameError::Wiki(err)
        }
    }
}

#[async_trait::async_trait]
impl crate::op::Op for Rename {
    type Error = RenameError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let wiki = ctx.wiki()?;
        let renamed = wiki.rename(&self.path, &self.new_name, self.refactor_references)?;
        Ok(format!("Renamed {} to {}", self.path, renamed))
    }
}
