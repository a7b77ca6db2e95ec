use clap::Args;

use common::prelude::{PagePath, WikiError};

use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Mv {
    /// Qualified path of the page to move
    pub path: PagePath,

    /// Qualified path of the new parent ("." for the root)
    pub new_parent: PagePath,

    /// Rewrite qualified references to the page across the wiki
    #[arg(long)]
    pub refactor_references: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum MvError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("mv failed: {0}")]
    Wiki(WikiError),
    #[error("mv failed partway, inspect the page tree: {0}")]
    Partial(WikiError),
}

impl From<WikiError> for MvError {
    fn from(err: WikiError) -> Self {
        if super::needs_inspection(&err) {
            MvError::Partial(err)
        } else {
            MvError::Wiki(err)
        }
    }
}

#[async_trait::async_trait]
impl crate::op::Op for Mv {
    type Error = MvError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let wiki = ctx.wiki()?;
        let moved = wiki.mv(&self.path, &self.new_parent, self.refactor_references)?;
        Ok(format!("Moved {} to {}", self.path, moved))
    }
}
