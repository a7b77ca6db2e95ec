use clap::Args;

use common::prelude::{PagePath, WikiError};

use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Cat {
    /// Qualified page path
    pub path: PagePath,
}

#[derive(Debug, thiserror::Error)]
pub enum CatError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("cat failed: {0}")]
    Wiki(#[from] WikiError),
}

#[async_trait::async_trait]
impl crate::op::Op for Cat {
    type Error = CatError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(ctx.wiki()?.cat(&self.path)?)
    }
}
