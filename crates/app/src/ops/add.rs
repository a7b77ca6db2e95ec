use clap::Args;

use common::prelude::{PagePath, WikiError};

use crate::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Add {
    /// Qualified page path, e.g. ProjectDocs.InstallGuide
    pub path: PagePath,

    /// Page content
    pub content: String,

    /// Page property as KEY=VALUE, may repeat
    #[arg(long = "property", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", raw)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error("{0}")]
    State(#[from] StateError),
    #[error("add failed: {0}")]
    Wiki(#[from] WikiError),
}

#[async_trait::async_trait]
impl crate::op::Op for Add {
    type Error = AddError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let wiki = ctx.wiki()?;
        wiki.add(&self.path, &self.content)?;
        for (key, value) in &self.properties {
            wiki.set_property(&self.path, key, value)?;
        }
        Ok(format!("Added {}", self.path))
    }
}
