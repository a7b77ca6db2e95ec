use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Version;

#[async_trait::async_trait]
impl crate::op::Op for Version {
    type Error = std::convert::Infallible;
    type Output = String;

    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(format!(
            "wikitree {} ({}, {} build, built {} with {})",
            env!("CARGO_PKG_VERSION"),
            env!("REPO_VERSION"),
            env!("BUILD_PROFILE"),
            env!("BUILD_TIMESTAMP"),
            env!("RUST_VERSION"),
        ))
    }
}
