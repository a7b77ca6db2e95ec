pub mod add;
pub mod cat;
pub mod init;
pub mod ls;
pub mod mv;
pub mod rename;
pub mod version;

pub use add::Add;
pub use cat::Cat;
pub use init::Init;
pub use ls::Ls;
pub use mv::Mv;
pub use rename::Rename;
pub use version::Version;

use common::prelude::WikiError;

/// Whether a failed refactoring may have left the tree half-migrated
pub(crate) fn needs_inspection(err: &WikiError) -> bool {
    matches!(err, WikiError::Refactor(e) if e.requires_inspection())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::op::{Op, OpContext};

    fn path(text: &str) -> common::prelude::PagePath {
        text.parse().unwrap()
    }

    async fn setup() -> (OpContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let ctx = OpContext::new(Some(temp_dir.path().join("state")));
        Init {
            pages_dir: None,
            front_page: "FrontPage".to_string(),
            log_level: "warn".to_string(),
            log_dir: None,
        }
        .execute(&ctx)
        .await
        .unwrap();
        (ctx, temp_dir)
    }

    async fn add(ctx: &OpContext, at: &str, content: &str) {
        Add {
            path: path(at),
            content: content.to_string(),
            properties: vec![],
        }
        .execute(ctx)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_add_and_cat() {
        let (ctx, _temp_dir) = setup().await;
        Add {
            path: path("ProjectDocs"),
            content: "!1 Docs".to_string(),
            properties: vec![("Suite".to_string(), "true".to_string())],
        }
        .execute(&ctx)
        .await
        .unwrap();

        let output = Cat {
            path: path("ProjectDocs"),
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(output, "!1 Docs");

        let data = ctx.wiki().unwrap().data(&path("ProjectDocs")).unwrap();
        assert_eq!(data.property("Suite"), Some("true"));
    }

    #[tokio::test]
    async fn test_ls() {
        let (ctx, _temp_dir) = setup().await;
        add(&ctx, "ProjectDocs.InstallGuide", "").await;

        let output = Ls {
            path: path("."),
            deep: false,
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(output, "FrontPage\nProjectDocs");

        let output = Ls {
            path: path("ProjectDocs"),
            deep: true,
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(output, "ProjectDocs.InstallGuide");

        let output = Ls {
            path: path("ProjectDocs.InstallGuide"),
            deep: false,
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(output, "No pages found");
    }

    #[tokio::test]
    async fn test_rename_and_mv() {
        let (ctx, _temp_dir) = setup().await;
        add(&ctx, "ProjectDocs", "See InstallGuide").await;
        add(&ctx, "ProjectDocs.InstallGuide", "").await;
        add(&ctx, "ArchivePage", "").await;

        let output = Rename {
            path: path("ProjectDocs.InstallGuide"),
            new_name: "SetupGuide".to_string(),
            refactor_references: true,
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(output, "Renamed ProjectDocs.InstallGuide to ProjectDocs.SetupGuide");

        let output = Mv {
            path: path("ProjectDocs.SetupGuide"),
            new_parent: path("ArchivePage"),
            refactor_references: false,
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(output, "Moved ProjectDocs.SetupGuide to ArchivePage.SetupGuide");

        let wiki = ctx.wiki().unwrap();
        assert_eq!(wiki.cat(&path("ProjectDocs")).unwrap(), "See SetupGuide");
        assert!(wiki.exists(&path("ArchivePage.SetupGuide")).unwrap());
    }

    #[tokio::test]
    async fn test_rename_front_page_is_refused() {
        let (ctx, _temp_dir) = setup().await;

        let result = Rename {
            path: path("FrontPage"),
            new_name: "HomePage".to_string(),
            refactor_references: false,
        }
        .execute(&ctx)
        .await;
        assert!(matches!(result, Err(rename::RenameError::Wiki(_))));
    }

    #[tokio::test]
    async fn test_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = OpContext::new(Some(temp_dir.path().join("missing")));

        let result = Cat {
            path: path("FrontPage"),
        }
        .execute(&ctx)
        .await;
        assert!(matches!(result, Err(cat::CatError::State(_))));
    }
}
