//! Page refactorings
//!
//! - **[`rename_page`]**: give a page a new simple name under the same parent
//! - **[`move_page`]**: hang a page (and its subtree) off a different parent
//! - **[`rename_references`]** / **[`move_references`]**: rewrite the text of
//!   every page that refers to a renamed or moved page
//!
//! # Staging
//!
//! Both structural refactorings run through the same sequence of
//! [`RenameStage`]s:
//!
//! ```text
//! Validating -> Locating -> CheckingCollision -> [RewritingReferences]
//!            -> MigratingTree -> RemovingSource -> Done
//! ```
//!
//! Any stage may fail, which aborts everything after it. Nothing that already
//! happened is undone: there is no rollback. Every check that can reject a
//! request runs before the first mutation, so validation failures leave the
//! tree untouched; a failure at or after `RewritingReferences` can leave it
//! half-refactored (see [`RefactorError::requires_inspection`]).
//!
//! # Migration
//!
//! Pages are never renamed in place. A new page is created under the new
//! name, the old page's data is copied into it, every descendant is
//! recreated beneath it, and only then is the old subtree detached. The
//! subtree is walked with an explicit worklist, so arbitrarily deep trees
//! are fine.

mod migrate;
mod move_page;
mod references;
mod rename;

use std::fmt;

use crate::page::PagePath;
use crate::store::StoreError;

pub use move_page::{move_page, MoveRequest};
pub use references::{move_references, rename_references, replace_qualified, replace_token};
pub use rename::{rename_page, RenameRequest};

/// Where a refactoring is (or was, when it failed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenameStage {
    Validating,
    Locating,
    CheckingCollision,
    RewritingReferences,
    MigratingTree,
    RemovingSource,
    Done,
}

impl fmt::Display for RenameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            RenameStage::Validating => "validating",
            RenameStage::Locating => "locating",
            RenameStage::CheckingCollision => "checking for collisions",
            RenameStage::RewritingReferences => "rewriting references",
            RenameStage::MigratingTree => "migrating tree",
            RenameStage::RemovingSource => "removing source",
            RenameStage::Done => "done",
        };
        write!(f, "{stage}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RefactorError {
    #[error("{0:?} is not a valid simple page name")]
    InvalidName(String),
    #[error("page not found: {0}")]
    NotFound(PagePath),
    #[error("new parent page not found: {0}")]
    ParentNotFound(PagePath),
    #[error("{name} already exists under '{parent}'")]
    Conflict { parent: PagePath, name: String },
    #[error("cannot move '{from}' beneath '{to}': destination is inside source")]
    MoveIntoSelf { from: PagePath, to: PagePath },
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
    #[error("store error while {stage}: {source}")]
    Store {
        stage: RenameStage,
        #[source]
        source: StoreError,
    },
}

impl RefactorError {
    /// Whether the tree may have been left partially refactored.
    ///
    /// Failures from reference rewriting onwards happen after the first
    /// mutation; nothing is rolled back, so the tree needs a look.
    pub fn requires_inspection(&self) -> bool {
        match self {
            RefactorError::Store { stage, .. } => *stage >= RenameStage::RewritingReferences,
            _ => false,
        }
    }
}

/// Tag a store failure with the stage it happened in
pub(crate) trait DuringStage<T> {
    fn during(self, stage: RenameStage) -> Result<T, RefactorError>;
}

impl<T> DuringStage<T> for Result<T, StoreError> {
    fn during(self, stage: RenameStage) -> Result<T, RefactorError> {
        self.map_err(|source| RefactorError::Store { stage, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_inspection() {
        let store_error = |stage| RefactorError::Store {
            stage,
            source: StoreError::PageMissing("PageOne".to_string()),
        };

        assert!(!store_error(RenameStage::Locating).requires_inspection());
        assert!(!store_error(RenameStage::CheckingCollision).requires_inspection());
        assert!(store_error(RenameStage::RewritingReferences).requires_inspection());
        assert!(store_error(RenameStage::MigratingTree).requires_inspection());
        assert!(store_error(RenameStage::RemovingSource).requires_inspection());
        assert!(!RefactorError::InvalidName("pageOne".to_string()).requires_inspection());
    }

    #[test]
    fn test_stages_are_ordered() {
        let stages = [
            RenameStage::Validating,
            RenameStage::Locating,
            RenameStage::CheckingCollision,
            RenameStage::RewritingReferences,
            RenameStage::MigratingTree,
            RenameStage::RemovingSource,
            RenameStage::Done,
        ];
        assert!(stages.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(RenameStage::Done.to_string(), "done");
    }

    #[test]
    fn test_store_error_names_stage() {
        let err = Err::<(), _>(StoreError::PageMissing("PageOne".to_string()))
            .during(RenameStage::MigratingTree);
        let message = err.unwrap_err().to_string();
        assert_eq!(message, "store error while migrating tree: page no longer exists: PageOne");
    }
}
