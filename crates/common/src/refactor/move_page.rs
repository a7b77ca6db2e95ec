use serde::{Deserialize, Serialize};

use crate::crawler::resolve;
use crate::page::PagePath;
use crate::store::PageStore;

use super::migrate::migrate_page;
use super::references::move_references;
use super::{DuringStage, RefactorError, RenameStage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Qualified name of the page to move
    pub path: PagePath,
    /// Qualified name of the page it should end up under (empty for the root)
    pub new_parent: PagePath,
    /// Also rewrite absolute references to the page in every page's content
    #[serde(default)]
    pub refactor_references: bool,
}

impl MoveRequest {
    pub fn new(path: PagePath, new_parent: PagePath) -> Self {
        Self {
            path,
            new_parent,
            refactor_references: false,
        }
    }

    pub fn refactor_references(mut self, refactor_references: bool) -> Self {
        self.refactor_references = refactor_references;
        self
    }
}

/// Move the page at `request.path`, with its subtree, under `request.new_parent`.
///  The page keeps its simple name. Returns its new qualified name.
///
/// # Errors
///
/// - `InvalidName` - the request targets the root or the front page
/// - `MoveIntoSelf` - the new parent is the page itself or lies beneath it
/// - `NotFound` / `ParentNotFound` - the page or the new parent don't exist
/// - `Conflict` - the new parent already has a child with the page's name
///   (this includes moving a page to the parent it already has)
pub fn move_page<S: PageStore>(
    store: &mut S,
    root: &S::Page,
    front_page: &str,
    request: &MoveRequest,
) -> Result<PagePath, RefactorError> {
    let MoveRequest {
        path,
        new_parent,
        refactor_references,
    } = request;

    tracing::debug!("move_page: {}: {} -> {}", RenameStage::Validating, path, new_parent);
    let name = match path.last() {
        Some(name) if !(path.len() == 1 && name == front_page) => name,
        _ => return Err(RefactorError::InvalidName(path.render())),
    };
    if new_parent.starts_with(path) {
        return Err(RefactorError::MoveIntoSelf {
            from: path.clone(),
            to: new_parent.clone(),
        });
    }

    tracing::debug!("move_page: {}: {}", RenameStage::Locating, path);
    if resolve(store, root, path).during(RenameStage::Locating)?.is_none() {
        return Err(RefactorError::NotFound(path.clone()));
    }
    let old_parent_path = path
        .parent_path()
        .map_err(|e| RefactorError::InternalInconsistency(e.to_string()))?;
    let old_parent = resolve(store, root, &old_parent_path)
        .during(RenameStage::Locating)?
        .ok_or_else(|| {
            RefactorError::InternalInconsistency(format!(
                "page {path} exists but its parent '{old_parent_path}' does not"
            ))
        })?;
    let Some(dest_parent) = resolve(store, root, new_parent).during(RenameStage::Locating)? else {
        return Err(RefactorError::ParentNotFound(new_parent.clone()));
    };

    tracing::debug!("move_page: {}: {}", RenameStage::CheckingCollision, name);
    if store
        .has_child(&dest_parent, name)
        .during(RenameStage::CheckingCollision)?
    {
        return Err(RefactorError::Conflict {
            parent: new_parent.clone(),
            name: name.to_string(),
        });
    }

    let moved = new_parent
        .join(name)
        .map_err(|e| RefactorError::InternalInconsistency(e.to_string()))?;

    if *refactor_references {
        let rewritten = move_references(store, root, path, &moved)
            .during(RenameStage::RewritingReferences)?;
        tracing::debug!(
            "move_page: {}: {} pages updated",
            RenameStage::RewritingReferences,
            rewritten
        );
    }

    tracing::debug!("move_page: {}: {}", RenameStage::MigratingTree, path);
    if migrate_page(store, &old_parent, name, &dest_parent, name)?.is_none() {
        tracing::warn!("move_page: tree changed underneath move of {}, nothing migrated", path);
    }

    tracing::info!("move_page: {}: moved {} to {}", RenameStage::Done, path, moved);
    Ok(moved)
}
