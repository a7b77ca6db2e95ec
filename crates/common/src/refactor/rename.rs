use serde::{Deserialize, Serialize};

use crate::crawler::resolve;
use crate::page::{is_single_wiki_word, PagePath};
use crate::store::PageStore;

use super::migrate::migrate_page;
use super::references::rename_references;
use super::{DuringStage, RefactorError, RenameStage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRequest {
    /// Qualified name of the page to rename
    pub path: PagePath,
    /// New simple name, kept under the same parent
    pub new_name: String,
    /// Also rewrite references to the old name in every page's content
    #[serde(default)]
    pub refactor_references: bool,
}

impl RenameRequest {
    pub fn new(path: PagePath, new_name: impl Into<String>) -> Self {
        Self {
            path,
            new_name: new_name.into(),
            refactor_references: false,
        }
    }

    pub fn refactor_references(mut self, refactor_references: bool) -> Self {
        self.refactor_references = refactor_references;
        self
    }
}

/// Rename the page at `request.path` (resolved from `root`) to `request.new_name`.
///
/// Returns the page's new qualified name. `front_page` is the reserved
/// entry-point name, which can neither be renamed nor be renamed to.
///
/// The page's data and its whole subtree end up under the new name; the
/// old page is gone afterwards. When `refactor_references` is set, every
/// page under `root` that mentions the old name as a word is rewritten
/// first, while the tree still has its old shape.
///
/// # Errors
///
/// - `InvalidName` - new name is not a single wiki word, is the front page,
///   or the request targets the root or the front page
/// - `NotFound` - nothing lives at `request.path`
/// - `Conflict` - the parent already has a child called `new_name`
/// - `InternalInconsistency` - the page resolved but its parent did not
/// - `Store` - the store failed; check `requires_inspection` before retrying
pub fn rename_page<S: PageStore>(
    store: &mut S,
    root: &S::Page,
    front_page: &str,
    request: &RenameRequest,
) -> Result<PagePath, RefactorError> {
    let RenameRequest {
        path,
        new_name,
        refactor_references,
    } = request;

    tracing::debug!("rename_page: {}: {} -> {}", RenameStage::Validating, path, new_name);
    if !is_single_wiki_word(new_name) || new_name == front_page {
        return Err(RefactorError::InvalidName(new_name.clone()));
    }
    let old_name = match path.last() {
        Some(name) if !(path.len() == 1 && name == front_page) => name,
        _ => return Err(RefactorError::InvalidName(path.render())),
    };

    tracing::debug!("rename_page: {}: {}", RenameStage::Locating, path);
    if resolve(store, root, path).during(RenameStage::Locating)?.is_none() {
        return Err(RefactorError::NotFound(path.clone()));
    }
    let parent_path = path
        .parent_path()
        .map_err(|e| RefactorError::InternalInconsistency(e.to_string()))?;
    let parent = resolve(store, root, &parent_path)
        .during(RenameStage::Locating)?
        .ok_or_else(|| {
            RefactorError::InternalInconsistency(format!(
                "page {path} exists but its parent '{parent_path}' does not"
            ))
        })?;

    tracing::debug!("rename_page: {}: {}", RenameStage::CheckingCollision, new_name);
    if store
        .has_child(&parent, new_name)
        .during(RenameStage::CheckingCollision)?
    {
        return Err(RefactorError::Conflict {
            parent: parent_path,
            name: new_name.clone(),
        });
    }

    if *refactor_references {
        let rewritten = rename_references(store, root, old_name, new_name)
            .during(RenameStage::RewritingReferences)?;
        tracing::debug!(
            "rename_page: {}: {} pages updated",
            RenameStage::RewritingReferences,
            rewritten
        );
    }

    tracing::debug!("rename_page: {}: {}", RenameStage::MigratingTree, path);
    if migrate_page(store, &parent, old_name, &parent, new_name)?.is_none() {
        tracing::warn!("rename_page: tree changed underneath rename of {}, nothing migrated", path);
    }

    let renamed = path
        .with_last_replaced(new_name)
        .map_err(|e| RefactorError::InternalInconsistency(e.to_string()))?;
    tracing::info!("rename_page: {}: renamed {} to {}", RenameStage::Done, path, renamed);
    Ok(renamed)
}
