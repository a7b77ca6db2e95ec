use crate::page::{PagePath, PathError};
use crate::store::{PageStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Walking parent links from a page never reached the root.
    ///  Callers hitting this have handed in a page from somewhere else.
    #[error("page {0} is not beneath the given root")]
    NotDescendant(String),
    #[error("path error: {0}")]
    Path(#[from] PathError),
}

/// Resolve `path` starting at `root`, one child lookup per name.
///  `Ok(None)` if any name along the way is missing.
pub fn resolve<S: PageStore>(
    store: &S,
    root: &S::Page,
    path: &PagePath,
) -> Result<Option<S::Page>, StoreError> {
    let mut current = root.clone();
    for name in path.names() {
        match store.get_child(&current, name)? {
            Some(child) => current = child,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

/// Whether `path` resolves starting at `parent`
pub fn exists<S: PageStore>(store: &S, parent: &S::Page, path: &PagePath) -> Result<bool, StoreError> {
    Ok(resolve(store, parent, path)?.is_some())
}

/// Path from `root` down to `page`, following parent links back up
pub fn full_path<S: PageStore>(store: &S, root: &S::Page, page: &S::Page) -> Result<PagePath, CrawlError> {
    let mut names = Vec::new();
    let mut current = page.clone();

    while current != *root {
        let (Some(name), Some(parent)) = (store.name(&current), store.parent(&current)) else {
            return Err(CrawlError::NotDescendant(format!("{page:?}")));
        };
        names.push(name);
        current = parent;
    }

    names.reverse();
    Ok(PagePath::from_names(names)?)
}

/// Every page beneath `root` (and `root` itself), parents before children.
pub fn walk<S: PageStore>(store: &S, root: &S::Page) -> Result<Vec<S::Page>, StoreError> {
    let mut visited = Vec::new();
    let mut pending = vec![root.clone()];

    while let Some(page) = pending.pop() {
        // reversed so siblings come off the stack in name order
        pending.extend(store.children(&page)?.into_iter().rev());
        visited.push(page);
    }
    Ok(visited)
}
