use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::crawler::{self, CrawlError};
use crate::page::{PageData, PagePath, PathError};
use crate::refactor::{self, MoveRequest, RefactorError, RenameRequest};
use crate::store::{FsPageStore, MemoryPageStore, PageStore, StoreError};

pub const DEFAULT_FRONT_PAGE: &str = "FrontPage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Name of the reserved entry page directly under the root
    #[serde(default = "default_front_page")]
    pub front_page: String,
}

fn default_front_page() -> String {
    DEFAULT_FRONT_PAGE.to_string()
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            front_page: default_front_page(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("page not found: {0}")]
    PageNotFound(PagePath),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("refactor error: {0}")]
    Refactor(#[from] RefactorError),
    #[error("path error: {0}")]
    Path(#[from] PathError),
    #[error("crawl error: {0}")]
    Crawl(#[from] CrawlError),
}

/// Shared handle to a page tree.
///
/// Every operation takes the store lock for its whole duration, so two
/// refactorings on the same wiki never interleave: a rename's collision
/// check, migration and removal all see the same tree.
pub struct Wiki<S: PageStore>(Arc<Mutex<S>>, WikiConfig);

impl<S: PageStore> Clone for Wiki<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), self.1.clone())
    }
}

impl Wiki<MemoryPageStore> {
    /// A fresh, empty wiki held in memory
    pub fn memory() -> Self {
        Self::new(MemoryPageStore::new(), WikiConfig::default())
    }
}

impl Wiki<FsPageStore> {
    /// Open the wiki stored under `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>, config: WikiConfig) -> Result<Self, WikiError> {
        Ok(Self::new(FsPageStore::open(dir)?, config))
    }
}

impl<S: PageStore> Wiki<S> {
    pub fn new(store: S, config: WikiConfig) -> Self {
        Self(Arc::new(Mutex::new(store)), config)
    }

    pub fn config(&self) -> &WikiConfig {
        &self.1
    }

    /// Write `content` to the page at `path`, creating it and any missing
    ///  ancestors along the way. Existing properties are kept.
    pub fn add(&self, path: &PagePath, content: &str) -> Result<(), WikiError> {
        let mut store = self.0.lock();
        let mut page = store.root();
        for name in path.names() {
            page = match store.get_child(&page, name)? {
                Some(child) => child,
                None => {
                    tracing::debug!("Wiki::add: creating {}", name);
                    store.add_child(&page, name)?
                }
            };
        }

        let mut data = store.data(&page)?;
        data.set_content(content);
        store.commit(&page, data)?;
        Ok(())
    }

    pub fn set_property(&self, path: &PagePath, key: &str, value: &str) -> Result<(), WikiError> {
        let mut store = self.0.lock();
        let page = Self::_page_at(&*store, path)?;
        let mut data = store.data(&page)?;
        data.set_property(key, value);
        store.commit(&page, data)?;
        Ok(())
    }

    pub fn data(&self, path: &PagePath) -> Result<PageData, WikiError> {
        let store = self.0.lock();
        let page = Self::_page_at(&*store, path)?;
        Ok(store.data(&page)?)
    }

    /// Content of the page at `path`
    pub fn cat(&self, path: &PagePath) -> Result<String, WikiError> {
        let (content, _) = self.data(path)?.into_parts();
        Ok(content)
    }

    pub fn exists(&self, path: &PagePath) -> Result<bool, WikiError> {
        let store = self.0.lock();
        let root = store.root();
        Ok(crawler::exists(&*store, &root, path)?)
    }

    /// Qualified names of the direct children of `path`
    pub fn ls(&self, path: &PagePath) -> Result<Vec<PagePath>, WikiError> {
        let store = self.0.lock();
        let root = store.root();
        let page = Self::_page_at(&*store, path)?;

        let mut items = Vec::new();
        for child in store.children(&page)? {
            items.push(crawler::full_path(&*store, &root, &child)?);
        }
        Ok(items)
    }

    /// Qualified names of every page beneath `path`, parents before children
    pub fn ls_deep(&self, path: &PagePath) -> Result<Vec<PagePath>, WikiError> {
        let store = self.0.lock();
        let root = store.root();
        let page = Self::_page_at(&*store, path)?;

        let mut items = Vec::new();
        for descendant in crawler::walk(&*store, &page)?.into_iter().skip(1) {
            items.push(crawler::full_path(&*store, &root, &descendant)?);
        }
        Ok(items)
    }

    /// Rename the page at `path` to `new_name`, see [`refactor::rename_page`]
    pub fn rename(
        &self,
        path: &PagePath,
        new_name: &str,
        refactor_references: bool,
    ) -> Result<PagePath, WikiError> {
        let request =
            RenameRequest::new(path.clone(), new_name).refactor_references(refactor_references);
        let mut store = self.0.lock();
        let root = store.root();
        Ok(refactor::rename_page(
            &mut *store,
            &root,
            &self.1.front_page,
            &request,
        )?)
    }

    /// Move the page at `path` under `new_parent`, see [`refactor::move_page`]
    pub fn mv(
        &self,
        path: &PagePath,
        new_parent: &PagePath,
        refactor_references: bool,
    ) -> Result<PagePath, WikiError> {
        let request = MoveRequest::new(path.clone(), new_parent.clone())
            .refactor_references(refactor_references);
        let mut store = self.0.lock();
        let root = store.root();
        Ok(refactor::move_page(
            &mut *store,
            &root,
            &self.1.front_page,
            &request,
        )?)
    }

    fn _page_at(store: &S, path: &PagePath) -> Result<S::Page, WikiError> {
        let root = store.root();
        crawler::resolve(store, &root, path)?.ok_or_else(|| WikiError::PageNotFound(path.clone()))
    }
}
