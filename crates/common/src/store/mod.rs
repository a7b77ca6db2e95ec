//! Page storage
//!
//! The refactorings never touch pages directly; they go through a
//! [`PageStore`], which only has to offer a handful of primitives:
//!
//! - look up, add, remove and list the children of a page
//! - read and commit a page's [`PageData`]
//! - follow a page's (non-owning) link to its parent
//!
//! Two backends are provided:
//!
//! - **[`MemoryPageStore`]**: an arena of pages, handy for tests and for
//!   embedding a throwaway wiki
//! - **[`FsPageStore`]**: one directory per page on disk

mod fs;
mod memory;

use std::fmt::Debug;

use crate::page::PageData;

pub use fs::{FsPageStore, CONTENT_FILE_NAME, PROPERTIES_FILE_NAME};
pub use memory::{MemoryPageStore, PageId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("default error: {0}")]
    Default(#[from] anyhow::Error),
    #[error("page no longer exists: {0}")]
    PageMissing(String),
    #[error("page already exists: {0}")]
    PageExists(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed page properties: {0}")]
    Properties(#[from] serde_json::Error),
}

/// Primitive operations over a tree of pages.
///
/// Pages are addressed through an opaque handle. Handles stay valid until
/// the page they point at is removed; using a handle afterwards is an
/// error (`StoreError::PageMissing`), never undefined behaviour.
pub trait PageStore {
    type Page: Clone + PartialEq + Debug;

    /// The page every path in this store is resolved against
    fn root(&self) -> Self::Page;

    /// Simple name of `page`, `None` for the root
    fn name(&self, page: &Self::Page) -> Option<String>;

    /// Parent of `page`, `None` for the root (or a removed page)
    fn parent(&self, page: &Self::Page) -> Option<Self::Page>;

    fn get_child(&self, parent: &Self::Page, name: &str) -> Result<Option<Self::Page>, StoreError>;

    /// Create an empty child page.
    ///  Fails with `PageExists` if `parent` already has a child called `name`.
    fn add_child(&mut self, parent: &Self::Page, name: &str) -> Result<Self::Page, StoreError>;

    /// Remove the child `name` of `parent`, along with anything beneath it
    fn remove_child(&mut self, parent: &Self::Page, name: &str) -> Result<(), StoreError>;

    /// Children of `page`, ordered by name
    fn children(&self, page: &Self::Page) -> Result<Vec<Self::Page>, StoreError>;

    fn data(&self, page: &Self::Page) -> Result<PageData, StoreError>;

    /// Replace the data stored with `page`
    fn commit(&mut self, page: &Self::Page, data: PageData) -> Result<(), StoreError>;

    fn has_child(&self, parent: &Self::Page, name: &str) -> Result<bool, StoreError> {
        Ok(self.get_child(parent, name)?.is_some())
    }
}
