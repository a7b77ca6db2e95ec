use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::page::PageData;

use super::{PageStore, StoreError};

/// Handle to a page inside a [`MemoryPageStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct PageEntry {
    name: String,
    // non-owning: only used to walk back up for path computation
    parent: Option<PageId>,
    data: PageData,
    children: BTreeMap<String, PageId>,
}

/// In-memory page store.
///
/// Pages live in an arena keyed by [`PageId`]; parents own their children
/// through the name -> id map, children point back at their parent by id.
#[derive(Debug, Clone)]
pub struct MemoryPageStore {
    pages: HashMap<PageId, PageEntry>,
    root: PageId,
    next_id: u64,
}

impl Default for MemoryPageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPageStore {
    pub fn new() -> Self {
        let root = PageId(0);
        let mut pages = HashMap::new();
        pages.insert(
            root,
            PageEntry {
                name: String::new(),
                parent: None,
                data: PageData::default(),
                children: BTreeMap::new(),
            },
        );
        Self {
            pages,
            root,
            next_id: 1,
        }
    }

    /// Number of live pages, root included
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        // the root is always there
        false
    }

    fn entry(&self, page: &PageId) -> Result<&PageEntry, StoreError> {
        self.pages
            .get(page)
            .ok_or_else(|| StoreError::PageMissing(page.to_string()))
    }

    fn entry_mut(&mut self, page: &PageId) -> Result<&mut PageEntry, StoreError> {
        self.pages
            .get_mut(page)
            .ok_or_else(|| StoreError::PageMissing(page.to_string()))
    }
}

impl PageStore for MemoryPageStore {
    type Page = PageId;

    fn root(&self) -> PageId {
        self.root
    }

    fn name(&self, page: &PageId) -> Option<String> {
        self.pages
            .get(page)
            .filter(|entry| entry.parent.is_some())
            .map(|entry| entry.name.clone())
    }

    fn parent(&self, page: &PageId) -> Option<PageId> {
        self.pages.get(page).and_then(|entry| entry.parent)
    }

    fn get_child(&self, parent: &PageId, name: &str) -> Result<Option<PageId>, StoreError> {
        Ok(self.entry(parent)?.children.get(name).copied())
    }

    fn add_child(&mut self, parent: &PageId, name: &str) -> Result<PageId, StoreError> {
        if self.entry(parent)?.children.contains_key(name) {
            return Err(StoreError::PageExists(name.to_string()));
        }

        let id = PageId(self.next_id);
        self.next_id += 1;
        self.entry_mut(parent)?.children.insert(name.to_string(), id);
        self.pages.insert(
            id,
            PageEntry {
                name: name.to_string(),
                parent: Some(*parent),
                data: PageData::default(),
                children: BTreeMap::new(),
            },
        );
        Ok(id)
    }

    fn remove_child(&mut self, parent: &PageId, name: &str) -> Result<(), StoreError> {
        let Some(child) = self.entry_mut(parent)?.children.remove(name) else {
            return Err(StoreError::PageMissing(name.to_string()));
        };

        // drop the whole subtree from the arena
        let mut pending = vec![child];
        while let Some(id) = pending.pop() {
            if let Some(entry) = self.pages.remove(&id) {
                pending.extend(entry.children.into_values());
            }
        }
        Ok(())
    }

    fn children(&self, page: &PageId) -> Result<Vec<PageId>, StoreError> {
        Ok(self.entry(page)?.children.values().copied().collect())
    }

    fn data(&self, page: &PageId) -> Result<PageData, StoreError> {
        Ok(self.entry(page)?.data.clone())
    }

    fn commit(&mut self, page: &PageId, data: PageData) -> Result<(), StoreError> {
        self.entry_mut(page)?.data = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_child() {
        let mut store = MemoryPageStore::new();
        let root = store.root();

        let docs = store.add_child(&root, "ProjectDocs").unwrap();
        assert_eq!(store.get_child(&root, "ProjectDocs").unwrap(), Some(docs));
        assert_eq!(store.get_child(&root, "OtherPage").unwrap(), None);
        assert_eq!(store.name(&docs).as_deref(), Some("ProjectDocs"));
        assert_eq!(store.parent(&docs), Some(root));
        assert_eq!(store.name(&root), None);
        assert_eq!(store.parent(&root), None);
    }

    #[test]
    fn test_add_duplicate_child_fails() {
        let mut store = MemoryPageStore::new();
        let root = store.root();
        store.add_child(&root, "ProjectDocs").unwrap();

        let result = store.add_child(&root, "ProjectDocs");
        assert!(matches!(result, Err(StoreError::PageExists(_))));
    }

    #[test]
    fn test_children_are_name_ordered() {
        let mut store = MemoryPageStore::new();
        let root = store.root();
        let zeta = store.add_child(&root, "ZetaPage").unwrap();
        let alpha = store.add_child(&root, "AlphaPage").unwrap();

        assert_eq!(store.children(&root).unwrap(), vec![alpha, zeta]);
    }

    #[test]
    fn test_commit_replaces_data() {
        let mut store = MemoryPageStore::new();
        let root = store.root();
        let page = store.add_child(&root, "PageOne").unwrap();
        assert_eq!(store.data(&page).unwrap(), PageData::default());

        let mut data = PageData::new("content");
        data.set_property("Test", "true");
        store.commit(&page, data.clone()).unwrap();
        assert_eq!(store.data(&page).unwrap(), data);
    }

    #[test]
    fn test_remove_child_drops_subtree() {
        let mut store = MemoryPageStore::new();
        let root = store.root();
        let docs = store.add_child(&root, "ProjectDocs").unwrap();
        let api = store.add_child(&docs, "ApiReference").unwrap();
        let codes = store.add_child(&api, "ErrorCodes").unwrap();
        assert_eq!(store.len(), 4);

        store.remove_child(&root, "ProjectDocs").unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get_child(&root, "ProjectDocs").unwrap().is_none());

        // stale handles fail instead of resolving to something else
        assert!(matches!(store.data(&codes), Err(StoreError::PageMissing(_))));
        assert_eq!(store.parent(&api), None);
    }

    #[test]
    fn test_remove_missing_child_fails() {
        let mut store = MemoryPageStore::new();
        let root = store.root();
        let result = store.remove_child(&root, "NoSuchPage");
        assert!(matches!(result, Err(StoreError::PageMissing(_))));
    }
}
