use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::page::{is_single_wiki_word, PageData};

use super::{PageStore, StoreError};

pub const CONTENT_FILE_NAME: &str = "content.txt";
pub const PROPERTIES_FILE_NAME: &str = "properties.json";

/**
 * On-disk page store
 * ==================
 * Every page is a directory named after the page, nested inside
 *  its parent's directory. The page's own data sits next to its
 *  children:
 *
 *  pages/
 *    ProjectDocs/
 *      content.txt
 *      properties.json      (omitted when there are no properties)
 *      ApiReference/
 *        content.txt
 *
 * Only real directories whose names are wiki words count as pages,
 *  so anything else living in the tree (symlinks included) is ignored.
 * Page handles are paths relative to the store's base directory;
 *  the root is the empty path.
 */
#[derive(Debug, Clone)]
pub struct FsPageStore {
    base: PathBuf,
}

impl FsPageStore {
    /// Open (creating if needed) a page store rooted at `base`
    pub fn open(base: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn dir(&self, page: &Path) -> PathBuf {
        self.base.join(page)
    }

    fn existing_dir(&self, page: &Path) -> Result<PathBuf, StoreError> {
        let dir = self.dir(page);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(StoreError::PageMissing(page.display().to_string()))
        }
    }
}

// Symlinks are never pages, even when they point at a directory
fn is_page_dir(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

impl PageStore for FsPageStore {
    type Page = PathBuf;

    fn root(&self) -> PathBuf {
        PathBuf::new()
    }

    fn name(&self, page: &PathBuf) -> Option<String> {
        page.file_name()
            .map(|name| name.to_string_lossy().to_string())
    }

    fn parent(&self, page: &PathBuf) -> Option<PathBuf> {
        if page.as_os_str().is_empty() {
            return None;
        }
        page.parent().map(Path::to_path_buf)
    }

    fn get_child(&self, parent: &PathBuf, name: &str) -> Result<Option<PathBuf>, StoreError> {
        // also keeps `..` and friends from escaping the base directory
        if !is_single_wiki_word(name) {
            return Ok(None);
        }
        let dir = self.existing_dir(parent)?;
        if is_page_dir(&dir.join(name)) {
            Ok(Some(parent.join(name)))
        } else {
            Ok(None)
        }
    }

    fn add_child(&mut self, parent: &PathBuf, name: &str) -> Result<PathBuf, StoreError> {
        if !is_single_wiki_word(name) {
            return Err(StoreError::Default(anyhow::anyhow!(
                "not a valid page name: {name:?}"
            )));
        }
        let dir = self.existing_dir(parent)?.join(name);
        if dir.exists() {
            return Err(StoreError::PageExists(parent.join(name).display().to_string()));
        }

        fs::create_dir(&dir)?;
        fs::write(dir.join(CONTENT_FILE_NAME), "")?;
        tracing::debug!("FsPageStore::add_child: created {}", dir.display());
        Ok(parent.join(name))
    }

    fn remove_child(&mut self, parent: &PathBuf, name: &str) -> Result<(), StoreError> {
        let child = match self.get_child(parent, name)? {
            Some(child) => child,
            None => return Err(StoreError::PageMissing(parent.join(name).display().to_string())),
        };
        let dir = self.dir(&child);
        fs::remove_dir_all(&dir)?;
        tracing::debug!("FsPageStore::remove_child: removed {}", dir.display());
        Ok(())
    }

    fn children(&self, page: &PathBuf) -> Result<Vec<PathBuf>, StoreError> {
        let dir = self.existing_dir(page)?;
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !is_page_dir(&entry.path()) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if is_single_wiki_word(&name) {
                names.push(name);
            }
        }
        names.sort();

        Ok(names.into_iter().map(|name| page.join(name)).collect())
    }

    fn data(&self, page: &PathBuf) -> Result<PageData, StoreError> {
        let dir = self.existing_dir(page)?;

        let content_path = dir.join(CONTENT_FILE_NAME);
        let content = if content_path.is_file() {
            fs::read_to_string(&content_path)?
        } else {
            String::new()
        };

        let properties_path = dir.join(PROPERTIES_FILE_NAME);
        let properties: BTreeMap<String, String> = if properties_path.is_file() {
            serde_json::from_str(&fs::read_to_string(&properties_path)?)?
        } else {
            BTreeMap::new()
        };

        Ok(PageData::from_parts(content, properties))
    }

    fn commit(&mut self, page: &PathBuf, data: PageData) -> Result<(), StoreError> {
        let dir = self.existing_dir(page)?;
        let (content, properties) = data.into_parts();

        fs::write(dir.join(CONTENT_FILE_NAME), content)?;

        let properties_path = dir.join(PROPERTIES_FILE_NAME);
        if properties.is_empty() {
            if properties_path.exists() {
                fs::remove_file(&properties_path)?;
            }
        } else {
            fs::write(&properties_path, serde_json::to_string_pretty(&properties)?)?;
        }
        Ok(())
    }
}
