//! Shared test utilities for page tree integration tests
#![allow(dead_code)]

use common::page::PagePath;
use common::store::PageStore;
use common::wiki::{Wiki, WikiConfig};
use tempfile::TempDir;

/// Parse a qualified name, panicking on bad input
pub fn path(text: &str) -> PagePath {
    PagePath::parse(text).unwrap()
}

/// Set up an in-memory wiki with a front page and a small documentation tree:
///
/// FrontPage
/// ProjectDocs
///   ApiReference
///     ErrorCodes
///   InstallGuide
pub fn setup_memory_wiki() -> Wiki<common::store::MemoryPageStore> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let wiki = Wiki::memory();
    populate(&wiki);
    wiki
}

/// Same tree as [`setup_memory_wiki`], but on disk under a temp directory
pub fn setup_fs_wiki() -> (Wiki<common::store::FsPageStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let wiki = Wiki::open(temp_dir.path().join("pages"), WikiConfig::default()).unwrap();
    populate(&wiki);
    (wiki, temp_dir)
}

fn populate<S: PageStore>(wiki: &Wiki<S>) {
    wiki.add(&path("FrontPage"), "Welcome. Start at ProjectDocs.")
        .unwrap();
    wiki.add(&path("ProjectDocs"), "!1 Docs\n * InstallGuide\n * ApiReference\n")
        .unwrap();
    wiki.add(&path("ProjectDocs.ApiReference"), "See ErrorCodes for failures.")
        .unwrap();
    wiki.add(&path("ProjectDocs.ApiReference.ErrorCodes"), "!3 Error codes")
        .unwrap();
    wiki.add(&path("ProjectDocs.InstallGuide"), "Read ApiReference after installing.")
        .unwrap();
}

/// Every page path in the wiki together with its data, for before/after comparisons
pub fn snapshot<S: PageStore>(wiki: &Wiki<S>) -> Vec<(PagePath, common::page::PageData)> {
    wiki.ls_deep(&PagePath::root())
        .unwrap()
        .into_iter()
        .map(|page| {
            let data = wiki.data(&page).unwrap();
            (page, data)
        })
        .collect()
}
