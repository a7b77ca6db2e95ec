/**
 * Walking a page tree: resolving paths to pages,
 *  computing full paths back to a root, and
 *  visiting every page under a root.
 */
pub mod crawler;
/**
 * The page model itself: qualified page paths,
 *  the wiki word grammar that governs page names,
 *  and the data a page carries.
 */
pub mod page;
/**
 * Structural refactorings over a page tree.
 *  - Renaming a page in place
 *  - Moving a page under a new parent
 *  - Rewriting references to either in page content
 */
pub mod refactor;
/**
 * Storage backends for page trees.
 *  Just the handful of primitives the refactorings
 *  need, with in-memory and on-disk implementations.
 */
pub mod store;
/**
 * A shareable, serialized handle over a page store.
 */
pub mod wiki;

pub mod prelude {
    pub use crate::page::{is_single_wiki_word, PageData, PagePath, PathError};
    pub use crate::refactor::{MoveRequest, RefactorError, RenameRequest, RenameStage};
    pub use crate::store::{FsPageStore, MemoryPageStore, PageStore, StoreError};
    pub use crate::wiki::{Wiki, WikiConfig, WikiError};
}
