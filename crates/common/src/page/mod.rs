//! Page model
//!
//! A wiki is a tree of pages. Every page is addressed relative to its parent
//! by a *simple name*, a single wiki word such as `FrontPage` or `RecentChanges`,
//! and relative to a root by a [`PagePath`], the dot-joined chain of simple
//! names leading to it:
//!
//! ```text
//! root
//!  ├── FrontPage
//!  └── ProjectDocs                 ProjectDocs
//!       ├── InstallGuide           ProjectDocs.InstallGuide
//!       └── ApiReference           ProjectDocs.ApiReference
//!            └── ErrorCodes        ProjectDocs.ApiReference.ErrorCodes
//! ```
//!
//! - **[`PagePath`]**: parsing, rendering and manipulating qualified names
//! - **[`is_single_wiki_word`]**: the simple name grammar
//! - **[`PageData`]**: the content and properties stored with a page

mod data;
mod path;
mod wiki_word;

pub use data::PageData;
pub use path::{PagePath, PathError, PATH_SEPARATOR};
pub use wiki_word::{is_single_wiki_word, tokens, Token};
