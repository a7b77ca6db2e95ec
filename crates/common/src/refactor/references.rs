use crate::crawler::walk;
use crate::page::{tokens, PagePath, Token, PATH_SEPARATOR};
use crate::store::{PageStore, StoreError};

/// Replace every whole-word occurrence of `old` in `content` with `new`.
///
/// A word is a maximal run of ASCII letters and digits, so `OldName` inside
/// `OldNameExtra` or `MyOldName` is left alone. Returns `None` when nothing
/// matched, so callers can skip writing unchanged pages.
pub fn replace_token(content: &str, old: &str, new: &str) -> Option<String> {
    let mut changed = false;
    let rewritten: String = tokens(content)
        .map(|token| match token {
            Token::Word(word) if word == old => {
                changed = true;
                new
            }
            other => other.as_str(),
        })
        .collect();

    changed.then_some(rewritten)
}

/// Replace absolute references (`.Parent.OldPage`, or anything beneath it
/// like `.Parent.OldPage.Child`) to `old` with the same reference to `new`.
///
/// A match has to start its own reference (not preceded by a word character
/// or another `.`) and end at a word boundary.
pub fn replace_qualified(content: &str, old: &PagePath, new: &PagePath) -> Option<String> {
    if old.is_root() {
        return None;
    }
    let needle = format!("{PATH_SEPARATOR}{old}");
    let replacement = format!("{PATH_SEPARATOR}{new}");

    let mut rewritten = String::with_capacity(content.len());
    let mut copied_to = 0;
    for (start, _) in content.match_indices(&needle) {
        let end = start + needle.len();
        let starts_reference = content[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != PATH_SEPARATOR);
        let ends_word = content[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric());

        if starts_reference && ends_word {
            rewritten.push_str(&content[copied_to..start]);
            rewritten.push_str(&replacement);
            copied_to = end;
        }
    }

    if copied_to == 0 {
        return None;
    }
    rewritten.push_str(&content[copied_to..]);
    Some(rewritten)
}

/// Rewrite references to the simple name `old_name` as `new_name`
///  in every page under `root`. Returns how many pages were rewritten.
pub fn rename_references<S: PageStore>(
    store: &mut S,
    root: &S::Page,
    old_name: &str,
    new_name: &str,
) -> Result<usize, StoreError> {
    tracing::debug!("rename_references: {} -> {}", old_name, new_name);
    rewrite_pages(store, root, |content| replace_token(content, old_name, new_name))
}

/// Rewrite absolute references to `old_path` as `new_path`
///  in every page under `root`. Returns how many pages were rewritten.
pub fn move_references<S: PageStore>(
    store: &mut S,
    root: &S::Page,
    old_path: &PagePath,
    new_path: &PagePath,
) -> Result<usize, StoreError> {
    tracing::debug!("move_references: .{} -> .{}", old_path, new_path);
    rewrite_pages(store, root, |content| replace_qualified(content, old_path, new_path))
}

fn rewrite_pages<S, F>(store: &mut S, root: &S::Page, rewrite: F) -> Result<usize, StoreError>
where
    S: PageStore,
    F: Fn(&str) -> Option<String>,
{
    let mut rewritten = 0;
    for page in walk(store, root)? {
        let mut data = store.data(&page)?;
        let Some(content) = rewrite(data.content()) else {
            continue;
        };

        data.set_content(content);
        store.commit(&page, data)?;
        tracing::debug!("rewrite_pages: updated references in {:?}", page);
        rewritten += 1;
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPageStore;
    use crate::page::PageData;

    fn path(text: &str) -> PagePath {
        PagePath::parse(text).unwrap()
    }

    #[test]
    fn test_replace_token_whole_words_only() {
        assert_eq!(
            replace_token("See OldName for details", "OldName", "NewName").as_deref(),
            Some("See NewName for details")
        );
        assert_eq!(
            replace_token("OldName, OldName.ChildPage and (OldName)", "OldName", "NewName").as_deref(),
            Some("NewName, NewName.ChildPage and (NewName)")
        );
        assert_eq!(replace_token("See OldNameExtra", "OldName", "NewName"), None);
        assert_eq!(replace_token("See MyOldName", "OldName", "NewName"), None);
        assert_eq!(replace_token("See Old2Name", "OldName", "NewName"), None);
        assert_eq!(replace_token("", "OldName", "NewName"), None);
    }

    #[test]
    fn test_replace_token_keeps_surrounding_text() {
        let content = "!1 Intro\n\n * OldName\n * ünïcode OldName—done\n";
        assert_eq!(
            replace_token(content, "OldName", "NewName").as_deref(),
            Some("!1 Intro\n\n * NewName\n * ünïcode NewName—done\n")
        );
    }

    #[test]
    fn test_replace_qualified() {
        let old = path("ParentPage.OldPage");
        let new = path("ArchivePage.OldPage");

        assert_eq!(
            replace_qualified("See .ParentPage.OldPage today", &old, &new).as_deref(),
            Some("See .ArchivePage.OldPage today")
        );
        assert_eq!(
            replace_qualified("child: .ParentPage.OldPage.ChildPage", &old, &new).as_deref(),
            Some("child: .ArchivePage.OldPage.ChildPage")
        );
        // relative references and longer names are not absolute references to `old`
        assert_eq!(replace_qualified("See OtherPage.ParentPage.OldPage", &old, &new), None);
        assert_eq!(replace_qualified("See .ParentPage.OldPageTwo", &old, &new), None);
        assert_eq!(replace_qualified("See ..ParentPage.OldPage", &old, &new), None);
        assert_eq!(replace_qualified("anything", &PagePath::root(), &new), None);
    }

    #[test]
    fn test_rename_references_only_writes_matching_pages() {
        let mut store = MemoryPageStore::new();
        let root = store.root();
        let one = store.add_child(&root, "PageOne").unwrap();
        store.commit(&one, PageData::new("See OldName for details")).unwrap();
        let two = store.add_child(&one, "PageTwo").unwrap();
        store.commit(&two, PageData::new("OldNameExtra is different")).unwrap();
        let three = store.add_child(&root, "PageThree").unwrap();
        let mut data = PageData::new("OldName and OldName");
        data.set_property("Test", "true");
        store.commit(&three, data).unwrap();

        let rewritten = rename_references(&mut store, &root, "OldName", "NewName").unwrap();
        assert_eq!(rewritten, 2);

        assert_eq!(store.data(&one).unwrap().content(), "See NewName for details");
        assert_eq!(store.data(&two).unwrap().content(), "OldNameExtra is different");
        let data = store.data(&three).unwrap();
        assert_eq!(data.content(), "NewName and NewName");
        assert_eq!(data.property("Test"), Some("true"));
    }
}
