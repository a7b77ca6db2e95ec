use crate::store::PageStore;

use super::{DuringStage, RefactorError, RenameStage};

// One page waiting to be recreated: where it lives now,
//  and where its copy should go.
struct PendingPage<P> {
    old_parent: P,
    old_name: String,
    old_page: P,
    new_parent: P,
    new_name: String,
}

/// Relocate the child `old_name` of `source_parent`, with its whole subtree,
///  to a new child `new_name` of `dest_parent`.
///
/// Returns the new page, or `None` if the tree no longer looks the way the
///  caller checked it did (source gone, or destination taken) in which case
///  nothing is touched.
pub(crate) fn migrate_page<S: PageStore>(
    store: &mut S,
    source_parent: &S::Page,
    old_name: &str,
    dest_parent: &S::Page,
    new_name: &str,
) -> Result<Option<S::Page>, RefactorError> {
    let stage = RenameStage::MigratingTree;

    let Some(source) = store.get_child(source_parent, old_name).during(stage)? else {
        tracing::warn!("migrate_page: {} disappeared before migration, skipping", old_name);
        return Ok(None);
    };
    if store.has_child(dest_parent, new_name).during(stage)? {
        tracing::warn!("migrate_page: {} appeared before migration, skipping", new_name);
        return Ok(None);
    }

    let mut pending = vec![PendingPage {
        old_parent: source_parent.clone(),
        old_name: old_name.to_string(),
        old_page: source,
        new_parent: dest_parent.clone(),
        new_name: new_name.to_string(),
    }];
    // old pages in the order they were copied; parents always precede their children
    let mut migrated: Vec<(S::Page, String)> = Vec::new();
    let mut new_root = None;

    while let Some(page) = pending.pop() {
        if store.has_child(&page.new_parent, &page.new_name).during(stage)? {
            tracing::warn!(
                "migrate_page: {} already exists at destination, leaving it in place",
                page.new_name
            );
            continue;
        }

        let copy = store.add_child(&page.new_parent, &page.new_name).during(stage)?;
        let data = store.data(&page.old_page).during(stage)?;
        store.commit(&copy, data).during(stage)?;
        tracing::debug!("migrate_page: copied {} to {}", page.old_name, page.new_name);

        for child in store.children(&page.old_page).during(stage)? {
            let name = store.name(&child).ok_or_else(|| {
                RefactorError::InternalInconsistency(format!("child page {child:?} has no name"))
            })?;
            pending.push(PendingPage {
                old_parent: page.old_page.clone(),
                old_name: name.clone(),
                old_page: child,
                new_parent: copy.clone(),
                new_name: name,
            });
        }

        if new_root.is_none() {
            new_root = Some(copy);
        }
        migrated.push((page.old_parent, page.old_name));
    }

    // Detach deepest first, so every old page is childless by the time it goes
    let stage = RenameStage::RemovingSource;
    for (old_parent, old_name) in migrated.into_iter().rev() {
        store.remove_child(&old_parent, &old_name).during(stage)?;
    }
    // anything skipped above still hangs off the source
    if new_root.is_some() && store.has_child(source_parent, old_name).during(stage)? {
        store.remove_child(source_parent, old_name).during(stage)?;
    }

    Ok(new_root)
}
