//! Integration tests for moving pages between parents

mod common;

use ::common::page::PagePath;
use ::common::refactor::RefactorError;
use ::common::wiki::WikiError;

use crate::common::path;

#[test]
fn test_mv_page() {
    let wiki = common::setup_memory_wiki();
    wiki.add(&path("ArchivePage"), "old stuff").unwrap();
    let before = wiki.data(&path("ProjectDocs.InstallGuide")).unwrap();

    let moved = wiki
        .mv(&path("ProjectDocs.InstallGuide"), &path("ArchivePage"), false)
        .unwrap();
    assert_eq!(moved, path("ArchivePage.InstallGuide"));

    assert!(!wiki.exists(&path("ProjectDocs.InstallGuide")).unwrap());
    assert_eq!(wiki.data(&moved).unwrap(), before);
}

#[test]
fn test_mv_page_with_children() {
    let wiki = common::setup_memory_wiki();
    wiki.add(&path("ArchivePage"), "").unwrap();

    wiki.mv(&path("ProjectDocs.ApiReference"), &path("ArchivePage"), false)
        .unwrap();

    assert_eq!(
        wiki.cat(&path("ArchivePage.ApiReference.ErrorCodes")).unwrap(),
        "!3 Error codes"
    );
    assert_eq!(
        wiki.ls(&path("ProjectDocs")).unwrap(),
        vec![path("ProjectDocs.InstallGuide")]
    );
}

#[test]
fn test_mv_to_root() {
    let wiki = common::setup_memory_wiki();

    let moved = wiki
        .mv(&path("ProjectDocs.ApiReference.ErrorCodes"), &PagePath::root(), false)
        .unwrap();
    assert_eq!(moved, path("ErrorCodes"));
    assert_eq!(wiki.cat(&moved).unwrap(), "!3 Error codes");
}

#[test]
fn test_mv_not_found() {
    let wiki = common::setup_memory_wiki();

    let result = wiki.mv(&path("NoSuchPage"), &path("ProjectDocs"), false);
    assert!(matches!(
        result,
        Err(WikiError::Refactor(RefactorError::NotFound(_)))
    ));

    let result = wiki.mv(&path("ProjectDocs.InstallGuide"), &path("NoSuchPage"), false);
    assert!(matches!(
        result,
        Err(WikiError::Refactor(RefactorError::ParentNotFound(_)))
    ));
}

#[test]
fn test_mv_already_exists() {
    let wiki = common::setup_memory_wiki();
    wiki.add(&path("ArchivePage.InstallGuide"), "older guide")
        .unwrap();
    let before = common::snapshot(&wiki);

    let result = wiki.mv(&path("ProjectDocs.InstallGuide"), &path("ArchivePage"), true);
    assert!(matches!(
        result,
        Err(WikiError::Refactor(RefactorError::Conflict { .. }))
    ));

    // moving to the current parent is the same collision
    let result = wiki.mv(&path("ProjectDocs.InstallGuide"), &path("ProjectDocs"), false);
    assert!(matches!(
        result,
        Err(WikiError::Refactor(RefactorError::Conflict { .. }))
    ));

    assert_eq!(common::snapshot(&wiki), before);
}

#[test]
fn test_mv_into_self() {
    let wiki = common::setup_memory_wiki();
    let before = common::snapshot(&wiki);

    let result = wiki.mv(&path("ProjectDocs"), &path("ProjectDocs.ApiReference"), false);
    assert!(matches!(
        result,
        Err(WikiError::Refactor(RefactorError::MoveIntoSelf { .. }))
    ));

    let result = wiki.mv(&path("ProjectDocs"), &path("ProjectDocs"), false);
    assert!(matches!(
        result,
        Err(WikiError::Refactor(RefactorError::MoveIntoSelf { .. }))
    ));

    assert_eq!(common::snapshot(&wiki), before);
}

#[test]
fn test_mv_front_page() {
    let wiki = common::setup_memory_wiki();

    let result = wiki.mv(&path("FrontPage"), &path("ProjectDocs"), false);
    assert!(matches!(
        result,
        Err(WikiError::Refactor(RefactorError::InvalidName(_)))
    ));
}

#[test]
fn test_mv_with_references() {
    let wiki = common::setup_memory_wiki();
    wiki.add(&path("ArchivePage"), "").unwrap();
    wiki.add(&path("ReadMe"), "Errors: .ProjectDocs.ApiReference.ErrorCodes")
        .unwrap();

    wiki.mv(&path("ProjectDocs.ApiReference"), &path("ArchivePage"), true)
        .unwrap();

    assert_eq!(
        wiki.cat(&path("ReadMe")).unwrap(),
        "Errors: .ArchivePage.ApiReference.ErrorCodes"
    );
    // simple-name references don't depend on the parent and are left alone
    assert_eq!(
        wiki.cat(&path("ProjectDocs.InstallGuide")).unwrap(),
        "Read ApiReference after installing."
    );
}
