//! Saving to and loading from real files.

use std::fs;

use bkmatch::{check_invariants, BkError, BkTree, MAGIC};

use crate::common::{clinical_tree, scenario_tree, search_owned, CLINICAL_WORDS};

#[test]
fn test_save_load_preserves_queries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinical.bkt");

    let tree = clinical_tree();
    tree.save(&path).unwrap();
    let loaded = BkTree::load(&path).unwrap();

    assert_eq!(loaded.len(), CLINICAL_WORDS.len());
    assert!(check_invariants(&loaded).is_ok());
    for query in ["anemia", "edma", "ischemai", "hypertensoin", "xyz"] {
        for max_dist in 0..=2 {
            assert_eq!(
                search_owned(&loaded, query, max_dist),
                search_owned(&tree, query, max_dist),
                "{query} within {max_dist}"
            );
        }
    }
}

#[test]
fn test_spelling_variants_found_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinical.bkt");
    clinical_tree().save(&path).unwrap();
    let loaded = BkTree::load(&path).unwrap();

    let hits: Vec<String> = search_owned(&loaded, "anemia", 1)
        .into_iter()
        .map(|(term, _)| term)
        .collect();
    assert_eq!(hits, vec!["anemia", "anaemia"]);
}

#[test]
fn test_file_starts_with_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.bkt");
    scenario_tree().save(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], &MAGIC);
    assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), 6);
    assert_eq!(bytes, scenario_tree().to_bytes().unwrap());
}

#[test]
fn test_empty_tree_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bkt");
    BkTree::new().save(&path).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 12);
    let loaded = BkTree::load(&path).unwrap();
    assert!(loaded.is_empty());
    assert!(loaded.search("anything", 5).is_empty());
}

#[test]
fn test_save_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.bkt");
    clinical_tree().save(&path).unwrap();
    scenario_tree().save(&path).unwrap();

    let loaded = BkTree::load(&path).unwrap();
    assert_eq!(loaded.len(), 6);
}

#[test]
fn test_bad_magic_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.bkt");
    let mut bytes = scenario_tree().to_bytes().unwrap();
    bytes[..8].copy_from_slice(b"BKTREE2\0");
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(BkTree::load(&path), Err(BkError::Format(_))));
}

#[test]
fn test_truncated_file_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bkt");
    let bytes = scenario_tree().to_bytes().unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    assert!(matches!(BkTree::load(&path), Err(BkError::Format(_))));
}

#[test]
fn test_trailing_bytes_in_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.bkt");
    let mut bytes = scenario_tree().to_bytes().unwrap();
    bytes.push(0);
    fs::write(&path, &bytes).unwrap();

    assert!(matches!(BkTree::load(&path), Err(BkError::Format(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BkTree::load(dir.path().join("absent.bkt")).unwrap_err();
    assert!(matches!(err, BkError::Io(_)));
}

#[test]
fn test_save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = scenario_tree()
        .save(dir.path().join("no/such/dir/tree.bkt"))
        .unwrap_err();
    assert!(matches!(err, BkError::Io(_)));
}
