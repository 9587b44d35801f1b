//! Negative tests for binary format validation.
//!
//! Hand-assembled files exercising every way a record stream can be wrong.
//! Each must come back as an error, never a panic and never a partial tree.

use bkmatch::{check_invariants, BkError, BkTree, InvariantError, NodeId, TreeHeader, MAGIC};

use crate::common::{pairs, scenario_tree, search_owned};

// ============================================================================
// FILE ASSEMBLY
// ============================================================================

fn record(term: &[u8], children: &[(u32, u32)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(term.len() as u32).to_le_bytes());
    out.extend_from_slice(term);
    out.extend_from_slice(&(children.len() as u32).to_le_bytes());
    for &(distance, index) in children {
        out.extend_from_slice(&distance.to_le_bytes());
        out.extend_from_slice(&index.to_le_bytes());
    }
    out
}

fn file_with_count(count: u32, records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = MAGIC.to_vec();
    out.extend_from_slice(&count.to_le_bytes());
    for r in records {
        out.extend_from_slice(r);
    }
    out
}

fn file(records: &[Vec<u8>]) -> Vec<u8> {
    file_with_count(records.len() as u32, records)
}

fn assert_format_error(bytes: &[u8]) {
    match BkTree::from_bytes(bytes) {
        Err(BkError::Format(_)) => {}
        other => panic!("expected a format error, got {other:?}"),
    }
}

// ============================================================================
// HEADER
// ============================================================================

#[test]
fn test_empty_input() {
    assert_format_error(&[]);
}

#[test]
fn test_magic_only() {
    assert_format_error(&MAGIC);
}

#[test]
fn test_wrong_magic() {
    let mut bytes = file(&[record(b"a", &[])]);
    bytes[6] = b'2';
    assert_format_error(&bytes);
}

#[test]
fn test_magic_without_nul() {
    let mut bytes = file(&[]);
    bytes[7] = b'\n';
    assert_format_error(&bytes);
}

#[test]
fn test_zero_count_is_empty_tree() {
    let bytes = file(&[]);
    assert_eq!(bytes.len(), TreeHeader::SIZE);
    assert!(BkTree::from_bytes(&bytes).unwrap().is_empty());
}

// ============================================================================
// RECORDS
// ============================================================================

#[test]
fn test_count_larger_than_records() {
    let bytes = file_with_count(3, &[record(b"a", &[(1, 1)]), record(b"b", &[])]);
    assert_format_error(&bytes);
}

#[test]
fn test_huge_count_fails_without_allocating() {
    assert_format_error(&file_with_count(u32::MAX, &[]));
}

#[test]
fn test_huge_term_length() {
    let mut bytes = file_with_count(1, &[]);
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    bytes.extend_from_slice(b"abc");
    assert_format_error(&bytes);
}

#[test]
fn test_huge_child_count() {
    let mut bytes = file_with_count(1, &[]);
    bytes.extend_from_slice(&record(b"a", &[])[..5]);
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    assert_format_error(&bytes);
}

#[test]
fn test_child_index_equal_to_count() {
    let bytes = file(&[record(b"a", &[(1, 2)]), record(b"b", &[])]);
    match BkTree::from_bytes(&bytes) {
        Err(BkError::Format(msg)) => assert!(msg.contains("references child 2"), "{msg}"),
        other => panic!("expected a format error, got {other:?}"),
    }
}

#[test]
fn test_root_listed_as_child() {
    let bytes = file(&[record(b"a", &[(1, 1)]), record(b"b", &[(1, 0)])]);
    assert_format_error(&bytes);
}

#[test]
fn test_node_with_two_parents() {
    let bytes = file(&[
        record(b"a", &[(1, 1), (2, 2)]),
        record(b"b", &[(1, 2)]),
        record(b"bc", &[]),
    ]);
    assert_format_error(&bytes);
}

#[test]
fn test_detached_record() {
    let bytes = file(&[record(b"a", &[]), record(b"b", &[])]);
    assert_format_error(&bytes);
}

#[test]
fn test_detached_cycle() {
    let bytes = file(&[
        record(b"a", &[]),
        record(b"b", &[(1, 2)]),
        record(b"c", &[(1, 1)]),
    ]);
    assert_format_error(&bytes);
}

#[test]
fn test_trailing_byte() {
    let mut bytes = scenario_tree().to_bytes().unwrap();
    bytes.push(0xFF);
    assert_format_error(&bytes);
}

// ============================================================================
// ACCEPTED ODDITIES
// ============================================================================

#[test]
fn test_records_need_not_be_breadth_first() {
    // root -> "cart" (record 2) -> "cape" (record 1): a forward then a backward reference
    let bytes = file(&[
        record(b"cake", &[(2, 2)]),
        record(b"cape", &[]),
        record(b"cart", &[(2, 1)]),
    ]);
    let tree = BkTree::from_bytes(&bytes).unwrap();
    assert!(check_invariants(&tree).is_ok());
    assert_eq!(
        search_owned(&tree, "cape", 2),
        pairs(&[("cape", 0), ("cake", 1), ("cart", 2)])
    );

    // Saved again, the records come out breadth-first
    let terms: Vec<Vec<u8>> = tree
        .to_serializable()
        .into_iter()
        .map(|node| node.term)
        .collect();
    assert_eq!(terms, vec![b"cake".to_vec(), b"cart".to_vec(), b"cape".to_vec()]);
}

#[test]
fn test_wrong_edge_weight_loads_but_fails_verification() {
    let bytes = file(&[record(b"book", &[(3, 1)]), record(b"books", &[])]);
    let tree = BkTree::from_bytes(&bytes).unwrap();
    assert_eq!(
        check_invariants(&tree),
        Err(InvariantError::WrongEdgeWeight {
            parent: NodeId(0),
            child: NodeId(1),
            recorded: 3,
            actual: 1,
        })
    );
}

#[test]
fn test_non_utf8_terms_survive() {
    let bytes = file(&[record(&[0xFF, 0xFE], &[(1, 1)]), record(&[0xFF], &[])]);
    let tree = BkTree::from_bytes(&bytes).unwrap();
    assert!(tree.contains([0xFFu8]));
    assert_eq!(tree.to_bytes().unwrap(), bytes);
}

#[test]
fn test_read_from_stops_after_last_record() {
    let mut stream = scenario_tree().to_bytes().unwrap();
    stream.extend_from_slice(&file(&[record(b"next", &[])]));

    let mut cursor = &stream[..];
    let first = BkTree::read_from(&mut cursor).unwrap();
    let second = BkTree::read_from(&mut cursor).unwrap();
    assert!(cursor.is_empty());
    assert_eq!(first.len(), 6);
    assert!(second.contains("next"));
}
