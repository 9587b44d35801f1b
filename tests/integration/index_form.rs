//! The position-addressed record form, including its JSON rendering.

use bkmatch::{BkError, BkTree, IndexForm, NodeId, SerializedNode};

use crate::common::{clinical_tree, pairs, scenario_tree, search_owned};

#[test]
fn test_scenario_records_are_breadth_first() {
    let form = scenario_tree().to_serializable();
    let terms: Vec<&[u8]> = form.iter().map(|node| node.term.as_slice()).collect();
    // book; its children books (1), cake (4); then boo under books; cape, cart under cake
    assert_eq!(
        terms,
        vec![&b"book"[..], b"books", b"cake", b"boo", b"cape", b"cart"]
    );
    assert_eq!(form[0].children, vec![(1, 1), (4, 2)]);
    assert_eq!(form[1].children, vec![(2, 3)]);
    assert_eq!(form[2].children, vec![(1, 4), (2, 5)]);
    assert!(form[3..].iter().all(|node| node.children.is_empty()));
}

#[test]
fn test_loaded_tree_numbers_nodes_by_record() {
    // books lands under boo, so it is inserted third but recorded last
    let tree: BkTree = ["book", "boo", "books", "cake"].into_iter().collect();
    let built: Vec<&[u8]> = tree.terms().collect();
    assert_eq!(built, vec![&b"book"[..], b"boo", b"books", b"cake"]);

    let loaded = BkTree::from_bytes(&tree.to_bytes().unwrap()).unwrap();
    let recorded: Vec<&[u8]> = loaded.terms().collect();
    assert_eq!(recorded, vec![&b"book"[..], b"boo", b"cake", b"books"]);
    assert_eq!(tree.term(NodeId(2)), Some(&b"books"[..]));
    assert_eq!(loaded.term(NodeId(2)), Some(&b"cake"[..]));
}

#[test]
fn test_rebuilt_tree_answers_the_same() {
    let tree = clinical_tree();
    let rebuilt = BkTree::from_serializable(tree.to_serializable()).unwrap();
    for query in ["cardiak", "stenosis", "hepatits", "aortc"] {
        assert_eq!(search_owned(&rebuilt, query, 2), search_owned(&tree, query, 2));
    }
}

#[test]
fn test_json_round_trip() {
    let form = scenario_tree().to_serializable();
    let json = serde_json::to_string(&form).unwrap();
    let parsed: IndexForm = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, form);

    let tree = BkTree::from_serializable(parsed).unwrap();
    assert_eq!(
        search_owned(&tree, "book", 1),
        pairs(&[("book", 0), ("boo", 1), ("books", 1)])
    );
}

#[test]
fn test_json_shape() {
    let form = vec![
        SerializedNode::new("ab", vec![(1, 1)]),
        SerializedNode::new("a", vec![]),
    ];
    let value = serde_json::to_value(&form).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            { "term": [97, 98], "children": [[1, 1]] },
            { "term": [97], "children": [] }
        ])
    );
}

#[test]
fn test_empty_form_is_empty_tree() {
    let tree = BkTree::from_serializable(Vec::new()).unwrap();
    assert!(tree.is_empty());
    assert!(tree.to_serializable().is_empty());
}

#[test]
fn test_index_out_of_range() {
    let form = vec![
        SerializedNode::new("a", vec![(1, 1)]),
        SerializedNode::new("b", vec![(1, 7)]),
    ];
    match BkTree::from_serializable(form) {
        Err(BkError::IndexOutOfRange { index, len }) => {
            assert_eq!(index, 7);
            assert_eq!(len, 2);
        }
        other => panic!("expected IndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn test_not_a_tree_is_format_error() {
    // "c" is never attached
    let form = vec![
        SerializedNode::new("a", vec![(1, 1)]),
        SerializedNode::new("b", vec![]),
        SerializedNode::new("c", vec![]),
    ];
    assert!(matches!(
        BkTree::from_serializable(form),
        Err(BkError::Format(_))
    ));
}
