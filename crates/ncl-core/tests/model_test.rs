use std::collections::BTreeSet;

use ncl_core::{
    Document,
    elements::{Body, CausalConnector, ConnectorBase, Media},
    identifier::Id,
};
use proptest::prelude::*;

fn media(name: &str) -> Media {
    let mut media = Media::new();
    media.set_id(Id::parse(name).unwrap());
    media
}

// ===================
// Strategies
// ===================

fn ids_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d][0-2]", 0..24)
}

// ===================
// Properties
// ===================

/// Adding nodes with repeated ids keeps exactly one node per id, ordered
/// by id, and reports every repeated add as a failure.
fn check_duplicates_rejected(ids: &[String]) -> Result<(), TestCaseError> {
    let mut doc = Document::new();
    let body = doc.create(Body::new());
    let mut seen = BTreeSet::new();

    for name in ids {
        let before = doc[body].nodes().len();
        let node = doc.create(media(name));
        let added = doc.add(body, node);

        prop_assert_eq!(added, seen.insert(name.clone()));
        let expected = if added { before + 1 } else { before };
        prop_assert_eq!(doc[body].nodes().len(), expected);
        if !added {
            prop_assert!(doc.parent(node).is_none());
        }
    }

    let labels: Vec<String> = doc[body]
        .nodes()
        .ids()
        .iter()
        .filter_map(|id| doc.element(*id))
        .filter_map(|element| element.label())
        .map(|label| label.to_string())
        .collect();
    let expected: Vec<String> = seen.into_iter().collect();
    prop_assert_eq!(labels, expected);
    Ok(())
}

proptest! {
    #[test]
    fn duplicates_rejected(ids in ids_strategy()) {
        check_duplicates_rejected(&ids)?;
    }
}

#[test]
fn test_moving_a_node_between_containers() {
    let mut doc = Document::new();
    let first = doc.create(ConnectorBase::new());
    let second = doc.create(ConnectorBase::new());
    let mut connector = CausalConnector::new();
    connector.set_id(Id::parse("onBeginStart").unwrap());
    let connector = doc.create(connector);

    assert!(doc.add(first, connector));
    assert!(doc.add(second, connector));

    assert!(!doc.has(first, connector));
    assert!(doc.has(second, connector));
    assert_eq!(doc.parent(connector), Some(second.id()));
}

#[test]
fn test_same_id_in_different_containers() {
    let mut doc = Document::new();
    let left = doc.create(Body::new());
    let right = doc.create(Body::new());
    let a = doc.create(media("shared"));
    let b = doc.create(media("shared"));

    assert!(doc.add(left, a));
    assert!(doc.add(right, b));
    assert!(doc.has_id::<_, Media>(left, "shared"));
    assert!(doc.has_id::<_, Media>(right, "shared"));
}
