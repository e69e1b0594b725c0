use mltools_tree::{build, entropy, label_counts, Dataset, LeafReason, Node, Row, Value};
use proptest::prelude::*;
use std::collections::BTreeSet;

// Property-based tests for tree construction
// Rows carry three small-valued features and a label out of four classes

const WIDTH: usize = 4;
const LABEL: usize = 3;

fn arbitrary_row() -> impl Strategy<Value = Row> {
    (0i64..3, 0i64..4, 0i64..2, 0usize..4).prop_map(|(a, b, c, label)| {
        vec![
            Value::from(a),
            Value::from(b),
            Value::from(c),
            Value::from(["a", "b", "c", "d"][label]),
        ]
    })
}

fn arbitrary_dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(arbitrary_row(), 1..40)
        .prop_map(|rows| Dataset::new(rows, LABEL).expect("rows are uniform"))
}

fn sorted(mut rows: Vec<Row>) -> Vec<Row> {
    rows.sort();
    rows
}

proptest! {
    #[test]
    fn children_partition_parent_rows(dataset in arbitrary_dataset(), max_depth in 0usize..5) {
        let tree = build(&dataset, 0..LABEL, max_depth).unwrap();

        for node in tree.root().iter().filter(|n| !n.is_leaf()) {
            let total: usize = node.children().iter().map(|c| c.rows().len()).sum();
            prop_assert_eq!(total, node.rows().len());

            let merged: Vec<Row> = node
                .children()
                .iter()
                .flat_map(|c| c.rows().iter().cloned())
                .collect();
            prop_assert_eq!(sorted(merged), sorted(node.rows().to_vec()));
        }
    }
}

proptest! {
    #[test]
    fn children_share_one_split_value(dataset in arbitrary_dataset()) {
        let tree = build(&dataset, 0..LABEL, 3).unwrap();

        for node in tree.root().iter() {
            let Some(feature) = node.splitting_feature() else { continue };
            prop_assert!(!node.children().is_empty());

            let mut seen = BTreeSet::new();
            for child in node.children() {
                let value = child.split_value().cloned();
                prop_assert!(value.is_some());
                prop_assert!(child.rows().iter().all(|r| Some(&r[feature]) == value.as_ref()));
                prop_assert!(seen.insert(value));
            }
        }
    }
}

proptest! {
    #[test]
    fn entropy_is_bounded(dataset in arbitrary_dataset()) {
        let tree = build(&dataset, 0..LABEL, 3).unwrap();

        for node in tree.root().iter() {
            let k = label_counts(node.rows(), LABEL).len();
            prop_assert!(node.entropy() >= 0.0);
            prop_assert!(node.entropy() <= (k as f64).log2() + 1e-9);
            prop_assert_eq!(node.entropy() == 0.0, k == 1);
            prop_assert_eq!(node.entropy(), entropy(node.rows(), LABEL));
        }
    }
}

proptest! {
    #[test]
    fn candidates_shrink_by_the_split_feature(dataset in arbitrary_dataset()) {
        let tree = build(&dataset, 0..LABEL, 3).unwrap();
        prop_assert_eq!(tree.root().candidate_features(), &BTreeSet::from([0, 1, 2]));

        for node in tree.root().iter() {
            let Some(feature) = node.splitting_feature() else { continue };
            prop_assert!(node.candidate_features().contains(&feature));
            for child in node.children() {
                prop_assert_eq!(
                    child.candidate_features().len() + 1,
                    node.candidate_features().len()
                );
                prop_assert!(!child.candidate_features().contains(&feature));
                prop_assert_eq!(child.depth(), node.depth() + 1);
            }
        }
    }
}

proptest! {
    #[test]
    fn depth_cap_is_respected(dataset in arbitrary_dataset(), max_depth in 0usize..4) {
        let tree = build(&dataset, 0..LABEL, max_depth).unwrap();

        prop_assert!(tree.depth() <= max_depth);
        for node in tree.root().iter() {
            if node.leaf_reason() == Some(LeafReason::DepthCapped) {
                prop_assert_eq!(node.depth(), max_depth);
            }
            if node.depth() == max_depth {
                prop_assert!(node.is_leaf());
            }
        }
    }
}

proptest! {
    #[test]
    fn leaves_are_consistent(dataset in arbitrary_dataset()) {
        let tree = build(&dataset, 0..LABEL, 3).unwrap();

        for node in tree.root().iter() {
            prop_assert_eq!(node.is_leaf(), node.class_label().is_some());
            match node.leaf_reason() {
                Some(LeafReason::Pure) => {
                    prop_assert!(node.rows().iter().all(|r| Some(&r[LABEL]) == node.class_label()));
                }
                Some(LeafReason::Exhausted) => prop_assert!(node.candidate_features().is_empty()),
                _ => {}
            }
        }
    }
}

proptest! {
    #[test]
    fn training_rows_always_reach_a_leaf(dataset in arbitrary_dataset()) {
        let tree = build(&dataset, 0..LABEL, 3).unwrap();
        for row in dataset.rows() {
            prop_assert!(tree.predict(row).unwrap().is_some());
        }
    }
}

proptest! {
    #[test]
    fn construction_is_deterministic(dataset in arbitrary_dataset(), max_depth in 0usize..4) {
        let first = build(&dataset, 0..LABEL, max_depth).unwrap();
        let second = build(&dataset, (0..LABEL).rev(), max_depth).unwrap();
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #[test]
    fn single_label_is_always_a_root_leaf(
        rows in prop::collection::vec((0i64..5, 0i64..5), 1..20),
        features in prop::collection::btree_set(0usize..2, 0..3),
    ) {
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|(a, b)| vec![Value::from(a), Value::from(b), Value::from("A")])
            .collect();
        let dataset = Dataset::new(rows, 2).unwrap();
        let tree = build(&dataset, features, 3).unwrap();

        let root: &Node = tree.root();
        prop_assert!(root.is_leaf());
        prop_assert_eq!(root.class_label(), Some(&Value::from("A")));
        prop_assert_eq!(root.entropy(), 0.0);
        prop_assert_eq!(tree.node_count(), 1);
    }
}

#[test]
fn dataset_width_matches_rows() {
    let dataset = Dataset::new(vec![vec![Value::from(1); WIDTH]], LABEL).unwrap();
    assert_eq!(dataset.width(), WIDTH);
}
