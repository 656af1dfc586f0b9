use std::collections::BTreeSet;

use bstree::types::{IntType, StringType};
use bstree::{TraversalOrder, Tree};
use quickcheck_macros::quickcheck;

fn tree_of(xs: &[i16]) -> Tree<IntType> {
    let mut tree = Tree::new(IntType);
    for &x in xs {
        tree.insert(i32::from(x));
    }
    tree
}

fn same_shape(a: &Tree<IntType>, b: &Tree<IntType>) -> bool {
    a.to_string_formatted() == b.to_string_formatted()
}

#[quickcheck]
fn in_order_is_sorted_and_unique(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);
    let expected: BTreeSet<i32> = xs.iter().map(|&x| i32::from(x)).collect();
    let expected: Vec<String> = expected.iter().map(i32::to_string).collect();

    tree.to_string_in_order() == expected.join(" ")
}

#[quickcheck]
fn pre_order_rebuilds_shape(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);
    let mut copy = Tree::new(IntType);

    copy.load_traversal(&tree.to_string_pre_order(), TraversalOrder::PreOrder)
        .is_ok()
        && same_shape(&tree, &copy)
}

#[quickcheck]
fn every_order_rebuilds_values(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);

    [
        TraversalOrder::InOrder,
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
    ]
    .into_iter()
    .all(|order| {
        let mut copy = Tree::new(IntType);
        copy.load_traversal(&tree.to_traversal_string(order), order)
            .is_ok()
            && copy.to_string_in_order() == tree.to_string_in_order()
    })
}

#[quickcheck]
fn formatted_rebuilds_shape(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);
    let mut copy = Tree::new(IntType);

    copy.load_formatted(&tree.to_string_formatted()).is_ok() && same_shape(&tree, &copy)
}

#[quickcheck]
fn pair_list_rebuilds_shape(xs: Vec<i16>) -> bool {
    let tree = tree_of(&xs);
    let pairs: Vec<(i32, Option<i32>)> = tree
        .to_pair_list()
        .into_iter()
        .map(|(value, parent)| (*value, parent.copied()))
        .collect();
    let mut copy = Tree::new(IntType);

    copy.load_pair_list(pairs).is_ok() && same_shape(&tree, &copy)
}

#[quickcheck]
fn string_trees_keep_count(words: Vec<String>) -> bool {
    let words: Vec<String> = words
        .into_iter()
        .filter(|w| !w.is_empty() && !w.contains(char::is_whitespace))
        .collect();
    let mut tree = Tree::new(StringType);
    for word in &words {
        tree.insert(word.clone());
    }
    let distinct: BTreeSet<&String> = words.iter().collect();

    let mut copy = Tree::new(StringType);
    copy.load_traversal(&tree.to_string_post_order(), TraversalOrder::PostOrder)
        .is_ok()
        && tree.len() == distinct.len()
        && copy.len() == tree.len()
}
