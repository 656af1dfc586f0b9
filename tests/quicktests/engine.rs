use std::collections::BTreeSet;

use bstree::types::IntType;
use bstree::Tree;
use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts,
/// removes and rebalances we have the same set of values in both.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<IntType>, set: &mut BTreeSet<i32>) -> bool {
    for op in ops {
        match *op {
            Op::Insert(k) => {
                if tree.insert(i32::from(k)) != set.insert(i32::from(k)) {
                    return false;
                }
            }
            Op::Remove(k) => {
                if tree.remove(&i32::from(k)) != set.remove(&i32::from(k)) {
                    return false;
                }
            }
            Op::Balance => tree.balance(),
        }
    }

    true
}

fn tree_of(xs: &[i8]) -> Tree<IntType> {
    let mut tree = Tree::new(IntType);
    for &x in xs {
        tree.insert(i32::from(x));
    }
    tree
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new(IntType);
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set)
        && tree.len() == set.len()
        && tree.iter().copied().eq(set.iter().copied())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    xs.iter().all(|&x| tree.contains(&i32::from(x)))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = tree_of(&xs);
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|&x| !tree.contains(&i32::from(x)))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    for delete in &deletes {
        tree.remove(&i32::from(*delete));
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|&x| !tree.contains(&i32::from(x)))
        && still_present.iter().all(|&x| tree.contains(&i32::from(x)))
}

#[quickcheck]
fn balance_keeps_values_and_bounds_height(xs: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    let before: Vec<i32> = tree.iter().copied().collect();
    tree.balance();

    let n = tree.len();
    let bound = (usize::BITS - n.leading_zeros()) as usize;
    tree.iter().copied().eq(before) && tree.height() <= bound
}

#[quickcheck]
fn merge_is_union(xs: Vec<i8>, ys: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    let other = tree_of(&ys);
    let before = tree.len();
    let added = tree.merge(&other);

    let union: BTreeSet<i32> = xs.iter().chain(&ys).map(|&x| i32::from(x)).collect();
    added == union.len() - before && tree.iter().copied().eq(union)
}

#[quickcheck]
fn subtree_is_contained(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    xs.iter()
        .map(|&x| i32::from(x))
        .all(|x| tree.subtree(&x).map_or(false, |sub| tree.contains_subtree(&sub)))
}
