use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use bstree::types::IntType;
use bstree::Tree;

/// Trees of `2^levels - 1` nodes, so a balanced tree is perfect.
const LEVELS: [u32; 3] = [3, 7, 11];

/// How the values of a benchmark tree were inserted.
#[derive(Clone, Copy)]
enum Shape {
    /// Ascending inserts, which build a chain.
    Ascending,
    /// Shuffled inserts, which build a roughly balanced tree.
    Shuffled,
    /// Ascending inserts followed by `balance`.
    Balanced,
}

impl Shape {
    fn name(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Shuffled => "shuffled",
            Self::Balanced => "balanced",
        }
    }

    fn values(self, num_nodes: i32) -> Vec<i32> {
        let mut values: Vec<i32> = (0..num_nodes).collect();
        if let Self::Shuffled = self {
            values.shuffle(&mut StdRng::seed_from_u64(0x5eed));
        }
        values
    }

    fn build(self, num_nodes: i32) -> Tree<IntType> {
        let mut tree = Tree::new(IntType);
        for x in self.values(num_nodes) {
            tree.insert(x);
        }
        if let Self::Balanced = self {
            tree.balance();
        }
        tree
    }
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs it against every shape at
/// every size, timing only the closure. `f` gets a fresh tree and the largest value in it.
fn bench_helper(
    c: &mut Criterion,
    name: &str,
    shapes: &[Shape],
    f: impl Fn(&mut Tree<IntType>, i32),
) {
    let mut group = c.benchmark_group(name);

    for num_levels in LEVELS {
        let num_nodes = 2i32.pow(num_levels) - 1;
        let largest_element_in_tree = num_nodes - 1;

        for &shape in shapes {
            let id = BenchmarkId::new(shape.name(), num_nodes);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(shape.build(num_nodes));
                        let instant = Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// Building a whole tree, which is where insertion order shows.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for num_levels in LEVELS {
        let num_nodes = 2i32.pow(num_levels) - 1;
        for shape in [Shape::Ascending, Shape::Shuffled] {
            let values = shape.values(num_nodes);
            group.bench_with_input(
                BenchmarkId::new(shape.name(), num_nodes),
                &values,
                |b, values| {
                    b.iter(|| {
                        let mut tree = Tree::new(IntType);
                        for &x in values {
                            tree.insert(black_box(x));
                        }
                        tree
                    })
                },
            );
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let all = [Shape::Ascending, Shape::Shuffled, Shape::Balanced];

    bench_build(c);

    bench_helper(c, "search", &all, |tree, i| {
        let _found = black_box(tree.contains(&i));
    });
    bench_helper(c, "search-miss", &all, |tree, i| {
        let _found = black_box(tree.contains(&(i + 1)));
    });
    bench_helper(c, "insert", &all, |tree, i| {
        tree.insert(i + 1);
    });
    bench_helper(c, "remove", &all, |tree, i| {
        tree.remove(&i);
    });
    bench_helper(c, "balance", &[Shape::Ascending, Shape::Shuffled], |tree, _| {
        tree.balance();
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
