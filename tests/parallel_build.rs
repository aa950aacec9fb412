//! Determinism across execution tiers: the same input must yield the same
//! tree whether built sequentially, on the task pool, or across a group.

use parkd::{Dataset, KdTree, TreeBuilder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_dataset(n: usize, seed: u64) -> Dataset<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            (
                rng.random_range(-500.0..500.0),
                rng.random_range(-500.0..500.0),
            )
        })
        .collect()
}

fn sequential_reference(data: &Dataset<f64>) -> KdTree<f64> {
    let mut copy = data.clone();
    TreeBuilder::new().sequential().build(&mut copy).unwrap()
}

#[test]
fn task_parallel_build_matches_sequential() {
    let _ = env_logger::builder().is_test(true).try_init();

    for seed in [1, 2, 3] {
        let data = random_dataset(2000, seed);
        let reference = sequential_reference(&data);

        let mut copy = data.clone();
        let parallel = TreeBuilder::new().cutoff(32).build(&mut copy).unwrap();

        assert!(reference.same_shape(&parallel), "seed {seed} diverged");
        assert_eq!(parallel.cardinality(), 2000);
    }
}

#[test]
fn worker_count_does_not_affect_shape() {
    let data = random_dataset(1500, 11);
    let reference = sequential_reference(&data);

    for workers in [1, 2, 4] {
        let mut copy = data.clone();
        let tree = TreeBuilder::new()
            .workers(workers)
            .cutoff(64)
            .build(&mut copy)
            .unwrap();
        assert!(
            reference.same_shape(&tree),
            "{workers} workers changed the tree"
        );
    }
}

#[test]
fn group_build_matches_sequential() {
    let data = random_dataset(2500, 23);
    let reference = sequential_reference(&data);

    for processes in [2, 4, 8] {
        let mut copy = data.clone();
        let tree = TreeBuilder::new()
            .processes(processes)
            .cutoff(64)
            .build(&mut copy)
            .unwrap();
        assert!(
            reference.same_shape(&tree),
            "{processes} processes changed the tree"
        );
        assert_eq!(tree.cardinality(), 2500);
    }
}

#[test]
fn group_build_tags_every_node_with_its_rank() {
    let mut data = random_dataset(600, 5);
    let tree = TreeBuilder::new().processes(4).build(&mut data).unwrap();

    let mut tagged = 0usize;
    let mut total = 0usize;
    tree.root().for_each(&mut |node| {
        total += 1;
        if node.owner().is_some() {
            tagged += 1;
        }
    });
    assert_eq!(tagged, total);
}

#[test]
fn repeated_parallel_builds_are_identical() {
    let data = random_dataset(1000, 99);
    let first = {
        let mut copy = data.clone();
        TreeBuilder::new().cutoff(16).build(&mut copy).unwrap()
    };
    for _ in 0..3 {
        let mut copy = data.clone();
        let again = TreeBuilder::new().cutoff(16).build(&mut copy).unwrap();
        assert!(first.same_shape(&again));
    }
}
