//! Performance benchmarks for wtree

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use termcolor::NoColor;
use wtree::test_utils::{RecordingOutput, TestTree};
use wtree::tree::{VisitedSet, is_archive_name};
use wtree::{OutputConfig, StreamingFormatter, TreeWalker, WalkerConfig};

/// `dirs` directories of `files_per_dir` files each, plus a link back to the
/// root inside every directory.
fn create_test_tree(dirs: usize, files_per_dir: usize) -> TestTree {
    let tree = TestTree::new();
    for d in 0..dirs {
        for f in 0..files_per_dir {
            tree.add_file(&format!("dir_{}/file_{}.txt", d, f), "");
        }
        tree.add_symlink("..", &format!("dir_{}/up", d));
    }
    tree
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    let small = create_test_tree(10, 10);
    let large = create_test_tree(50, 40);

    for (name, tree) in [("small_100_files", &small), ("large_2000_files", &large)] {
        group.bench_function(name, |b| {
            let walker = TreeWalker::new(WalkerConfig::new(false, false));
            b.iter(|| {
                let mut output = RecordingOutput::default();
                walker.walk(black_box(tree.path()), &mut output).unwrap();
                output
            })
        });
    }

    group.bench_function("large_follow_links", |b| {
        let walker = TreeWalker::new(WalkerConfig::new(false, true));
        b.iter(|| {
            let mut output = RecordingOutput::default();
            walker.walk(black_box(large.path()), &mut output).unwrap();
            output
        })
    });

    group.finish();
}

fn bench_formatting(c: &mut Criterion) {
    let tree = create_test_tree(20, 20);
    let walker = TreeWalker::new(WalkerConfig::new(true, true));

    c.bench_function("walk_and_format_plain", |b| {
        b.iter(|| {
            let mut formatter = StreamingFormatter::with_writer(
                OutputConfig { use_color: false },
                NoColor::new(Vec::with_capacity(64 * 1024)),
            );
            walker.walk(black_box(tree.path()), &mut formatter).unwrap();
            formatter.into_inner().into_inner().len()
        })
    });
}

fn bench_visited_set(c: &mut Criterion) {
    let paths: Vec<_> = (0..1000)
        .map(|i| std::path::PathBuf::from(format!("/srv/data/linked_{}", i)))
        .collect();

    c.bench_function("visited_set_test_and_insert_1000", |b| {
        b.iter(|| {
            let mut visited = VisitedSet::new();
            for path in &paths {
                visited.test_and_insert(black_box(path));
            }
            // Second pass hits every entry.
            for path in &paths {
                visited.test_and_insert(black_box(path));
            }
            visited.len()
        })
    });
}

fn bench_archive_names(c: &mut Criterion) {
    let names = ["backup.tar", "notes.txt", "release.tgz", "photo.jpeg", "a.7z", "README"];

    c.bench_function("archive_name_heuristic", |b| {
        b.iter(|| names.iter().filter(|n| is_archive_name(black_box(*n))).count())
    });
}

criterion_group!(
    benches,
    bench_walk,
    bench_formatting,
    bench_visited_set,
    bench_archive_names
);
criterion_main!(benches);
