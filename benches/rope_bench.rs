// model = "claude-opus-4-5"
// created = "2026-02-02"
// modified = "2026-02-02"
// driver = "Isaac Clayton"

//! Benchmark suite for the rope, with a plain `String` baseline.
//!
//! Workloads:
//! - sequential typing (append one chunk at a time)
//! - random inserts into a growing document
//! - random point deletes
//! - slicing a large document
//! - point lookups

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use strand::Rope;

const SEED: u64 = 0x57124d;

fn build_rope(len: usize) -> Rope {
    let text: String = ('a'..='z').cycle().take(len).collect();
    return Rope::from(text.as_str());
}

// =============================================================================
// Sequential typing
// =============================================================================

fn bench_sequential_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_append");
    for count in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("rope", count), &count, |b, &count| {
            b.iter(|| {
                let mut rope = Rope::new();
                for _ in 0..count {
                    rope = rope.insert(rope.len(), "x").unwrap();
                }
                black_box(rope.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("string", count), &count, |b, &count| {
            b.iter(|| {
                let mut s = String::new();
                for _ in 0..count {
                    s.push('x');
                }
                black_box(s.len())
            });
        });
    }
    group.finish();
}

// =============================================================================
// Random inserts
// =============================================================================

fn bench_random_inserts(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_inserts");
    for count in [1_000usize, 5_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("rope", count), &count, |b, &count| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(SEED);
                let mut rope = Rope::new();
                for _ in 0..count {
                    let at = rng.random_range(0..=rope.len());
                    rope = rope.insert(at, "abc").unwrap();
                }
                black_box(rope.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("string", count), &count, |b, &count| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(SEED);
                let mut s = String::new();
                for _ in 0..count {
                    let at = rng.random_range(0..=s.len());
                    s.insert_str(at, "abc");
                }
                black_box(s.len())
            });
        });
    }
    group.finish();
}

// =============================================================================
// Random deletes
// =============================================================================

fn bench_random_deletes(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_deletes");
    let count = 2_000usize;
    group.throughput(Throughput::Elements(count as u64));

    group.bench_function(BenchmarkId::new("rope", count), |b| {
        let base = build_rope(count * 2);
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(SEED);
            let mut rope = base.clone();
            for _ in 0..count {
                let at = rng.random_range(0..rope.len());
                rope = rope.delete_at(at).unwrap();
            }
            black_box(rope.len())
        });
    });

    group.bench_function(BenchmarkId::new("string", count), |b| {
        let base: String = ('a'..='z').cycle().take(count * 2).collect();
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(SEED);
            let mut s = base.clone();
            for _ in 0..count {
                let at = rng.random_range(0..s.len());
                s.remove(at);
            }
            black_box(s.len())
        });
    });

    group.finish();
}

// =============================================================================
// Slicing
// =============================================================================

fn bench_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("slices");
    let len = 100_000usize;
    let rope = build_rope(len);
    let text: String = ('a'..='z').cycle().take(len).collect();

    group.bench_function("rope_sub_rope", |b| {
        let mut rng = StdRng::seed_from_u64(SEED);
        b.iter(|| {
            let lo = rng.random_range(0..len);
            let hi = rng.random_range(lo..len);
            black_box(rope.sub_rope(lo, hi).unwrap().len())
        });
    });

    group.bench_function("string_substring", |b| {
        let mut rng = StdRng::seed_from_u64(SEED);
        b.iter(|| {
            let lo = rng.random_range(0..len);
            let hi = rng.random_range(lo..len);
            black_box(text[lo..hi].to_string().len())
        });
    });

    group.finish();
}

// =============================================================================
// Point lookups
// =============================================================================

fn bench_point_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_lookups");
    let len = 100_000usize;
    let rope = build_rope(len);

    group.bench_function("rope_get", |b| {
        let mut rng = StdRng::seed_from_u64(SEED);
        b.iter(|| {
            let at = rng.random_range(0..len);
            black_box(rope.get(at))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_append,
    bench_random_inserts,
    bench_random_deletes,
    bench_slices,
    bench_point_lookups,
);

criterion_main!(benches);
