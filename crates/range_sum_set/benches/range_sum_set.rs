use std::hint::black_box;
use std::ops::RangeInclusive;

use bench::{apply_medium_runtime_config, apply_small_runtime_config, default_rng};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::Rng;

use range_sum_set::RangeSumSet;

const SIZES: [usize; 4] = [1_000, 8_000, 64_000, 256_000];
const OPS_PER_ITER: usize = 1_000;
const KEY_RANGE: RangeInclusive<i64> = 0..=1_000_000_000;

#[derive(Clone, Copy)]
enum Op {
    Insert(i64),
    Erase(i64),
    Contains(i64),
    RangeSum(i64, i64),
}

fn generate_ops<R: Rng + ?Sized>(rng: &mut R) -> Vec<Op> {
    (0..OPS_PER_ITER)
        .map(|_| match rng.random_range(0..100_u32) {
            roll if roll < 30 => Op::Insert(rng.random_range(KEY_RANGE)),
            roll if roll < 50 => Op::Erase(rng.random_range(KEY_RANGE)),
            roll if roll < 75 => Op::Contains(rng.random_range(KEY_RANGE)),
            _ => {
                let lo = rng.random_range(KEY_RANGE);
                let hi = rng.random_range(lo..=*KEY_RANGE.end());
                Op::RangeSum(lo, hi)
            }
        })
        .collect()
}

fn run_ops(set: &mut RangeSumSet, ops: &[Op]) {
    for op in ops {
        match *op {
            Op::Insert(x) => set.insert(x),
            Op::Erase(x) => set.erase(x),
            Op::Contains(x) => {
                black_box(set.contains(x));
            }
            Op::RangeSum(lo, hi) => {
                black_box(set.range_sum(lo, hi));
            }
        }
    }
}

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_sum_set/mixed");

    for &size in &SIZES {
        if size >= 64_000 {
            apply_medium_runtime_config(&mut group);
        } else {
            apply_small_runtime_config(&mut group);
        }

        let mut rng = default_rng();
        let mut set = RangeSumSet::new();
        while set.len() < size {
            set.insert(rng.random_range(KEY_RANGE));
        }
        let ops = generate_ops(&mut rng);

        group.bench_function(BenchmarkId::new("splay", size), |bencher| {
            bencher.iter(|| {
                run_ops(&mut set, &ops);
                black_box(set.len());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
