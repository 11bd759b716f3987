use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use skipbucket::SkipList;

const N: u64 = 10_000;

pub fn sequential(c: &mut Criterion) {
    c.bench_function("SkipList::insert sequential", |b| {
        b.iter_batched(
            || SkipList::<u64, u64>::with_seed(1),
            |mut list| {
                for k in 0..N {
                    list.insert(k, k);
                }
                list
            },
            BatchSize::LargeInput,
        )
    });
}

pub fn random(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let keys: Vec<u64> = (0..N).map(|_| rng.gen()).collect();
    c.bench_function("SkipList::insert random", |b| {
        b.iter_batched(
            || SkipList::<u64, u64>::with_seed(1),
            |mut list| {
                for &k in &keys {
                    list.insert(k, k);
                }
                list
            },
            BatchSize::LargeInput,
        )
    });
}

pub fn duplicate(c: &mut Criterion) {
    let mut list = SkipList::<u64, u64>::with_seed(1);
    for k in 0..N {
        list.insert(k, k);
    }
    let mut v = 0;
    c.bench_function("SkipList::insert duplicate", |b| {
        b.iter(|| {
            v += 1;
            list.insert(v % N, v)
        })
    });
}

criterion_group!(benches, sequential, random, duplicate);
criterion_main!(benches);
