use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vorosweep::{build, Point, SiteId, VoronoiConfig};

const SIZES: [usize; 4] = [100, 1000, 10_000, 100_000];

fn random_sites(count: usize) -> Vec<(SiteId, Point)> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..count as SiteId)
        .map(|id| (id, Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0))))
        .collect()
}

fn benchmark_rebuild(c: &mut Criterion) {
    let config = VoronoiConfig::default();
    let mut group = c.benchmark_group("rebuild");
    group.sample_size(10);

    for &size in &SIZES {
        let sites = random_sites(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &sites, |b, sites| {
            b.iter(|| build(sites, &config))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_rebuild);
criterion_main!(benches);
