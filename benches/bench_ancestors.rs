use arena::BlockAllocator;
use ancestors::Builder;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_genotypes(num_samples: u32, num_sites: u32) -> Vec<Vec<u8>> {
    (0..num_sites)
        .map(|site| {
            (0..num_samples)
                .map(|sample| u8::from((sample + site) % 3 != 0))
                .collect()
        })
        .collect()
}

fn bench_make_ancestor(c: &mut Criterion) {
    let num_samples = 64;
    let num_sites = 200;
    let genotypes = build_genotypes(num_samples, num_sites);

    let arena = BlockAllocator::new(1 << 20);
    let mut builder = Builder::init(&arena, num_samples, num_sites, 0).unwrap();
    for (site_id, column) in genotypes.iter().enumerate() {
        let frequency = column.iter().map(|&g| u32::from(g)).sum();
        builder.add_site(site_id as u32, frequency, column).unwrap();
    }
    builder.finalise().unwrap();

    let mut group = c.benchmark_group("ancestors");
    let mut out = vec![0i8; num_sites as usize];
    group.bench_function("make_ancestor", |b| {
        b.iter(|| {
            let focal = black_box(&[0u32]);
            let _ = builder.make_ancestor(focal, &mut out);
        });
    });

    group.bench_function("make_ancestors_parallel", |b| {
        b.iter(|| black_box(builder.make_ancestors_parallel().unwrap()));
    });
}

criterion_group!(benches, bench_make_ancestor);
criterion_main!(benches);
