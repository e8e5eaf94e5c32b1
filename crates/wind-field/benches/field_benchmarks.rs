//! Benchmarks for the interpolation hot path and full field builds.
//!
//! Run with: cargo bench --package wind-field

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use spatial_index::{NeighborHeap, StationIndex};
use wind_common::{mask::FullMask, Bounds, StationSample, Vec2};
use wind_field::{FieldBuilder, Interpolator};

/// Scatter stations over a canvas-sized area, the way ground stations fall
/// across a metro region.
fn generate_stations(count: usize, width: f64, height: f64) -> Vec<StationSample> {
    let mut rng = StdRng::seed_from_u64(0xd1f7);
    (0..count)
        .map(|_| {
            let position = Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
            let vector = Vec2::new(rng.gen_range(-8.0..8.0), rng.gen_range(-8.0..8.0));
            StationSample::new(position, vector)
        })
        .collect()
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    for count in [50usize, 200, 800] {
        let stations = generate_stations(count, 1024.0, 768.0);
        let tree = StationIndex::build(&stations);
        let mut heap = NeighborHeap::new(5);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let mut i = 0u32;
            b.iter(|| {
                let q = Vec2::new((i % 1024) as f64, (i / 7 % 768) as f64);
                i = i.wrapping_add(13);
                black_box(tree.nearest(q, &mut heap))
            });
        });
    }
    group.finish();
}

fn bench_interpolate(c: &mut Criterion) {
    let stations = generate_stations(200, 1024.0, 768.0);
    let tree = StationIndex::build(&stations);
    let mut interp = Interpolator::new(5);
    c.bench_function("interpolate_one_pixel", |b| {
        let mut i = 0u32;
        b.iter(|| {
            let q = Vec2::new((i % 1024) as f64, (i / 3 % 768) as f64);
            i = i.wrapping_add(29);
            black_box(interp.estimate(&tree, q))
        });
    });
}

fn bench_full_build(c: &mut Criterion) {
    let stations = generate_stations(100, 256.0, 192.0);
    c.bench_function("build_256x192_field", |b| {
        b.iter(|| {
            let builder = FieldBuilder::new(
                black_box(&stations),
                Bounds::new(256, 192),
                &FullMask,
                &FullMask,
            )
            .unwrap();
            black_box(builder.run_to_completion())
        });
    });
}

criterion_group!(benches, bench_nearest, bench_interpolate, bench_full_build);
criterion_main!(benches);
