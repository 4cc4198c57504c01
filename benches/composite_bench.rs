use criterion::{Criterion, criterion_group, criterion_main};
use image::Luma;
use mimosa::composite::{self, Colormap, PercentileClip, SpectralIndex};
use mimosa::types::VALID;
use mimosa::{Band, BandId, BandSet, Mask, MaskSet};
use std::hint::black_box;

/// A quarter of a 10980 px tile side
const SIDE: u32 = 2745;

fn synthetic_band(seed: u32) -> Band {
    let mut state = seed.max(1);
    Band::from_fn(SIDE, SIDE, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        Luma([(state >> 8) as f32 / (1 << 24) as f32 * 0.6])
    })
}

fn synthetic_scene() -> (BandSet, MaskSet) {
    let mut bands = BandSet::new();
    let mut masks = MaskSet::new();
    for (i, id) in BandId::ALL.into_iter().enumerate() {
        bands.insert(id, synthetic_band(i as u32 + 1));
        masks.insert(id, Mask::from_pixel(SIDE, SIDE, Luma([VALID])));
    }
    (bands, masks)
}

// ============================================================================
// TIER 1: FULL RENDER BENCHMARKS (Primary Baseline)
// ============================================================================

/// Normalized false color composite from in-memory bands
fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    let (bands, masks) = synthetic_scene();
    let channels = composite::lookup_preset("False Color").unwrap();

    group.bench_function("false_color_normalized", |b| {
        b.iter(|| {
            composite::build_rgb(black_box(&bands), black_box(&masks), channels, true).unwrap()
        });
    });

    group.bench_function("false_color_raw", |b| {
        b.iter(|| {
            composite::build_rgb(black_box(&bands), black_box(&masks), channels, false).unwrap()
        });
    });

    group.finish();
}

/// NDVI plus colormap
fn bench_index_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_render");
    let (bands, masks) = synthetic_scene();

    group.bench_function("ndvi_rdylgn", |b| {
        b.iter(|| {
            let (values, mask) = SpectralIndex::Ndvi
                .calculate_with_mask(black_box(&bands), black_box(&masks))
                .unwrap();
            let mut rgb = composite::visualize(&values, Colormap::RdYlGn);
            composite::apply_mask(&mut rgb, &mask);
            black_box(rgb);
        });
    });

    group.finish();
}

// ============================================================================
// TIER 2: COMPONENT-LEVEL BENCHMARKS (Diagnostic)
// ============================================================================

/// Percentile stretch, dominated by the sort
fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let band = synthetic_band(7);
    let mask = Mask::from_pixel(SIDE, SIDE, Luma([VALID]));

    group.bench_function("with_mask", |b| {
        b.iter(|| composite::normalize(black_box(&band), Some(&mask), PercentileClip::DEFAULT));
    });

    group.bench_function("without_mask", |b| {
        b.iter(|| composite::normalize(black_box(&band), None, PercentileClip::DEFAULT));
    });

    group.finish();
}

fn bench_visualize(c: &mut Criterion) {
    let mut group = c.benchmark_group("visualize");
    let (bands, masks) = synthetic_scene();
    let ndvi = SpectralIndex::Ndvi.calculate(&bands, &masks).unwrap();

    group.bench_function("rdylgn", |b| {
        b.iter(|| composite::visualize(black_box(&ndvi), Colormap::RdYlGn));
    });

    group.finish();
}

// ============================================================================
// BENCHMARK REGISTRATION
// ============================================================================

criterion_group!(
    benches,
    // Primary baseline (these run by default with `cargo bench`)
    bench_composite,
    bench_index_render,
    // Diagnostic benchmarks (help identify bottlenecks)
    bench_normalize,
    bench_visualize,
);

criterion_main!(benches);
