//! Benchmarks for the convolution engine.
//!
//! Run with: `cargo bench -p pconv-bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use pconv_core::{ChannelLayout, PixelBuffer};
use pconv_ops::{convolve, sharpen, Kernel};

/// Non-uniform test image so the clamp branches are exercised.
fn test_image(width: u32, height: u32, layout: ChannelLayout) -> PixelBuffer {
    let channels = layout.channels();
    let data = (0..(width * height) as usize * channels)
        .map(|i| ((i * 7919) % 251) as u8)
        .collect();
    PixelBuffer::from_data(width, height, layout, data).expect("valid test image")
}

/// Sharpen at increasing thread counts.
fn bench_sharpen_threads(c: &mut Criterion) {
    let mut group = c.benchmark_group("sharpen_threads");

    for layout in [ChannelLayout::Rgb, ChannelLayout::Rgba] {
        let image = test_image(1024, 768, layout);
        group.throughput(Throughput::Elements(image.pixel_count() as u64));

        for threads in [1usize, 2, 4, 8] {
            let id = BenchmarkId::new(layout.name(), threads);
            group.bench_with_input(id, &threads, |b, &t| {
                b.iter(|| sharpen(black_box(&image), t).expect("sharpen"))
            });
        }
    }

    group.finish();
}

/// Cost growth with kernel size.
fn bench_kernel_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_size");
    let image = test_image(512, 512, ChannelLayout::Rgb);
    group.throughput(Throughput::Elements(image.pixel_count() as u64));

    for size in [3usize, 5, 7] {
        let kernel = Kernel::new(vec![1; size * size], size, size).expect("box kernel");
        group.bench_with_input(BenchmarkId::new("box", size), &kernel, |b, k| {
            b.iter(|| convolve(black_box(&image), k, 0, 4).expect("convolve"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sharpen_threads, bench_kernel_size);
criterion_main!(benches);
