use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use chromakit_color::{ColorSpaceId, ConversionEngine};
use chromakit_image::PixelBuffer;
use rand::Rng;

fn random_image(width: usize, height: usize, channels: usize) -> PixelBuffer<u8> {
    let mut rng = rand::rng();
    let data = (0..width * height * channels)
        .map(|_| rng.random::<u8>())
        .collect();
    PixelBuffer::new([width, height].into(), channels, data).unwrap()
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Convert");
    let engine = ConversionEngine::default();

    for (width, height) in [(256, 224), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let rgb = random_image(*width, *height, 3);
        let rgba = random_image(*width, *height, 4);

        group.bench_with_input(
            BenchmarkId::new("rgb_to_bgr", &parameter_string),
            &rgb,
            |b, i| b.iter(|| black_box(engine.convert(i, ColorSpaceId::Rgb, ColorSpaceId::Bgr))),
        );

        // two hops through the hub
        group.bench_with_input(
            BenchmarkId::new("hsv_to_lab", &parameter_string),
            &rgb,
            |b, i| b.iter(|| black_box(engine.convert(i, ColorSpaceId::Hsv, ColorSpaceId::Lab))),
        );

        group.bench_with_input(
            BenchmarkId::new("rgba_to_yuv_with_alpha", &parameter_string),
            &rgba,
            |b, i| b.iter(|| black_box(engine.convert(i, ColorSpaceId::Rgba, ColorSpaceId::Yuv))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
