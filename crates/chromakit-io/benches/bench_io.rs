use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use chromakit_image::PixelBuffer;
use chromakit_io::{functional, raw};

fn bench_read_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("ImageIo");

    let tmp_dir = tempfile::tempdir().unwrap();
    let png_path = tmp_dir.path().join("bench.png");
    let raw_path = tmp_dir.path().join("bench.ckraw");

    let image = PixelBuffer::<u8>::from_size_val([640, 480].into(), 3, 127).unwrap();
    functional::write_image(&png_path, &image).unwrap();
    raw::write_raw_array(&raw_path, &image).unwrap();

    group.bench_function("read_png_unchanged", |b| {
        b.iter(|| black_box(functional::read_image_unchanged(&png_path)).unwrap())
    });

    group.bench_function("read_raw_array", |b| {
        b.iter(|| black_box(raw::read_raw_array(&raw_path)).unwrap())
    });

    group.bench_function("write_raw_array", |b| {
        b.iter(|| black_box(raw::write_raw_array(&raw_path, &image)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_read_write);
criterion_main!(benches);
