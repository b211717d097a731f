use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use red_image::{classify, decode_image, FORMATS, PALETTE_BYTES};
use std::hint::black_box;

fn generate_raw(byte_size: usize) -> Vec<u8> {
    (0..byte_size)
        .map(|i| if i < PALETTE_BYTES { (i % 64) as u8 } else { (i % 256) as u8 })
        .collect()
}

fn bench_decode_formats(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for format in FORMATS.iter().filter(|f| !f.uses_external_palette()) {
        let data = generate_raw(format.byte_size);
        group.bench_with_input(BenchmarkId::from_parameter(format.extension), &data, |b, data| {
            b.iter(|| {
                let format = classify(data.len()).unwrap();
                let result = decode_image(format, black_box(data), None);
                assert!(result.is_ok());
                result
            })
        });
    }

    group.finish();
}

fn bench_decode_to_gif(c: &mut Criterion) {
    let data = generate_raw(64768);
    let format = classify(data.len()).unwrap();

    c.bench_function("decode_scene_to_gif", |b| {
        b.iter(|| {
            let image = decode_image(format, black_box(&data), None).unwrap();
            let result = image.to_gif();
            assert!(result.is_ok());
            result
        })
    });
}

criterion_group!(benches, bench_decode_formats, bench_decode_to_gif);

criterion_main!(benches);
