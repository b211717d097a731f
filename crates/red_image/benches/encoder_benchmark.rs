use criterion::{criterion_group, criterion_main, Criterion};
use red_image::{build_single_frame_gif, encode_image, parse_gif, Palette};
use std::hint::black_box;

fn generate_gradient_gif(width: usize, height: usize) -> Vec<u8> {
    let pixels: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x * 255 / width + y) % 256) as u8))
        .collect();
    build_single_frame_gif(width, height, &Palette::synthesize_greyscale(), &pixels)
        .expect("Failed to build gradient gif")
}

fn bench_parse_scene(c: &mut Criterion) {
    let gif = generate_gradient_gif(320, 200);

    c.bench_function("parse_gif_320x200", |b| {
        b.iter(|| {
            let result = parse_gif(black_box(&gif));
            assert!(result.is_ok());
            result
        })
    });
}

fn bench_encode_scene(c: &mut Criterion) {
    let asset = parse_gif(&generate_gradient_gif(320, 200)).unwrap();

    c.bench_function("encode_scene_320x200", |b| {
        b.iter(|| {
            let result = encode_image(black_box(&asset));
            assert!(result.is_ok());
            result
        })
    });
}

fn bench_encode_heightmap(c: &mut Criterion) {
    let asset = parse_gif(&generate_gradient_gif(256, 256)).unwrap();

    c.bench_function("encode_heightmap_256x256", |b| {
        b.iter(|| {
            let result = encode_image(black_box(&asset));
            assert!(result.is_ok());
            result
        })
    });
}

criterion_group!(
    benches,
    bench_parse_scene,
    bench_encode_scene,
    bench_encode_heightmap
);

criterion_main!(benches);
