use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotpixels_rs::hot_pixels::{
    BlackFrameParser, FilterMethod, HotPixelContainer, HotPixelFixer, HotPixelProps, HotPixelsWeights, ImageBuffer, Rect, Rgba,
    RgbaImage,
};

fn generate_image(width: usize, height: usize) -> RgbaImage {
    RgbaImage::from_fn(width, height, true, |x, y| Rgba::gray(((x * 37 + y * 11) % 4096) as u16, true))
}

fn generate_defects(width: u32, height: u32, region: u32, count: u32) -> Vec<HotPixelProps> {
    (0..count)
        .filter_map(|i| {
            let x = (i * 97) % (width - 2 * region) + region / 2;
            let y = (i * 53) % (height - 2 * region) + region / 2;
            HotPixelProps::with_rect(Rect::new(x, y, region, region), 1).ok()
        })
        .collect()
}

fn benchmark_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("fix_by_method");
    let image = generate_image(500, 500);
    let defects = generate_defects(500, 500, 1, 200);

    let methods = vec![
        (FilterMethod::Average, "average"),
        (FilterMethod::Linear, "linear"),
        (FilterMethod::Quadratic, "quadratic"),
        (FilterMethod::Cubic, "cubic"),
    ];

    for (method, label) in methods {
        let container = HotPixelContainer::new("bench", defects.clone(), method);
        group.bench_with_input(BenchmarkId::from_parameter(label), &container, |b, container| {
            let fixer = HotPixelFixer::new();
            b.iter(|| fixer.fix(black_box(&image), container));
        });
    }

    group.finish();
}

fn benchmark_region_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("fix_by_region_size");
    let image = generate_image(500, 500);

    for region in [1u32, 2, 4] {
        let container = HotPixelContainer::new("bench", generate_defects(500, 500, region, 100), FilterMethod::Quadratic);
        group.bench_with_input(BenchmarkId::from_parameter(region), &container, |b, container| {
            let fixer = HotPixelFixer::new();
            b.iter(|| fixer.fix(black_box(&image), container));
        });
    }

    group.finish();
}

fn benchmark_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("weights_calculation");

    for order in 1..=3u32 {
        group.bench_with_input(BenchmarkId::from_parameter(order), &order, |b, &order| {
            b.iter(|| HotPixelsWeights::calculate(black_box(2), black_box(2), order, true));
        });
    }

    group.finish();
}

fn benchmark_black_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("black_frame_parse");
    let mut frame = RgbaImage::new(1000, 1000, true);
    for i in 0..300usize {
        frame.set_pixel((i * 131) % 1000, (i * 71) % 1000, Rgba::gray(50000, true));
    }
    let parser = BlackFrameParser::default();

    group.bench_function("1000x1000", |b| {
        b.iter(|| parser.parse(black_box(&frame)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_methods,
    benchmark_region_sizes,
    benchmark_weights,
    benchmark_black_frame
);
criterion_main!(benches);
