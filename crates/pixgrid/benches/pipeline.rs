use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pixgrid::lines::{energy_heatmap, energy_map, GridLineDetector};
use pixgrid::{GridLineParams, PixelGridPipeline, PixgridParams, RgbImage, SampleMode, SampleParams};

/// Checkerboard of `cell` px blocks with 1 px dark separators, `size × size`.
fn outlined_checker(size: usize, cell: usize) -> RgbImage {
    let mut img = RgbImage::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let rgb = if (x % cell == 0 && x > 0) || (y % cell == 0 && y > 0) {
                [10, 10, 10]
            } else if (x / cell + y / cell) % 2 == 0 {
                [230, 40, 40]
            } else {
                [20, 20, 200]
            };
            img.put(x, y, rgb);
        }
    }
    img
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for size in [128usize, 512] {
        let img = outlined_checker(size, 8);
        for mode in SampleMode::ALL {
            let params = PixgridParams {
                sample: SampleParams {
                    mode,
                    ..SampleParams::default()
                },
                ..PixgridParams::default()
            };
            let pipeline = PixelGridPipeline::new(params).expect("valid params");
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), size),
                &img,
                |b, img| b.iter(|| pipeline.run(black_box(&img.view())).expect("run")),
            );
        }
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let img = outlined_checker(512, 8);
    let gray = pixgrid::core::rgb_to_gray(&img.view());

    c.bench_function("energy_map_512", |b| {
        b.iter(|| energy_map(black_box(&gray.view()), 1.0))
    });

    let energy = energy_map(&gray.view(), 1.0);
    c.bench_function("energy_heatmap_512", |b| {
        b.iter(|| energy_heatmap(black_box(&energy)))
    });

    let detector = GridLineDetector::new(GridLineParams::default()).expect("valid params");
    c.bench_function("detect_512", |b| {
        b.iter(|| detector.detect(black_box(&gray.view())))
    });
}

criterion_group!(benches, bench_pipeline, bench_stages);
criterion_main!(benches);
