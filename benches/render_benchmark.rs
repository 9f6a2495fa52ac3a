//! Benchmarks for the per-response path: decode, build the list, render.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use usagemon::app::App;
use usagemon::config::MonitorConfig;
use usagemon::models::{StatsResponse, UsageList};
use usagemon::ui::render;

/// A `/stats` body for a machine with `cores` cores.
fn generate_stats_body(cores: usize) -> String {
    let usages = std::iter::once(("overall".to_string(), 42.125))
        .chain((1..=cores).map(|i| (format!("core {}", i), i as f64 * 0.731)))
        .collect();
    serde_json::to_string(&StatsResponse::new(usages)).unwrap()
}

fn bench_decode_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_and_build");

    for cores in [4, 16, 64, 256].iter() {
        let body = generate_stats_body(*cores);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cores), &body, |b, body| {
            b.iter(|| {
                let stats = StatsResponse::from_slice(black_box(body.as_bytes())).unwrap();
                black_box(UsageList::from(stats).labels())
            })
        });
    }

    group.finish();
}

fn bench_render_screen(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_screen");

    for cores in [4, 16, 64].iter() {
        let body = generate_stats_body(*cores);
        let mut app = App::new(&MonitorConfig::default());
        app.apply_usages(0, UsageList::from(StatsResponse::from_slice(body.as_bytes()).unwrap()));
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();

        group.bench_function(BenchmarkId::from_parameter(cores), |b| {
            b.iter(|| {
                terminal.draw(|f| render(f, black_box(&app))).unwrap();
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decode_and_build, bench_render_screen);
criterion_main!(benches);
