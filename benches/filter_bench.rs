use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::collections::VecDeque;
use std::hint::black_box;
use timed_filters::measure::LatencyMeasurer;
use timed_filters::{
    Filter, FilterExt, ManualClock, TimedAverageOptions, TimedMovingAverage, clamp, deadband,
};

const DT: f64 = 0.001;

fn bench_timed_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("timed_moving_average");
    group.throughput(Throughput::Elements(1));

    for window_seconds in [0.01, 0.1, 1.0, 10.0] {
        let clock = ManualClock::new();
        let mut filter = TimedMovingAverage::with_options(
            TimedAverageOptions {
                window_seconds,
                capacity: (window_seconds / DT) as usize + 16,
            },
            clock.clone(),
        )
        .unwrap();

        let mut measurer = LatencyMeasurer::new(1000);
        group.bench_with_input(
            BenchmarkId::new("get", window_seconds),
            &window_seconds,
            |b, _| {
                let mut i = 0u64;
                b.iter(|| {
                    let _latency_guard = measurer.measure_with_guard();
                    clock.advance(DT);
                    i += 1;
                    black_box(filter.get(black_box((i % 13) as f64)));
                });
            },
        );
        println!("get window={}s latency:{}", window_seconds, measurer.format_stats());
    }

    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    group.throughput(Throughput::Elements(1));

    let clock = ManualClock::new();
    let mut chain = deadband(0.05)
        .then(TimedMovingAverage::with_clock(0.1, clock.clone()).unwrap())
        .then(clamp(-1.0, 1.0));
    group.bench_function("deadband_average_clamp", |b| {
        let mut x = -1.0;
        b.iter(|| {
            clock.advance(DT);
            x = if x > 1.0 { -1.0 } else { x + 0.01 };
            black_box(chain.get(black_box(x)));
        });
    });

    let clock = ManualClock::new();
    let mut boxed = TimedMovingAverage::with_clock(0.1, clock.clone())
        .unwrap()
        .boxed();
    group.bench_function("boxed_dyn", |b| {
        b.iter(|| {
            clock.advance(DT);
            black_box(boxed.get(black_box(0.5)));
        });
    });

    group.finish();
}

/// Reference: recompute the weighted sum over the whole window each call.
fn bench_naive_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("naive_recompute");
    group.throughput(Throughput::Elements(1));

    let window_seconds = 1.0;
    group.bench_function("get", |b| {
        let mut samples: VecDeque<(f64, f64)> = VecDeque::with_capacity(2048);
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            samples.push_back(((i % 13) as f64, DT));
            let mut total_time: f64 = samples.iter().map(|s| s.1).sum();
            while total_time > window_seconds {
                if let Some((_, dt)) = samples.pop_front() {
                    total_time -= dt;
                }
            }
            let weighted: f64 = samples.iter().map(|s| s.0 * s.1).sum();
            black_box(weighted / total_time);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_timed_average, bench_chain, bench_naive_recompute);
criterion_main!(benches);
