//! Pose Estimator Benchmarks
//!
//! Benchmarks for the per-cycle paths of the fusion loop:
//! - Odometry update with a full history buffer
//! - Vision measurement fusion against buffered history
//! - History sampling
//!
//! Run with: `cargo bench`
//! View HTML reports in: `target/criterion/`

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use drishti::{ManualClock, OdometryTracker, Pose2D, PoseEstimator, TimeInterpolatableBuffer};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Control loop period (50 Hz).
const PERIOD: f64 = 0.02;

/// Estimator with a full 1.5 s history of a robot driving a gentle arc.
fn create_warm_estimator() -> (PoseEstimator<OdometryTracker, ManualClock>, ManualClock) {
    let clock = ManualClock::new(0.0);
    let mut estimator = PoseEstimator::with_clock(
        OdometryTracker::new(),
        [0.05, 0.05, 0.02],
        [0.5, 0.5, 0.8],
        clock.clone(),
    );

    for _ in 0..100 {
        estimator
            .odometry_mut()
            .update(&Pose2D::new(0.01, 0.0, 0.002));
        estimator.update();
        clock.advance(PERIOD);
    }

    (estimator, clock)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_estimator(c: &mut Criterion) {
    let mut group = c.benchmark_group("pose_estimator");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(2));

    group.bench_function("update", |b| {
        let (mut estimator, clock) = create_warm_estimator();
        b.iter(|| {
            estimator
                .odometry_mut()
                .update(black_box(&Pose2D::new(0.01, 0.0, 0.002)));
            clock.advance(PERIOD);
            black_box(estimator.update())
        })
    });

    group.bench_function("add_vision_measurement", |b| {
        let (estimator, _clock) = create_warm_estimator();
        let capture_time = estimator.timestamp() - 0.5;
        b.iter_batched(
            || estimator.clone(),
            |mut estimator| {
                estimator.add_vision_measurement(
                    black_box(Pose2D::new(0.9, 0.1, 0.15)),
                    black_box(capture_time),
                )
            },
            criterion::BatchSize::SmallInput,
        )
    });

    group.bench_function("sample_at", |b| {
        let (mut estimator, _clock) = create_warm_estimator();
        let capture_time = estimator.timestamp() - 0.5;
        estimator.add_vision_measurement(Pose2D::new(0.9, 0.1, 0.15), capture_time);
        b.iter(|| estimator.sample_at(black_box(capture_time + 0.013)))
    });

    group.finish();
}

fn bench_interpolation_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation_buffer");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(2));

    let mut buffer = TimeInterpolatableBuffer::new(1.5);
    for i in 0..75 {
        let t = i as f64 * PERIOD;
        buffer.add_sample(t, Pose2D::new(t, 0.5 * t, 0.1 * t));
    }

    group.bench_function("sample", |b| {
        b.iter(|| buffer.sample(black_box(0.731)))
    });

    group.bench_function("add_sample", |b| {
        let mut buffer = buffer.clone();
        let mut t = 75.0 * PERIOD;
        b.iter(|| {
            t += PERIOD;
            buffer.add_sample(black_box(t), Pose2D::new(t, 0.0, 0.0));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_estimator, bench_interpolation_buffer);

criterion_main!(benches);
