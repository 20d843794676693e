// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Point};
use understory_matrix_gesture::{Contact, MatrixGestureTracker, PointerId, TouchEvent, solve};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// Small jitter in `[-4, 4)` pixels, like a finger between frames.
    fn jitter(&mut self) -> f64 {
        f64::from(self.next_u32() % 800) / 100.0 - 4.0
    }
}

fn drag_frames(moves: usize, seed: u64) -> Vec<TouchEvent> {
    let mut rng = Lcg::new(seed);
    let mut finger = Contact::new(PointerId::FIRST, (400.0, 300.0));
    let mut frames = Vec::with_capacity(moves + 2);
    frames.push(TouchEvent::down(finger));
    for _ in 0..moves {
        let p = finger.position;
        finger = finger.moved_to((p.x + rng.jitter(), p.y + rng.jitter()));
        frames.push(TouchEvent::move_one(finger));
    }
    frames.push(TouchEvent::up(finger));
    frames
}

fn pinch_rotate_frames(moves: usize, seed: u64) -> Vec<TouchEvent> {
    let mut rng = Lcg::new(seed);
    let mut a = Contact::new(PointerId::FIRST, (300.0, 300.0));
    let mut b = Contact::new(PointerId::SECOND, (500.0, 300.0));
    let mut frames = Vec::with_capacity(moves + 4);
    frames.push(TouchEvent::down(a));
    frames.push(TouchEvent::pointer_added(a, b));
    for _ in 0..moves {
        let (pa, pb) = (a.position, b.position);
        a = a.moved_to((pa.x + rng.jitter(), pa.y + rng.jitter()));
        b = b.moved_to((pb.x + rng.jitter(), pb.y + rng.jitter()));
        frames.push(TouchEvent::move_two(a, b));
    }
    frames.push(TouchEvent::pointer_removed(a, b, PointerId::SECOND));
    frames.push(TouchEvent::up(a));
    frames
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_matrix_gesture");

    for &moves in &[64_usize, 1_024] {
        let drag = drag_frames(moves, 0x6E57_0000_0000_0001);
        group.bench_with_input(BenchmarkId::new("drag", moves), &drag, |b, frames| {
            b.iter_batched(
                MatrixGestureTracker::default,
                |mut tracker| {
                    for frame in frames {
                        tracker.handle_event(frame);
                    }
                    black_box(tracker.matrix());
                },
                BatchSize::SmallInput,
            );
        });

        let pinch = pinch_rotate_frames(moves, 0x6E57_0000_0000_0002);
        group.bench_with_input(
            BenchmarkId::new("pinch_rotate", moves),
            &pinch,
            |b, frames| {
                b.iter_batched(
                    || MatrixGestureTracker::new(Affine::scale(2.0)).with_listener(|m: &Affine| {
                        black_box(m);
                    }),
                    |mut tracker| {
                        for frame in frames {
                            tracker.handle_event(frame);
                        }
                        black_box(tracker.readout());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let src = [Point::new(300.0, 300.0), Point::new(500.0, 300.0)];
    let dst = [Point::new(302.5, 298.0), Point::new(497.0, 310.5)];
    c.bench_function("solve_two_points", |b| {
        b.iter(|| black_box(solve(black_box(&src), black_box(&dst))));
    });
}

criterion_group!(benches, bench_tracker, bench_solve);
criterion_main!(benches);
