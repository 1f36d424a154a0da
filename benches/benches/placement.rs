// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size, Vec2};
use understory_popover::{
    BoundsProvider, Direction, Element, Flow, FrameSnapshot, Order, Placement, Popover,
    PopoverConfig, Signals, Spacing, StyleSink, SubscriptionService, Visual, Zone, ZonePrefs,
    pick_zone, resolve_position,
};

const FRAME: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

/// Targets spread over the frame, including its corners and edges.
fn targets(n: usize) -> Vec<Rect> {
    let cols = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let x = (i % cols) as f64 / cols as f64 * (FRAME.width() - 40.0);
            let y = (i / cols) as f64 / cols as f64 * (FRAME.height() - 20.0);
            Rect::new(x, y, x + 40.0, y + 20.0)
        })
        .collect()
}

fn bench_pick_zone(c: &mut Criterion) {
    let mut group = c.benchmark_group("popover/pick_zone");
    let overlay = Size::new(320.0, 180.0);
    let prefs = [
        ("greedy", ZonePrefs::default()),
        (
            "prefer_up",
            ZonePrefs {
                prefer_place: Some(Placement::Side(Direction::Up)),
                place: None,
            },
        ),
        (
            "force_row",
            ZonePrefs {
                prefer_place: None,
                place: Some(Placement::Flow(Flow::Row)),
            },
        ),
    ];

    for len in [64usize, 1_024] {
        let targets = targets(len);
        group.throughput(Throughput::Elements(len as u64));
        for (name, prefs) in prefs {
            group.bench_with_input(BenchmarkId::new(name, len), &targets, |b, targets| {
                b.iter(|| {
                    for &target in targets {
                        black_box(pick_zone(prefs, FRAME, target, overlay));
                    }
                });
            });
        }
    }

    group.finish();
}

fn bench_resolve_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("popover/resolve_position");
    let frame = FrameSnapshot {
        bounds: FRAME,
        scroll: Vec2::new(0.0, 640.0),
    };
    let spacing = Spacing {
        tip_size: 7.0,
        offset: 4.0,
        corner_radius: 6.0,
    };

    for len in [64usize, 1_024] {
        let targets = targets(len);
        group.throughput(Throughput::Elements(len as u64 * 4));
        group.bench_with_input(BenchmarkId::new("all_sides", len), &targets, |b, targets| {
            b.iter(|| {
                for &target in targets {
                    for d in Direction::PRIORITY {
                        black_box(resolve_position(
                            Zone::new(d),
                            target,
                            Size::new(320.0, 180.0),
                            &frame,
                            spacing,
                        ));
                    }
                }
            });
        });
    }

    group.finish();
}

/// A host that measures a fixed scene and discards every style write.
struct Scene {
    target: Rect,
}

impl BoundsProvider for Scene {
    fn measure_bounds(&mut self, element: Element) -> Rect {
        match element {
            Element::Frame => FRAME,
            _ => self.target,
        }
    }

    fn measure_size(&mut self, _: Element) -> Size {
        Size::new(320.0, 187.0)
    }

    fn measure_scroll_offset(&mut self, _: Element) -> Vec2 {
        Vec2::ZERO
    }
}

impl SubscriptionService for Scene {
    fn subscribe(&mut self, _: Signals) {}
    fn unsubscribe(&mut self, _: Signals) {}
}

impl StyleSink for Scene {
    fn apply_flow(&mut self, flow: Flow) {
        black_box(flow);
    }
    fn apply_order(&mut self, order: Order) {
        black_box(order);
    }
    fn apply_position(&mut self, _: Element, origin: Point) {
        black_box(origin);
    }
    fn apply_parent_frame(&mut self, _: Size) {}
    fn apply_visual(&mut self, _: Visual) {}
    fn set_body_visible(&mut self, _: bool) {}
}

fn bench_scroll_tracking(c: &mut Criterion) {
    let mut group = c.benchmark_group("popover/scroll_tracking");

    // One scroll signal per 16ms frame; most are folded into trailing runs.
    for frames in [60u64, 600] {
        group.throughput(Throughput::Elements(frames));
        group.bench_with_input(BenchmarkId::new("frames", frames), &frames, |b, &frames| {
            b.iter(|| {
                let mut scene = Scene {
                    target: Rect::new(900.0, 500.0, 940.0, 520.0),
                };
                let config = PopoverConfig::default().with_refresh_interval_ms(None);
                let Ok(mut popover) = Popover::new(config) else {
                    return;
                };
                popover.set_open(true, 0, &mut scene);
                for frame in 1..=frames {
                    let now = frame * 16;
                    scene.target = scene.target + Vec2::new(0.0, -1.0);
                    popover.handle_signal(Signals::FRAME_SCROLL, now, &mut scene);
                    popover.advance(now, &mut scene);
                }
                black_box(popover.position());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_pick_zone,
    bench_resolve_position,
    bench_scroll_tracking
);
criterion_main!(benches);
