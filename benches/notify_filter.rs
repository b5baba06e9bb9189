//! Cost of `notify` for filtered and matching triggers
//!
//! Run with: `cargo bench --bench notify_filter`

use anyhow::Result;
use chatboard_core::{
    BroadcastSummary, ContextSlot, DisplayManager, Renderer, ScheduledDisplay, TimerSchedule,
    TriggerKind,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

struct NoopRenderer;

impl Renderer<()> for NoopRenderer {
    fn kind(&self) -> &str {
        "noop"
    }

    fn render(&mut self, _context: &(), trigger: TriggerKind) -> Result<()> {
        black_box(trigger);
        Ok(())
    }
}

fn display(id: &str, triggers: TriggerKind) -> Arc<ScheduledDisplay<()>> {
    let context = ContextSlot::with_context(Arc::new(()));
    let display = ScheduledDisplay::new(id, Box::new(NoopRenderer), TimerSchedule::NONE, context);
    display.enable_triggers(triggers);
    display
}

fn bench_notify(c: &mut Criterion) {
    let display = display("bench", TriggerKind::LOGIN);

    c.bench_function("notify_filtered", |b| {
        b.iter(|| black_box(display.notify(black_box(TriggerKind::CHAT))));
    });
    c.bench_function("notify_matching", |b| {
        b.iter(|| black_box(display.notify(black_box(TriggerKind::LOGIN))));
    });
}

fn bench_broadcast(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast_chat");

    for count in [10, 100, 1_000] {
        let manager = DisplayManager::new();
        for i in 0..count {
            // One display in ten listens for chat
            let triggers = if i % 10 == 0 {
                TriggerKind::CHAT
            } else {
                TriggerKind::LOGIN
            };
            let _ = manager.add(display(&format!("d{}", i), triggers));
        }

        group.bench_with_input(BenchmarkId::from_parameter(count), &manager, |b, manager| {
            b.iter(|| -> BroadcastSummary { manager.broadcast(black_box(TriggerKind::CHAT)) });
        });
        manager.shutdown();
    }

    group.finish();
}

criterion_group!(benches, bench_notify, bench_broadcast);
criterion_main!(benches);
