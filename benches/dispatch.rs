//! Benchmarks for shortcut matching and dispatch.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use draftpad::shortcuts::{KeyPress, LocalActions, ShortcutDispatcher, match_shortcut};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Save,
    Help,
}

fn bench_match_shortcut(c: &mut Criterion) {
    let hit = KeyPress::new("escape");
    let miss = KeyPress::new("x");
    c.bench_function("match_shortcut_hit", |b| {
        b.iter(|| match_shortcut(black_box(&hit)))
    });
    c.bench_function("match_shortcut_miss", |b| {
        b.iter(|| match_shortcut(black_box(&miss)))
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let mut dispatcher = ShortcutDispatcher::new();
    dispatcher.register_global("save", Action::Save);
    let local = LocalActions::new().bind("help", Action::Help);
    let press = KeyPress::new("s").with_ctrl();
    c.bench_function("dispatch_global", |b| {
        b.iter(|| dispatcher.dispatch(black_box(&press), false, &local))
    });
}

criterion_group!(benches, bench_match_shortcut, bench_dispatch);
criterion_main!(benches);
