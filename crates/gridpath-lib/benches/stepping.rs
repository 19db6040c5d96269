use criterion::{criterion_group, criterion_main, Criterion};
use gridpath_lib::{GridConfig, Layout, Session};
use once_cell::sync::Lazy;
use std::hint::black_box;

const SIDE: usize = 64;

/// Open grid with a long wall across the middle, forcing a detour.
static DETOUR_LAYOUT: Lazy<Layout> = Lazy::new(|| {
    let mut text = String::with_capacity(SIDE * (SIDE + 1));
    for row in 0..SIDE {
        for col in 0..SIDE {
            let symbol = match (row, col) {
                (0, 0) => 'S',
                (r, c) if r == SIDE - 1 && c == SIDE - 1 => 'F',
                (r, c) if r == SIDE / 2 && c < SIDE - 2 => '#',
                _ => '.',
            };
            text.push(symbol);
        }
        text.push('\n');
    }
    text.parse().expect("bench layout parses")
});

static OPEN_LAYOUT: Lazy<Layout> = Lazy::new(|| {
    let mut rows = vec![".".repeat(SIDE); SIDE];
    rows[0].replace_range(0..1, "S");
    rows[SIDE - 1].replace_range(SIDE - 1..SIDE, "F");
    rows.join("\n").parse().expect("bench layout parses")
});

fn run_to_finish(layout: &Layout) -> usize {
    let mut session =
        Session::from_layout(layout, GridConfig::default().with_cooldown_ms(0)).expect("session");
    let mut tick = 0;
    while !session.status().is_finished() {
        tick += 1;
        if session.advance(tick).is_err() {
            break;
        }
    }
    session.steps_taken()
}

fn benchmark_stepping(c: &mut Criterion) {
    c.bench_function("open_64_to_finish", |b| {
        let layout = &*OPEN_LAYOUT;
        b.iter(|| black_box(run_to_finish(layout)));
    });

    c.bench_function("detour_64_to_finish", |b| {
        let layout = &*DETOUR_LAYOUT;
        b.iter(|| black_box(run_to_finish(layout)));
    });
}

criterion_group!(benches, benchmark_stepping);
criterion_main!(benches);
