use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tictac_rust::board::{Board, Mark};
use tictac_rust::search::choose_move;

fn board(s: &str) -> Board {
    s.parse().expect("valid bench board")
}

fn search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let empty_3x3 = board(".........");
    group.bench_function("3x3_empty", |b| {
        b.iter(|| choose_move(black_box(&empty_3x3), Mark::O))
    });

    let corner_3x3 = board("X........");
    group.bench_function("3x3_after_corner", |b| {
        b.iter(|| choose_move(black_box(&corner_3x3), Mark::O))
    });

    // Nine empty cells: about the earliest 4x4 position that stays quick
    let mid_4x4 = board("X.O. .XO. O..X ...X");
    group.bench_function("4x4_mid_game", |b| {
        b.iter(|| choose_move(black_box(&mid_4x4), Mark::O))
    });

    let late_4x4 = board("XOX. OXO. X.O. ..X.");
    group.bench_function("4x4_late_game", |b| {
        b.iter(|| choose_move(black_box(&late_4x4), Mark::O))
    });

    group.finish();
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
