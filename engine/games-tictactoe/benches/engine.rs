use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use engine_core::{legal_positions, Game, Move, Position, UndoScope};
use games_tictactoe::TicTacToe;

fn bench_apply_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_apply_undo");
    group.bench_function("center", |b| {
        let mut game = TicTacToe::new();
        b.iter(|| {
            let color = game.turn_color();
            game.apply(Move::new(Position(4), color)).unwrap();
            black_box(game.undo());
        });
    });
    group.finish();
}

fn bench_legal_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_legal");
    let game = TicTacToe::from_moves(&[4, 0, 8]).unwrap();
    group.bench_function("legal_positions", |b| {
        let mut buffer = Vec::with_capacity(9);
        b.iter(|| {
            legal_positions(black_box(&game), &mut buffer);
            buffer.len()
        });
    });
    group.finish();
}

fn bench_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("tictactoe_playout");
    group.bench_function("first_legal_to_end", |b| {
        b.iter_batched(
            || (TicTacToe::new(), Vec::with_capacity(9)),
            |(mut game, mut legal)| {
                {
                    let mut scope = UndoScope::new(&mut game);
                    legal_positions(&*scope, &mut legal);
                    while let Some(&pos) = legal.first() {
                        let color = scope.turn_color();
                        scope.apply(Move::new(pos, color)).unwrap();
                        legal_positions(&*scope, &mut legal);
                    }
                }
                game
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_apply_undo, bench_legal_positions, bench_playout);
criterion_main!(benches);
