use conquest_ai::board::{maps, Board};
use conquest_ai::combat::{estimate_capture_probability, CaptureEstimator};
use conquest_ai::core::{Color, GameRng, TerritoryId};
use conquest_ai::search::{SearchConfig, StateSpaceSearch};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn contested() -> Board {
    let mut board = maps::two_continents().unwrap();
    for (raw, color, troops) in [
        (0, Color::Red, 12),
        (1, Color::Blue, 2),
        (2, Color::Red, 8),
        (3, Color::Blue, 4),
        (4, Color::Red, 15),
        (5, Color::Blue, 1),
        (6, Color::Blue, 6),
        (7, Color::Red, 3),
    ] {
        board.assign(TerritoryId::new(raw), color, troops).unwrap();
    }
    board
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("estimate 10v4 1000 trials", |b| {
        let mut rng = GameRng::new(1);
        b.iter(|| estimate_capture_probability(black_box(10), black_box(4), 1000, &mut rng).unwrap())
    });

    c.bench_function("estimator cold 8x8 matchups", |b| {
        b.iter(|| {
            let mut estimator = CaptureEstimator::new(1, 1000);
            for attack in 2..10 {
                for defend in 1..9 {
                    black_box(estimator.capture_probability(attack, defend).unwrap());
                }
            }
        })
    });

    let board = contested();
    for (name, pruning) in [("search depth 3 alpha-beta", true), ("search depth 3 minimax", false)] {
        c.bench_function(name, |b| {
            let config = SearchConfig::default().with_pruning(pruning);
            b.iter(|| {
                let mut search = StateSpaceSearch::new(black_box(&board), config.clone()).unwrap();
                search.search_board(Color::Red, Color::Blue).unwrap()
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
