use criterion::{black_box, criterion_group, criterion_main, Criterion};
use market::PriceSeries;
use rl::{run_episode, RandomPolicy};
use trading::{ResetOptions, StockEnv, StockEnvConfig, TradeAction};

fn synthetic_series(days: usize) -> PriceSeries {
    let prices: Vec<f64> = (0..days)
        .map(|day| 100.0 + 10.0 * (day as f64 * 0.05).sin())
        .collect();
    PriceSeries::from_prices(&prices).unwrap()
}

fn bench_hold_episode(c: &mut Criterion) {
    let mut env = StockEnv::new(synthetic_series(2_520), StockEnvConfig::default());
    c.bench_function("hold_episode_10y", |b| {
        b.iter(|| {
            env.reset_with_cash(None, 10_000.0).unwrap();
            loop {
                let step = env.step_action(black_box(TradeAction::Hold)).unwrap();
                if step.terminated {
                    break;
                }
            }
        });
    });
}

fn bench_random_episode(c: &mut Criterion) {
    let mut env = StockEnv::new(synthetic_series(2_520), StockEnvConfig::default());
    c.bench_function("random_episode_10y", |b| {
        b.iter(|| {
            let mut policy = RandomPolicy::with_seed(7);
            run_episode(&mut env, &mut policy, None, ResetOptions::default(), None).unwrap()
        });
    });
}

criterion_group!(benches, bench_hold_episode, bench_random_episode);
criterion_main!(benches);
