use market::PriceSeries;
use rl::{run_episode, Env, RandomPolicy, Space};
use std::io::{self, Write};
use trading::{
    LiquidationProceeds, RenderMode, ResetOptions, StockEnv, StockEnvConfig, TradeAction,
    TradingError,
};

const TOLERANCE: f64 = 1e-9;

fn env_with(prices: &[f64], config: StockEnvConfig) -> StockEnv {
    StockEnv::new(PriceSeries::from_prices(prices).unwrap(), config)
}

fn env(prices: &[f64]) -> StockEnv {
    env_with(prices, StockEnvConfig::default())
}

fn cash(amount: f64) -> ResetOptions {
    ResetOptions {
        starting_cash: Some(amount),
    }
}

fn assert_value_invariant(env: &StockEnv) {
    let state = env.state().unwrap();
    let expected = state.cash + state.shares_owned * state.share_price;
    assert!(
        (state.total_value - expected).abs() < TOLERANCE,
        "total {} != cash {} + shares {} * price {}",
        state.total_value,
        state.cash,
        state.shares_owned,
        state.share_price
    );
    assert!(state.shares_owned >= 0.0);
}

#[test]
fn reset_observes_cash_price_and_empty_position() {
    let mut env = env(&[10.0, 10.0, 20.0]);
    let (obs, info) = env.reset(None, cash(100.0)).unwrap();
    assert_eq!(obs, [100.0, 10.0, 0.0]);
    assert_eq!(info.record, None);
    assert_eq!(info.history_len, 0);

    let state = env.state().unwrap();
    assert_eq!(state.step_index, 0);
    assert_eq!(state.total_value, 100.0);
    assert_value_invariant(&env);
}

#[test]
fn reset_uses_configured_default_cash() {
    let mut env = env(&[10.0, 10.0]);
    let (obs, _) = env.reset(Some(1), ResetOptions::default()).unwrap();
    assert_eq!(obs[0], 10_000.0);
    assert_eq!(env.seed(), Some(1));
}

#[test]
fn small_buy_that_rounds_to_zero_shares_only_advances_the_day() {
    let mut env = env(&[10.0, 10.0, 20.0]);
    env.reset(None, cash(100.0)).unwrap();

    let step = env.step(0).unwrap();
    assert_eq!(step.observation, [100.0, 10.0, 0.0]);
    assert_eq!(step.reward, 0.0);
    assert!(!step.terminated);
    assert!(!step.truncated);

    let state = env.state().unwrap();
    assert_eq!(state.step_index, 1);
    assert_eq!(state.shares_owned, 0.0);
}

#[test]
fn hold_changes_nothing_but_the_day() {
    let mut env = env(&[10.0, 10.0, 20.0]);
    env.reset(None, cash(100.0)).unwrap();

    let step = env.step(TradeAction::Hold.index() as i64).unwrap();
    assert_eq!(step.reward, 0.0);
    assert_eq!(step.observation, [100.0, 10.0, 0.0]);
    assert_eq!(env.state().unwrap().step_index, 1);
    assert_eq!(env.history().last().unwrap().action, TradeAction::Hold);
}

#[test]
fn buy_moves_cash_into_shares_and_reward_tracks_price() {
    let mut env = env(&[10.0, 10.0, 12.0, 12.0]);
    env.reset(None, cash(1_000.0)).unwrap();

    // 20% of 1000 at 10 buys 20 shares.
    let buy = env.step_action(TradeAction::BuyLots).unwrap();
    assert_eq!(buy.observation, [800.0, 10.0, 200.0]);
    assert_eq!(buy.reward, 0.0);

    // Price rises to 12 while holding 20 shares.
    let hold = env.step_action(TradeAction::Hold).unwrap();
    assert_eq!(hold.observation, [800.0, 12.0, 240.0]);
    assert!((hold.reward - 40.0).abs() < TOLERANCE);
    assert_value_invariant(&env);
}

#[test]
fn sell_is_sized_from_cash_not_from_holdings() {
    let mut env = env(&[10.0, 10.0, 10.0, 10.0]);
    env.reset(None, cash(1_000.0)).unwrap();

    env.step_action(TradeAction::BuyLots).unwrap(); // 20 shares, cash 800
    let sell = env.step_action(TradeAction::SellModerate).unwrap(); // floor(80 / 10) = 8
    let state = env.state().unwrap();
    assert_eq!(state.shares_owned, 12.0);
    assert_eq!(state.cash, 880.0);
    assert_eq!(sell.reward, 0.0);
}

#[test]
fn oversized_sell_liquidates_without_proceeds_by_default() {
    let mut env = env(&[10.0, 10.0, 10.0, 10.0]);
    env.reset(None, cash(550.0)).unwrap();

    env.step_action(TradeAction::BuyModerate).unwrap(); // floor(55 / 10) = 5 shares
    assert_eq!(env.state().unwrap().shares_owned, 5.0);
    assert_eq!(env.state().unwrap().cash, 500.0);

    // floor(0.2 * 500 / 10) = 10 > 5 held
    let sell = env.step_action(TradeAction::SellLots).unwrap();
    let state = env.state().unwrap();
    assert_eq!(state.shares_owned, 0.0);
    assert_eq!(state.cash, 500.0);
    assert_eq!(sell.reward, -50.0);
    assert_value_invariant(&env);
}

#[test]
fn oversized_sell_can_credit_liquidation_proceeds() {
    let config = StockEnvConfig {
        liquidation: LiquidationProceeds::Credited,
        ..StockEnvConfig::default()
    };
    let mut env = env_with(&[10.0, 10.0, 10.0, 10.0], config);
    env.reset(None, cash(550.0)).unwrap();

    env.step_action(TradeAction::BuyModerate).unwrap();
    let sell = env.step_action(TradeAction::SellLots).unwrap();
    let state = env.state().unwrap();
    assert_eq!(state.shares_owned, 0.0);
    assert_eq!(state.cash, 550.0);
    assert_eq!(sell.reward, 0.0);
}

#[test]
fn sell_without_shares_is_a_no_op() {
    let mut env = env(&[10.0, 10.0, 10.0]);
    env.reset(None, cash(1_000.0)).unwrap();
    let step = env.step_action(TradeAction::SellLots).unwrap();
    assert_eq!(step.observation, [1_000.0, 10.0, 0.0]);
}

#[test]
fn last_day_always_terminates() {
    let mut env = env(&[10.0, 11.0]);
    env.reset(None, cash(1_000_000.0)).unwrap();
    let step = env.step_action(TradeAction::BuyLittle).unwrap();
    assert!(step.terminated);
    assert!(!step.truncated);
}

#[test]
fn unaffordable_next_price_terminates() {
    let mut env = env(&[10.0, 10.0, 1_000.0, 10.0]);
    env.reset(None, cash(100.0)).unwrap();
    let step = env.step_action(TradeAction::Hold).unwrap();
    assert!(step.terminated);
}

#[test]
fn exhausted_cash_terminates() {
    let mut env = env(&[10.0, 10.0, 10.0]);
    env.reset(None, cash(0.0)).unwrap();
    let step = env.step_action(TradeAction::Hold).unwrap();
    assert!(step.terminated);
    assert_eq!(env.state().unwrap().cash, 0.0);
}

#[test]
fn invalid_actions_are_rejected_without_side_effects() {
    let mut env = env(&[10.0, 10.0, 10.0]);
    env.reset(None, cash(100.0)).unwrap();

    for action in [7, -1, i64::MAX] {
        match env.step(action) {
            Err(TradingError::InvalidAction { action: rejected }) => assert_eq!(rejected, action),
            other => panic!("expected invalid action error, got {other:?}"),
        }
    }
    assert_eq!(env.state().unwrap().step_index, 0);
    assert!(env.history().is_empty());
}

#[test]
fn stepping_past_the_last_day_is_out_of_range() {
    let mut env = env(&[10.0, 10.0]);
    env.reset(None, cash(100.0)).unwrap();
    assert!(env.step_action(TradeAction::Hold).unwrap().terminated);

    match env.step_action(TradeAction::Hold) {
        Err(TradingError::IndexOutOfRange { index, len }) => {
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("expected out of range error, got {other:?}"),
    }
    assert_eq!(env.state().unwrap().step_index, 1);
    assert_eq!(env.history().len(), 1);
}

#[test]
fn step_before_reset_fails() {
    let mut env = env(&[10.0, 10.0]);
    assert!(matches!(env.step(6), Err(TradingError::NotReset)));
    assert!(matches!(
        env.render_to(&mut Vec::<u8>::new()),
        Err(TradingError::NotReset)
    ));
}

#[test]
fn reset_on_empty_series_is_out_of_range() {
    let mut env = StockEnv::new(PriceSeries::default(), StockEnvConfig::default());
    assert!(matches!(
        env.reset(None, ResetOptions::default()),
        Err(TradingError::IndexOutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn invalid_starting_cash_is_rejected() {
    let mut env = env(&[10.0, 10.0]);
    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            env.reset(None, cash(bad)),
            Err(TradingError::InvalidStartingCash(_))
        ));
    }
}

#[test]
fn history_records_every_step_and_reset_clears_it() {
    let mut env = env(&[10.0, 10.0, 10.0, 10.0]);
    env.reset(None, cash(1_000.0)).unwrap();

    let first = env.step_action(TradeAction::BuyLots).unwrap();
    let second = env.step_action(TradeAction::Hold).unwrap();
    assert_eq!(first.info.history_len, 1);
    assert_eq!(second.info.history_len, 2);

    let records = env.history().records();
    assert_eq!(records[0].day, 1);
    assert_eq!(records[0].shares_owned, 20.0);
    assert_eq!(records[0].owned_shares_value, 200.0);
    assert_eq!(records[0].total_value, 1_000.0);
    assert_eq!(records[0].action, TradeAction::BuyLots);
    assert_eq!(Some(&records[1]), second.info.record.as_ref());

    let days: Vec<usize> = env.history().iter().map(|r| r.day).collect();
    assert_eq!(days, vec![1, 2]);

    let columns = env.history().columns();
    assert_eq!(columns.day, vec![1, 2]);
    assert_eq!(
        columns.action_selected,
        vec!["Buy lots (20.0%)", "Hold (0%)"]
    );

    env.reset(None, cash(1_000.0)).unwrap();
    assert!(env.history().is_empty());
}

#[test]
fn history_exports_as_csv_and_json() -> anyhow::Result<()> {
    let mut env = env(&[10.0, 10.0, 10.0]);
    env.reset(None, cash(1_000.0))?;
    env.step_action(TradeAction::BuyLittle)?;

    let mut csv = Vec::new();
    env.history().write_csv(&mut csv)?;
    let csv = String::from_utf8(csv)?;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("day,cash,shares_owned,owned_shares_value,total_value,action")
    );
    assert_eq!(
        lines.next(),
        Some("1,990.0,1.0,10.0,1000.0,Buy little (1.0%)")
    );

    let json = serde_json::to_value(env.history().columns())?;
    assert_eq!(json["action_selected"][0], "Buy little (1.0%)");
    assert_eq!(json["cash"][0], 990.0);
    Ok(())
}

#[test]
fn render_prints_one_labelled_line_per_field() {
    let series = PriceSeries::from_csv_path("tests/data/prices.csv").unwrap();
    let mut env = StockEnv::new(series, StockEnvConfig::default());
    env.reset(None, cash(1_000.0)).unwrap();

    let mut out = Vec::new();
    env.render_to(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines[0], "Step: 0");
    assert_eq!(lines[1], "Cash: 1000");
    assert_eq!(lines[2], "Shares owned: 0");
    assert_eq!(lines[3], "Share price: 73.45");
    assert_eq!(lines[4], "Share value: 0");
    assert_eq!(lines[5], "Total value: 1000");
    assert!(lines[6].starts_with("Current price data: Date=2020-01-02"));
    assert!(lines[6].ends_with("Adj Close=73.45, Volume=135480400"));
    assert_eq!(lines[7], "");
    assert_eq!(lines[8], "");
    assert_eq!(lines.len(), 9);
}

/// Writer that rejects every write, like a closed pipe.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn human() -> StockEnvConfig {
    StockEnvConfig {
        render_mode: Some(RenderMode::Human),
        ..StockEnvConfig::default()
    }
}

#[test]
fn human_mode_prints_the_new_day_after_each_step() {
    let series = PriceSeries::from_csv_path("tests/data/prices.csv").unwrap();
    let mut env = StockEnv::new(series, human());
    env.reset(None, cash(1_000.0)).unwrap();

    let mut out = Vec::new();
    env.step_action_to(TradeAction::Hold, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let mut expected = Vec::new();
    env.render_to(&mut expected).unwrap();
    assert_eq!(text, String::from_utf8(expected).unwrap());

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "Step: 1");
    assert_eq!(lines[1], "Cash: 1000");
    assert_eq!(lines[2], "Shares owned: 0");
    assert!(lines[6].starts_with("Current price data: Date=2020-01-03"));
    assert_eq!(lines[7], "");
}

#[test]
fn steps_write_nothing_without_a_render_mode() {
    let mut env = env(&[10.0, 10.0, 10.0]);
    env.reset(None, cash(1_000.0)).unwrap();

    let mut out = Vec::<u8>::new();
    env.step_action_to(TradeAction::BuyLots, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn render_failure_leaves_the_episode_on_the_previous_day() {
    let mut env = env_with(&[10.0, 10.0, 10.0], human());
    env.reset(None, cash(1_000.0)).unwrap();
    let before = *env.state().unwrap();

    let result = env.step_action_to(TradeAction::BuyLots, &mut ClosedPipe);
    assert!(matches!(result, Err(TradingError::Render(_))));
    assert_eq!(*env.state().unwrap(), before);
    assert!(env.history().is_empty());

    let step = env
        .step_action_to(TradeAction::BuyLots, &mut Vec::<u8>::new())
        .unwrap();
    assert_eq!(env.state().unwrap().step_index, 1);
    assert_eq!(step.info.history_len, 1);
}

#[test]
fn spaces_describe_seven_actions_and_a_three_value_observation() {
    let env = env(&[10.0, 10.0]);
    assert_eq!(env.action_space().n(), 7);
    assert!(env.action_space().contains(&6));
    assert!(!env.action_space().contains(&7));
    assert_eq!(env.observation_space().low(), &[0.0; 3]);
    assert_eq!(env.observation_space().high()[0], f32::MAX);
}

#[test]
fn random_episodes_keep_invariants_and_replay_identically() {
    let series = PriceSeries::from_csv_path("tests/data/prices.csv").unwrap();
    let mut env = StockEnv::new(series, StockEnvConfig::default());

    let mut rewards = Vec::new();
    let mut histories = Vec::new();
    for _ in 0..2 {
        let mut policy = RandomPolicy::with_seed(2024);
        env.reset(Some(2024), cash(10_000.0)).unwrap();
        let mut episode_rewards = Vec::new();
        loop {
            let action = rl::Policy::<[f32; 3], _>::act(&mut policy, &[0.0; 3], env.action_space());
            let step = env.step(action).unwrap();
            assert_value_invariant(&env);
            episode_rewards.push(step.reward);
            if step.terminated {
                break;
            }
        }
        rewards.push(episode_rewards);
        histories.push(env.history().clone());
    }
    assert_eq!(rewards[0], rewards[1]);
    assert_eq!(histories[0], histories[1]);
}

#[test]
fn rollout_driver_plays_a_full_episode() {
    let series = PriceSeries::from_csv_path("tests/data/prices.csv").unwrap();
    let mut env = StockEnv::new(series, StockEnvConfig::default());
    let mut policy = RandomPolicy::with_seed(9);
    let summary = run_episode(&mut env, &mut policy, Some(9), cash(10_000.0), None).unwrap();

    assert!(summary.terminated);
    assert!(summary.steps >= 1 && summary.steps <= 5);
    assert_eq!(env.history().len(), summary.steps);
    let final_total = env.history().last().unwrap().total_value;
    assert!((final_total - 10_000.0 - summary.total_reward).abs() < 1e-6);
}
