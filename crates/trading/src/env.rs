use crate::{
    LiquidationProceeds, Observation, RenderMode, ResetOptions, SimulationState, StockEnvConfig,
    TradeAction, TradeHistory, TradeRecord, TradingError,
};
use market::{PriceRecord, PriceSeries};
use rl::{BoxSpace, Discrete, Env, Step};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Diagnostics returned next to every observation.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Record appended by this step; `None` after a reset.
    pub record: Option<TradeRecord>,
    /// Length of the trade history after the call.
    pub history_len: usize,
}

/// Trading environment over a fixed daily price series.
///
/// Each episode starts on day 0 with only cash. Every step moves to the next
/// day, prices the position at that day's adjusted close and then applies the
/// chosen [`TradeAction`]. The full trade log of the running episode is
/// available through [`StockEnv::history`].
pub struct StockEnv {
    series: PriceSeries,
    config: StockEnvConfig,
    state: Option<SimulationState>,
    history: TradeHistory,
    seed: Option<u64>,
    action_space: Discrete,
    observation_space: BoxSpace<3>,
}

impl StockEnv {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(series: PriceSeries, config: StockEnvConfig) -> Self {
        Self {
            series,
            config,
            state: None,
            history: TradeHistory::default(),
            seed: None,
            action_space: Discrete::new(TradeAction::COUNT),
            // Share value is capped at the 32-bit integer maximum.
            observation_space: BoxSpace::new(
                [0.0; 3],
                [f32::MAX, f32::MAX, i32::MAX as f32],
            ),
        }
    }

    /// Loads the price table at `path` and wraps it in an environment.
    ///
    /// # Errors
    ///
    /// Returns [`TradingError::Market`] if the table cannot be read or parsed.
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        config: StockEnvConfig,
    ) -> Result<Self, TradingError> {
        let series = PriceSeries::from_csv_path(path)?;
        Ok(Self::new(series, config))
    }

    #[must_use]
    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    #[must_use]
    pub fn config(&self) -> &StockEnvConfig {
        &self.config
    }

    /// Current episode state, `None` before the first reset.
    #[must_use]
    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &TradeHistory {
        &self.history
    }

    /// Seed passed to the most recent reset. The transition itself is
    /// deterministic; the seed is kept for callers that derive randomness
    /// from the episode.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Starts a new episode on day 0 holding `starting_cash` and no shares.
    /// The trade history of the previous episode is discarded.
    ///
    /// # Errors
    ///
    /// [`TradingError::InvalidStartingCash`] for negative or non-finite cash,
    /// [`TradingError::IndexOutOfRange`] if the price series is empty.
    pub fn reset_with_cash(
        &mut self,
        seed: Option<u64>,
        starting_cash: f64,
    ) -> Result<Observation, TradingError> {
        if !starting_cash.is_finite() || starting_cash < 0.0 {
            return Err(TradingError::InvalidStartingCash(starting_cash));
        }
        let opening_price = self.record_at(0)?.adj_close;

        let state = SimulationState::opening(starting_cash, opening_price);
        self.state = Some(state);
        self.history.clear();
        self.seed = seed;

        info!(
            "Episode reset: {} trading days, starting cash {:.2}, opening price {:.2}",
            self.series.len(),
            starting_cash,
            opening_price
        );
        Ok(state.observation())
    }

    /// Advances one trading day and applies `action`, printing the new state
    /// to stdout when human rendering is enabled.
    ///
    /// # Errors
    ///
    /// See [`StockEnv::step_action_to`].
    pub fn step_action(
        &mut self,
        action: TradeAction,
    ) -> Result<Step<[f32; 3], StepInfo>, TradingError> {
        self.step_action_to(action, &mut io::stdout())
    }

    /// Advances one trading day and applies `action`. With
    /// [`RenderMode::Human`] the new state is written to `out` in the
    /// [`StockEnv::render_to`] layout.
    ///
    /// A failed call leaves the episode untouched. This includes stepping
    /// past the last day and a render write error, which is raised before
    /// the new day is committed.
    ///
    /// # Errors
    ///
    /// [`TradingError::NotReset`] before the first reset,
    /// [`TradingError::IndexOutOfRange`] when the episode already reached the
    /// last day, [`TradingError::Render`] if writing to `out` fails.
    pub fn step_action_to<W: Write>(
        &mut self,
        action: TradeAction,
        out: &mut W,
    ) -> Result<Step<[f32; 3], StepInfo>, TradingError> {
        let mut state = *self.state.as_ref().ok_or(TradingError::NotReset)?;
        let previous_total_value = state.total_value;

        let day = state.step_index + 1;
        let price_record = self.record_at(day)?;
        state.share_price = price_record.adj_close;
        state.step_index = day;

        if !action.is_hold() {
            self.apply_trade(&mut state, action);
        }
        state.revalue();

        let reward = state.total_value - previous_total_value;
        let terminated = self.is_terminated(&state);
        let record = TradeRecord::new(&state, action);

        if self.config.render_mode == Some(RenderMode::Human) {
            write_state(out, &state, price_record)?;
        }

        self.state = Some(state);
        self.history.push(record.clone());

        debug!(
            "Day {}: {} -> cash {:.2}, shares {}, total {:.2}, reward {:.2}{}",
            day,
            action,
            state.cash,
            state.shares_owned,
            state.total_value,
            reward,
            if terminated { " (terminated)" } else { "" }
        );

        Ok(Step {
            observation: state.observation().to_array(),
            reward,
            terminated,
            truncated: false,
            info: StepInfo {
                record: Some(record),
                history_len: self.history.len(),
            },
        })
    }

    /// Prints the current state to stdout.
    ///
    /// # Errors
    ///
    /// [`TradingError::NotReset`] before the first reset, or an I/O error.
    pub fn render(&self) -> Result<(), TradingError> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.render_to(&mut lock)
    }

    /// Writes the current state as one labelled line per field followed by a
    /// blank line.
    ///
    /// # Errors
    ///
    /// [`TradingError::NotReset`] before the first reset, or an I/O error.
    pub fn render_to<W: Write>(&self, out: &mut W) -> Result<(), TradingError> {
        let state = self.state.as_ref().ok_or(TradingError::NotReset)?;
        let record = self.record_at(state.step_index)?;
        write_state(out, state, record)
    }

    fn record_at(&self, day: usize) -> Result<&PriceRecord, TradingError> {
        self.series.get(day).ok_or(TradingError::IndexOutOfRange {
            index: day,
            len: self.series.len(),
        })
    }

    /// Sizes the order from current cash and moves shares and cash at the
    /// current price. Buys are not checked against available cash.
    fn apply_trade(&self, state: &mut SimulationState, action: TradeAction) {
        // Clamped so a negative balance can never flip the order direction.
        let shares_to_move = (action.percent() * state.cash / state.share_price)
            .floor()
            .max(0.0);

        if action.is_buy() {
            state.shares_owned += shares_to_move;
            state.cash -= state.share_price * shares_to_move;
        } else if state.shares_owned >= shares_to_move {
            state.shares_owned -= shares_to_move;
            state.cash += state.share_price * shares_to_move;
        } else if state.shares_owned > 0.0 {
            let liquidated = state.shares_owned;
            state.shares_owned = 0.0;
            match self.config.liquidation {
                LiquidationProceeds::Dropped => warn!(
                    "Day {}: liquidated {} shares without crediting {:.2} in proceeds",
                    state.step_index,
                    liquidated,
                    state.share_price * liquidated
                ),
                LiquidationProceeds::Credited => {
                    state.cash += state.share_price * liquidated;
                }
            }
        }
    }

    /// The episode ends on the last day, when cash cannot buy a single share
    /// at the next day's price, or when cash is exhausted.
    fn is_terminated(&self, state: &SimulationState) -> bool {
        let on_last_day = self.series.last_index() == Some(state.step_index);
        let next_share_unaffordable = self
            .series
            .get(state.step_index + 1)
            .is_some_and(|next| state.cash < next.adj_close);
        on_last_day || next_share_unaffordable || state.cash <= 0.0
    }
}

impl Env for StockEnv {
    type ActionSpace = Discrete;
    type ObservationSpace = BoxSpace<3>;
    type Info = StepInfo;
    type Options = ResetOptions;
    type Error = TradingError;

    fn reset(
        &mut self,
        seed: Option<u64>,
        options: ResetOptions,
    ) -> Result<([f32; 3], StepInfo), TradingError> {
        let starting_cash = options
            .starting_cash
            .unwrap_or(self.config.starting_cash);
        let observation = self.reset_with_cash(seed, starting_cash)?;
        Ok((
            observation.to_array(),
            StepInfo {
                record: None,
                history_len: 0,
            },
        ))
    }

    fn step(&mut self, action: i64) -> Result<Step<[f32; 3], StepInfo>, TradingError> {
        let action = TradeAction::try_from(action)?;
        self.step_action(action)
    }

    fn action_space(&self) -> &Discrete {
        &self.action_space
    }

    fn observation_space(&self) -> &BoxSpace<3> {
        &self.observation_space
    }
}

fn write_state<W: Write>(
    out: &mut W,
    state: &SimulationState,
    record: &PriceRecord,
) -> Result<(), TradingError> {
    writeln!(out, "Step: {}", state.step_index)?;
    writeln!(out, "Cash: {}", state.cash)?;
    writeln!(out, "Shares owned: {}", state.shares_owned)?;
    writeln!(out, "Share price: {}", state.share_price)?;
    writeln!(out, "Share value: {}", state.share_value)?;
    writeln!(out, "Total value: {}", state.total_value)?;
    writeln!(out, "Current price data: {record}")?;
    writeln!(out)?;
    Ok(())
}
