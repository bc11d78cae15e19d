use serde::Serialize;

/// Mutable bookkeeping of one episode.
///
/// `share_value` and `total_value` are derived and recomputed after every
/// transition, so `total_value == cash + shares_owned * share_price` holds
/// whenever the environment hands the state out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationState {
    pub step_index: usize,
    pub cash: f64,
    pub shares_owned: f64,
    pub share_price: f64,
    pub share_value: f64,
    pub total_value: f64,
}

impl SimulationState {
    pub(crate) fn opening(cash: f64, share_price: f64) -> Self {
        let mut state = Self {
            step_index: 0,
            cash,
            shares_owned: 0.0,
            share_price,
            share_value: 0.0,
            total_value: 0.0,
        };
        state.revalue();
        state
    }

    pub(crate) fn revalue(&mut self) {
        self.share_value = self.share_price * self.shares_owned;
        self.total_value = self.cash + self.share_value;
    }

    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation {
            cash: self.cash,
            share_price: self.share_price,
            share_value: self.share_value,
        }
    }
}

/// What the agent sees each step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub cash: f64,
    pub share_price: f64,
    pub share_value: f64,
}

impl Observation {
    /// Fixed-size single precision vector `[cash, share_price, share_value]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_array(&self) -> [f32; 3] {
        [
            self.cash as f32,
            self.share_price as f32,
            self.share_value as f32,
        ]
    }
}
