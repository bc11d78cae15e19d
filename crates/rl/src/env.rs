use crate::space::Space;

/// Result of advancing an environment by one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O, I> {
    pub observation: O,
    pub reward: f64,
    /// The episode reached a terminal state of the task itself.
    pub terminated: bool,
    /// The episode was cut short for a reason outside the task, such as a
    /// time limit.
    pub truncated: bool,
    pub info: I,
}

impl<O, I> Step<O, I> {
    /// Whether the caller should stop stepping and reset.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Element type of an environment's action space.
pub type Action<E> = <<E as Env>::ActionSpace as Space>::Element;

/// Element type of an environment's observation space.
pub type Observation<E> = <<E as Env>::ObservationSpace as Space>::Element;

/// Reinforcement learning environment trait.
///
/// Inspired by classic frameworks like OpenAI Gym, this trait defines the core
/// interface an environment must provide. Each call to [`step`] advances the
/// simulation by one action and returns the new observation, a reward signal,
/// and whether the episode has terminated or been truncated.
///
/// [`step`]: Env::step
pub trait Env {
    type ActionSpace: Space;
    type ObservationSpace: Space;
    /// Auxiliary diagnostics returned next to observations.
    type Info;
    /// Per-episode overrides accepted by [`Env::reset`].
    type Options: Default;
    type Error: std::error::Error;

    /// Reset the environment to its starting state and return the initial
    /// observation.
    ///
    /// # Errors
    ///
    /// Implementation specific, e.g. invalid options or missing data.
    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Self::Options,
    ) -> Result<(Observation<Self>, Self::Info), Self::Error>;

    /// Advance the environment by one action.
    ///
    /// # Errors
    ///
    /// Implementation specific, e.g. an action outside the action space.
    fn step(
        &mut self,
        action: Action<Self>,
    ) -> Result<Step<Observation<Self>, Self::Info>, Self::Error>;

    fn action_space(&self) -> &Self::ActionSpace;

    fn observation_space(&self) -> &Self::ObservationSpace;
}
