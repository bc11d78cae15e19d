use crate::space::Space;
use fastrand::Rng;

/// Anything that picks an action from an observation.
pub trait Policy<O, S: Space> {
    fn act(&mut self, observation: &O, action_space: &S) -> S::Element;
}

/// Samples the action space uniformly; reproducible when seeded.
pub struct RandomPolicy {
    rng: Rng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self { rng: Rng::new() }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Rng::with_seed(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, S: Space> Policy<O, S> for RandomPolicy {
    fn act(&mut self, _observation: &O, action_space: &S) -> S::Element {
        action_space.sample(&mut self.rng)
    }
}

/// Always plays the same action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantPolicy<A>(pub A);

impl<O, S, A> Policy<O, S> for ConstantPolicy<A>
where
    S: Space<Element = A>,
    A: Clone,
{
    fn act(&mut self, _observation: &O, _action_space: &S) -> S::Element {
        self.0.clone()
    }
}
