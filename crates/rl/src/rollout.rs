//! Episode driver.

use crate::env::{Env, Observation, Step};
use crate::policy::Policy;
use tracing::{debug, info};

/// Outcome of one episode played by [`run_episode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub total_reward: f64,
    pub terminated: bool,
    pub truncated: bool,
}

/// Resets `env` and steps it with actions from `policy` until the episode
/// terminates, the environment truncates it, or `max_steps` actions have been
/// played. Hitting `max_steps` is reported as truncation.
///
/// # Errors
///
/// Propagates the first error returned by [`Env::reset`] or [`Env::step`].
pub fn run_episode<E, P>(
    env: &mut E,
    policy: &mut P,
    seed: Option<u64>,
    options: E::Options,
    max_steps: Option<usize>,
) -> Result<EpisodeSummary, E::Error>
where
    E: Env,
    P: Policy<Observation<E>, E::ActionSpace> + ?Sized,
{
    let (mut observation, _info) = env.reset(seed, options)?;
    let mut summary = EpisodeSummary {
        steps: 0,
        total_reward: 0.0,
        terminated: false,
        truncated: false,
    };

    loop {
        if max_steps.is_some_and(|limit| summary.steps >= limit) {
            summary.truncated = true;
            debug!("Episode truncated after {} steps", summary.steps);
            break;
        }

        let action = policy.act(&observation, env.action_space());
        let Step {
            observation: next,
            reward,
            terminated,
            truncated,
            ..
        } = env.step(action)?;

        summary.steps += 1;
        summary.total_reward += reward;
        observation = next;

        if terminated || truncated {
            summary.terminated = terminated;
            summary.truncated = truncated;
            break;
        }
    }

    info!(
        "Episode finished after {} steps, total reward {:.2}",
        summary.steps, summary.total_reward
    );
    Ok(summary)
}
