#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Reinforcement Learning Environment Contract
//!
//! The small amount of framework an environment needs to plug into: the
//! [`Env`] trait with its reset/step contract, the [`Space`]s that describe
//! valid actions and observations, simple [`Policy`] implementations and a
//! [`run_episode`] driver that plays one episode to completion.
//!
//! Training algorithms are deliberately absent; anything that can pick an
//! action from an observation can drive an environment through [`Policy`].

pub mod env;
pub mod policy;
pub mod rollout;
pub mod space;

pub use env::{Action, Env, Observation, Step};
pub use policy::{ConstantPolicy, Policy, RandomPolicy};
pub use rollout::{run_episode, EpisodeSummary};
pub use space::{BoxSpace, Discrete, Space};
