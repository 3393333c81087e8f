use std::collections::HashSet;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    agent::Agent,
    decay::Geometric,
    ds::ValueTable,
    env::Environment,
    exploration::{Choice, EpsilonGreedy},
    memory::Exp,
    util::{argmax_all, ensure_interval, max_value},
    Error, Result,
};

use super::Hashable;

/// Configuration for the [`QTableAgent`]
#[derive(Debug, Clone, PartialEq)]
pub struct QTableAgentConfig {
    /// Learning rate α in `[0,1]`
    ///
    /// **Default**: `0.8`
    pub alpha: f32,
    /// Discount factor γ in `[0,1]`
    ///
    /// **Default**: `0.99`
    pub gamma: f32,
    /// Exploration rate for the first episode
    ///
    /// **Default**: `0.1`
    pub epsilon_start: f32,
    /// Exploration rate floor
    ///
    /// **Default**: `0.01`
    pub epsilon_min: f32,
    /// Factor applied to epsilon after every episode
    ///
    /// **Default**: `0.99`
    pub epsilon_decay: f32,
    /// Value of every action in a state seen for the first time
    ///
    /// **Default**: `0.0`
    pub initial_value: f32,
    /// Seed for action sampling, `None` to seed from system entropy
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for QTableAgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            gamma: 0.99,
            epsilon_start: 0.1,
            epsilon_min: 0.01,
            epsilon_decay: 0.99,
            initial_value: 0.0,
            seed: None,
        }
    }
}

/// A simple Q-learning agent that utilizes a Q-table to learn its environment
///
/// ### Generics
/// - `E` - The [`Environment`] in which the agent will learn
///     - Only the environment's state and action types are used; the agent never looks inside it
///     - Both types must be `Copy`, `Eq`, and `Hash` because states key the table and actions are
///       looked up in the action set
pub struct QTableAgent<E>
where
    E: Environment,
    E::State: Hashable,
    E::Action: Hashable,
{
    q_table: ValueTable<E::State>,
    actions: Vec<E::Action>,
    exploration: EpsilonGreedy<Geometric>,
    alpha: f32,   // learning rate
    gamma: f32,   // discount factor
    episode: u32, // current episode
    rng: StdRng,
}

impl<E> QTableAgent<E>
where
    E: Environment,
    E::State: Hashable,
    E::Action: Hashable,
{
    /// Initialize a new `QTableAgent` over a set of legal actions
    ///
    /// ### Parameters
    /// - `actions` - The legal actions, in table column order
    /// - `config` - Learning and exploration hyperparameters
    ///
    /// **Errors** if `actions` is empty or contains duplicates, if `alpha` or `gamma` is not in
    /// the interval `[0,1]`, or if the epsilon schedule is invalid
    pub fn new(actions: Vec<E::Action>, config: QTableAgentConfig) -> Result<Self> {
        let QTableAgentConfig {
            alpha,
            gamma,
            epsilon_start,
            epsilon_min,
            epsilon_decay,
            initial_value,
            seed,
        } = config;

        ensure_interval!(alpha, 0.0, 1.0);
        ensure_interval!(gamma, 0.0, 1.0);
        if actions.is_empty() {
            return Err(Error::invalid("action set is empty"));
        }
        if actions.iter().collect::<HashSet<_>>().len() != actions.len() {
            return Err(Error::invalid("action set contains duplicates"));
        }

        let schedule = Geometric::new(epsilon_decay, epsilon_start, epsilon_min)?;

        Ok(Self {
            q_table: ValueTable::new(actions.len(), initial_value)?,
            actions,
            exploration: EpsilonGreedy::new(schedule)?,
            alpha,
            gamma,
            episode: 0,
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
        })
    }

    pub fn q_table(&self) -> &ValueTable<E::State> {
        &self.q_table
    }

    pub fn actions(&self) -> &[E::Action] {
        &self.actions
    }

    /// Number of completed episodes
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f32 {
        self.exploration.epsilon(self.episode)
    }

    /// Epsilon greedy action selection
    pub fn act(&mut self, state: E::State) -> E::Action {
        match self.exploration.choose(self.episode, &mut self.rng) {
            Choice::Explore => self.actions[self.rng.gen_range(0..self.actions.len())],
            Choice::Exploit => self.best_action(state),
        }
    }

    /// Highest valued action for `state`, with ties broken uniformly at random
    pub fn best_action(&mut self, state: E::State) -> E::Action {
        let ties = argmax_all(self.q_table.get_or_insert(state));
        let ix = ties.choose(&mut self.rng).copied().unwrap_or(0);
        self.actions[ix]
    }

    /// One-step Q-learning update
    ///
    /// Q(s,a) ← (1 - α) Q(s,a) + α (r + γ max<sub>a'</sub> Q(s',a'))
    ///
    /// **Panics** if `exp.action` is not one of the agent's actions
    pub fn learn(&mut self, exp: Exp<E>) {
        let Exp {
            state,
            action,
            next_state,
            reward,
        } = exp;

        let ix = self
            .actions
            .iter()
            .position(|&a| a == action)
            .expect("Action belongs to the agent's action set");

        let max_next_q = max_value(self.q_table.get_or_insert(next_state));
        let new_q_value = reward + self.gamma * max_next_q;

        let q_value = &mut self.q_table.get_or_insert(state)[ix];
        *q_value = (1.0 - self.alpha) * *q_value + self.alpha * new_q_value;
    }

    /// Advance the epsilon schedule by one episode
    pub fn decay_exploration(&mut self) {
        self.episode = self.episode.saturating_add(1);
    }
}

impl<E> Agent<E> for QTableAgent<E>
where
    E: Environment,
    E::State: Hashable,
    E::Action: Hashable,
{
    fn act(&mut self, state: &E::State) -> E::Action {
        QTableAgent::act(self, *state)
    }

    fn best_action(&mut self, state: &E::State) -> E::Action {
        QTableAgent::best_action(self, *state)
    }

    fn learn(&mut self, exp: Exp<E>) {
        QTableAgent::learn(self, exp)
    }

    fn end_episode(&mut self) {
        self.decay_exploration()
    }
}
