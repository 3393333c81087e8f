use strum::IntoStaticStr;

/// How an episode ended
#[derive(IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// The agent reached the goal
    Goal,
    /// The agent entered a hazard
    Hazard,
    /// The step cap was hit before any terminal state
    Truncated,
}

impl Outcome {
    /// Lowercase name, e.g. `"goal"`, for logs and CSV output
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This base trait represents the common case of a discrete-time, deterministic-reset MDP
/// with one agent.
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Update the environment in response to an action taken by an agent
    ///
    /// **Returns** `(next_state, reward, done)`
    fn step(&mut self, action: Self::Action) -> (Self::State, f32, bool);

    /// Reset the environment to an initial state
    ///
    /// **Returns** the state
    fn reset(&mut self) -> Self::State;

    /// The kind of terminal state the environment is currently in, or `None` while active
    fn outcome(&self) -> Option<Outcome>;
}

/// An environment with a finite, fixed set of actions
pub trait DiscreteActionSpace: Environment {
    /// Get the legal actions
    ///
    /// The returned vector should never be empty.
    fn actions(&self) -> Vec<Self::Action>;
}
