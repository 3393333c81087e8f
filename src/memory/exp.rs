use crate::env::Environment;

/// Represents a single experience or transition in the environment
pub struct Exp<E: Environment> {
    /// The state of the environment before taking the action
    pub state: E::State,
    /// The action taken in the given state
    pub action: E::Action,
    /// The state of the environment after the action is taken, terminal or not
    pub next_state: E::State,
    /// The (possibly shaped) reward received after taking the action
    pub reward: f32,
}

impl<E> Clone for Exp<E>
where
    E: Environment,
    E::State: Clone,
    E::Action: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            action: self.action.clone(),
            next_state: self.next_state.clone(),
            reward: self.reward,
        }
    }
}

impl<E> std::fmt::Debug for Exp<E>
where
    E: Environment,
    E::State: std::fmt::Debug,
    E::Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exp")
            .field("state", &self.state)
            .field("action", &self.action)
            .field("next_state", &self.next_state)
            .field("reward", &self.reward)
            .finish()
    }
}
