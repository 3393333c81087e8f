use crate::{env::Environment, memory::Exp};

/// A learner that interacts with an [`Environment`] one step at a time
pub trait Agent<E>
where
    E: Environment,
{
    /// Choose an action under the current behavior policy
    fn act(&mut self, state: &E::State) -> E::Action;

    /// Choose an action without exploring
    fn best_action(&mut self, state: &E::State) -> E::Action;

    /// Learn from a single transition
    fn learn(&mut self, exp: Exp<E>);

    /// Signal that an episode has ended
    fn end_episode(&mut self);
}
