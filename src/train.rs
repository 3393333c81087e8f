use std::fmt::Debug;

use log::{debug, info, trace};

use crate::{
    agent::Agent,
    decay::{Decay, Linear},
    env::{Environment, Outcome},
    memory::Exp,
    Error, Result,
};

/// Step cap for greedy rollouts when the trainer itself is uncapped
const DEFAULT_ROLLOUT_CAP: u32 = 100;

/// Episodes between progress reports in [`Trainer::train`]
const REPORT_EVERY: u32 = 100;

/// Configuration for [`RewardShaping`]
#[derive(Debug, Clone, PartialEq)]
pub struct RewardShapingConfig {
    /// Added to every raw reward
    ///
    /// **Default**: `-1.0`
    pub step_penalty: f32,
    /// Bonus for reaching the goal in zero steps
    ///
    /// **Default**: `100.0`
    pub goal_reward_base: f32,
    /// Bonus lost per step taken, the bonus never drops below zero
    ///
    /// **Default**: `5.0`
    pub goal_reward_decay: f32,
    /// Pay the bonus on every terminal state, hazards included
    ///
    /// **Default**: `false`
    pub bonus_on_any_terminal: bool,
}

impl Default for RewardShapingConfig {
    fn default() -> Self {
        Self {
            step_penalty: -1.0,
            goal_reward_base: 100.0,
            goal_reward_decay: 5.0,
            bonus_on_any_terminal: false,
        }
    }
}

/// Modifies raw environment rewards with a per-step penalty and a step-decaying terminal bonus
#[derive(Debug, Clone, PartialEq)]
pub struct RewardShaping {
    step_penalty: f32,
    goal_bonus: Linear,
    bonus_on_any_terminal: bool,
}

impl RewardShaping {
    /// **Errors** if the goal reward base is negative or the decay per step is negative
    pub fn new(config: RewardShapingConfig) -> Result<Self> {
        Ok(Self {
            step_penalty: config.step_penalty,
            goal_bonus: Linear::new(config.goal_reward_decay, config.goal_reward_base, 0.0)?,
            bonus_on_any_terminal: config.bonus_on_any_terminal,
        })
    }

    /// Shaping that leaves rewards untouched
    pub fn none() -> Self {
        Self {
            step_penalty: 0.0,
            goal_bonus: Linear::default(),
            bonus_on_any_terminal: false,
        }
    }

    /// Terminal bonus after `steps` steps: max(0, base - steps * decay)
    pub fn goal_bonus(&self, steps: u32) -> f32 {
        self.goal_bonus.evaluate(steps as f32)
    }

    /// Shape the raw reward of the `steps`-th step of an episode
    ///
    /// `outcome` is the terminal state just entered, if any.
    pub fn shape(&self, reward: f32, steps: u32, outcome: Option<Outcome>) -> f32 {
        let bonus = match outcome {
            Some(Outcome::Goal) => self.goal_bonus(steps),
            Some(Outcome::Hazard) if self.bonus_on_any_terminal => self.goal_bonus(steps),
            _ => 0.0,
        };
        reward + self.step_penalty + bonus
    }
}

/// Summary of one episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Episode {
    /// Steps taken, clipped moves included
    pub steps: u32,
    /// Sum of shaped rewards
    pub total_reward: f32,
    pub outcome: Outcome,
}

/// Configuration for the [`Trainer`]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    pub shaping: RewardShapingConfig,
    /// Truncate episodes after this many steps, `None` runs every episode to a terminal state
    ///
    /// **Default**: `Some(1000)`
    pub max_steps: Option<u32>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            shaping: RewardShapingConfig::default(),
            max_steps: Some(1000),
        }
    }
}

/// Drives an [`Agent`] through episodes of an [`Environment`]
#[derive(Debug, Clone)]
pub struct Trainer {
    shaping: RewardShaping,
    max_steps: Option<u32>,
}

impl Trainer {
    /// **Errors** if the shaping is invalid or `max_steps` is `Some(0)`
    pub fn new(config: TrainerConfig) -> Result<Self> {
        if config.max_steps == Some(0) {
            return Err(Error::invalid("max_steps must be positive"));
        }
        Ok(Self {
            shaping: RewardShaping::new(config.shaping)?,
            max_steps: config.max_steps,
        })
    }

    pub fn shaping(&self) -> &RewardShaping {
        &self.shaping
    }

    pub fn max_steps(&self) -> Option<u32> {
        self.max_steps
    }

    /// Run one learning episode, then decay the agent's exploration once
    pub fn run_episode<E, A>(&self, agent: &mut A, env: &mut E) -> Episode
    where
        E: Environment,
        E::State: Clone + Debug,
        E::Action: Clone + Debug,
        A: Agent<E>,
    {
        let episode = self.run(agent, env, true, self.max_steps);
        agent.end_episode();
        episode
    }

    /// Run `episodes` learning episodes, logging progress
    pub fn train<E, A>(&self, agent: &mut A, env: &mut E, episodes: u32) -> Vec<Episode>
    where
        E: Environment,
        E::State: Clone + Debug,
        E::Action: Clone + Debug,
        A: Agent<E>,
    {
        let mut history = Vec::with_capacity(episodes as usize);
        for i in 1..=episodes {
            let episode = self.run_episode(agent, env);
            debug!(
                "episode {i}: {} after {} steps, total reward {}",
                episode.outcome.as_str(),
                episode.steps,
                episode.total_reward
            );
            history.push(episode);

            if i % REPORT_EVERY == 0 || i == episodes {
                let recent = &history[history.len().saturating_sub(REPORT_EVERY as usize)..];
                let n = recent.len() as f32;
                let goals = recent.iter().filter(|e| e.outcome == Outcome::Goal).count();
                let mean_reward = recent.iter().map(|e| e.total_reward).sum::<f32>() / n;
                let mean_steps = recent.iter().map(|e| e.steps as f32).sum::<f32>() / n;
                info!(
                    "episodes {i}/{episodes}: goal rate {:.2}, mean reward {mean_reward:.1}, mean steps {mean_steps:.1}",
                    goals as f32 / n
                );
            }
        }
        history
    }

    /// Follow the agent's greedy policy from the initial state without learning
    ///
    /// Capped by `max_steps`, or by 100 steps when the trainer is uncapped.
    pub fn greedy_rollout<E, A>(&self, agent: &mut A, env: &mut E) -> Episode
    where
        E: Environment,
        E::State: Clone + Debug,
        E::Action: Clone + Debug,
        A: Agent<E>,
    {
        let cap = self.max_steps.unwrap_or(DEFAULT_ROLLOUT_CAP);
        self.run(agent, env, false, Some(cap))
    }

    fn run<E, A>(&self, agent: &mut A, env: &mut E, learn: bool, cap: Option<u32>) -> Episode
    where
        E: Environment,
        E::State: Clone + Debug,
        E::Action: Clone + Debug,
        A: Agent<E>,
    {
        let mut state = env.reset();
        let mut steps = 0;
        let mut total_reward = 0.0;

        let outcome = loop {
            let action = if learn {
                agent.act(&state)
            } else {
                agent.best_action(&state)
            };
            let (next_state, raw, done) = env.step(action.clone());
            steps += 1;

            // environments report an outcome whenever they report `done`
            let terminal = done.then(|| env.outcome().unwrap_or(Outcome::Hazard));
            let reward = self.shaping.shape(raw, steps, terminal);
            total_reward += reward;
            trace!("step {steps}: {state:?} --{action:?}--> {next_state:?}, reward {reward}");

            if learn {
                agent.learn(Exp {
                    state,
                    action,
                    next_state: next_state.clone(),
                    reward,
                });
            }
            state = next_state;

            if let Some(outcome) = terminal {
                break outcome;
            }
            if cap.is_some_and(|cap| steps >= cap) {
                break Outcome::Truncated;
            }
        };

        Episode {
            steps,
            total_reward,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        algo::{QTableAgent, QTableAgentConfig},
        env::tests::MockEnv,
    };

    fn agent(seed: u64) -> QTableAgent<MockEnv> {
        QTableAgent::new(
            vec![-1, 1],
            QTableAgentConfig {
                alpha: 0.5,
                gamma: 0.9,
                epsilon_start: 0.5,
                seed: Some(seed),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn goal_bonus_decays_linearly() {
        let shaping = RewardShaping::new(RewardShapingConfig::default()).unwrap();
        assert_eq!(shaping.goal_bonus(3), 85.0);
        assert_eq!(shaping.goal_bonus(20), 0.0);
        assert_eq!(shaping.goal_bonus(40), 0.0, "bonus floored at zero");
    }

    #[test]
    fn shaping_arithmetic() {
        let shaping = RewardShaping::new(RewardShapingConfig::default()).unwrap();
        assert_eq!(shaping.shape(0.0, 1, None), -1.0, "step penalty");
        assert_eq!(shaping.shape(100.0, 3, Some(Outcome::Goal)), 184.0);
        assert_eq!(shaping.shape(-100.0, 3, Some(Outcome::Hazard)), -101.0);
        assert_eq!(shaping.shape(0.0, 3, Some(Outcome::Truncated)), -1.0);

        let legacy = RewardShaping::new(RewardShapingConfig {
            bonus_on_any_terminal: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(legacy.shape(-100.0, 3, Some(Outcome::Hazard)), -16.0);

        assert_eq!(RewardShaping::none().shape(1.0, 3, Some(Outcome::Goal)), 1.0);
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(Trainer::new(TrainerConfig {
            max_steps: Some(0),
            ..Default::default()
        })
        .is_err());
        assert!(RewardShaping::new(RewardShapingConfig {
            goal_reward_base: -1.0,
            ..Default::default()
        })
        .is_err());
        assert!(RewardShaping::new(RewardShapingConfig {
            goal_reward_decay: -5.0,
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn episode_decays_exploration_once() {
        let trainer = Trainer::new(TrainerConfig::default()).unwrap();
        let mut env = MockEnv::new(3);
        let mut agent = agent(1);

        let episode = trainer.run_episode(&mut agent, &mut env);
        assert_eq!(agent.episode(), 1);
        assert!(matches!(episode.outcome, Outcome::Goal | Outcome::Hazard));
        assert!(episode.steps >= 1);
    }

    #[test]
    fn step_cap_truncates() {
        let trainer = Trainer::new(TrainerConfig {
            max_steps: Some(4),
            ..Default::default()
        })
        .unwrap();
        let mut env = MockEnv::new(1000);
        let mut agent = agent(2);

        for episode in trainer.train(&mut agent, &mut env, 20) {
            assert!(episode.steps <= 4);
            if episode.outcome == Outcome::Truncated {
                assert_eq!(episode.steps, 4);
                assert_eq!(episode.total_reward, -4.0, "no bonus on truncation");
            }
        }
        assert_eq!(agent.episode(), 20);
    }

    #[test]
    fn learns_short_corridor() {
        let trainer = Trainer::new(TrainerConfig::default()).unwrap();
        let mut env = MockEnv::new(3);
        let mut agent = agent(3);

        let history = trainer.train(&mut agent, &mut env, 300);
        assert_eq!(history.len(), 300);

        let rollout = trainer.greedy_rollout(&mut agent, &mut env);
        assert_eq!(rollout.outcome, Outcome::Goal);
        assert_eq!(rollout.steps, 3);
        assert_eq!(rollout.total_reward, -3.0 + 1.0 + 85.0);
        assert_eq!(agent.episode(), 300, "rollout does not decay exploration");
    }
}
