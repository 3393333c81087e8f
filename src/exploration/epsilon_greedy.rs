use rand::Rng;

use crate::{decay::Decay, util::ensure_interval, Result};

use super::Choice;

/// Epsilon greedy exploration policy with an episode-decaying epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    ///
    /// **Errors** if the schedule starts or settles outside the interval `[0,1]`
    pub fn new(decay: D) -> Result<Self> {
        let start = decay.evaluate(0.0);
        let end = decay.evaluate(f32::INFINITY);
        ensure_interval!(start, 0.0, 1.0);
        ensure_interval!(end, 0.0, 1.0);
        Ok(Self { epsilon: decay })
    }

    /// Epsilon threshold for a given episode
    pub fn epsilon(&self, episode: u32) -> f32 {
        self.epsilon.evaluate(episode as f32)
    }

    /// Invoke epsilon greedy policy for current episode
    ///
    /// Explores with probability epsilon, so `0` never explores and `1` always does.
    pub fn choose<R: Rng + ?Sized>(&self, episode: u32, rng: &mut R) -> Choice {
        if rng.gen::<f32>() < self.epsilon(episode) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::decay::Geometric;

    fn fixed(epsilon: f32) -> Geometric {
        Geometric::new(1.0, epsilon, epsilon).unwrap()
    }

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(3);
        let never = EpsilonGreedy::new(fixed(0.0)).unwrap();
        let always = EpsilonGreedy::new(fixed(1.0)).unwrap();
        for episode in 0..1000 {
            assert_eq!(never.choose(episode, &mut rng), Choice::Exploit);
            assert_eq!(always.choose(episode, &mut rng), Choice::Explore);
        }
    }

    #[test]
    fn rejects_out_of_range_schedules() {
        assert!(EpsilonGreedy::new(fixed(1.5)).is_err());
        assert!(EpsilonGreedy::new(fixed(-0.1)).is_err());
        assert!(EpsilonGreedy::new(Geometric::new(0.99, 2.0, 0.01).unwrap()).is_err());
    }

    #[test]
    fn epsilon_follows_schedule() {
        let policy = EpsilonGreedy::new(Geometric::new(0.5, 0.8, 0.1).unwrap()).unwrap();
        assert_eq!(policy.epsilon(0), 0.8);
        assert_eq!(policy.epsilon(1), 0.4);
        assert_eq!(policy.epsilon(10), 0.1);
    }
}
