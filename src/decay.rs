use crate::{Error, Result};

/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f32) -> f32;
}

fn validate(vi: f32, vf: f32) -> Result<()> {
    (vi >= vf)
        .then_some(())
        .ok_or_else(|| Error::invalid(format!("start value {vi} is below end value {vf}")))
}

/// v(t) = max(v<sub>i</sub> * r<sup>floor(t)</sup>, v<sub>f</sub>)
///
/// Equivalent to multiplying the value by `r` once per unit of time and flooring it at `vf`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometric {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Geometric {
    /// **Errors** if `rate` is not in `(0, 1]` or `vi < vf`
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(Error::invalid(format!(
                "geometric decay rate must be in (0, 1], got {rate}"
            )));
        }
        validate(vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Geometric {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { rate, vi, vf } = self;
        (vi * rate.powf(t.floor())).max(vf)
    }
}

/// v(t) = max(v<sub>i</sub> - rt, v<sub>f</sub>)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linear {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Linear {
    /// **Errors** if `rate` is negative or `vi < vf`
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        if !(rate >= 0.0) {
            return Err(Error::invalid(format!(
                "linear decay rate must be non-negative, got {rate}"
            )));
        }
        validate(vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { rate, vi, vf } = self;
        (vi - rate * t).max(vf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_functional() {
        assert!(validate(1.0, 0.0).is_ok());
        assert!(validate(1.0, 1.0).is_ok());
        assert!(validate(-1.0, 0.0).is_err());
    }

    #[test]
    fn geometric_decay() {
        let x = Geometric::new(0.5, 2.0, 0.3).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(0.75), 2.0);
        assert_eq!(x.evaluate(1.0), 1.0);
        assert_eq!(x.evaluate(2.0), 0.5);
        assert_eq!(x.evaluate(3.0), 0.3, "floored at end value");
    }

    #[test]
    fn geometric_rejects_bad_rate() {
        assert!(Geometric::new(0.0, 1.0, 0.0).is_err());
        assert!(Geometric::new(1.5, 1.0, 0.0).is_err());
        assert!(Geometric::new(0.9, 0.1, 0.5).is_err());
    }

    #[test]
    fn linear_decay() {
        let x = Linear::new(0.5, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 1.5);
        assert_eq!(x.evaluate(10.0), 0.5);
        assert!(Linear::new(-1.0, 2.0, 0.0).is_err());
    }
}
