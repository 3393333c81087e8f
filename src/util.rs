/// Checks that a numerical value is in the provided interval `[a,b]` and returns
/// early with an [`InvalidConfiguration`](crate::Error::InvalidConfiguration) error if not
///
/// ### Example
/// ```ignore
/// let alpha = 2.0;
/// ensure_interval!(alpha, 0.0, 1.0);
/// ```
/// This will return the error "invalid configuration: `alpha` must be in the interval \[0, 1\], got 2"
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::Error::invalid(format!(
                "`{}` must be in the interval [{}, {}], got {}",
                stringify!($var),
                $a,
                $b,
                $var,
            )));
        }
    };
}

pub(crate) use ensure_interval;

/// Indices of every maximal element of `values`
pub fn argmax_all(values: &[f32]) -> Vec<usize> {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == max)
        .map(|(i, _)| i)
        .collect()
}

/// Largest element of `values`, or `0.0` when empty
pub fn max_value(values: &[f32]) -> f32 {
    values.iter().copied().reduce(f32::max).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn check(alpha: f32) -> crate::Result<()> {
        ensure_interval!(alpha, 0.0, 1.0);
        Ok(())
    }

    #[test]
    fn ensure_interval_functional() {
        assert!(check(0.0).is_ok());
        assert!(check(1.0).is_ok());
        assert!(matches!(check(1.5), Err(Error::InvalidConfiguration(_))));
        assert!(check(f32::NAN).is_err(), "NaN is rejected");
    }

    #[test]
    fn argmax_all_finds_ties() {
        assert_eq!(argmax_all(&[1.0, 3.0, 3.0, -1.0]), vec![1, 2]);
        assert_eq!(argmax_all(&[0.0; 4]), vec![0, 1, 2, 3]);
        assert_eq!(argmax_all(&[-5.0, -2.0]), vec![1]);
    }

    #[test]
    fn max_value_functional() {
        assert_eq!(max_value(&[-3.0, -1.0, -2.0]), -1.0);
        assert_eq!(max_value(&[]), 0.0);
    }
}
