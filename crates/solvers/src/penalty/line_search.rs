/// Sufficient-decrease constant for the Armijo condition.
const ARMIJO: f64 = 1e-4;

/// Maximum number of step halvings before giving up.
const MAX_HALVINGS: usize = 60;

/// An accepted line-search step.
#[derive(Debug, Clone)]
pub(super) struct Step {
    pub(super) x: Vec<f64>,
    pub(super) value: f64,
}

/// Backtracks from `alpha` until `f(x + α d)` satisfies the Armijo condition.
///
/// `slope` is the directional derivative `∇f(x)ᵀd` and must be negative.
/// Trial points with non-finite values are rejected. Returns `None` if no
/// acceptable step is found or the step no longer changes `x`.
pub(super) fn backtrack<F>(
    f: F,
    x: &[f64],
    value: f64,
    direction: &[f64],
    slope: f64,
    mut alpha: f64,
) -> Option<Step>
where
    F: Fn(&[f64]) -> f64,
{
    let mut trial = vec![0.0; x.len()];

    for _ in 0..MAX_HALVINGS {
        for ((t, xi), di) in trial.iter_mut().zip(x).zip(direction) {
            *t = xi + alpha * di;
        }
        if trial == x {
            return None;
        }

        let trial_value = f(&trial);
        if trial_value.is_finite() && trial_value <= value + ARMIJO * alpha * slope {
            return Some(Step {
                x: trial,
                value: trial_value,
            });
        }

        alpha *= 0.5;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn accepts_full_step_on_well_scaled_quadratic() {
        let f = |x: &[f64]| (x[0] - 1.0).powi(2);
        let step = backtrack(f, &[0.0], 1.0, &[1.0], -2.0, 1.0).unwrap();

        assert_relative_eq!(step.x[0], 1.0);
        assert_relative_eq!(step.value, 0.0);
    }

    #[test]
    fn halves_overlong_steps() {
        let f = |x: &[f64]| (x[0] - 1.0).powi(2);
        let step = backtrack(f, &[0.0], 1.0, &[8.0], -16.0, 1.0).unwrap();

        // α = 0.25 reaches x = 2, which only matches the start value; the
        // next halving lands on the minimum.
        assert_relative_eq!(step.x[0], 1.0);
        assert_relative_eq!(step.value, 0.0);
    }

    #[test]
    fn rejects_non_finite_trials() {
        let f = |x: &[f64]| if x[0] > 0.5 { f64::NAN } else { -x[0] };
        let step = backtrack(f, &[0.0], 0.0, &[1.0], -1.0, 1.0).unwrap();

        assert!(step.x[0] <= 0.5);
        assert!(step.value.is_finite());
    }

    #[test]
    fn fails_on_ascent_direction() {
        let f = |x: &[f64]| x[0];
        assert!(backtrack(f, &[0.0], 0.0, &[1.0], -1.0, 1.0).is_none());
    }
}
