use rand::{SeedableRng, rngs::StdRng};

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Evaluates `f` on every item, preserving order.
///
/// Runs on the rayon pool when the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub(crate) fn evaluate_all<T, F>(items: &[T], f: F) -> Vec<f64>
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync + Send,
{
    use rayon::prelude::*;

    items.par_iter().map(f).collect()
}

/// Evaluates `f` on every item, preserving order.
#[cfg(not(feature = "parallel"))]
pub(crate) fn evaluate_all<T, F>(items: &[T], f: F) -> Vec<f64>
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync + Send,
{
    items.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;

    #[test]
    fn seeded_generators_repeat() {
        let mut first = rng_from_seed(Some(9));
        let mut second = rng_from_seed(Some(9));

        let a: Vec<f64> = (0..4).map(|_| first.random()).collect();
        let b: Vec<f64> = (0..4).map(|_| second.random()).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn evaluation_keeps_input_order() {
        let items: Vec<f64> = (0..257).map(f64::from).collect();
        let squares = evaluate_all(&items, |x| x * x);

        assert_eq!(squares.len(), items.len());
        assert!(squares.iter().zip(&items).all(|(s, x)| *s == x * x));
    }
}
