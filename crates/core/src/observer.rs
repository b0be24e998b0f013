/// Receives solver events and decides how the iteration should proceed.
///
/// Observers let callers monitor or steer a solver without changing its API,
/// enabling logging, progress reporting, early stopping, or cancellation
/// between iterations.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// solver-specific action and `None` lets the solver continue unchanged.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

/// Runs two observers on every event.
///
/// Both observers always see the event. If both request an action, the
/// first observer's action wins.
#[derive(Debug, Clone, Default)]
pub struct Chain<O1, O2> {
    pub first: O1,
    pub second: O2,
}

impl<O1, O2> Chain<O1, O2> {
    /// Combines two observers.
    pub fn new(first: O1, second: O2) -> Self {
        Self { first, second }
    }
}

impl<E, A, O1, O2> Observer<E, A> for Chain<O1, O2>
where
    O1: Observer<E, A>,
    O2: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let first = self.first.observe(event);
        let second = self.second.observe(event);
        first.or(second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
        Skip,
    }

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        let mut observer = |event: &usize| {
            seen.push(*event);
            (*event >= 2).then_some(Action::Stop)
        };

        assert_eq!(Observer::<usize, Action>::observe(&mut observer, &1), None);
        assert_eq!(
            Observer::<usize, Action>::observe(&mut observer, &2),
            Some(Action::Stop)
        );
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn unit_never_acts() {
        let mut observer = ();
        assert_eq!(Observer::<usize, Action>::observe(&mut observer, &7), None);
    }

    #[test]
    fn chain_runs_both_and_prefers_first() {
        let mut second_calls = 0;
        let first = |_: &usize| Some(Action::Stop);
        let second = |_: &usize| {
            second_calls += 1;
            Some(Action::Skip)
        };

        let mut chain = Chain::new(first, second);
        assert_eq!(
            Observer::<usize, Action>::observe(&mut chain, &0),
            Some(Action::Stop)
        );
        drop(chain);
        assert_eq!(second_calls, 1);
    }
}
