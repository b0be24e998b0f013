use finopt_core::{Goal, Observer};

use crate::traits::{CanStopEarly, HasObjective};

/// Stops a solver once the objective is at least as good as a target.
///
/// Useful for "good enough" solves: the solver reports
/// `StoppedByObserver` with the first iterate that reaches the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub goal: Goal,
    pub objective: f64,
}

impl Target {
    #[must_use]
    pub fn new(goal: Goal, objective: f64) -> Self {
        Self { goal, objective }
    }

    /// Returns `true` if `value` reaches the target.
    #[must_use]
    pub fn is_reached(&self, value: f64) -> bool {
        self.goal.transform(value) <= self.goal.transform(self.objective)
    }
}

impl<E, A> Observer<E, A> for Target
where
    E: HasObjective,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.is_reached(event.objective()).then(A::stop_early)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Stop;

    impl CanStopEarly for Stop {
        fn stop_early() -> Self {
            Stop
        }
    }

    struct Event(f64);

    impl HasObjective for Event {
        fn objective(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn stops_when_the_target_is_reached() {
        let mut low = Target::new(Goal::Minimize, 1.0);
        assert_eq!(low.observe(&Event(1.5)), None::<Stop>);
        assert_eq!(low.observe(&Event(1.0)), Some(Stop));

        let mut high = Target::new(Goal::Maximize, 0.1);
        assert_eq!(high.observe(&Event(0.05)), None::<Stop>);
        assert_eq!(high.observe(&Event(0.12)), Some(Stop));
        assert!(!high.is_reached(f64::NAN));
    }
}
